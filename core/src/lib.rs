//! A small HTTP client with functional options over a pluggable transport.
//!
//! # Overview
//! `HttpClient` exposes GET/POST/PUT/DELETE. Each call builds a `Request`,
//! applies the caller's `RequestOption`s in order, and hands the result to
//! a `Transport`. The transport's answer comes back as a `Response` holding
//! the originating request, the status, the headers and the live body stream.
//!
//! # Design
//! - All network I/O lives behind the `Transport` trait; `UreqTransport` is
//!   the stock implementation and tests plug in in-memory ones.
//! - Options are plain closures, so new behaviors need no changes here.
//! - Cancellation is explicit: a `Context` travels with every request.
//! - Failures are values. Nothing is retried internally.

pub mod body;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod header;
pub mod http;
pub mod options;
pub mod status;
pub mod transport;

pub use body::Body;
pub use client::HttpClient;
pub use context::{Context, ContextError};
pub use error::{Error, Result};
pub use header::{Header, HeaderMap};
pub use http::{HttpMethod, Request, Response, Status};
pub use options::{
    with_accept_json, with_bearer_token, with_content_type_json, with_content_type_xml,
    with_context, with_header, with_timeout, ClientOption, RequestOption,
};
pub use status::{is_client_error, is_server_error, is_success, raise_for_status};
pub use transport::{
    Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
    UreqTransport,
};
