//! Functional options for clients and requests.
//!
//! # Design
//! Both option kinds are plain mutator closures applied left to right, so a
//! later option overrides an earlier one that touches the same field. New
//! behaviors are added by writing new constructor functions; neither
//! `HttpClient` nor `Request` needs to change. Request options are shared
//! (`Arc`) so one option list can be reused across calls.

use std::sync::Arc;
use std::time::Duration;

use crate::client::HttpClient;
use crate::config::{
    HEADER_ACCEPT, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, MIME_APPLICATION_JSON,
    MIME_APPLICATION_XML,
};
use crate::context::Context;
use crate::header::Header;
use crate::http::Request;

/// Applied once to a client at construction.
pub type ClientOption = Box<dyn FnOnce(&mut HttpClient) + Send>;

/// Applied to every request it is passed with, just before dispatch.
pub type RequestOption = Arc<dyn Fn(&mut Request) + Send + Sync>;

/// Set the transport timeout. Has no effect on a client without a transport.
pub fn with_timeout(timeout: Duration) -> ClientOption {
    Box::new(move |client: &mut HttpClient| {
        if let Some(transport) = client.transport_mut() {
            transport.set_timeout(Some(timeout));
        }
    })
}

pub fn with_context(context: Context) -> RequestOption {
    Arc::new(move |req: &mut Request| req.set_context(context.clone()))
}

/// Append a header. Repeated keys are kept as separate entries.
pub fn with_header(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let key = key.into();
    let value = value.into();
    Arc::new(move |req: &mut Request| req.add_header(Header::single(key.clone(), value.clone())))
}

pub fn with_accept_json() -> RequestOption {
    with_header(HEADER_ACCEPT, MIME_APPLICATION_JSON)
}

pub fn with_content_type_json() -> RequestOption {
    with_header(HEADER_CONTENT_TYPE, MIME_APPLICATION_JSON)
}

pub fn with_content_type_xml() -> RequestOption {
    with_header(HEADER_CONTENT_TYPE, MIME_APPLICATION_XML)
}

/// `Authorization: Bearer <token>`.
pub fn with_bearer_token(token: &str) -> RequestOption {
    with_header(HEADER_AUTHORIZATION, format!("Bearer {token}"))
}

pub(crate) fn apply(request: &mut Request, options: &[RequestOption]) {
    for opt in options {
        opt(request);
    }
}
