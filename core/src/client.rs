//! HTTP client with per-verb methods over a pluggable transport.
//!
//! # Design
//! `HttpClient` owns an optional boxed `Transport` and nothing else. Each verb
//! builds a `Request`, runs the request options over it in order, and hands
//! it to `dispatch`, which translates to and from the transport's types and
//! classifies failures. A client without a transport fails every call with
//! `Error::Configuration`; no default is substituted behind the caller's
//! back. Use `default_client` for a ready-made one.

use tracing::{debug, warn};

use crate::body::Body;
use crate::config::DEFAULT_TIMEOUT;
use crate::context::{Context, ContextError};
use crate::error::Error;
use crate::header;
use crate::http::{HttpMethod, Request, Response, Status};
use crate::options::{self, ClientOption, RequestOption};
use crate::transport::{Transport, TransportErrorKind, TransportRequest, UreqTransport};

pub struct HttpClient {
    transport: Option<Box<dyn Transport>>,
}

impl HttpClient {
    /// Build a client over `transport`, applying `options` in order.
    pub fn new<T, I>(transport: T, options: I) -> Self
    where
        T: Transport + 'static,
        I: IntoIterator<Item = ClientOption>,
    {
        Self::from_transport(Some(Box::new(transport)), options)
    }

    /// Like `new`, but the transport may be absent.
    pub fn from_transport<I>(transport: Option<Box<dyn Transport>>, options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut client = Self { transport };
        for opt in options {
            opt(&mut client);
        }
        client
    }

    /// A `UreqTransport` client with `DEFAULT_TIMEOUT`.
    pub fn default_client() -> Self {
        Self::new(UreqTransport::new(), [options::with_timeout(DEFAULT_TIMEOUT)])
    }

    pub fn transport(&self) -> Option<&dyn Transport> {
        self.transport.as_deref()
    }

    pub fn transport_mut(&mut self) -> Option<&mut (dyn Transport + 'static)> {
        self.transport.as_deref_mut()
    }

    pub fn get(&self, ctx: &Context, url: &str, options: &[RequestOption]) -> Result<Response, Error> {
        self.send(HttpMethod::Get, ctx, url, None, options)
    }

    pub fn post(
        &self,
        ctx: &Context,
        url: &str,
        body: Option<Body>,
        options: &[RequestOption],
    ) -> Result<Response, Error> {
        self.send(HttpMethod::Post, ctx, url, body, options)
    }

    pub fn put(
        &self,
        ctx: &Context,
        url: &str,
        body: Option<Body>,
        options: &[RequestOption],
    ) -> Result<Response, Error> {
        self.send(HttpMethod::Put, ctx, url, body, options)
    }

    pub fn delete(
        &self,
        ctx: &Context,
        url: &str,
        body: Option<Body>,
        options: &[RequestOption],
    ) -> Result<Response, Error> {
        self.send(HttpMethod::Delete, ctx, url, body, options)
    }

    fn send(
        &self,
        method: HttpMethod,
        ctx: &Context,
        url: &str,
        body: Option<Body>,
        options: &[RequestOption],
    ) -> Result<Response, Error> {
        let mut request = Request::new(method, url, body, ctx);
        options::apply(&mut request, options);
        self.dispatch(request)
    }

    fn dispatch(&self, mut request: Request) -> Result<Response, Error> {
        let transport = self.transport.as_deref().ok_or(Error::Configuration)?;

        let context = request.context().cloned();
        if let Some(err) = context.as_ref().and_then(Context::err) {
            warn!(method = %request.method(), url = request.url(), %err, "request not sent");
            return Err(Error::request(err));
        }

        debug!(
            method = %request.method(),
            url = request.url(),
            headers = request.headers().len(),
            "dispatching request"
        );
        let native = TransportRequest {
            method: request.method(),
            url: request.url().to_string(),
            headers: header::to_map(request.headers()),
            body: request.take_body(),
            timeout: context.as_ref().and_then(Context::remaining),
            context: context.clone(),
        };

        let res = match transport.round_trip(native) {
            Ok(res) => res,
            Err(err) if err.kind() == TransportErrorKind::Cancelled => {
                let cause = context
                    .as_ref()
                    .and_then(Context::err)
                    .unwrap_or(ContextError::Cancelled);
                warn!(url = request.url(), %cause, "request abandoned");
                return Err(Error::request(cause));
            }
            Err(err) if err.is_connect() => {
                warn!(url = request.url(), %err, "connection refused");
                return Err(Error::ConnectionRefused {
                    message: err.to_string(),
                    source: err,
                });
            }
            Err(err) => {
                warn!(url = request.url(), %err, "request failed");
                return Err(Error::request(err));
            }
        };

        debug!(status = res.status_code, url = request.url(), "response received");
        let status = Status::from_status_line(res.status_code, &res.status_line);
        Ok(Response::new(
            request,
            status,
            header::from_map(res.headers),
            res.body,
        ))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}
