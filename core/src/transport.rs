//! The seam between the client and the code that performs network I/O.
//!
//! # Design
//! `HttpClient` never talks to the network itself. It converts its
//! `Request` into a `TransportRequest` and hands it to a `Transport`, which
//! returns a `TransportResponse` or a `TransportError`. The client looks at
//! the error kind for two things only: whether the connection could not be
//! established, and whether the bound context cut the call short.
//!
//! `UreqTransport` is the stock implementation. Tests substitute in-memory
//! transports. When a request carries a `Context`, the blocking ureq call
//! runs on a worker thread so the caller can be released as soon as the
//! context is cancelled; the response body keeps checking the context on
//! every read.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use ureq::http;

use crate::body::Body;
use crate::context::Context;
use crate::header::{canonical_key, HeaderMap};
use crate::http::HttpMethod;

/// A request in the transport's own terms: headers already grouped by key.
#[derive(Debug)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Body>,
    /// Bound context; transports able to poll may stop early when it fires.
    pub context: Option<Context>,
    /// Upper bound for this call, derived from the context deadline.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct TransportResponse {
    pub status_code: u16,
    /// Combined code and reason, e.g. `"200 OK"`.
    pub status_line: String,
    pub headers: HeaderMap,
    pub body: Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, host unreachable, DNS failure.
    Connect,
    Timeout,
    /// The bound context was cancelled or hit its deadline mid-flight.
    Cancelled,
    InvalidRequest,
    Io,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::InvalidRequest => "invalid request",
            TransportErrorKind::Io => "i/o error",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
#[error("{kind}: {source}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl TransportError {
    pub fn new(
        kind: TransportErrorKind,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn is_connect(&self) -> bool {
        self.kind == TransportErrorKind::Connect
    }
}

/// Performs the actual HTTP exchange.
///
/// Implementations decide their own thread-safety; the client adds none.
pub trait Transport: Send + Sync {
    fn round_trip(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;

    /// Change the overall per-request timeout. `None` removes it.
    fn set_timeout(&mut self, _timeout: Option<Duration>) {}

    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// How often a pending request re-checks its context.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Blocking transport backed by a `ureq::Agent`.
///
/// Non-2xx statuses are returned as responses, never as errors.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            timeout: None,
        }
    }

    fn effective_timeout(&self, requested: Option<Duration>) -> Option<Duration> {
        match (self.timeout, requested) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run<S>(
        &self,
        request: Result<http::Request<S>, http::Error>,
        timeout: Option<Duration>,
        context: Option<&Context>,
    ) -> Result<http::Response<ureq::Body>, TransportError>
    where
        S: ureq::AsSendBody + Send + 'static,
    {
        let request = request.map_err(|e| TransportError::new(TransportErrorKind::InvalidRequest, e))?;
        let request = self
            .agent
            .configure_request(request)
            .timeout_global(timeout)
            .build();
        let Some(ctx) = context else {
            return self.agent.run(request).map_err(classify);
        };

        // The worker is detached on cancellation; it ends when ureq gives up
        // on its own timeout or the peer answers.
        let agent = self.agent.clone();
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("htpclient-ureq".to_string())
            .spawn(move || {
                let _ = tx.send(agent.run(request));
            })
            .map_err(|e| TransportError::new(TransportErrorKind::Io, e))?;

        loop {
            match rx.recv_timeout(CANCEL_POLL_INTERVAL) {
                Ok(result) => return result.map_err(classify),
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(err) = ctx.err() {
                        warn!(%err, "abandoning in-flight request");
                        return Err(TransportError::new(TransportErrorKind::Cancelled, err));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(TransportError::new(
                        TransportErrorKind::Other,
                        "transport worker exited without a result",
                    ));
                }
            }
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn round_trip(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let timeout = self.effective_timeout(request.timeout);
        debug!(?timeout, url = %request.url, "ureq round trip");

        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (key, values) in &request.headers {
            for value in values {
                builder = builder.header(key.as_str(), value.as_str());
            }
        }

        let payload = match request.body {
            Some(body) => Some(
                body.bytes()
                    .map_err(|e| TransportError::new(TransportErrorKind::Io, e))?,
            ),
            None => None,
        };
        let response = match payload {
            Some(bytes) => self.run(builder.body(bytes), timeout, request.context.as_ref())?,
            None => self.run(builder.body(()), timeout, request.context.as_ref())?,
        };

        let (parts, body) = response.into_parts();
        let status_code = parts.status.as_u16();
        let status_line = match parts.status.canonical_reason() {
            Some(reason) => format!("{status_code} {reason}"),
            None => status_code.to_string(),
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &parts.headers {
            headers
                .entry(canonical_key(name.as_str()))
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let reader = body.into_reader();
        let body = match request.context {
            Some(context) => Body::from_reader(ContextReader {
                inner: reader,
                context,
            }),
            None => Body::from_reader(reader),
        };

        Ok(TransportResponse {
            status_code,
            status_line,
            headers,
            body,
        })
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Fails every read once its context is cancelled or past its deadline.
struct ContextReader<R> {
    inner: R,
    context: Context,
}

impl<R: Read> Read for ContextReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(err) = self.context.err() {
            return Err(io::Error::other(err));
        }
        self.inner.read(buf)
    }
}

/// Only failures to establish the connection count as `Connect`; a reset or
/// abort means the peer may already have seen the request.
fn classify(err: ureq::Error) -> TransportError {
    use std::io::ErrorKind;

    let kind = match &err {
        ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => TransportErrorKind::Connect,
        ureq::Error::Io(e)
            if matches!(
                e.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::NotConnected
                    | ErrorKind::AddrNotAvailable
            ) =>
        {
            TransportErrorKind::Connect
        }
        ureq::Error::Io(_) => TransportErrorKind::Io,
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportErrorKind::InvalidRequest,
        _ => TransportErrorKind::Other,
    };
    TransportError::new(kind, err)
}
