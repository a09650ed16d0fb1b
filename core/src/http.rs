//! Request and response data model.
//!
//! # Design
//! `Request` is built by the client's verb methods and then handed to the
//! request options, which may append headers or replace the context. Once
//! dispatched, the body has been moved into the transport and the request
//! itself moves into the `Response` it produced, so every response can be
//! traced back to its originating request.

use std::fmt;

use crate::body::Body;
use crate::config::{HEADER_CONTENT_TYPE, MIME_APPLICATION_JSON, MIME_APPLICATION_XML, MIME_TEXT_XML};
use crate::context::Context;
use crate::error::Error;
use crate::header::{self, Header};
use crate::status;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Request {
    method: HttpMethod,
    url: String,
    headers: Vec<Header>,
    body: Option<Body>,
    context: Option<Context>,
}

impl Request {
    pub(crate) fn new(method: HttpMethod, url: &str, body: Option<Body>, context: &Context) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            body,
            context: Some(context.clone()),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// The payload still waiting to be sent. `None` for body-less requests
    /// and for requests that have already been dispatched.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn add_header(&mut self, header: Header) {
        self.headers.push(header);
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = Some(context);
    }

    pub(crate) fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }
}

/// Response status split into code and reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub reason: String,
}

impl Status {
    /// Build a status from a combined status line such as `"404 Not Found"`.
    /// The leading code and separator are stripped to get the reason; a
    /// line that does not start with the code followed by whitespace (or
    /// nothing) is kept whole as the reason.
    pub fn from_status_line(code: u16, line: &str) -> Self {
        let code_str = code.to_string();
        let reason = match line.strip_prefix(code_str.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                rest.trim_start()
            }
            _ => line.trim(),
        };
        Self {
            code,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

#[derive(Debug)]
pub struct Response {
    request: Request,
    status: Status,
    headers: Vec<Header>,
    body: Body,
}

impl Response {
    pub(crate) fn new(request: Request, status: Status, headers: Vec<Header>, body: Body) -> Self {
        Self {
            request,
            status,
            headers,
            body,
        }
    }

    /// The request that produced this response.
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn method(&self) -> HttpMethod {
        self.request.method()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    /// True when `Content-Type` contains `application/json` anywhere in its
    /// comma-joined values.
    pub fn is_json(&self) -> bool {
        self.content_type_contains(MIME_APPLICATION_JSON)
    }

    /// True when `Content-Type` contains `application/xml` or `text/xml`.
    pub fn is_xml(&self) -> bool {
        self.content_type_contains(MIME_APPLICATION_XML) || self.content_type_contains(MIME_TEXT_XML)
    }

    pub fn raise_for_status(&self) -> Result<(), Error> {
        status::raise_for_status(self)
    }

    fn content_type_contains(&self, mime: &str) -> bool {
        header::find(&self.headers, HEADER_CONTENT_TYPE)
            .join(",")
            .contains(mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(headers: Vec<Header>) -> Response {
        let request = Request::new(HttpMethod::Get, "http://localhost/", None, &Context::background());
        Response::new(
            request,
            Status::from_status_line(200, "200 OK"),
            headers,
            Body::empty(),
        )
    }

    #[test]
    fn reason_is_stripped_from_status_line() {
        let status = Status::from_status_line(404, "404 Not Found");
        assert_eq!(status.code, 404);
        assert_eq!(status.reason, "Not Found");
    }

    #[test]
    fn status_line_without_reason() {
        assert_eq!(Status::from_status_line(200, "200").reason, "");
        assert_eq!(Status::from_status_line(299, "weird").reason, "weird");
    }

    #[test]
    fn code_prefix_must_end_at_separator() {
        assert_eq!(Status::from_status_line(20, "200 OK").reason, "200 OK");
        assert_eq!(Status::from_status_line(200, "2000 Odd").reason, "2000 Odd");
        assert_eq!(Status::from_status_line(200, "200\tOK").reason, "OK");
    }

    #[test]
    fn is_json_matches_substring() {
        let resp = response_with(vec![Header::single(
            "Content-Type",
            "application/json; charset=utf-8",
        )]);
        assert!(resp.is_json());
        assert!(!resp.is_xml());
    }

    #[test]
    fn is_json_false_without_content_type() {
        assert!(!response_with(Vec::new()).is_json());
        let resp = response_with(vec![Header::single("Accept", "application/json")]);
        assert!(!resp.is_json());
    }

    #[test]
    fn is_json_checks_joined_values() {
        let resp = response_with(vec![Header::new(
            "Content-Type",
            vec!["text/plain".to_string(), "application/json".to_string()],
        )]);
        assert!(resp.is_json());
    }

    #[test]
    fn is_xml_accepts_both_xml_types_but_not_html() {
        assert!(response_with(vec![Header::single("Content-Type", "application/xml")]).is_xml());
        assert!(response_with(vec![Header::single("content-type", "text/xml; charset=utf-8")]).is_xml());
        assert!(!response_with(vec![Header::single("Content-Type", "text/html")]).is_xml());
    }

    #[test]
    fn response_method_comes_from_request() {
        assert_eq!(response_with(Vec::new()).method(), HttpMethod::Get);
    }
}
