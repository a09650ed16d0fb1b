//! Shared constants: MIME markers, header names and client defaults.

use std::time::Duration;

pub const MIME_APPLICATION_JSON: &str = "application/json";
pub const MIME_APPLICATION_XML: &str = "application/xml";
pub const MIME_TEXT_XML: &str = "text/xml";

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// Timeout applied by `HttpClient::default_client`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
