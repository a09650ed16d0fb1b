//! Owned byte streams for request and response payloads.
//!
//! A response `Body` is the live stream handed over by the transport. It is
//! not buffered; reading it to the end and dropping it (or calling `close`)
//! releases the underlying connection.

use std::fmt;
use std::io::{self, Read};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

pub struct Body {
    reader: Box<dyn Read + Send>,
}

impl Body {
    pub fn empty() -> Self {
        Self::from_reader(io::empty())
    }

    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Serialize `value` as a JSON payload.
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        let data = serde_json::to_vec(value)?;
        Ok(Self::from(data))
    }

    pub fn bytes(mut self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn text(mut self) -> Result<String, Error> {
        let mut buf = String::new();
        self.reader.read_to_string(&mut buf)?;
        Ok(buf)
    }

    /// Read the remaining stream and decode it as JSON.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_reader(self.reader).map_err(Error::from)
    }

    /// Release the stream without reading the rest of it.
    pub fn close(self) {
        drop(self);
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Self::from_reader(io::Cursor::new(data))
    }
}

impl From<String> for Body {
    fn from(data: String) -> Self {
        Self::from(data.into_bytes())
    }
}

impl From<&'static str> for Body {
    fn from(data: &'static str) -> Self {
        Self::from_reader(data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct City {
        city: String,
        country_code: String,
    }

    #[test]
    fn text_reads_whole_stream() {
        let body = Body::from("hello world");
        assert_eq!(body.text().unwrap(), "hello world");
    }

    #[test]
    fn empty_body_has_no_bytes() {
        assert!(Body::empty().bytes().unwrap().is_empty());
    }

    #[test]
    fn json_payload_decodes_back() {
        let city = City {
            city: "Nairobi".to_string(),
            country_code: "KE".to_string(),
        };
        let body = Body::from_json(&city).unwrap();
        let decoded: City = body.json().unwrap();
        assert_eq!(decoded, city);
    }

    #[test]
    fn json_rejects_malformed_payload() {
        let err = Body::from("not json").json::<City>().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn body_is_readable_incrementally() {
        let mut body = Body::from(vec![1u8, 2, 3, 4]);
        let mut first = [0u8; 2];
        body.read_exact(&mut first).unwrap();
        assert_eq!(first, [1, 2]);
        assert_eq!(body.bytes().unwrap(), vec![3, 4]);
    }
}
