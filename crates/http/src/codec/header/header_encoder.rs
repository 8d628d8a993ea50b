//! HTTP header encoder implementation for serializing HTTP response headers
//!
//! Writes the status line and header block of a response, making sure the
//! `Content-Length` header agrees with the payload that follows.

use crate::protocol::{PayloadSize, ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use http::{Version, header};
use std::io;
use std::io::{ErrorKind, Write};
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for HTTP response headers implementing the [`Encoder`] trait.
///
/// A payload of known length always gets a matching `Content-Length`; an empty
/// payload is written with exactly the headers the response already carries.
#[derive(Debug)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes HTTP response headers into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - HTTP version is not supported (only HTTP/1.1 supported)
    /// - Writing to buffer fails
    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut header, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        match header.version() {
            Version::HTTP_11 => {
                write!(
                    FastWrite(dst),
                    "HTTP/1.1 {} {}\r\n",
                    header.status().as_str(),
                    header.status().canonical_reason().unwrap_or_default()
                )?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(io::Error::from(ErrorKind::Unsupported).into());
            }
        }

        if let PayloadSize::Length(n) = payload_size {
            header.headers_mut().insert(header::CONTENT_LENGTH, n.into());
        }

        for (header_name, header_value) in header.headers() {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Writes formatted output straight into the reserved `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Response, StatusCode};

    fn encode(head: ResponseHead, payload_size: PayloadSize) -> String {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode((head, payload_size), &mut dst).unwrap();
        String::from_utf8(dst.to_vec()).unwrap()
    }

    #[test]
    fn bodyless_without_headers() {
        let head = Response::builder().status(StatusCode::NOT_FOUND).body(()).unwrap();

        assert_eq!(encode(head, PayloadSize::Empty), "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn created_status_line() {
        let head = Response::builder().status(StatusCode::CREATED).body(()).unwrap();

        assert_eq!(encode(head, PayloadSize::Empty), "HTTP/1.1 201 Created\r\n\r\n");
    }

    #[test]
    fn content_length_follows_payload() {
        let head = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::CONTENT_LENGTH, 99)
            .body(())
            .unwrap();

        assert_eq!(encode(head, PayloadSize::Length(3)), "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 3\r\n\r\n");
    }

    #[test]
    fn empty_payload_keeps_supplied_headers() {
        let head = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::CONTENT_LENGTH, 0)
            .body(())
            .unwrap();

        assert_eq!(encode(head, PayloadSize::Empty), "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 0\r\n\r\n");
    }

    #[test]
    fn reject_http_10_response() {
        let head = Response::builder().version(Version::HTTP_10).status(StatusCode::OK).body(()).unwrap();

        let mut dst = BytesMut::new();
        assert!(HeaderEncoder.encode((head, PayloadSize::Empty), &mut dst).is_err());
    }
}
