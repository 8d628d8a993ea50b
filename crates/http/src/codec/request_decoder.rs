//! HTTP request decoder module
//!
//! Decodes a request in two phases: the header block through [`HeaderDecoder`],
//! then the body through a [`PayloadDecoder`] sized by the header.
//!
//! # Example
//!
//! ```no_run
//! use mini_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET / HTTP/1.1\r\n\r\n");
//! let result = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Message, ParseError, PayloadItem, PayloadSize, RequestHeader};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for HTTP requests that handles both headers and payload
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` field:
/// - `None`: Currently parsing headers
/// - `Some(PayloadDecoder)`: Currently parsing payload
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { header_decoder: HeaderDecoder, payload_decoder: None }
    }
}

impl Decoder for RequestDecoder {
    type Item = Message<(RequestHeader, PayloadSize)>;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded request headers
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload chunk or the end of the body
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // parse payload if have payload_decoder
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let message = match payload_decoder.decode(src)? {
                Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
                Some(item @ PayloadItem::Eof) => {
                    // no need payload decoder in this request now
                    self.payload_decoder.take();
                    Some(Message::Payload(item))
                }
                None => None,
            };

            return Ok(message);
        }

        // parse request
        let message = match self.header_decoder.decode(src)? {
            Some((header, payload_size)) => {
                self.payload_decoder = Some(payload_size.into());
                Some(Message::Header((header, payload_size)))
            }
            None => None,
        };

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use indoc::indoc;

    #[test]
    fn header_then_body_then_eof() {
        let str = indoc! {r##"
        POST /files/foo.txt HTTP/1.1
        Host: localhost:4221
        Content-Length: 11

        hello world"##};

        let mut buf = BytesMut::from(str);
        let mut decoder = RequestDecoder::new();

        let Some(Message::Header((header, payload_size))) = decoder.decode(&mut buf).unwrap() else {
            panic!("expect request header");
        };
        assert_eq!(header.method(), &Method::POST);
        assert_eq!(payload_size, PayloadSize::Length(11));

        let Some(Message::Payload(PayloadItem::Chunk(bytes))) = decoder.decode(&mut buf).unwrap() else {
            panic!("expect body chunk");
        };
        assert_eq!(&bytes[..], b"hello world");

        let Some(Message::Payload(item)) = decoder.decode(&mut buf).unwrap() else {
            panic!("expect body eof");
        };
        assert!(item.is_eof());
        assert!(buf.is_empty());
    }

    #[test]
    fn bodyless_request_ends_immediately() {
        let mut buf = BytesMut::from("GET /user-agent HTTP/1.1\r\nUser-Agent: test-agent/1.0\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buf).unwrap().unwrap().is_header());

        let Some(Message::Payload(item)) = decoder.decode(&mut buf).unwrap() else {
            panic!("expect body eof");
        };
        assert!(item.is_eof());
    }

    #[test]
    fn body_waits_for_more_bytes() {
        let mut buf = BytesMut::from("POST /files/a HTTP/1.1\r\nContent-Length: 4\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buf).unwrap().unwrap().is_header());
        assert!(decoder.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"data");
        let Some(Message::Payload(PayloadItem::Chunk(bytes))) = decoder.decode(&mut buf).unwrap() else {
            panic!("expect body chunk");
        };
        assert_eq!(&bytes[..], b"data");
    }
}
