//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! This module decodes the request line and header block from raw bytes into a
//! [`RequestHeader`], and decides how many body bytes follow it.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header size: 8KB
//! - Only HTTP/1.0 and HTTP/1.1 request lines are accepted
//!
//! # Implementation Details
//!
//! 1. Parse raw bytes using `httparse`
//! 2. Record header name/value byte ranges
//! 3. Convert to a typed `http::Request<()>`
//! 4. Determine the payload size from `Content-Length`
//!
//! Header names and values are sliced out of the frozen header block instead of
//! being copied one by one.

use std::mem::MaybeUninit;

use bytes::BytesMut;
use http::{HeaderName, HeaderValue, Method, Request, Uri, Version};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::{trace, warn};

use crate::ensure;

use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decoder for HTTP request headers implementing the [`Decoder`] trait.
///
/// Yields the parsed [`RequestHeader`] together with the [`PayloadSize`] the
/// body decoder has to consume next.
#[derive(Debug)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode HTTP headers from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((header, payload_size)))` if a complete header block was parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The request line or a header line is malformed
    /// - The number of headers exceeds `MAX_HEADER_NUM`
    /// - The total header size exceeds `MAX_HEADER_BYTES`
    /// - The HTTP version is not supported
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // "GET / HTTP/1.1\r\n" is the shortest request line worth handing to httparse
        if src.len() < 14 {
            return Ok(None);
        }

        let mut req = httparse::Request::new(&mut []);
        let mut headers: [MaybeUninit<httparse::Header<'_>>; MAX_HEADER_NUM] = [MaybeUninit::uninit(); MAX_HEADER_NUM];

        let parsed_result = req.parse_with_uninit_headers(src, &mut headers).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        });

        match parsed_result? {
            Status::Complete(body_offset) => {
                trace!(header_size = body_offset, "parsed header block");
                ensure!(body_offset <= MAX_HEADER_BYTES, ParseError::too_large_header(body_offset, MAX_HEADER_BYTES));

                let header_count = req.headers.len();

                let mut header_index: [HeaderIndex; MAX_HEADER_NUM] = EMPTY_HEADER_INDEX_ARRAY;
                HeaderIndex::record(src, req.headers, &mut header_index);

                let version = match req.version {
                    Some(0) => Version::HTTP_10,
                    Some(1) => Version::HTTP_11,
                    _ => return Err(ParseError::InvalidVersion(req.version)),
                };

                let method = req.method.ok_or(ParseError::InvalidMethod)?;
                let method = Method::from_bytes(method.as_bytes()).map_err(|_| ParseError::InvalidMethod)?;

                let path = req.path.ok_or(ParseError::InvalidUri)?;
                ensure!(path.starts_with('/'), ParseError::InvalidUri);
                let uri = Uri::try_from(path).map_err(|_| ParseError::InvalidUri)?;

                let mut request = Request::new(());
                *request.method_mut() = method;
                *request.uri_mut() = uri;
                *request.version_mut() = version;

                let headers = request.headers_mut();
                headers.reserve(header_count);

                let header_bytes = src.split_to(body_offset).freeze();
                for index in &header_index[..header_count] {
                    let name = HeaderName::from_bytes(&header_bytes[index.name.0..index.name.1])
                        .map_err(ParseError::invalid_header)?;
                    let value = HeaderValue::from_maybe_shared(header_bytes.slice(index.value.0..index.value.1))
                        .map_err(ParseError::invalid_header)?;

                    // a repeated name replaces the earlier value
                    headers.insert(name, value);
                }

                let header = RequestHeader::from(request);
                let payload_size = parse_payload(&header);

                Ok(Some((header, payload_size)))
            }
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                Ok(None)
            }
        }
    }
}

/// Stores the byte range positions of a header's name and value within the original buffer.
#[derive(Clone, Copy)]
struct HeaderIndex {
    /// Start and end byte positions of the header name
    pub(crate) name: (usize, usize),
    /// Start and end byte positions of the header value
    pub(crate) value: (usize, usize),
}

const EMPTY_HEADER_INDEX: HeaderIndex = HeaderIndex { name: (0, 0), value: (0, 0) };

const EMPTY_HEADER_INDEX_ARRAY: [HeaderIndex; MAX_HEADER_NUM] = [EMPTY_HEADER_INDEX; MAX_HEADER_NUM];

impl HeaderIndex {
    /// Records the byte positions of header names and values from the parsed headers.
    fn record(bytes: &[u8], headers: &[httparse::Header<'_>], indices: &mut [HeaderIndex]) {
        let bytes_ptr = bytes.as_ptr() as usize;
        for (header, indices) in headers.iter().zip(indices.iter_mut()) {
            let name_start = header.name.as_ptr() as usize - bytes_ptr;
            let name_end = name_start + header.name.len();
            indices.name = (name_start, name_end);
            let value_start = header.value.as_ptr() as usize - bytes_ptr;
            let value_end = value_start + header.value.len();
            indices.value = (value_start, value_end);
        }
    }
}

/// Determines how many body bytes follow the header block.
///
/// Only methods that permit a body and carry a `Content-Length` header get one.
/// An unreadable `Content-Length` counts as zero, and `Transfer-Encoding` is not
/// interpreted at all.
fn parse_payload(header: &RequestHeader) -> PayloadSize {
    if !header.need_body() {
        return PayloadSize::new_empty();
    }

    if header.headers().contains_key(http::header::TRANSFER_ENCODING) {
        trace!("transfer-encoding is not supported, only content-length is used");
    }

    let Some(cl_value) = header.headers().get(http::header::CONTENT_LENGTH) else {
        return PayloadSize::new_empty();
    };

    match cl_value.to_str().ok().and_then(|cl_str| cl_str.trim().parse::<u64>().ok()) {
        Some(length) => PayloadSize::new_length(length),
        None => {
            warn!(content_length = ?cl_value, "invalid content-length header, treat body as empty");
            PayloadSize::new_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, Version};
    use indoc::indoc;

    #[test]
    fn test_bytes_mut_lens() {
        let str = indoc! {r##"
        POST /files/a.txt HTTP/1.1
        Host: 127.0.0.1:4221
        User-Agent: curl/7.79.1
        Content-Length: 3

        123"##};

        let mut bytes = BytesMut::from(str);

        assert_eq!(bytes.len(), str.len());

        let mut header_decoder = HeaderDecoder;

        let (_, payload_size) = header_decoder.decode(&mut bytes).unwrap().unwrap();

        assert_eq!(payload_size, PayloadSize::Length(3));
        assert_eq!(bytes.len(), 3);
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /echo/abc HTTP/1.1
        Host: 127.0.0.1:4221
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let mut buf = BytesMut::from(str);

        let (header, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().host(), None);
        assert_eq!(header.uri().path(), "/echo/abc");
        assert_eq!(header.uri().scheme(), None);
        assert_eq!(header.uri().query(), None);

        assert_eq!(header.headers().len(), 3);

        assert_eq!(header.headers().get(http::header::ACCEPT), Some(&HeaderValue::from_str("*/*").unwrap()));

        assert_eq!(header.headers().get(http::header::HOST), Some(&HeaderValue::from_str("127.0.0.1:4221").unwrap()));

        assert_eq!(header.headers().get(http::header::USER_AGENT), Some(&HeaderValue::from_str("curl/7.79.1").unwrap()));
    }

    #[test]
    fn from_edge() {
        let str = indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        sec-ch-ua-mobile: ?0
        sec-ch-ua-platform: "macOS"
        Upgrade-Insecure-Requests: 1
        User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9
        Sec-Fetch-Site: none
        Sec-Fetch-Mode: navigate
        Sec-Fetch-User: ?1
        Sec-Fetch-Dest: document
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let mut buf = BytesMut::from(str);

        let (header, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.uri().path(), "/index/");
        assert_eq!(header.uri().query(), Some("a=1&b=2&a=3"));

        assert_eq!(header.headers().len(), 15);

        assert_eq!(header.headers().get(http::header::CONNECTION), Some(&HeaderValue::from_str("keep-alive").unwrap()));

        assert_eq!(
            header.headers().get("sec-ch-ua"),
            Some(&HeaderValue::from_str(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##).unwrap())
        );

        assert_eq!(header.headers().get("sec-ch-ua-platform"), Some(&HeaderValue::from_str("\"macOS\"").unwrap()));

        assert_eq!(header.headers().get(http::header::ACCEPT_ENCODING), Some(&HeaderValue::from_str("gzip, deflate, br").unwrap()));

        assert_eq!(
            header.headers().get(http::header::ACCEPT_LANGUAGE),
            Some(&HeaderValue::from_str("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7").unwrap())
        );
    }

    #[test]
    fn header_names_are_case_insensitive_and_last_wins() {
        let str = indoc! {r##"
        GET /user-agent HTTP/1.1
        user-agent: first/1.0
        USER-AGENT: second/2.0

        "##};

        let mut buf = BytesMut::from(str);

        let (header, _) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(header.headers().len(), 1);
        assert_eq!(header.headers().get("User-Agent"), Some(&HeaderValue::from_static("second/2.0")));
    }

    #[test]
    fn get_ignores_content_length() {
        let str = indoc! {r##"
        GET /files/a.txt HTTP/1.1
        Content-Length: 5

        hello"##};

        let mut buf = BytesMut::from(str);

        let (_, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());
    }

    #[test]
    fn malformed_content_length_is_zero() {
        let str = indoc! {r##"
        POST /files/a.txt HTTP/1.1
        Content-Length: five

        hello"##};

        let mut buf = BytesMut::from(str);

        let (_, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());
    }

    #[test]
    fn partial_header_needs_more_data() {
        let mut buf = BytesMut::from("GET /echo/abc HTTP/1.1\r\nHost: local");

        assert!(HeaderDecoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn malformed_request_line() {
        let mut buf = BytesMut::from("GET/echo/abc\r\nHost: localhost\r\n\r\n");

        assert!(HeaderDecoder.decode(&mut buf).is_err());
    }

    #[test]
    fn malformed_header_line() {
        let mut buf = BytesMut::from("GET / HTTP/1.1\r\nHost localhost\r\n\r\n");

        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::InvalidHeader { .. })));
    }

    #[test]
    fn path_must_start_with_slash() {
        let mut buf = BytesMut::from("GET http://localhost/echo/abc HTTP/1.1\r\n\r\n");

        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::InvalidUri)));
    }

    #[test]
    fn too_large_header() {
        let mut buf = BytesMut::from("GET / HTTP/1.1\r\nX-Padding: ");
        buf.extend_from_slice(&[b'a'; MAX_HEADER_BYTES]);

        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::TooLargeHeader { .. })));
    }
}
