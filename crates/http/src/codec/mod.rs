//! HTTP codec module for encoding and decoding HTTP messages
//!
//! - Request handling:
//!   - [`RequestDecoder`]: decodes the request line, headers and a
//!     `Content-Length` framed body
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes the status line, headers and body
//!
//! Both sides plug into `tokio_util::codec` through `FramedRead` and
//! `FramedWrite`.
//!
//! # Example
//!
//! ```no_run
//! use mini_http::codec::{RequestDecoder, ResponseEncoder};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::new();
//! let request = decoder.decode(&mut request_buffer);
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! // ... encode response ...
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
