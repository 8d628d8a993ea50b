//! HTTP body handling for request and response payloads.
//!
//! Bodies are framed by `Content-Length` only.
//!
//! - [`PayloadDecoder`]: reads a request body of known length, or none at all
//! - [`PayloadEncoder`]: writes a response body of known length, or none at all

mod length_decoder;
mod length_encoder;
mod payload_decoder;
mod payload_encoder;

pub use payload_decoder::PayloadDecoder;
pub use payload_encoder::PayloadEncoder;
