//! HTTP header processing for requests and responses.
//!
//! - [`HeaderDecoder`]: decodes the request line and header block
//! - [`HeaderEncoder`]: encodes the status line and header block

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
