//! HTTP response header handling.
//!
//! Handlers build a complete `http::Response<Bytes>`; the connection splits it
//! into a head and a body before handing both to the encoder.

use http::Response;

/// The header portion of an HTTP response, with the body slot left empty.
pub type ResponseHead = Response<()>;
