//! Response body compression negotiated through `Accept-Encoding`.
//!
//! Only gzip is produced. A request qualifies when any comma separated token of
//! its `Accept-Encoding` header equals `gzip`, ignoring case and surrounding
//! whitespace.

use bytes::{Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use http::HeaderMap;
use std::io;
use std::io::Write;
use tracing::trace;

/// Represents the content encodings the server can produce.
#[derive(Debug)]
pub(crate) enum Encoder {
    /// Gzip encoding.
    Gzip(GzEncoder<Writer>),
}

impl Encoder {
    /// Creates a new Gzip encoder.
    fn gzip() -> Self {
        Self::Gzip(GzEncoder::new(Writer::new(), Compression::best()))
    }

    /// Selects an encoder based on the `Accept-Encoding` header.
    pub(crate) fn select(headers: &HeaderMap) -> Option<Self> {
        let accept_encodings = headers.get(http::header::ACCEPT_ENCODING)?.to_str().ok()?;

        accept_encodings.split(',').map(str::trim).any(|token| token.eq_ignore_ascii_case("gzip")).then(Self::gzip)
    }

    /// Returns the name of the encoding, as written to `Content-Encoding`.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Encoder::Gzip(_) => "gzip",
        }
    }

    /// Compresses the whole body in one go.
    pub(crate) fn encode(self, data: &[u8]) -> Result<Bytes, io::Error> {
        match self {
            Self::Gzip(mut encoder) => {
                if let Err(err) = encoder.write_all(data) {
                    trace!("Error encoding gzip encoding: {}", err);
                    return Err(err);
                }
                Ok(encoder.finish()?.buf.freeze())
            }
        }
    }
}

// inspired by from actix-http
#[derive(Debug)]
pub(crate) struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn new() -> Self {
        Self { buf: BytesMut::with_capacity(4096) }
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
