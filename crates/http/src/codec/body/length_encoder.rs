use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    length: u64,
    received_eof: bool,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { length, received_eof: false }
    }

    pub fn is_finish(&self) -> bool {
        self.length == 0 && self.received_eof
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(bytes) => {
                if !bytes.has_remaining() {
                    return Ok(());
                }
                if self.length == 0 {
                    warn!("encode payload_item but no need to encode anymore");
                    return Ok(());
                }
                let remaining = bytes.remaining() as u64;
                if remaining > self.length {
                    return Err(SendError::invalid_body(format!("body exceeds content-length by {} bytes", remaining - self.length)));
                }
                dst.put(bytes);
                self.length -= remaining;
                Ok(())
            }
            PayloadItem::Eof => {
                if self.length != 0 {
                    return Err(SendError::invalid_body(format!("body ends {} bytes short of content-length", self.length)));
                }
                self.received_eof = true;
                Ok(())
            }
        }
    }
}
