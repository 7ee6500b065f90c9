//! Encoder for HTTP messages with a declared Content-Length.

use crate::protocol::{PayloadItem, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    remaining: u64,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { remaining: length }
    }

    pub fn is_finish(&self) -> bool {
        self.remaining == 0
    }
}

impl Encoder<PayloadItem> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(bytes) => {
                if bytes.is_empty() {
                    return Ok(());
                }
                if bytes.len() as u64 > self.remaining {
                    warn!("encoded bytes exceed declared content-length, truncating");
                }
                let take = std::cmp::min(bytes.len() as u64, self.remaining) as usize;
                dst.extend_from_slice(&bytes[..take]);
                self.remaining -= take as u64;
                Ok(())
            }
            PayloadItem::Eof => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn tracks_remaining_length() {
        let mut encoder = LengthEncoder::new(5);
        let mut buf = BytesMut::new();
        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"hello")), &mut buf).unwrap();
        assert_eq!(&buf[..], b"hello");
        assert!(encoder.is_finish());
    }
}
