//! Encoder for bodies with no declared length, terminated by closing the
//! connection after the last byte is written. Used by the server when a
//! handler produces a body whose size isn't known up front and the response
//! is marked to close the connection afterward.

use crate::protocol::{PayloadItem, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloseEncoder {
    eof: bool,
}

impl CloseEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finish(&self) -> bool {
        self.eof
    }
}

impl Encoder<PayloadItem> for CloseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(bytes) => {
                dst.extend_from_slice(&bytes[..]);
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                Ok(())
            }
        }
    }
}
