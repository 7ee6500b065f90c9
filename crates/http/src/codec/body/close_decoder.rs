//! Decoder for bodies framed by connection close rather than a declared
//! length: the client side's last-resort framing rule, used when the server
//! declared neither Content-Length nor chunked Transfer-Encoding and the
//! connection is not being kept alive.
//!
//! Ordinary `Decoder::decode` never sees a length; it simply forwards
//! whatever bytes have arrived. The stream's natural EOF is what terminates
//! the body, which `tokio_util::codec::Decoder::decode_eof` is built for.

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloseDecoder {
    eof: bool,
}

impl CloseDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for CloseDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.eof {
            return Ok(Some(PayloadItem::Eof));
        }
        if src.is_empty() {
            return Ok(None);
        }
        Ok(Some(PayloadItem::Chunk(src.split().freeze())))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if !src.is_empty() {
            return Ok(Some(PayloadItem::Chunk(src.split().freeze())));
        }
        self.eof = true;
        Ok(Some(PayloadItem::Eof))
    }
}
