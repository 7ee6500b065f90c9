//! Unified encoder for HTTP message payloads, dispatching to the strategy
//! selected by [`BodyFraming`](crate::protocol::BodyFraming).

use crate::codec::body::chunked_encoder::ChunkedEncoder;
use crate::codec::body::close_encoder::CloseEncoder;
use crate::codec::body::length_encoder::LengthEncoder;
use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEncoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Length(LengthEncoder),
    Chunked(ChunkedEncoder),
    Close(CloseEncoder),
    NoBody,
}

impl PayloadEncoder {
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedEncoder::new()) }
    }

    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthEncoder::new(size)) }
    }

    pub fn close() -> Self {
        Self { kind: Kind::Close(CloseEncoder::new()) }
    }

    pub fn is_finish(&self) -> bool {
        match &self.kind {
            Kind::Length(encoder) => encoder.is_finish(),
            Kind::Chunked(encoder) => encoder.is_finish(),
            Kind::Close(encoder) => encoder.is_finish(),
            Kind::NoBody => true,
        }
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for PayloadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match &mut self.kind {
            Kind::Length(encoder) => {
                let item = coerce(item);
                encoder.encode(item, dst)
            }
            Kind::Chunked(encoder) => encoder.encode(item, dst),
            Kind::Close(encoder) => {
                let item = coerce(item);
                encoder.encode(item, dst)
            }
            Kind::NoBody => Ok(()),
        }
    }
}

/// `LengthEncoder`/`CloseEncoder` work over the concrete `Bytes` buffer type;
/// copy out of any other `Buf` implementation so `PayloadEncoder` stays
/// generic over its input without needing those encoders to be generic too.
fn coerce<D: Buf>(item: PayloadItem<D>) -> PayloadItem {
    match item {
        PayloadItem::Chunk(mut data) => PayloadItem::Chunk(data.copy_to_bytes(data.remaining())),
        PayloadItem::Eof => PayloadItem::Eof,
    }
}
