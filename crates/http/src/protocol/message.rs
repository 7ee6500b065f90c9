use bytes::{Buf, Bytes};

/// A HTTP message unit: either the head (request line/headers or status
/// line/headers) or a payload item.
pub enum Message<T, Data: Buf = Bytes> {
    /// The header portion of the message.
    Header(T),
    /// A chunk of payload data or the EOF marker.
    Payload(PayloadItem<Data>),
}

/// An item in the HTTP message payload stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf = Bytes> {
    /// A chunk of payload data.
    Chunk(Data),
    /// Marks the end of the payload stream.
    Eof,
}

/// How a message's body is framed on the wire.
///
/// Applied in order when reading: `Length` wins if a Content-Length header is
/// present, else `Chunked` if Transfer-Encoding: chunked is present, else
/// `Close` on the client side when the version is below 1.1 or Connection:
/// close is present, else `Empty`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyFraming {
    /// Payload with a known length in bytes.
    Length(u64),
    /// Payload using chunked transfer encoding.
    Chunked,
    /// Payload terminated by connection close / EOF, no declared length.
    Close,
    /// No payload.
    Empty,
}

impl BodyFraming {
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, BodyFraming::Chunked)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, BodyFraming::Empty)
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self, BodyFraming::Close)
    }
}

impl<T> Message<T> {
    #[inline]
    pub fn is_payload(&self) -> bool {
        matches!(self, Message::Payload(_))
    }

    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(_))
    }

    /// Converts the message into a payload item, if it is one.
    pub fn into_payload_item(self) -> Option<PayloadItem> {
        match self {
            Message::Header(_) => None,
            Message::Payload(payload_item) => Some(payload_item),
        }
    }
}

impl<T> From<Bytes> for Message<T> {
    fn from(bytes: Bytes) -> Self {
        Self::Payload(PayloadItem::Chunk(bytes))
    }
}

impl<D: Buf> PayloadItem<D> {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }
}

impl PayloadItem {
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}
