//! Core HTTP protocol data types shared by the client and server engines.
//!
//! - [`message`]: the header/payload message unit shared by decoders and encoders.
//! - [`request`]: the parsed request line and header block ([`RequestHead`]).
//! - [`response`]: the parsed status line and header block ([`ResponseHead`]).
//! - [`version`]: the lexical HTTP-version comparison used for keep-alive and framing.
//! - [`error`]: the error taxonomy (parse, send, transport, timeout, handler).

mod message;
pub use message::BodyFraming;
pub use message::Message;
pub use message::PayloadItem;

mod request;
pub use request::RequestHead;

mod response;
pub use response::ResponseHead;

pub mod version;

mod error;
pub use error::HandlerError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::TransportError;
