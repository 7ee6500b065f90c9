//! Streaming encoders and decoders for HTTP/1.1 messages.
//!
//! Requests are decoded, responses are encoded, both through a state machine
//! that first resolves the head (start line + headers) and then dispatches
//! the body to whichever [`body::PayloadDecoder`]/[`body::PayloadEncoder`]
//! strategy the head's framing selected.

pub mod body;
mod framing;
mod header_encoder;
mod request_decoder;
mod request_encoder;
mod response_decoder;
mod response_encoder;
mod start_line;

pub use request_decoder::RequestDecoder;
pub use request_encoder::{RequestEncoder, RequestHeadOut};
pub use response_decoder::ResponseDecoder;
pub use response_encoder::{ResponseEncoder, ResponseHeadOut};
pub use framing::{wants_close, wants_keep_alive};
