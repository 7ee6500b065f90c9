//! Encoding and decoding of HTTP message bodies under the three body-framing
//! strategies: Content-Length, chunked transfer encoding, and connection
//! close. See [`PayloadDecoder`]/[`PayloadEncoder`] for the unified
//! strategy-dispatching types.

mod chunked_decoder;
mod chunked_encoder;
mod close_decoder;
mod close_encoder;
mod length_decoder;
mod length_encoder;
mod payload_decoder;
mod payload_encoder;

pub use payload_decoder::PayloadDecoder;
pub use payload_encoder::PayloadEncoder;
