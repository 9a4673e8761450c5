//! Transport layer (HTTP).
//!
//! Exposes the payment handler and the codec that decodes query parameters
//! and encodes errors.

pub mod codec;
pub mod http;
