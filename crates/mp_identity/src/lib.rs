//! mp_identity: identity payloads and their scannable images.
//!
//! A `Payload` is a short list of `Label: value` lines (organization
//! registration or one voter's ballot receipt). `encode` turns it into a QR
//! PNG that a generic 2D-barcode reader decodes back to the same text.
//! Oversized payloads fail with `PayloadTooLarge`; nothing is truncated.

#![forbid(unsafe_code)]

pub mod encoder;
pub mod payload;

pub use encoder::{encode, EncodeError};
pub use payload::{Payload, PayloadBuilder};
