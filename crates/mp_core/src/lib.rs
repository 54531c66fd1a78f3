//! mp_core: Core types for the meeting-protocol engine.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`mp_algo`, `mp_identity`, `mp_report`, `mp_io`, `mp_pipeline`).
//!
//! - Caller ids: `MeetingId`, `AgendaItemId`, `VoterId`
//! - Fixed-point `Area` (hundredths of m²) and integer percent tenths
//! - Input entities (`SynthesisInput` and its parts) + `validate_input`
//! - `Markup` / `MarkupFragment`: the composer → assembler hand-off
//! - `SynthesisParams` with defaults and domain checks
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod area;
pub mod entities;
pub mod ids;
pub mod markup;
pub mod params;
pub mod raster;
pub mod rounding;
pub mod validate;

pub use area::{Area, AreaError};
pub use entities::{
    AgendaItem, ConductFormat, Decision, MeetingSnapshot, OrganizationIdentity, SynthesisInput,
    VoteChoice, VoteRecord,
};
pub use ids::{AgendaItemId, IdError, MeetingId, VoterId};
pub use markup::{ImageKey, ImageRef, Markup, MarkupFragment};
pub use params::{validate_params, EcLevel, QrParams, SynthesisParams};
pub use raster::RasterImage;
pub use rounding::PctTenths;
pub use validate::{validate_input, CoreError};
