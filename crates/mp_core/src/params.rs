//! Synthesis parameters with safe defaults.
//!
//! Every field has a default so a partial JSON object (or none at all) is a
//! valid configuration. `validate_params` enforces the domains.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::OrganizationIdentity;
use crate::validate::CoreError;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EcLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl EcLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QrParams {
    pub ec_level: EcLevel,
    /// Pixels per QR module (1..=32).
    pub module_px: u32,
    /// Quiet zone in modules (ISO/IEC 18004 minimum is 4).
    pub quiet_zone: u32,
}

impl Default for QrParams {
    fn default() -> Self {
        Self { ec_level: EcLevel::M, module_px: 4, quiet_zone: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesisParams {
    pub qr: QrParams,
    /// Printed edge of the organization image, millimetres.
    pub organization_image_mm: u32,
    /// Printed edge of each voter image, millimetres.
    pub voter_image_mm: u32,
    /// Upper bound on concurrent image encodes.
    pub max_concurrent_encodes: usize,
    pub organization: OrganizationIdentity,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            qr: QrParams::default(),
            organization_image_mm: 30,
            voter_image_mm: 20,
            max_concurrent_encodes: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            organization: OrganizationIdentity::default(),
        }
    }
}

/// Domain checks for `SynthesisParams`.
pub fn validate_params(p: &SynthesisParams) -> Result<(), CoreError> {
    if !(1..=32).contains(&p.qr.module_px) {
        return Err(CoreError::DomainOutOfRange("qr.module_px"));
    }
    if p.qr.quiet_zone < 4 {
        return Err(CoreError::DomainOutOfRange("qr.quiet_zone"));
    }
    if !(5..=100).contains(&p.organization_image_mm) {
        return Err(CoreError::DomainOutOfRange("organization_image_mm"));
    }
    if !(5..=100).contains(&p.voter_image_mm) {
        return Err(CoreError::DomainOutOfRange("voter_image_mm"));
    }
    if p.max_concurrent_encodes == 0 {
        return Err(CoreError::DomainOutOfRange("max_concurrent_encodes"));
    }
    if p.organization.name.trim().is_empty() {
        return Err(CoreError::DomainOutOfRange("organization.name"));
    }
    Ok(())
}
