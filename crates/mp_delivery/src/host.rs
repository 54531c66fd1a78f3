//! The user-agent surface the adapter drives.

use std::fmt;

use crate::DeliveryError;

/// Ephemeral reference to staged bytes (a blob URL in a browser).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectUrl(pub String);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operations a host user agent provides. Implementations are synchronous;
/// the adapter owns all timing.
pub trait UserAgentHost: Send + Sync + 'static {
    fn create_object_url(&self, bytes: &[u8]) -> Result<ObjectUrl, DeliveryError>;

    /// Save through a detached anchor carrying `file_name`.
    fn trigger_anchor_save(&self, url: &ObjectUrl, file_name: &str) -> Result<(), DeliveryError>;

    /// Fails with `DeliveryError::PopupBlocked` under popup restrictions.
    fn open_in_new_context(&self, url: &ObjectUrl) -> Result<(), DeliveryError>;

    fn navigate_in_place(&self, url: &ObjectUrl) -> Result<(), DeliveryError>;

    fn revoke_object_url(&self, url: &ObjectUrl);
}
