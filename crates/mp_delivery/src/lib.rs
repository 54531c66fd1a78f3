//! mp_delivery: hand finished protocol bytes to a user agent.
//!
//! Best effort only: a `DeliveryError` never means the document is wrong,
//! just that this agent refused every save route. Callers keep the bytes and
//! may offer a retry.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod adapter;
pub mod capability;
pub mod fs_host;
pub mod host;

pub use adapter::{DeliveryAdapter, DeliveryConfig, DeliveryRoute};
pub use capability::{DownloadCapability, UserAgentProfile};
pub use fs_host::DirectoryHost;
pub use host::{ObjectUrl, UserAgentHost};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("new viewing context was blocked by a popup restriction")]
    PopupBlocked,

    #[error("{file_name} could not be saved in this user agent: {reason}")]
    DeliveryBlocked { file_name: String, reason: String },

    #[error("host error: {0}")]
    Host(String),
}
