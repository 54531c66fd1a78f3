//! Can this user agent save a file from a detached anchor?
//! Capability is injected so the adapter never sniffs on its own.

pub trait DownloadCapability {
    fn can_trigger_direct_download(&self) -> bool;
}

/// Any `Fn() -> bool` works as a fixed or computed capability.
impl<F: Fn() -> bool> DownloadCapability for F {
    fn can_trigger_direct_download(&self) -> bool {
        self()
    }
}

/// Markers of embedded browsers that ignore anchor downloads.
const IN_APP_MARKERS: &[&str] = &[
    "FBAN/",
    "FBAV/",
    "Instagram",
    "Line/",
    "MicroMessenger",
    "Telegram",
    "VKClient",
    "OKApp",
    "; wv)",
];

/// Capability derived from a `User-Agent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentProfile {
    user_agent: String,
}

impl UserAgentProfile {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into() }
    }

    /// Embedded mobile browser: a known app marker, or an iOS web view
    /// (`Mobile/` build without a `Safari/` token).
    pub fn is_in_app_browser(&self) -> bool {
        let ua = self.user_agent.as_str();
        if IN_APP_MARKERS.iter().any(|m| ua.contains(m)) {
            return true;
        }
        let ios = ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod");
        ios && ua.contains("Mobile/") && !ua.contains("Safari/")
    }
}

impl DownloadCapability for UserAgentProfile {
    fn can_trigger_direct_download(&self) -> bool {
        !self.is_in_app_browser()
    }
}
