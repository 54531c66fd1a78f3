//! Delivery adapter: one `deliver` call per finished document.
//!
//! Direct route: object url → anchor save → revoke after `revoke_delay_ms`.
//! Blocked route: new viewing context, else in-place navigation; the url is
//! revoked after `fallback_revoke_delay_ms` on a detached task because the
//! viewer keeps reading it after `deliver` returns.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capability::DownloadCapability;
use crate::host::{ObjectUrl, UserAgentHost};
use crate::DeliveryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub revoke_delay_ms: u64,
    pub fallback_revoke_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { revoke_delay_ms: 1_000, fallback_revoke_delay_ms: 60_000 }
    }
}

/// Which route delivered the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryRoute {
    DirectSave,
    NewContext,
    InPlace,
}

pub struct DeliveryAdapter<H, C> {
    host: Arc<H>,
    capability: C,
    config: DeliveryConfig,
}

impl<H: UserAgentHost, C: DownloadCapability> DeliveryAdapter<H, C> {
    pub fn new(host: H, capability: C) -> Self {
        Self { host: Arc::new(host), capability, config: DeliveryConfig::default() }
    }

    pub fn with_config(mut self, config: DeliveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Hand `bytes` to the user agent under `file_name`. Failure is
    /// recoverable: the caller still owns the bytes and may retry.
    pub async fn deliver(&self, bytes: &[u8], file_name: &str) -> Result<DeliveryRoute, DeliveryError> {
        let url = self.host.create_object_url(bytes)?;

        if self.capability.can_trigger_direct_download() {
            match self.host.trigger_anchor_save(&url, file_name) {
                Ok(()) => {
                    tokio::time::sleep(Duration::from_millis(self.config.revoke_delay_ms)).await;
                    self.host.revoke_object_url(&url);
                    tracing::debug!(file = file_name, bytes = bytes.len(), "delivered by direct save");
                    return Ok(DeliveryRoute::DirectSave);
                }
                Err(e) => tracing::warn!(file = file_name, error = %e, "direct save failed; trying a viewing context"),
            }
        }

        let route = match self.host.open_in_new_context(&url) {
            Ok(()) => DeliveryRoute::NewContext,
            Err(e) => {
                tracing::warn!(file = file_name, error = %e, "new viewing context refused; navigating in place");
                if let Err(last) = self.host.navigate_in_place(&url) {
                    self.host.revoke_object_url(&url);
                    return Err(DeliveryError::DeliveryBlocked {
                        file_name: file_name.to_string(),
                        reason: last.to_string(),
                    });
                }
                DeliveryRoute::InPlace
            }
        };

        self.schedule_revoke(url);
        Ok(route)
    }

    fn schedule_revoke(&self, url: ObjectUrl) {
        let host = Arc::clone(&self.host);
        let delay = Duration::from_millis(self.config.fallback_revoke_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            host.revoke_object_url(&url);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockHost {
        anchor_fails: bool,
        popup_blocked: bool,
        in_place_fails: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockHost {
        fn log(&self, s: impl Into<String>) {
            self.calls.lock().unwrap().push(s.into());
        }
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl UserAgentHost for MockHost {
        fn create_object_url(&self, bytes: &[u8]) -> Result<ObjectUrl, DeliveryError> {
            self.log(format!("create:{}", bytes.len()));
            Ok(ObjectUrl("blob:1".into()))
        }
        fn trigger_anchor_save(&self, _url: &ObjectUrl, file_name: &str) -> Result<(), DeliveryError> {
            self.log(format!("anchor:{file_name}"));
            if self.anchor_fails { Err(DeliveryError::Host("anchor ignored".into())) } else { Ok(()) }
        }
        fn open_in_new_context(&self, _url: &ObjectUrl) -> Result<(), DeliveryError> {
            self.log("open");
            if self.popup_blocked { Err(DeliveryError::PopupBlocked) } else { Ok(()) }
        }
        fn navigate_in_place(&self, _url: &ObjectUrl) -> Result<(), DeliveryError> {
            self.log("navigate");
            if self.in_place_fails { Err(DeliveryError::Host("navigation denied".into())) } else { Ok(()) }
        }
        fn revoke_object_url(&self, url: &ObjectUrl) {
            self.log(format!("revoke:{url}"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn direct_route_revokes_after_short_delay() {
        let adapter = DeliveryAdapter::new(MockHost::default(), || true);
        let started = tokio::time::Instant::now();
        let route = adapter.deliver(b"PK..", "Протокол_1.docx").await.unwrap();
        assert_eq!(route, DeliveryRoute::DirectSave);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1_000) && waited < Duration::from_millis(1_010), "{waited:?}");
        assert_eq!(adapter.host().calls(), vec!["create:4", "anchor:Протокол_1.docx", "revoke:blob:1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_agent_opens_new_context_and_revokes_later() {
        let adapter = DeliveryAdapter::new(MockHost::default(), || false);
        let route = adapter.deliver(b"PK", "p.docx").await.unwrap();
        assert_eq!(route, DeliveryRoute::NewContext);
        assert_eq!(adapter.host().calls(), vec!["create:2", "open"]);

        tokio::time::sleep(Duration::from_millis(59_000)).await;
        assert!(!adapter.host().calls().iter().any(|c| c.starts_with("revoke")));
        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(adapter.host().calls().last().map(String::as_str), Some("revoke:blob:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn popup_block_falls_back_to_in_place() {
        let host = MockHost { popup_blocked: true, ..MockHost::default() };
        let adapter = DeliveryAdapter::new(host, || false);
        assert_eq!(adapter.deliver(b"PK", "p.docx").await.unwrap(), DeliveryRoute::InPlace);
        assert_eq!(adapter.host().calls(), vec!["create:2", "open", "navigate"]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_anchor_save_takes_the_fallback_route() {
        let host = MockHost { anchor_fails: true, ..MockHost::default() };
        let adapter = DeliveryAdapter::new(host, || true);
        assert_eq!(adapter.deliver(b"PK", "p.docx").await.unwrap(), DeliveryRoute::NewContext);
    }

    #[tokio::test(start_paused = true)]
    async fn every_route_failing_is_delivery_blocked() {
        let host = MockHost { popup_blocked: true, in_place_fails: true, ..MockHost::default() };
        let adapter = DeliveryAdapter::new(host, || false);
        let err = adapter.deliver(b"PK", "p.docx").await.unwrap_err();
        assert_eq!(
            err,
            DeliveryError::DeliveryBlocked { file_name: "p.docx".into(), reason: "host error: navigation denied".into() }
        );
        assert_eq!(adapter.host().calls().last().map(String::as_str), Some("revoke:blob:1"));
    }

    #[test]
    fn config_defaults_fill_partial_json() {
        let c: DeliveryConfig = serde_json::from_str(r#"{"revoke_delay_ms": 250}"#).unwrap();
        assert_eq!(c, DeliveryConfig { revoke_delay_ms: 250, fallback_revoke_delay_ms: 60_000 });
    }

    #[test]
    fn config_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery.json");
        std::fs::write(&path, r#"{"fallback_revoke_delay_ms": 30000}"#).unwrap();
        let c: DeliveryConfig = mp_io::loader::load_params(&path).unwrap();
        assert_eq!(c.fallback_revoke_delay_ms, 30_000);
        assert_eq!(c.revoke_delay_ms, 1_000);
    }
}
