//! Native host: "object urls" are in-memory staging slots and a save is an
//! atomic write into a downloads directory. No viewer exists, so the
//! fallback routes always fail.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::host::{ObjectUrl, UserAgentHost};
use crate::DeliveryError;

#[derive(Debug)]
pub struct DirectoryHost {
    dir: PathBuf,
    next: AtomicU64,
    staged: Mutex<BTreeMap<ObjectUrl, Vec<u8>>>,
}

impl DirectoryHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), next: AtomicU64::new(1), staged: Mutex::new(BTreeMap::new()) }
    }

    /// Number of urls not yet revoked.
    pub fn staged_count(&self) -> usize {
        self.staged.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn target(&self, file_name: &str) -> Result<PathBuf, DeliveryError> {
        match Path::new(file_name).file_name() {
            Some(base) if base == file_name => Ok(self.dir.join(base)),
            _ => Err(DeliveryError::Host(format!("refusing file name {file_name:?}"))),
        }
    }
}

impl UserAgentHost for DirectoryHost {
    fn create_object_url(&self, bytes: &[u8]) -> Result<ObjectUrl, DeliveryError> {
        let url = ObjectUrl(format!("staged:{}", self.next.fetch_add(1, Ordering::Relaxed)));
        self.staged
            .lock()
            .map_err(|_| DeliveryError::Host("staging area poisoned".into()))?
            .insert(url.clone(), bytes.to_vec());
        Ok(url)
    }

    fn trigger_anchor_save(&self, url: &ObjectUrl, file_name: &str) -> Result<(), DeliveryError> {
        let target = self.target(file_name)?;
        let staged = self.staged.lock().map_err(|_| DeliveryError::Host("staging area poisoned".into()))?;
        let bytes = staged.get(url).ok_or_else(|| DeliveryError::Host(format!("{url} was revoked")))?;
        mp_io::canonical_json::write_atomic(&target, bytes)
            .map_err(|e| DeliveryError::Host(format!("{}: {e}", target.display())))?;
        tracing::debug!(path = %target.display(), bytes = bytes.len(), "saved");
        Ok(())
    }

    fn open_in_new_context(&self, _url: &ObjectUrl) -> Result<(), DeliveryError> {
        Err(DeliveryError::Host("no viewer available".into()))
    }

    fn navigate_in_place(&self, _url: &ObjectUrl) -> Result<(), DeliveryError> {
        Err(DeliveryError::Host("no viewer available".into()))
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Ok(mut staged) = self.staged.lock() {
            staged.remove(url);
        }
    }
}
