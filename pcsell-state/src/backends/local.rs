//! Local file backend
//!
//! State lives in `pcsell.state.json` next to the configuration file; the
//! lock is a `pcsell.state.lock` file created exclusively beside it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::backend::{BackendError, BackendResult, StateBackend};
use crate::lock::LockInfo;
use crate::state::StateFile;

pub struct LocalBackend {
    state_path: PathBuf,
    lock_path: PathBuf,
}

impl LocalBackend {
    pub const DEFAULT_STATE_FILE: &'static str = "pcsell.state.json";

    pub fn with_path(state_path: impl Into<PathBuf>) -> Self {
        let state_path = state_path.into();
        let lock_path = state_path.with_extension("lock");
        Self {
            state_path,
            lock_path,
        }
    }

    /// State file in the directory holding `config_path`
    pub fn beside(config_path: impl AsRef<Path>) -> Self {
        let dir = config_path
            .as_ref()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::with_path(dir.join(Self::DEFAULT_STATE_FILE))
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    async fn read_lock(&self) -> BackendResult<Option<LockInfo>> {
        match fs::read_to_string(&self.lock_path).await {
            Ok(content) => Ok(serde_json::from_str(&content).ok()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::io("Failed to read lock file", e)),
        }
    }

    /// Create the lock file only if none exists
    async fn create_lock_file(&self, lock: &LockInfo) -> std::io::Result<()> {
        let content = serde_json::to_vec_pretty(lock)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.lock_path)
            .await?;
        file.write_all(&content).await?;
        file.flush().await
    }

    async fn remove_lock_file(&self, lock_id: &str) -> BackendResult<()> {
        match fs::remove_file(&self.lock_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BackendError::LockNotFound(lock_id.to_string()))
            }
            Err(e) => Err(BackendError::io("Failed to remove lock file", e)),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::with_path(Self::DEFAULT_STATE_FILE)
    }
}

#[async_trait]
impl StateBackend for LocalBackend {
    async fn read_state(&self) -> BackendResult<Option<StateFile>> {
        let content = match fs::read_to_string(&self.state_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BackendError::io("Failed to read state file", e)),
        };
        let state = serde_json::from_str(&content).map_err(|e| {
            BackendError::InvalidState(format!("{}: {}", self.state_path.display(), e))
        })?;
        Ok(Some(state))
    }

    async fn write_state(&self, state: &StateFile) -> BackendResult<()> {
        if let Some(stored) = self.read_state().await?
            && stored.lineage != state.lineage
        {
            return Err(BackendError::LineageMismatch {
                expected: stored.lineage,
                actual: state.lineage.clone(),
            });
        }

        let content = serde_json::to_string_pretty(state)
            .map_err(|e| BackendError::Serialization(e.to_string()))?;

        // Write beside the target and rename over it
        let tmp_path = self.state_path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| BackendError::io("Failed to write state file", e))?;
        fs::rename(&tmp_path, &self.state_path)
            .await
            .map_err(|e| BackendError::io("Failed to replace state file", e))?;

        log::debug!(
            "wrote state serial {} to {}",
            state.serial,
            self.state_path.display()
        );
        Ok(())
    }

    async fn acquire_lock(&self, operation: &str) -> BackendResult<LockInfo> {
        let lock = LockInfo::new(operation);
        for _ in 0..2 {
            match self.create_lock_file(&lock).await {
                Ok(()) => return Ok(lock),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(BackendError::io("Failed to write lock file", e)),
            }

            match self.read_lock().await? {
                Some(existing) if !existing.is_expired() => {
                    return Err(BackendError::locked(&existing));
                }
                stale => {
                    log::info!(
                        "replacing stale lock {}",
                        stale.map(|l| l.id).unwrap_or_default()
                    );
                    match fs::remove_file(&self.lock_path).await {
                        Ok(()) => {}
                        Err(e) if e.kind() == ErrorKind::NotFound => {}
                        Err(e) => return Err(BackendError::io("Failed to remove lock file", e)),
                    }
                }
            }
        }
        match self.read_lock().await? {
            Some(existing) => Err(BackendError::locked(&existing)),
            None => Err(BackendError::LockNotFound(lock.id)),
        }
    }

    async fn release_lock(&self, lock: &LockInfo) -> BackendResult<()> {
        let existing = self
            .read_lock()
            .await?
            .ok_or_else(|| BackendError::LockNotFound(lock.id.clone()))?;
        if existing.id != lock.id {
            return Err(BackendError::LockMismatch {
                expected: lock.id.clone(),
                actual: existing.id,
            });
        }
        self.remove_lock_file(&lock.id).await
    }

    async fn force_unlock(&self, lock_id: &str) -> BackendResult<()> {
        if let Some(existing) = self.read_lock().await?
            && existing.id != lock_id
        {
            return Err(BackendError::LockMismatch {
                expected: lock_id.to_string(),
                actual: existing.id,
            });
        }
        self.remove_lock_file(lock_id).await
    }
}
