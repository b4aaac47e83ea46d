//! Client-side session state with a durable mirror.
//!
//! Two entries under the attend home directory: the raw credential string
//! and the serialized identity. They are written and cleared as a pair by
//! the lifecycle controller; other consumers only read snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::token;
use crate::types::Identity;

const CREDENTIAL_FILE: &str = "credential";
const IDENTITY_FILE: &str = "identity.json";

/// In-memory session snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub credential: Option<String>,
    pub identity: Option<Identity>,
    pub loading: bool,
}

/// Holds the current credential and user identity.
///
/// Mutations go through the lifecycle controller; the durable mirror is
/// best-effort (a failed write is logged, the in-memory state stays the
/// truth for this process).
pub struct SessionStore {
    dir: PathBuf,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Opens the store, hydrating any persisted session.
    ///
    /// A stored credential that already fails the expiry check is not
    /// trusted: both entries are discarded and removed from disk.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create session dir {}", dir.display()))?;
        let store = Self {
            dir,
            state: Mutex::new(SessionState::default()),
        };
        store.hydrate();
        Ok(store)
    }

    fn hydrate(&self) {
        let credential = fs::read_to_string(self.dir.join(CREDENTIAL_FILE))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let Some(credential) = credential else {
            return;
        };

        if token::is_expired(Some(&credential)) {
            debug!("discarding expired persisted session");
            self.remove(CREDENTIAL_FILE);
            self.remove(IDENTITY_FILE);
            return;
        }

        let identity = fs::read_to_string(self.dir.join(IDENTITY_FILE))
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok());

        let mut state = self.lock();
        state.credential = Some(credential);
        state.identity = identity;
    }

    pub fn credential(&self) -> Option<String> {
        self.lock().credential.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }

    /// Replaces the credential, mirroring the change to disk.
    pub(crate) fn set_credential(&self, credential: Option<String>) {
        match credential.as_deref() {
            Some(value) => self.persist(CREDENTIAL_FILE, value),
            None => self.remove(CREDENTIAL_FILE),
        }
        self.lock().credential = credential;
    }

    /// Replaces the identity, mirroring the change to disk.
    pub(crate) fn set_identity(&self, identity: Option<Identity>) {
        match &identity {
            Some(value) => match serde_json::to_string(value) {
                Ok(json) => self.persist(IDENTITY_FILE, &json),
                Err(e) => warn!(error = %e, "failed to serialize identity"),
            },
            None => self.remove(IDENTITY_FILE),
        }
        self.lock().identity = identity;
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, name: &str, contents: &str) {
        let path = self.dir.join(name);
        if let Err(e) = write_restricted(&path, contents) {
            warn!(path = %path.display(), error = %e, "failed to persist session entry");
        }
    }

    fn remove(&self, name: &str) {
        let path = self.dir.join(name);
        if let Err(e) = fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %e, "failed to remove session entry");
        }
    }
}

/// Writes a session entry with restricted permissions (0600 on unix);
/// credentials must not be world-readable.
#[cfg(unix)]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)
}
