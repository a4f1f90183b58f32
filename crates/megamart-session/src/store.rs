//! Durable storage for the session credential and role.
//!
//! The store keeps exactly two entries under fixed keys, [`TOKEN_KEY`]
//! and [`ROLE_KEY`]. It has no expiry and no encryption at rest.
//!
//! Two backends are provided:
//! - [`MemoryStore`] — an in-process map, shared between clones
//! - [`FileStore`] — a small JSON document on disk that survives restarts

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use megamart_protocol::{Codec, Credential, JsonCodec, Role};

use crate::StoreError;

/// Key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Key holding the role tag.
pub const ROLE_KEY: &str = "user";

/// What a store currently holds.
///
/// The role is kept as the raw stored tag. Deciding what to do with a
/// tag that no longer names a role is the manager's job, not the store's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    pub credential: Option<Credential>,
    pub role: Option<String>,
}

impl StoredSession {
    fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        Self {
            credential: entries.get(TOKEN_KEY).cloned().map(Credential::new),
            role: entries.get(ROLE_KEY).cloned(),
        }
    }
}

fn entries_for(credential: &Credential, role: Option<Role>) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::from([(TOKEN_KEY.to_string(), credential.as_str().to_string())]);
    if let Some(role) = role {
        entries.insert(ROLE_KEY.to_string(), role.as_str().to_string());
    }
    entries
}

/// Key-value persistence for the two session entries.
///
/// Methods are synchronous: a store read is a local operation and the
/// manager performs it inline during restore.
pub trait SessionStore: Send + 'static {
    /// Writes both entries, replacing what was there. Without a role only
    /// the credential is kept. Later reads, in this process or the next,
    /// observe them.
    fn put(&mut self, credential: &Credential, role: Option<Role>) -> Result<(), StoreError>;

    /// Returns whatever is stored; empty if never set or cleared.
    fn get(&self) -> Result<StoredSession, StoreError>;

    /// Removes both entries. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// An in-process store.
///
/// Clones share the same map, so a test can keep one handle and inspect
/// what the manager wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with raw entries, as if an earlier
    /// process had written them.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map still holds plain strings; keep using it.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn put(&mut self, credential: &Credential, role: Option<Role>) -> Result<(), StoreError> {
        let mut entries = self.lock();
        entries.remove(ROLE_KEY);
        entries.extend(entries_for(credential, role));
        Ok(())
    }

    fn get(&self) -> Result<StoredSession, StoreError> {
        Ok(StoredSession::from_entries(&self.lock()))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let mut entries = self.lock();
        entries.remove(TOKEN_KEY);
        entries.remove(ROLE_KEY);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A store backed by one JSON file.
///
/// ```json
/// { "token": "eyJhbGciOi...", "user": "manager" }
/// ```
///
/// Writes go to a sibling temp file which is then renamed over the
/// target, so a crash mid-write leaves either the old record or the new
/// one, never half of each. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore<C: Codec = JsonCodec> {
    path: PathBuf,
    codec: C,
}

impl FileStore {
    /// Uses the JSON codec. The file and its parent directory are created
    /// on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C: Codec> FileStore<C> {
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<C: Codec> SessionStore for FileStore<C> {
    fn put(&mut self, credential: &Credential, role: Option<Role>) -> Result<(), StoreError> {
        let bytes = self.codec.encode(&entries_for(credential, role))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, bytes).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(self.io_error(e));
        }

        tracing::debug!(path = %self.path.display(), "session record written");
        Ok(())
    }

    fn get(&self) -> Result<StoredSession, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        let entries: BTreeMap<String, String> = self.codec.decode(&bytes)?;
        Ok(StoredSession::from_entries(&entries))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
