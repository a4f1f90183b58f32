//! Application configuration and store selection.

use std::path::PathBuf;

use megamart_client::ClientConfig;
use megamart_protocol::{Credential, Role};
use megamart_session::{FileStore, MemoryStore, SessionStore, StoreError, StoredSession};

/// Environment variable overriding the backend base URL.
pub const API_URL_VAR: &str = "MEGAMART_API_URL";

/// Environment variable selecting a session file. Unset means the session
/// lives in memory and is gone when the process exits.
pub const SESSION_FILE_VAR: &str = "MEGAMART_SESSION_FILE";

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Where the session record is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-process only.
    #[default]
    Memory,

    /// A JSON file that survives restarts.
    File(PathBuf),
}

impl StoreConfig {
    /// Opens the configured store. Nothing is read until restore.
    pub fn open(&self) -> ConfiguredStore {
        match self {
            Self::Memory => ConfiguredStore::Memory(MemoryStore::new()),
            Self::File(path) => ConfiguredStore::File(FileStore::new(path.clone())),
        }
    }
}

/// The store chosen at runtime by a [`StoreConfig`].
#[derive(Debug)]
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl SessionStore for ConfiguredStore {
    fn put(&mut self, credential: &Credential, role: Option<Role>) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.put(credential, role),
            Self::File(store) => store.put(credential, role),
        }
    }

    fn get(&self) -> Result<StoredSession, StoreError> {
        match self {
            Self::Memory(store) => store.get(),
            Self::File(store) => store.get(),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.clear(),
            Self::File(store) => store.clear(),
        }
    }
}

// ---------------------------------------------------------------------------
// BackofficeConfig
// ---------------------------------------------------------------------------

/// Everything needed to build a [`Backoffice`](crate::Backoffice).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackofficeConfig {
    pub client: ClientConfig,
    pub store: StoreConfig,
}

impl BackofficeConfig {
    /// Defaults, overridden by `MEGAMART_API_URL` and
    /// `MEGAMART_SESSION_FILE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client = var(API_URL_VAR)
            .map(ClientConfig::with_base_url)
            .unwrap_or_default();
        let store = var(SESSION_FILE_VAR)
            .map(|path| StoreConfig::File(PathBuf::from(path)))
            .unwrap_or_default();

        Self { client, store }
    }
}
