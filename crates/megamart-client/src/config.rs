//! Client configuration.

/// The backend the back-office talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/MegaMartLanka";

/// Settings for [`ApiClient`](crate::ApiClient).
///
/// No request timeout is applied: a login or fetch waits as long as the
/// backend takes, and a view that is left early cancels its own calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint; resource paths are appended to it. A trailing slash
    /// is ignored.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
