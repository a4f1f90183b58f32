//! Authentication hook for exchanging a login form for a credential.
//!
//! The session layer doesn't talk HTTP. It defines the [`Authenticator`]
//! trait, and the HTTP client crate implements it against `POST /login`.
//! Tests plug in a stub instead, without touching any session code.

use megamart_protocol::{LoginRequest, LoginResponse};

use crate::SessionError;

/// Exchanges a username and password for a credential and role.
///
/// # Trait bounds
///
/// - `Send + Sync` → the authenticator can be shared across async tasks.
/// - `'static` → it lives as long as the application facade.
///
/// # Example
///
/// ```rust
/// use megamart_protocol::{Credential, LoginRequest, LoginResponse, Role};
/// use megamart_session::{Authenticator, SessionError};
///
/// /// Accepts exactly one hard-coded account.
/// struct FixedAuthenticator;
///
/// impl Authenticator for FixedAuthenticator {
///     async fn authenticate(
///         &self,
///         request: &LoginRequest,
///     ) -> Result<LoginResponse, SessionError> {
///         if request.username == "admin" && request.password == "admin" {
///             Ok(LoginResponse {
///                 credential: Credential::new("dev-token"),
///                 role: Some(Role::Admin),
///             })
///         } else {
///             Err(SessionError::AuthFailed("Invalid username or password".into()))
///         }
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Submits the login form.
    ///
    /// # Returns
    /// - `Ok(LoginResponse)` — the backend issued a credential
    /// - `Err(SessionError::AuthFailed)` — any rejection or transport
    ///   failure, with the message to show the user
    fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<LoginResponse, SessionError>> + Send;
}
