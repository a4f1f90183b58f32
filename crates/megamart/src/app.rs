//! `Backoffice` builder and application handle.
//!
//! This is the entry point for a back-office front end. It ties together
//! all the layers: store → session manager → route guard → view router,
//! with the API client on the side for login and resource calls.

use megamart_client::{ApiClient, Authorized};
use megamart_protocol::{LoginRequest, Role, validate};
use megamart_router::{Action, Destination, MenuItem, Navigation, RouteGuard, ViewRouter, access};
use megamart_session::{AuthSessionManager, Authenticator, Session, SessionStore};
use tokio::sync::watch;

use crate::config::{BackofficeConfig, ConfiguredStore, StoreConfig};
use crate::view::ViewScope;
use crate::MegamartError;

/// Builder for configuring and starting a [`Backoffice`].
///
/// # Example
///
/// ```rust,no_run
/// use megamart::prelude::*;
///
/// # async fn run() -> Result<(), MegamartError> {
/// let mut app = Backoffice::builder()
///     .config(BackofficeConfig::from_env())
///     .build()?;
/// app.login("admin", "secret").await?;
/// assert_eq!(app.navigate(Destination::Stock), Navigation::Render(Destination::Stock));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BackofficeBuilder {
    config: BackofficeConfig,
}

impl BackofficeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: BackofficeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the backend base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.client.base_url = base_url.into();
        self
    }

    /// Sets where the session record is kept.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Builds the client, opens the store, and restores the session.
    ///
    /// The returned handle is already past restore, so its first
    /// navigation gets a real decision.
    pub fn build(self) -> Result<Backoffice, MegamartError> {
        let client = ApiClient::new(self.config.client)?;
        let store = self.config.store.open();
        Ok(Backoffice::with_parts(store, client.clone(), client))
    }
}

/// A running back-office client.
///
/// Owns the one session manager of the process and the view router that
/// reads it. Mutating calls take `&mut self`, so there is exactly one
/// writer; views observe through [`subscribe`](Self::subscribe).
pub struct Backoffice<S: SessionStore = ConfiguredStore, A: Authenticator = ApiClient> {
    sessions: AuthSessionManager<S>,
    router: ViewRouter,
    auth: A,
    client: ApiClient,
    view: Option<ViewScope>,
}

impl Backoffice {
    /// Creates a new builder.
    pub fn builder() -> BackofficeBuilder {
        BackofficeBuilder::new()
    }
}

impl<S: SessionStore, A: Authenticator> Backoffice<S, A> {
    /// Wires the layers together and restores the session from `store`.
    ///
    /// `auth` handles login; `client` carries the credential on resource
    /// calls. Usually both are the same [`ApiClient`].
    pub fn with_parts(store: S, auth: A, client: ApiClient) -> Self {
        let mut sessions = AuthSessionManager::new(store);
        let router = ViewRouter::new(RouteGuard::new(sessions.subscribe()));
        sessions.restore();
        Self {
            sessions,
            router,
            auth,
            client,
            view: None,
        }
    }

    // -- Session ----------------------------------------------------------

    /// Logs in and returns the granted role, `None` when the backend sent
    /// a role this client does not know.
    ///
    /// Empty fields are rejected before anything is sent. On any failure
    /// the session is left exactly as it was.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<Role>, MegamartError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        validate::login(&request)?;

        let response = match self.auth.authenticate(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::info!(username, error = %e, "login rejected");
                return Err(e.into());
            }
        };
        let role = response.role;
        self.sessions.login(response);
        Ok(role)
    }

    /// Leaves the current view and clears the session.
    pub fn logout(&mut self) {
        self.view = None;
        self.sessions.logout();
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Session {
        self.sessions.current()
    }

    /// A receiver that always observes the latest session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sessions.subscribe()
    }

    // -- Navigation -------------------------------------------------------

    /// Navigates to `requested`, leaving the current view.
    ///
    /// Calls still running in the previous view are aborted. When the
    /// navigation renders or redirects, a fresh view scope is opened for
    /// the screen that ends up displayed.
    pub fn navigate(&mut self, requested: Destination) -> Navigation {
        let navigation = self.router.navigate(requested);
        self.view = navigation.target().map(ViewScope::new);
        navigation
    }

    /// Navigates by path. Unknown paths land on the error screen.
    pub fn navigate_path(&mut self, path: &str) -> Navigation {
        self.navigate(Destination::from_path(path))
    }

    /// The scope of the screen currently displayed, if any.
    pub fn view(&mut self) -> Option<&mut ViewScope> {
        self.view.as_mut()
    }

    /// The home tiles the current session can open. Empty when signed out.
    pub fn menu(&self) -> Vec<MenuItem> {
        let session = self.session();
        if !session.is_authenticated() {
            return Vec::new();
        }
        access::menu_for(session.role)
    }

    /// Checks an in-screen action against the current role.
    pub fn permit(&self, action: Action) -> Result<(), MegamartError> {
        access::permit(self.session().role, action)?;
        Ok(())
    }

    // -- Resources --------------------------------------------------------

    /// The API client bound to the current credential.
    ///
    /// # Errors
    /// [`MegamartError::NotAuthenticated`] when nobody is logged in.
    pub fn api(&self) -> Result<Authorized, MegamartError> {
        let session = self.session();
        match session.credential {
            Some(credential) if session.is_authenticated() => {
                Ok(self.client.authorized(credential))
            }
            _ => Err(MegamartError::NotAuthenticated),
        }
    }
}
