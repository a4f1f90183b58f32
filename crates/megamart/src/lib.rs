//! # MegaMart
//!
//! Client-side session and authorization gate for the MegaMart retail
//! back-office.
//!
//! A [`Backoffice`] owns the single session of the running client. It
//! restores the session from its store on startup, logs in and out
//! through the REST API, and decides for every navigation whether the
//! screen renders, redirects, or waits for restore.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use megamart::prelude::*;
//!
//! # async fn run() -> Result<(), MegamartError> {
//! megamart::logging::init();
//!
//! let mut app = Backoffice::builder()
//!     .config(BackofficeConfig::from_env())
//!     .build()?;
//!
//! if !app.session().is_authenticated() {
//!     app.login("manager", "secret").await?;
//! }
//!
//! if let Navigation::Render(_) = app.navigate(Destination::Category) {
//!     let categories = app.api()?.list_categories().await?;
//!     println!("{} categories", categories.len());
//! }
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
pub mod logging;
mod view;

pub use app::{Backoffice, BackofficeBuilder};
pub use config::{API_URL_VAR, BackofficeConfig, ConfiguredStore, SESSION_FILE_VAR, StoreConfig};
pub use error::MegamartError;
pub use view::ViewScope;

/// Re-exports of the crates underneath, for callers that need more than
/// the prelude.
pub use megamart_client as client;
pub use megamart_protocol as protocol;
pub use megamart_router as router;
pub use megamart_session as session;

/// Everything a front end typically needs, in one import.
pub mod prelude {
    pub use crate::{
        Backoffice, BackofficeBuilder, BackofficeConfig, MegamartError, StoreConfig, ViewScope,
    };
    pub use megamart_client::{ApiClient, Authorized, ClientConfig, ClientError};
    pub use megamart_protocol::{
        Category, Credential, LoginResponse, NewCategory, NewOrder, Order, Product, ProductForm,
        Role, Stock, StockDto, User, UserForm, ValidationError,
    };
    pub use megamart_router::{Action, Destination, MenuItem, Navigation};
    pub use megamart_session::{Authenticator, Session, SessionStore};
}
