//! Wire protocol for the MegaMart back-office.
//!
//! This crate defines the "language" the back-office client and the
//! remote REST API speak:
//!
//! - **Identity** ([`Credential`], [`Role`]) — who is calling and what
//!   they are allowed to do.
//! - **Resources** ([`Category`], [`Product`], [`Stock`], [`Order`],
//!   [`User`] and their request forms) — the JSON bodies exchanged with
//!   the backend.
//! - **Validation** ([`validate`]) — checks that run before a request is
//!   ever issued.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those values are
//!   converted to/from bytes (used by the on-disk session store).
//!
//! # Architecture
//!
//! ```text
//! Client (HTTP) → Protocol (typed bodies) → Session (who is logged in)
//! ```

mod codec;
mod error;
mod types;
pub mod validate;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{ProtocolError, ValidationError};
pub use types::{
    ApiMessage, Category, Credential, LoginRequest, LoginResponse, NewCategory,
    NewOrder, Order, Product, ProductForm, Role, Stock, StockDto, User,
    UserForm,
};
