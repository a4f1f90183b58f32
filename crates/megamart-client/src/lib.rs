//! REST client for the MegaMart back-office API.
//!
//! [`ApiClient`] talks to a fixed base endpoint. It does two things:
//!
//! - **Login** — `POST /login`, exposed both directly and through the
//!   session crate's [`Authenticator`](megamart_session::Authenticator)
//!   trait.
//! - **Resources** — [`Authorized`] binds a [`Credential`] to the client
//!   and sends it as `Authorization: Bearer <credential>` on every call.
//!
//! The client never touches session state. A 401/403 surfaces as
//! [`ClientError::Unauthorized`] and the caller decides what to do.
//!
//! [`Credential`]: megamart_protocol::Credential

mod auth;
mod client;
mod config;
mod error;

pub use client::{ApiClient, Authorized};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
