//! Navigation gating for the MegaMart back-office.
//!
//! Every navigation passes through two checks, in order:
//!
//! 1. [`RouteGuard`] — is the session restored, and is anyone logged in?
//!    Yields a [`GuardDecision`]: Pending, Deny, or Allow.
//! 2. The access table ([`access`]) — may this role use this screen?
//!
//! [`ViewRouter`] runs both and returns a [`Navigation`]: render the
//! destination, redirect somewhere else, or defer until restore is done.
//!
//! # Key types
//!
//! - [`Destination`] — the fixed set of screens
//! - [`GuardDecision`] — the three-state guard outcome
//! - [`Action`] — in-screen operations with their own role rules
//! - [`MenuItem`] — home-screen tiles filtered by role

pub mod access;
mod destination;
mod error;
mod guard;
mod router;

pub use access::{Action, MenuItem};
pub use destination::Destination;
pub use error::RouterError;
pub use guard::{GuardDecision, RouteGuard};
pub use router::{Navigation, ViewRouter};
