#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Client-side support layer for the `TicketKit` mobile app.
//!
//! - [`vault`] keeps the user's sign-in credentials in the platform secure store and
//!   discloses them only after device authentication.
//! - [`merchants`] fetches and decodes the merchant list for the current session.
//!
//! Every fallible operation returns [`ErrorResponse`] as its error. Swift and Kotlin
//! hosts use the wrappers in [`ffi`].

use strum::{Display, EnumString};

/// Backend environment the API clients talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Pre-production backend.
    Staging,
    /// Production backend.
    Production,
}

mod error;
pub use error::*;

pub mod ffi;
pub mod http_request;
pub mod logger;
pub mod merchants;
pub mod vault;

pub use merchants::{AccessTokenProvider, Merchant, MerchantDirectoryClient};
pub use vault::{Credential, CredentialVault, DeviceAuthenticator, SecureStore};

uniffi::setup_scaffolding!("ticketkit_core");
