//! FFI bindings.
//!
//! Swift and Kotlin entry points. The types here wrap the Rust API in
//! [`crate::vault`] and [`crate::merchants`] and convert
//! [`ErrorResponse`](crate::ErrorResponse) into [`TicketKitError`].
//!
//! # Main Entry Points
//!
//! - [`CredentialVault`] - save, read (with authentication) and clear the user's credentials
//! - [`MerchantDirectory`] - fetch the merchant list

mod error;
mod merchants;
mod vault;

pub use error::{Result, TicketKitError};
pub use merchants::MerchantDirectory;
pub use vault::CredentialVault;
