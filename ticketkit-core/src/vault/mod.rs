//! Authenticated credential vault.
//!
//! The vault keeps exactly one [`Credential`] in a platform secure store and only
//! hands it back after the device owner passes an authentication challenge.
//!
//! # Platform Integration
//!
//! The vault depends on two host-provided capabilities:
//!
//! - [`SecureStore`] — access-controlled secret storage (Keychain, Android Keystore)
//! - [`DeviceAuthenticator`] — biometric / passcode challenge (`LAContext`, `BiometricPrompt`)
//!
//! Both are `UniFFI` foreign traits, so Swift and Kotlin hosts implement them directly.
//! [`memory`] provides in-process implementations for tests.
//!
//! # Read path
//!
//! ```text
//! authenticated_read
//!     │
//!     ├─► try_load_raw               (no prompt)  → KEYCHAIN_ERROR | DECODING_ERROR
//!     │
//!     └─► authenticate_and_disclose  (prompt)     → BIOMETRIC_NOT_AVAILABLE | AUTH_FAILED
//! ```

pub mod memory;
mod store;
mod traits;
mod types;

pub use store::CredentialVault;
pub use traits::{AccessPolicy, AuthOutcome, AuthPolicy, DeviceAuthenticator, SecureStore};
pub use types::{Credential, VaultConfig, DEFAULT_ACCOUNT, DEFAULT_REASON, DEFAULT_SERVICE};
