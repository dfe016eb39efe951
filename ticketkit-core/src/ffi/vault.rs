use std::sync::Arc;

use super::error::Result;
use crate::vault::{
    Credential, CredentialVault as InternalCredentialVault, DeviceAuthenticator, SecureStore,
    VaultConfig,
};

/// Authenticated single-credential vault.
///
/// # Example (Swift)
///
/// ```swift
/// let vault = CredentialVault(store: KeychainStore(), authenticator: LocalAuthenticator(), account: nil)
/// _ = vault.save(email: email, password: password)
/// let credential = try vault.authenticatedRead()
/// ```
#[derive(uniffi::Object)]
pub struct CredentialVault {
    inner: InternalCredentialVault,
}

#[uniffi::export]
impl CredentialVault {
    /// Creates a vault on top of the host's secure store and authenticator.
    ///
    /// `account` overrides the default account key.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        store: Arc<dyn SecureStore>,
        authenticator: Arc<dyn DeviceAuthenticator>,
        account: Option<String>,
    ) -> Self {
        let config = match account {
            Some(account) => VaultConfig::default().with_account(account),
            None => VaultConfig::default(),
        };
        Self {
            inner: InternalCredentialVault::with_config(store, authenticator, config),
        }
    }

    /// Replaces the stored credential. Returns `false` if the store rejected it.
    #[must_use]
    pub fn save(&self, email: &str, password: &str) -> bool {
        self.inner.save(email, password)
    }

    /// Returns the stored credential after device authentication.
    ///
    /// # Errors
    ///
    /// See [`crate::vault::CredentialVault::authenticated_read`].
    pub fn authenticated_read(&self) -> Result<Credential> {
        Ok(self.inner.authenticated_read()?)
    }

    /// Deletes the stored credential.
    #[must_use]
    pub fn clear(&self) -> bool {
        self.inner.clear()
    }
}
