use std::sync::Arc;

use zeroize::Zeroizing;

use super::traits::{AccessPolicy, DeviceAuthenticator, SecureStore};
use super::types::{Credential, VaultConfig};
use crate::error::{ErrorCode, ErrorResponse, TicketKitResult};

const UNDECODABLE_CREDENTIAL: &str = "Stored credential could not be decoded";

/// Single-slot credential storage with disclosure gated by device authentication.
///
/// Concurrent `save` calls are not coordinated: each performs its own
/// delete-then-insert and the last insert wins. Callers needing stronger
/// guarantees must serialize their saves.
pub struct CredentialVault {
    store: Arc<dyn SecureStore>,
    authenticator: Arc<dyn DeviceAuthenticator>,
    config: VaultConfig,
}

impl CredentialVault {
    /// Creates a vault using the default [`VaultConfig`].
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>, authenticator: Arc<dyn DeviceAuthenticator>) -> Self {
        Self::with_config(store, authenticator, VaultConfig::default())
    }

    /// Creates a vault with an explicit configuration.
    #[must_use]
    pub fn with_config(
        store: Arc<dyn SecureStore>,
        authenticator: Arc<dyn DeviceAuthenticator>,
        config: VaultConfig,
    ) -> Self {
        Self {
            store,
            authenticator,
            config,
        }
    }

    /// The configuration this vault was built with.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Replaces the stored credential.
    ///
    /// Any existing entry is deleted first and the new one is then added with
    /// [`AccessPolicy::WhenPasscodeSetThisDeviceOnly`]. Returns `false` if the
    /// credential could not be encoded or the store rejected the write.
    pub fn save(&self, email: &str, password: &str) -> bool {
        let bytes = match Credential::new(email, password).to_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("failed to encode credential: {err}");
                return false;
            }
        };

        // The store refuses to add over an existing entry; a missing entry is fine here.
        let _ = self.store.delete(self.service(), self.account());

        let written = self.store.write(
            self.service(),
            self.account(),
            AccessPolicy::WhenPasscodeSetThisDeviceOnly,
            bytes.to_vec(),
        );
        if written {
            log::debug!("credential saved under account {}", self.config.account);
        } else {
            log::warn!(
                "secure store rejected credential write for account {}",
                self.config.account
            );
        }
        written
    }

    /// Returns the stored credential once the user passes device authentication.
    ///
    /// The entry is loaded and decoded before any prompt is shown, so an empty or
    /// corrupted vault never triggers authentication.
    ///
    /// # Errors
    ///
    /// - `KEYCHAIN_ERROR` if nothing is stored.
    /// - `DECODING_ERROR` if the stored bytes are not a credential.
    /// - `BIOMETRIC_NOT_AVAILABLE` if the device cannot authenticate.
    /// - `AUTH_FAILED`, or the authenticator's own message, if the challenge fails.
    pub fn authenticated_read(&self) -> TicketKitResult<Credential> {
        let credential = self.try_load_raw()?;
        self.authenticate_and_disclose(credential)
    }

    /// Deletes the stored credential. Returns the store's delete result.
    pub fn clear(&self) -> bool {
        let deleted = self.store.delete(self.service(), self.account());
        if !deleted {
            log::warn!(
                "secure store failed to delete account {}",
                self.config.account
            );
        }
        deleted
    }

    /// Reads and decodes the stored entry without authenticating.
    ///
    /// Decode errors carry only the error category and position; the serde
    /// message would echo the stored bytes.
    fn try_load_raw(&self) -> TicketKitResult<Credential> {
        let Some(bytes) = self.store.read(self.service(), self.account()) else {
            log::debug!("no credential stored under account {}", self.config.account);
            return Err(ErrorResponse::keychain());
        };
        let bytes = Zeroizing::new(bytes);

        Credential::from_bytes(&bytes).map_err(|err| {
            let details = format!(
                "{:?} error at line {} column {}",
                err.classify(),
                err.line(),
                err.column()
            );
            log::warn!("stored credential is not decodable: {details}");
            ErrorResponse::new(UNDECODABLE_CREDENTIAL)
                .with_code(ErrorCode::DecodingError)
                .with_details(details)
        })
    }

    /// Challenges the user and hands back `credential` only if the challenge passes.
    ///
    /// # Errors
    ///
    /// `BIOMETRIC_NOT_AVAILABLE` without prompting when the policy cannot be
    /// evaluated; otherwise the authenticator's message, or `AUTH_FAILED` if it
    /// gave none.
    fn authenticate_and_disclose(&self, credential: Credential) -> TicketKitResult<Credential> {
        let policy = self.config.auth_policy;
        if !self.authenticator.can_evaluate(policy) {
            log::info!("device cannot evaluate {policy:?}");
            return Err(ErrorResponse::biometric_not_available());
        }

        let outcome = self
            .authenticator
            .evaluate(policy, self.config.reason.clone());
        if outcome.success {
            log::debug!("device authentication succeeded");
            return Ok(credential);
        }

        log::info!("device authentication failed");
        Err(match outcome.error {
            Some(message) if !message.trim().is_empty() => ErrorResponse::new(message),
            _ => ErrorResponse::auth_failed(),
        })
    }

    fn service(&self) -> String {
        self.config.service.clone()
    }

    fn account(&self) -> String {
        self.config.account.clone()
    }
}
