//! Development stand-ins for the mobile platform capabilities.
//!
//! Nothing here is encrypted. Use only against test accounts.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use ticketkit_core::vault::{AccessPolicy, AuthOutcome, AuthPolicy, DeviceAuthenticator, SecureStore};

/// [`SecureStore`] keeping one file per `(service, account)` in a directory.
///
/// Like the keychain, `write` fails if an entry already exists.
pub struct FileSecureStore {
    root: PathBuf,
}

impl FileSecureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, service: &str, account: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}.entry", hex::encode(service), hex::encode(account)))
    }
}

impl SecureStore for FileSecureStore {
    fn write(
        &self,
        service: String,
        account: String,
        _policy: AccessPolicy,
        bytes: Vec<u8>,
    ) -> bool {
        let path = self.entry_path(&service, &account);
        if path.exists() {
            tracing::debug!(path = %path.display(), "entry already exists");
            return false;
        }
        if let Err(err) = fs::create_dir_all(&self.root) {
            tracing::warn!(%err, "failed to create store directory");
            return false;
        }
        match fs::write(&path, bytes) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to write entry");
                false
            }
        }
    }

    fn delete(&self, service: String, account: String) -> bool {
        let path = self.entry_path(&service, &account);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to delete entry");
                false
            }
        }
    }

    fn read(&self, service: String, account: String) -> Option<Vec<u8>> {
        fs::read(self.entry_path(&service, &account)).ok()
    }
}

/// How the console authenticator answers challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMode {
    /// Ask on stdin.
    Prompt,
    /// Fail every challenge as if the user cancelled.
    Deny,
    /// Report that no authentication policy is available.
    Unavailable,
}

/// [`DeviceAuthenticator`] that asks for confirmation on the terminal.
pub struct ConsoleAuthenticator {
    mode: ConsoleMode,
}

impl ConsoleAuthenticator {
    pub const fn new(mode: ConsoleMode) -> Self {
        Self { mode }
    }
}

impl DeviceAuthenticator for ConsoleAuthenticator {
    fn can_evaluate(&self, _policy: AuthPolicy) -> bool {
        self.mode != ConsoleMode::Unavailable
    }

    fn evaluate(&self, _policy: AuthPolicy, reason: String) -> AuthOutcome {
        if self.mode == ConsoleMode::Deny {
            return AuthOutcome::failure(Some("User canceled.".to_string()));
        }

        eprint!("{reason} [y/N]: ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return AuthOutcome::failure(None);
        }
        if matches!(answer.trim(), "y" | "Y" | "yes") {
            AuthOutcome::success()
        } else {
            AuthOutcome::failure(Some("User canceled.".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use ticketkit_core::vault::{Credential, CredentialVault};

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileSecureStore::new(dir.path()));
        let vault = CredentialVault::new(
            store.clone(),
            Arc::new(ConsoleAuthenticator::new(ConsoleMode::Unavailable)),
        );

        assert!(vault.save("dev@example.com", "pw"));
        assert!(vault.save("dev2@example.com", "pw2"));
        let config = vault.config();
        let stored = store
            .read(config.service.clone(), config.account.clone())
            .unwrap();
        assert_eq!(
            Credential::from_bytes(&stored).unwrap(),
            Credential::new("dev2@example.com", "pw2")
        );
        assert!(vault.authenticated_read().is_err());

        assert!(vault.clear());
        assert!(vault.clear());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_denying_authenticator() {
        let authenticator = ConsoleAuthenticator::new(ConsoleMode::Deny);
        assert!(authenticator.can_evaluate(AuthPolicy::DeviceOwnerAuthentication));
        let outcome =
            authenticator.evaluate(AuthPolicy::DeviceOwnerAuthentication, "why".to_string());
        assert!(!outcome.success);
    }
}
