use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::traits::AuthPolicy;

/// Default secure-store service identifier.
pub const DEFAULT_SERVICE: &str = "com.ticketkit.credentials";

/// Default account key under [`DEFAULT_SERVICE`].
pub const DEFAULT_ACCOUNT: &str = "user_credentials";

/// Default reason shown in the authentication prompt.
pub const DEFAULT_REASON: &str = "Authenticate to unlock your stored account details";

/// The single set of sign-in credentials kept in the vault.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct Credential {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credential {
    /// Creates a credential from its parts.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Serializes to the JSON object stored in the secure store.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>, serde_json::Error> {
        serde_json::to_vec(self).map(Zeroizing::new)
    }

    /// Parses bytes previously produced by [`Credential::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if the bytes are not a JSON object with
    /// string `email` and `password` fields.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how the vault keeps its single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Secure-store service identifier.
    pub service: String,
    /// Account key under `service`. One vault holds exactly one entry under this key.
    pub account: String,
    /// Reason shown to the user when authentication is requested.
    pub reason: String,
    /// Policy evaluated before disclosing the credential.
    pub auth_policy: AuthPolicy,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
            reason: DEFAULT_REASON.to_string(),
            auth_policy: AuthPolicy::default(),
        }
    }
}

impl VaultConfig {
    /// Overrides the account key, keeping the other defaults.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_json_shape() {
        let credential = Credential::new("a@b.com", "hunter2");
        let bytes = credential.to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["password"], "hunter2");
        assert_eq!(Credential::from_bytes(&bytes).unwrap(), credential);
    }

    #[test]
    fn test_credential_rejects_missing_password() {
        assert!(Credential::from_bytes(br#"{"email":"a@b.com"}"#).is_err());
        assert!(Credential::from_bytes(br#"{"email":"a@b.com","password":7}"#).is_err());
        assert!(Credential::from_bytes(b"").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credential::new("a@b.com", "hunter2"));
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
