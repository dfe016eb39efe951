//! Platform capabilities the vault depends on.

/// Platform rule controlling when a stored secret may be decrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum AccessPolicy {
    /// Readable only while the device has a passcode set, and never migrated
    /// to another device.
    ///
    /// On iOS this is `kSecAttrAccessibleWhenPasscodeSetThisDeviceOnly`. When the device
    /// has no passcode the platform refuses the write or the entry becomes unreadable.
    WhenPasscodeSetThisDeviceOnly,
}

/// Authentication policy evaluated before a stored credential is disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, uniffi::Enum)]
pub enum AuthPolicy {
    /// Biometrics, falling back to the device passcode.
    #[default]
    DeviceOwnerAuthentication,
    /// Biometrics only.
    DeviceOwnerAuthenticationWithBiometrics,
}

/// Result of an authentication challenge.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct AuthOutcome {
    /// Whether the user passed the challenge.
    pub success: bool,
    /// Platform-provided description of the failure, if any.
    pub error: Option<String>,
}

impl AuthOutcome {
    /// A passed challenge.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed or cancelled challenge.
    #[must_use]
    pub const fn failure(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Access-controlled secret storage provided by the host platform.
///
/// - iOS: Keychain Services generic passwords
/// - Android: `EncryptedSharedPreferences` backed by the Android Keystore
///
/// Entries are addressed by `(service, account)`. The platform is responsible for
/// synchronizing concurrent calls.
#[uniffi::export(with_foreign)]
pub trait SecureStore: Send + Sync {
    /// Adds a new entry. Returns `false` if the platform rejected the write,
    /// including when an entry already exists under the same identifier.
    fn write(
        &self,
        service: String,
        account: String,
        policy: AccessPolicy,
        bytes: Vec<u8>,
    ) -> bool;

    /// Removes the entry. Deleting a missing entry counts as success.
    fn delete(&self, service: String, account: String) -> bool;

    /// Returns the stored bytes, or `None` if there is no readable entry.
    ///
    /// Reading does not require user authentication.
    fn read(&self, service: String, account: String) -> Option<Vec<u8>>;
}

/// Device owner authentication (biometrics or passcode).
///
/// On iOS this wraps `LAContext`. `evaluate` blocks until the user completes or
/// dismisses the prompt.
#[uniffi::export(with_foreign)]
pub trait DeviceAuthenticator: Send + Sync {
    /// Whether the device can evaluate `policy` at all.
    fn can_evaluate(&self, policy: AuthPolicy) -> bool;

    /// Presents the challenge, showing `reason` to the user.
    fn evaluate(&self, policy: AuthPolicy, reason: String) -> AuthOutcome;
}
