use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Result type used by every fallible `TicketKit` operation.
pub type TicketKitResult<T, E = ErrorResponse> = std::result::Result<T, E>;

/// Machine-readable classification attached to an [`ErrorResponse`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The secure store could not be read or written, or holds no entry.
    KeychainError,
    /// Bytes could not be decoded into the expected structure.
    DecodingError,
    /// Decoding failed for a reason other than a structural mismatch.
    UnknownDecodingError,
    /// The device cannot evaluate any authentication policy.
    BiometricNotAvailable,
    /// The authentication challenge failed or was cancelled.
    AuthFailed,
}

/// Uniform error value returned by the credential vault and the merchant directory.
///
/// The JSON shape matches what the backend sends on failure, so a server error body
/// can be decoded straight into this type.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{error}")]
pub struct ErrorResponse {
    /// Human-readable message. Never empty.
    pub error: String,
    /// HTTP status associated with the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Machine-readable tag, if the failure was classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    /// Raw diagnostic text, e.g. the underlying decoder message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

const FALLBACK_MESSAGE: &str = "Unknown error";

impl ErrorResponse {
    /// Creates an unclassified error with the given message.
    ///
    /// Blank messages are replaced so that `error` is always populated.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            error
        };
        Self {
            error,
            status_code: None,
            error_code: None,
            details: None,
        }
    }

    /// Sets the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Sets the machine-readable error code.
    #[must_use]
    pub fn with_code(mut self, error_code: ErrorCode) -> Self {
        self.error_code = Some(error_code);
        self
    }

    /// Sets the raw diagnostic details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The secure store failed or holds no credential.
    #[must_use]
    pub fn keychain() -> Self {
        Self::new("Keychain error").with_code(ErrorCode::KeychainError)
    }

    /// The device has no evaluable authentication policy.
    #[must_use]
    pub fn biometric_not_available() -> Self {
        Self::new("Biometric authentication not available")
            .with_code(ErrorCode::BiometricNotAvailable)
    }

    /// The authentication challenge failed without a platform message.
    #[must_use]
    pub fn auth_failed() -> Self {
        Self::new("Authentication failed").with_code(ErrorCode::AuthFailed)
    }

    /// No session token is available; no request was attempted.
    #[must_use]
    pub fn missing_access_token() -> Self {
        Self::new("No access token found").with_status(401)
    }

    /// Returns `true` if the error carries the given code.
    #[must_use]
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.error_code == Some(code)
    }
}
