//! FFI-safe error type.

use crate::error::{ErrorCode, ErrorResponse};

/// Error surfaced to Swift and Kotlin.
///
/// Each variant corresponds to an [`ErrorCode`]; unclassified failures (transport
/// errors, the missing-token case, authenticator messages) become [`Self::Generic`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Error, thiserror::Error)]
pub enum TicketKitError {
    /// `KEYCHAIN_ERROR`
    #[error("{error_message}")]
    Keychain {
        /// Human-readable message.
        error_message: String,
    },

    /// `DECODING_ERROR`
    #[error("{error_message}")]
    Decoding {
        /// Human-readable classification of the failure.
        error_message: String,
        /// Raw decoder message.
        details: Option<String>,
    },

    /// `UNKNOWN_DECODING_ERROR`
    #[error("{error_message}")]
    UnknownDecoding {
        /// Human-readable message.
        error_message: String,
        /// Raw error text.
        details: Option<String>,
    },

    /// `BIOMETRIC_NOT_AVAILABLE`
    #[error("{error_message}")]
    BiometricNotAvailable {
        /// Human-readable message.
        error_message: String,
    },

    /// `AUTH_FAILED`
    #[error("{error_message}")]
    AuthFailed {
        /// Human-readable message.
        error_message: String,
    },

    /// Any failure without an error code.
    #[error("{error_message}")]
    Generic {
        /// Human-readable message.
        error_message: String,
        /// HTTP status, if the failure came from a response.
        status_code: Option<u16>,
        /// Raw diagnostic text.
        details: Option<String>,
    },
}

impl From<ErrorResponse> for TicketKitError {
    fn from(response: ErrorResponse) -> Self {
        let ErrorResponse {
            error: error_message,
            status_code,
            error_code,
            details,
        } = response;

        match error_code {
            Some(ErrorCode::KeychainError) => Self::Keychain { error_message },
            Some(ErrorCode::DecodingError) => Self::Decoding {
                error_message,
                details,
            },
            Some(ErrorCode::UnknownDecodingError) => Self::UnknownDecoding {
                error_message,
                details,
            },
            Some(ErrorCode::BiometricNotAvailable) => {
                Self::BiometricNotAvailable { error_message }
            }
            Some(ErrorCode::AuthFailed) => Self::AuthFailed { error_message },
            None => Self::Generic {
                error_message,
                status_code,
                details,
            },
        }
    }
}

/// Result type for FFI operations.
pub type Result<T> = std::result::Result<T, TicketKitError>;
