//! Structural decoding with classified failures.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{ErrorCode, ErrorResponse, TicketKitResult};

const UNKNOWN_DECODING_MESSAGE: &str = "An unexpected error occurred while decoding the response.";

/// Why a response body did not match the expected structure.
///
/// Independent of any decoder library so that classification can be tested
/// without running a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The bytes are not well-formed, or a value is out of range.
    DataCorrupted {
        /// Decoder description of the problem.
        context: String,
    },
    /// A required key is absent.
    KeyNotFound {
        /// The missing key.
        key: String,
        /// Decoder description of the problem.
        context: String,
    },
    /// A value has the wrong type.
    TypeMismatch {
        /// The type that was expected.
        expected: String,
        /// Decoder description of the problem.
        context: String,
    },
    /// A required value is `null`.
    ValueNotFound {
        /// The type that was expected.
        expected: String,
        /// Decoder description of the problem.
        context: String,
    },
}

impl DecodeFailure {
    /// Classifies a `serde_json` error.
    ///
    /// Returns `None` for failures that are not structural (I/O errors).
    #[must_use]
    pub fn from_json_error(err: &serde_json::Error) -> Option<Self> {
        let context = err.to_string();
        match err.classify() {
            Category::Io => None,
            Category::Syntax | Category::Eof => Some(Self::DataCorrupted { context }),
            Category::Data => {
                let message = message_without_position(err, &context);
                Some(classify_data_error(message, context.clone()))
            }
        }
    }

    /// Human-readable classification used as the `error` of the response.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::DataCorrupted { context } => format!("Data corrupted: {context}"),
            Self::KeyNotFound { key, context } => format!("Key '{key}' not found: {context}"),
            Self::TypeMismatch { expected, context } => {
                format!("Type mismatch for type '{expected}': {context}")
            }
            Self::ValueNotFound { expected, context } => {
                format!("Value not found for type '{expected}': {context}")
            }
        }
    }
}

fn message_without_position<'a>(err: &serde_json::Error, rendered: &'a str) -> &'a str {
    if err.line() == 0 {
        return rendered;
    }
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    rendered.strip_suffix(suffix.as_str()).unwrap_or(rendered)
}

fn classify_data_error(message: &str, context: String) -> DecodeFailure {
    if let Some(rest) = message.strip_prefix("missing field `") {
        let key = rest.trim_end_matches('`').to_string();
        return DecodeFailure::KeyNotFound { key, context };
    }

    if let Some(rest) = message.strip_prefix("invalid type: ") {
        if let Some((unexpected, expected)) = rest.rsplit_once(", expected ") {
            let expected = expected.to_string();
            return if unexpected == "null" {
                DecodeFailure::ValueNotFound { expected, context }
            } else {
                DecodeFailure::TypeMismatch { expected, context }
            };
        }
    }

    DecodeFailure::DataCorrupted { context }
}

/// Builds the `DECODING_ERROR` response for a structural failure.
#[must_use]
pub fn decoding_error_response(failure: &DecodeFailure, details: impl Into<String>) -> ErrorResponse {
    ErrorResponse::new(failure.describe())
        .with_code(ErrorCode::DecodingError)
        .with_details(details)
}

/// Builds the `UNKNOWN_DECODING_ERROR` response for a non-structural failure.
#[must_use]
pub fn unknown_decoding_error_response(details: impl Into<String>) -> ErrorResponse {
    ErrorResponse::new(UNKNOWN_DECODING_MESSAGE)
        .with_code(ErrorCode::UnknownDecodingError)
        .with_details(details)
}

/// Maps a `serde_json` error to the matching decoding response.
#[must_use]
pub fn json_error_response(err: &serde_json::Error) -> ErrorResponse {
    let details = err.to_string();
    match DecodeFailure::from_json_error(err) {
        Some(failure) => decoding_error_response(&failure, details),
        None => unknown_decoding_error_response(details),
    }
}

/// Decodes a JSON body into `T`, classifying any failure.
///
/// # Errors
///
/// `DECODING_ERROR` for structural failures, `UNKNOWN_DECODING_ERROR` otherwise.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> TicketKitResult<T> {
    serde_json::from_slice(bytes).map_err(|err| {
        log::warn!("failed to decode response body: {err}");
        json_error_response(&err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merchants::Merchant;
    use test_case::test_case;

    fn failure_for(body: &str) -> DecodeFailure {
        let err = serde_json::from_str::<Vec<Merchant>>(body).unwrap_err();
        DecodeFailure::from_json_error(&err).unwrap()
    }

    #[test_case(r#"[{"name":"Opera House"}]"#, "id" ; "missing id")]
    #[test_case(r#"[{"id":1}]"#, "name" ; "missing name")]
    fn test_missing_key(body: &str, key: &str) {
        match failure_for(body) {
            DecodeFailure::KeyNotFound { key: found, context } => {
                assert_eq!(found, key);
                assert!(context.contains("missing field"));
            }
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test_case(r#"[{"id":"seven","name":"A"}]"#, "u64" ; "string for integer")]
    #[test_case(r#"{"id":1,"name":"A"}"#, "a sequence" ; "object for list")]
    #[test_case(r#"[{"id":1,"name":false}]"#, "a string" ; "bool for string")]
    fn test_type_mismatch(body: &str, expected: &str) {
        match failure_for(body) {
            DecodeFailure::TypeMismatch { expected: found, .. } => assert_eq!(found, expected),
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_null_required_value() {
        match failure_for(r#"[{"id":1,"name":null}]"#) {
            DecodeFailure::ValueNotFound { expected, .. } => assert_eq!(expected, "a string"),
            other => panic!("expected ValueNotFound, got {other:?}"),
        }
    }

    #[test_case("not json" ; "syntax")]
    #[test_case("" ; "empty body")]
    #[test_case(r#"[{"id":1,"#; "truncated")]
    #[test_case(r#"[{"id":-4,"name":"A"}]"#; "out of range")]
    fn test_data_corrupted(body: &str) {
        assert!(matches!(
            failure_for(body),
            DecodeFailure::DataCorrupted { .. }
        ));
    }

    #[test]
    fn test_describe_messages() {
        let context = "ctx".to_string();
        assert_eq!(
            DecodeFailure::DataCorrupted {
                context: context.clone()
            }
            .describe(),
            "Data corrupted: ctx"
        );
        assert_eq!(
            DecodeFailure::KeyNotFound {
                key: "name".into(),
                context: context.clone()
            }
            .describe(),
            "Key 'name' not found: ctx"
        );
        assert_eq!(
            DecodeFailure::TypeMismatch {
                expected: "u64".into(),
                context: context.clone()
            }
            .describe(),
            "Type mismatch for type 'u64': ctx"
        );
        assert_eq!(
            DecodeFailure::ValueNotFound {
                expected: "a string".into(),
                context
            }
            .describe(),
            "Value not found for type 'a string': ctx"
        );
    }

    #[test]
    fn test_decoding_error_response_is_pure() {
        let failure = DecodeFailure::KeyNotFound {
            key: "id".into(),
            context: "missing field `id`".into(),
        };
        let response = decoding_error_response(&failure, "raw decoder text");

        assert_eq!(response.error, "Key 'id' not found: missing field `id`");
        assert!(response.has_code(ErrorCode::DecodingError));
        assert_eq!(response.details.as_deref(), Some("raw decoder text"));
        assert_eq!(response.status_code, None);
    }

    #[test]
    fn test_io_failure_is_unknown() {
        struct FailingReader;
        impl std::io::Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stream reset"))
            }
        }

        let err = serde_json::from_reader::<_, Vec<Merchant>>(FailingReader).unwrap_err();
        assert!(DecodeFailure::from_json_error(&err).is_none());

        let response = json_error_response(&err);
        assert!(response.has_code(ErrorCode::UnknownDecodingError));
        assert_eq!(response.error, UNKNOWN_DECODING_MESSAGE);
        assert!(response.details.unwrap().contains("stream reset"));
    }

    #[test]
    fn test_decode_json_success() {
        let merchants: Vec<Merchant> =
            decode_json(br#"[{"id":3,"name":"Town Hall","logoUrl":"https://x/y.png"}]"#).unwrap();
        assert_eq!(merchants.len(), 1);
        assert_eq!(merchants[0].logo_url.as_deref(), Some("https://x/y.png"));
    }
}
