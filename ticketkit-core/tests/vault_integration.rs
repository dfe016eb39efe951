//! End-to-end vault flows through both the Rust and the FFI surfaces.

use std::sync::Arc;

use ticketkit_core::ffi::{self, TicketKitError};
use ticketkit_core::vault::memory::{MemorySecureStore, ScriptedAuthenticator};
use ticketkit_core::vault::{Credential, CredentialVault, DEFAULT_ACCOUNT, DEFAULT_SERVICE};
use ticketkit_core::ErrorCode;

#[test]
fn test_vault_lifecycle() {
    let store = Arc::new(MemorySecureStore::new());
    let authenticator = Arc::new(ScriptedAuthenticator::approving());
    let vault = CredentialVault::new(store.clone(), authenticator.clone());

    let pairs = [
        ("first@example.com", "pw-1"),
        ("second@example.com", "pw with spaces"),
        ("", ""),
        ("ünïcødé@example.com", "\"quoted\" \\ back"),
    ];
    for (email, password) in pairs {
        assert!(vault.save(email, password));
        assert_eq!(store.len(), 1);
        assert_eq!(
            vault.authenticated_read().unwrap(),
            Credential::new(email, password)
        );
    }
    assert_eq!(authenticator.prompts(), pairs.len());

    assert!(vault.clear());
    let err = vault.authenticated_read().unwrap_err();
    assert!(err.has_code(ErrorCode::KeychainError));
    assert_eq!(authenticator.prompts(), pairs.len());
}

#[test]
fn test_stored_bytes_are_plain_credential_json() {
    let store = Arc::new(MemorySecureStore::new());
    let vault = CredentialVault::new(store.clone(), Arc::new(ScriptedAuthenticator::approving()));

    assert!(vault.save("kim@example.com", "s3cret"));

    let raw = store.raw(DEFAULT_SERVICE, DEFAULT_ACCOUNT).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"email": "kim@example.com", "password": "s3cret"})
    );
}

#[test]
fn test_denied_read_discloses_nothing() {
    let store = Arc::new(MemorySecureStore::new());
    let vault = CredentialVault::new(
        store,
        Arc::new(ScriptedAuthenticator::denying(Some("Face ID locked out"))),
    );
    assert!(vault.save("kim@example.com", "s3cret"));

    let err = vault.authenticated_read().unwrap_err();

    assert_eq!(err.error, "Face ID locked out");
    assert!(!format!("{err:?}").contains("s3cret"));
}

#[test]
fn test_unauthenticated_vault_discloses_nothing() {
    let store = Arc::new(MemorySecureStore::new());
    let authenticator = Arc::new(ScriptedAuthenticator::unavailable());
    let vault = CredentialVault::new(store, authenticator.clone());
    assert!(vault.save("kim@example.com", "s3cret"));

    for _ in 0..3 {
        let err = vault.authenticated_read().unwrap_err();
        assert!(err.has_code(ErrorCode::BiometricNotAvailable));
        let rendered = format!("{err:?} {}", serde_json::to_string(&err).unwrap());
        assert!(!rendered.contains("s3cret"));
    }
    assert_eq!(authenticator.prompts(), 0);

    let ffi_vault = ffi::CredentialVault::new(
        Arc::new(MemorySecureStore::new()),
        Arc::new(ScriptedAuthenticator::denying(None)),
        None,
    );
    assert!(ffi_vault.save("kim@example.com", "s3cret"));
    assert!(matches!(
        ffi_vault.authenticated_read(),
        Err(TicketKitError::AuthFailed { .. })
    ));
}

#[test]
fn test_ffi_vault_maps_errors() {
    let store = Arc::new(MemorySecureStore::new());
    let vault = ffi::CredentialVault::new(
        store.clone(),
        Arc::new(ScriptedAuthenticator::unavailable()),
        Some("kiosk".to_string()),
    );

    assert!(matches!(
        vault.authenticated_read(),
        Err(TicketKitError::Keychain { .. })
    ));

    assert!(vault.save("kim@example.com", "s3cret"));
    assert!(store.raw(DEFAULT_SERVICE, "kiosk").is_some());
    assert!(matches!(
        vault.authenticated_read(),
        Err(TicketKitError::BiometricNotAvailable { .. })
    ));

    assert!(vault.clear());
    assert!(store.is_empty());
}
