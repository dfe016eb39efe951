//! In-memory implementations of the vault capabilities.
//!
//! These are NOT secure. They exist for unit and integration tests and for
//! hosts that want to exercise the vault without a real keychain.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::traits::{AccessPolicy, AuthOutcome, AuthPolicy, DeviceAuthenticator, SecureStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call observed by [`MemorySecureStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// `read(service, account)`
    Read {
        /// Service identifier.
        service: String,
        /// Account key.
        account: String,
    },
    /// `write(service, account, policy, _)`
    Write {
        /// Service identifier.
        service: String,
        /// Account key.
        account: String,
        /// Access policy requested for the entry.
        policy: AccessPolicy,
    },
    /// `delete(service, account)`
    Delete {
        /// Service identifier.
        service: String,
        /// Account key.
        account: String,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    policy: AccessPolicy,
    bytes: Vec<u8>,
}

/// Keychain-like store held in a `HashMap`.
///
/// Mirrors keychain semantics where it matters: `write` refuses to overwrite an
/// existing entry, and deleting a missing entry succeeds.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    entries: Mutex<HashMap<(String, String), Entry>>,
    operations: Mutex<Vec<StoreOperation>>,
    reject_writes: AtomicBool,
    reject_deletes: AtomicBool,
}

impl MemorySecureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `write` fail, as a device without a passcode would.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Makes every subsequent `delete` fail.
    pub fn reject_deletes(&self, reject: bool) {
        self.reject_deletes.store(reject, Ordering::SeqCst);
    }

    /// Places raw bytes under an identifier, bypassing the recorded operations.
    pub fn insert_raw(&self, service: &str, account: &str, bytes: Vec<u8>) {
        lock(&self.entries).insert(
            (service.to_string(), account.to_string()),
            Entry {
                policy: AccessPolicy::WhenPasscodeSetThisDeviceOnly,
                bytes,
            },
        );
    }

    /// Returns the raw bytes stored under an identifier.
    #[must_use]
    pub fn raw(&self, service: &str, account: &str) -> Option<Vec<u8>> {
        lock(&self.entries)
            .get(&(service.to_string(), account.to_string()))
            .map(|entry| entry.bytes.clone())
    }

    /// Returns the access policy an entry was written with.
    #[must_use]
    pub fn policy(&self, service: &str, account: &str) -> Option<AccessPolicy> {
        lock(&self.entries)
            .get(&(service.to_string(), account.to_string()))
            .map(|entry| entry.policy)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOperation> {
        lock(&self.operations).clone()
    }

    fn record(&self, operation: StoreOperation) {
        lock(&self.operations).push(operation);
    }
}

impl SecureStore for MemorySecureStore {
    fn write(
        &self,
        service: String,
        account: String,
        policy: AccessPolicy,
        bytes: Vec<u8>,
    ) -> bool {
        self.record(StoreOperation::Write {
            service: service.clone(),
            account: account.clone(),
            policy,
        });
        if self.reject_writes.load(Ordering::SeqCst) {
            return false;
        }
        let mut entries = lock(&self.entries);
        let key = (service, account);
        if entries.contains_key(&key) {
            // duplicate item
            return false;
        }
        entries.insert(key, Entry { policy, bytes });
        true
    }

    fn delete(&self, service: String, account: String) -> bool {
        self.record(StoreOperation::Delete {
            service: service.clone(),
            account: account.clone(),
        });
        if self.reject_deletes.load(Ordering::SeqCst) {
            return false;
        }
        lock(&self.entries).remove(&(service, account));
        true
    }

    fn read(&self, service: String, account: String) -> Option<Vec<u8>> {
        self.record(StoreOperation::Read {
            service: service.clone(),
            account: account.clone(),
        });
        lock(&self.entries)
            .get(&(service, account))
            .map(|entry| entry.bytes.clone())
    }
}

/// Authenticator with a fixed answer that counts how often it was consulted.
#[derive(Debug)]
pub struct ScriptedAuthenticator {
    available: bool,
    outcome: AuthOutcome,
    availability_checks: AtomicUsize,
    prompts: AtomicUsize,
    last_prompt: Mutex<Option<(AuthPolicy, String)>>,
}

impl ScriptedAuthenticator {
    fn scripted(available: bool, outcome: AuthOutcome) -> Self {
        Self {
            available,
            outcome,
            availability_checks: AtomicUsize::new(0),
            prompts: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Every challenge succeeds.
    #[must_use]
    pub fn approving() -> Self {
        Self::scripted(true, AuthOutcome::success())
    }

    /// Every challenge fails, optionally with a platform message.
    #[must_use]
    pub fn denying(message: Option<&str>) -> Self {
        Self::scripted(true, AuthOutcome::failure(message.map(str::to_string)))
    }

    /// The device supports no authentication policy.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::scripted(false, AuthOutcome::failure(None))
    }

    /// How many times `can_evaluate` was called.
    #[must_use]
    pub fn availability_checks(&self) -> usize {
        self.availability_checks.load(Ordering::SeqCst)
    }

    /// How many challenges were presented.
    #[must_use]
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Policy and reason of the most recent challenge.
    #[must_use]
    pub fn last_prompt(&self) -> Option<(AuthPolicy, String)> {
        lock(&self.last_prompt).clone()
    }
}

impl DeviceAuthenticator for ScriptedAuthenticator {
    fn can_evaluate(&self, _policy: AuthPolicy) -> bool {
        self.availability_checks.fetch_add(1, Ordering::SeqCst);
        self.available
    }

    fn evaluate(&self, policy: AuthPolicy, reason: String) -> AuthOutcome {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_prompt) = Some((policy, reason));
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_refuses_duplicates() {
        let store = MemorySecureStore::new();
        let policy = AccessPolicy::WhenPasscodeSetThisDeviceOnly;
        assert!(store.write("svc".into(), "acct".into(), policy, vec![1]));
        assert!(!store.write("svc".into(), "acct".into(), policy, vec![2]));
        assert_eq!(store.raw("svc", "acct"), Some(vec![1]));
    }

    #[test]
    fn test_delete_missing_entry_succeeds() {
        let store = MemorySecureStore::new();
        assert!(store.delete("svc".into(), "acct".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejected_writes() {
        let store = MemorySecureStore::new();
        store.reject_writes(true);
        assert!(!store.write(
            "svc".into(),
            "acct".into(),
            AccessPolicy::WhenPasscodeSetThisDeviceOnly,
            vec![1]
        ));
        assert!(store.is_empty());
        assert_eq!(store.operations().len(), 1);
    }
}
