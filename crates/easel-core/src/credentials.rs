use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;

/// Source of provider credentials
///
/// Owned and mutated by an external settings flow; the orchestrator only
/// ever reads through a [`CredentialSnapshot`] taken at request start, so a
/// concurrent credential update is invisible to in-flight requests.
pub trait CredentialStore: Send + Sync {
    /// Look up the secret for a credential key, if present
    fn get(&self, key: &str) -> Option<SecretString>;

    /// Take a point-in-time snapshot of the given keys
    fn snapshot(&self, keys: &[&str]) -> CredentialSnapshot {
        let map = keys
            .iter()
            .filter_map(|key| self.get(key).map(|secret| ((*key).to_owned(), secret)))
            .collect();
        CredentialSnapshot::from_map(map)
    }
}

/// Credential store backed by process environment variables
///
/// An unset or empty variable counts as an absent credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialStore;

impl CredentialStore for EnvCredentialStore {
    fn get(&self, key: &str) -> Option<SecretString> {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from)
    }
}

/// In-memory credential store for tests and embedded callers
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    secrets: HashMap<String, SecretString>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), SecretString::from(secret.into()));
        self
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<SecretString> {
        self.secrets.get(key).cloned()
    }
}

/// Immutable per-request view of available credentials
///
/// Cloning is cheap; every clone observes the same point-in-time state.
#[derive(Clone, Default)]
pub struct CredentialSnapshot {
    secrets: Arc<HashMap<String, SecretString>>,
}

impl CredentialSnapshot {
    /// A snapshot with no credentials at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(secrets: HashMap<String, SecretString>) -> Self {
        Self {
            secrets: Arc::new(secrets),
        }
    }

    /// Whether a credential exists for the key
    pub fn contains(&self, key: &str) -> bool {
        self.secrets.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&SecretString> {
        self.secrets.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl fmt::Debug for CredentialSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys only; secrecy redacts values but there is no reason to list
        // them here either
        f.debug_struct("CredentialSnapshot")
            .field("keys", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn snapshot_captures_only_requested_keys() {
        let store = MemoryCredentialStore::new()
            .with("GROQ_API_KEY", "gsk-1")
            .with("OPENAI_API_KEY", "sk-2")
            .with("UNRELATED", "x");

        let snapshot = store.snapshot(&["GROQ_API_KEY", "OPENAI_API_KEY", "MISSING"]);

        assert!(snapshot.contains("GROQ_API_KEY"));
        assert!(snapshot.contains("OPENAI_API_KEY"));
        assert!(!snapshot.contains("MISSING"));
        assert!(!snapshot.contains("UNRELATED"));
        assert_eq!(snapshot.get("GROQ_API_KEY").unwrap().expose_secret(), "gsk-1");
    }

    #[test]
    fn snapshot_is_isolated_from_later_store_changes() {
        let store = MemoryCredentialStore::new().with("KEY", "before");
        let snapshot = store.snapshot(&["KEY"]);

        // A new store state does not leak into the existing snapshot
        let store = store.with("KEY", "after");
        assert_eq!(snapshot.get("KEY").unwrap().expose_secret(), "before");
        assert_eq!(store.get("KEY").unwrap().expose_secret(), "after");
    }

    #[test]
    fn debug_output_never_contains_secret_values() {
        let snapshot = MemoryCredentialStore::new()
            .with("API_KEY", "super-secret")
            .snapshot(&["API_KEY"]);

        let debug = format!("{snapshot:?}");
        assert!(debug.contains("API_KEY"));
        assert!(!debug.contains("super-secret"));
    }
}
