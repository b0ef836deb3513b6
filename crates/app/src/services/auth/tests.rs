use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use super::*;
use crate::config::HashingConfig;
use crate::middleware::AuthGuard;
use crate::navigation::HistoryNavigator;
use crate::storage::{MemoryStore, StorageError, keys};

// =============================================================================
// Fixtures
// =============================================================================

fn hasher() -> CredentialHasher {
    CredentialHasher::new(&HashingConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

fn registration(email: &str, password: &str, confirm: &str) -> Registration {
    Registration {
        full_name: "Test user".to_owned(),
        email: email.to_owned(),
        password: secret(password),
        confirm_password: secret(confirm),
    }
}

fn valid_registration() -> Registration {
    registration("testuser1@gmail.com", "password123", "password123")
}

fn stored_accounts(store: &dyn KeyValueStore) -> Vec<serde_json::Value> {
    store
        .get(keys::USERS)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
        .unwrap_or_default()
}

/// Memory store whose writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Cell<bool>,
}

impl FlakyStore {
    fn write_error(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_owned(),
            path: PathBuf::from(format!("{key}.json")),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only profile"),
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(Self::write_error(key));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(Self::write_error(key));
        }
        self.inner.remove(key)
    }
}

// =============================================================================
// Register
// =============================================================================

#[test]
fn test_register_persists_account_and_navigates_to_login() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    manager.register(&valid_registration()).unwrap();

    let users = stored_accounts(&store);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "testuser1@gmail.com");
    assert_eq!(users[0]["fullName"], "Test user");
    assert!(!users[0]["id"].as_str().unwrap().is_empty());
    assert_eq!(navigator.history(), vec![Route::Login]);
}

#[test]
fn test_register_never_stores_plaintext() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    manager.register(&valid_registration()).unwrap();

    let raw = store.get(keys::USERS).unwrap().unwrap();
    assert!(!raw.contains("password123"));
    let users = stored_accounts(&store);
    assert!(users[0].get("password").is_none());
    assert!(users[0]["passwordHash"].as_str().unwrap().starts_with("$argon2id$"));
}

#[test]
fn test_register_generates_distinct_ids() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    manager
        .register(&registration("a@example.com", "secret1", "secret1"))
        .unwrap();
    manager
        .register(&registration("b@example.com", "secret1", "secret1"))
        .unwrap();

    let users = stored_accounts(&store);
    assert_ne!(users[0]["id"], users[1]["id"]);
}

#[test]
fn test_register_duplicate_email() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    manager.register(&valid_registration()).unwrap();
    navigator.clear();

    let mut second = registration("testuser1@gmail.com", "different1", "different1");
    second.full_name = "Someone else".to_owned();
    let err = manager.register(&second).unwrap_err();

    assert!(matches!(err, AuthError::DuplicateEmail));
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(stored_accounts(&store).len(), 1);
    assert!(navigator.history().is_empty());
}

#[test]
fn test_register_duplicate_of_seeded_collection_leaves_it_untouched() {
    let store = MemoryStore::new();
    let seeded = r#"[{"id":"k3j9x2m1q","fullName":"Test user","email":"testuser1@gmail.com","passwordHash":"not-a-hash","createdAt":"2026-01-02T03:04:05Z"}]"#;
    store.set(keys::USERS, seeded).unwrap();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager.register(&valid_registration()).unwrap_err();

    assert!(matches!(err, AuthError::DuplicateEmail));
    assert_eq!(store.get(keys::USERS).unwrap().as_deref(), Some(seeded));
    assert!(navigator.history().is_empty());
}

#[test]
fn test_register_password_mismatch() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager
        .register(&registration(
            "testuser1@gmail.com",
            "password123",
            "wrongPassword",
        ))
        .unwrap_err();

    assert!(matches!(err, AuthError::PasswordMismatch));
    assert_eq!(err.to_string(), "Passwords do not match");
    assert!(store.get(keys::USERS).unwrap().is_none());
    assert!(navigator.history().is_empty());
}

#[test]
fn test_register_mismatch_wins_over_duplicate() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();

    let err = manager
        .register(&registration(
            "testuser1@gmail.com",
            "password123",
            "wrongPassword",
        ))
        .unwrap_err();

    assert!(matches!(err, AuthError::PasswordMismatch));
    assert_eq!(stored_accounts(&store).len(), 1);
}

#[test]
fn test_register_invalid_email() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager
        .register(&registration("invalid-email", "password123", "password123"))
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidEmail(_)));
    assert!(store.is_empty());
}

#[test]
fn test_register_storage_fault_is_generic_failure() {
    let store = FlakyStore::default();
    store.fail_writes.set(true);
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager.register(&valid_registration()).unwrap_err();

    assert!(matches!(
        err,
        AuthError::RegistrationFailed(ServiceFault::Repository(RepositoryError::Storage(_)))
    ));
    assert_eq!(err.to_string(), "Registration failed. Please try again.");
    assert!(store.inner.is_empty());
    assert!(navigator.history().is_empty());
}

#[test]
fn test_register_corrupt_collection_is_generic_failure() {
    let store = MemoryStore::new();
    store.set(keys::USERS, "not json").unwrap();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager.register(&valid_registration()).unwrap_err();

    assert!(matches!(err, AuthError::RegistrationFailed(_)));
    assert_eq!(store.get(keys::USERS).unwrap().as_deref(), Some("not json"));
}

// =============================================================================
// Login
// =============================================================================

#[test]
fn test_login_persists_session_without_credential() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();
    navigator.clear();

    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();

    let raw = store.get(keys::CURRENT_USER).unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted["email"], "testuser1@gmail.com");
    assert!(persisted.get("password").is_none());
    assert!(persisted.get("passwordHash").is_none());

    let current = manager.current_session().unwrap();
    assert_eq!(current.email.as_str(), "testuser1@gmail.com");
    assert_eq!(current.full_name, "Test user");
    assert_eq!(navigator.history(), vec![Route::Dashboard]);
}

#[test]
fn test_login_wrong_password() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();
    navigator.clear();

    let err = manager
        .login("testuser1@gmail.com", &secret("wrongPassword"))
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!manager.is_authenticated());
    assert!(store.get(keys::CURRENT_USER).unwrap().is_none());
    assert!(navigator.history().is_empty());
}

#[test]
fn test_login_unknown_or_differently_cased_email() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();

    for email in ["nobody@gmail.com", "TestUser1@gmail.com", "not-an-email"] {
        let err = manager.login(email, &secret("password123")).unwrap_err();
        assert!(
            matches!(err, AuthError::InvalidCredentials),
            "{email} should be rejected"
        );
    }
}

#[test]
fn test_login_with_no_accounts() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    let err = manager
        .login("testuser1@gmail.com", &secret("wrongPassword"))
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn test_login_storage_fault_is_generic_failure() {
    let store = FlakyStore::default();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();
    navigator.clear();

    store.fail_writes.set(true);
    let err = manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap_err();

    assert!(matches!(err, AuthError::LoginFailed(_)));
    assert_eq!(err.to_string(), "Login failed. Please try again.");
    assert!(!manager.is_authenticated());
    assert!(navigator.history().is_empty());
}

#[test]
fn test_second_login_replaces_session() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager
        .register(&registration("a@example.com", "secret1", "secret1"))
        .unwrap();
    manager
        .register(&registration("b@example.com", "secret2", "secret2"))
        .unwrap();

    manager.login("a@example.com", &secret("secret1")).unwrap();
    manager.login("b@example.com", &secret("secret2")).unwrap();

    let current = manager.current_session().unwrap();
    assert_eq!(current.email.as_str(), "b@example.com");

    let persisted: Session =
        serde_json::from_str(&store.get(keys::CURRENT_USER).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, current);
}

// =============================================================================
// Logout / queries
// =============================================================================

#[test]
fn test_logout_clears_everything() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();
    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();
    assert!(manager.is_authenticated());

    manager.logout();

    assert!(!manager.is_authenticated());
    assert_eq!(manager.current_session(), None);
    assert!(store.get(keys::CURRENT_USER).unwrap().is_none());
    assert_eq!(navigator.current(), Some(Route::Login));
}

#[test]
fn test_logout_without_session_is_harmless() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    manager.logout();
    manager.logout();

    assert_eq!(manager.current_session(), None);
    assert_eq!(navigator.history(), vec![Route::Login, Route::Login]);
}

#[test]
fn test_logout_survives_storage_fault() {
    let store = FlakyStore::default();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();
    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();

    store.fail_writes.set(true);
    manager.logout();

    assert!(!manager.is_authenticated());
    assert_eq!(navigator.current(), Some(Route::Login));
}

#[test]
fn test_accounts_lists_summaries() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();

    let accounts = manager.accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].email.as_str(), "testuser1@gmail.com");
    assert_eq!(accounts[0].full_name, "Test user");
}

// =============================================================================
// Hydration
// =============================================================================

#[test]
fn test_new_manager_hydrates_persisted_session() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    {
        let manager = SessionManager::new(&store, &navigator, hasher());
        manager.register(&valid_registration()).unwrap();
        manager
            .login("testuser1@gmail.com", &secret("password123"))
            .unwrap();
    }

    let reloaded = SessionManager::new(&store, &navigator, hasher());
    assert!(reloaded.is_authenticated());
    assert_eq!(
        reloaded.current_session().unwrap().email.as_str(),
        "testuser1@gmail.com"
    );
}

#[test]
fn test_empty_store_hydrates_as_logged_out() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());

    assert!(!manager.is_authenticated());
    assert_eq!(manager.current_session(), None);
}

#[test]
fn test_corrupt_session_hydrates_as_logged_out() {
    let store = MemoryStore::new();
    store.set(keys::CURRENT_USER, "{\"fullName\":").unwrap();
    let navigator = HistoryNavigator::new();

    let manager = SessionManager::new(&store, &navigator, hasher());
    assert!(!manager.is_authenticated());
}

// =============================================================================
// Observation and guarding
// =============================================================================

#[test]
fn test_subscribers_follow_login_and_logout() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = manager.subscribe(move |session| {
        sink.borrow_mut()
            .push(session.map(|s| s.full_name.clone()));
    });

    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();
    let _ = manager.login("testuser1@gmail.com", &secret("wrongPassword"));
    manager.logout();
    assert!(manager.unsubscribe(id));
    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![None, Some("Test user".to_owned()), None]
    );
}

#[test]
fn test_guard_follows_session_state() {
    let store = MemoryStore::new();
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher());
    manager.register(&valid_registration()).unwrap();

    let guard_navigator = HistoryNavigator::new();
    let guard = AuthGuard::new(&manager, &guard_navigator);

    assert!(!guard.can_activate().unwrap());
    assert_eq!(guard_navigator.history(), vec![Route::Login]);

    manager
        .login("testuser1@gmail.com", &secret("password123"))
        .unwrap();
    guard_navigator.clear();
    assert!(guard.can_activate().unwrap());
    assert!(guard_navigator.history().is_empty());

    manager.logout();
    assert!(!guard.can_activate().unwrap());
}
