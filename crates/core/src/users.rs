//! User credential storage.
//!
//! Users are stored as one JSON document per record under the configured user
//! data directory:
//!
//! ```text
//! user_data/
//!   <32hex-uuid>.json
//! ```
//!
//! Lookups scan the directory and skip unparseable files with a warning, so
//! a single damaged document never takes down registration or login.
//! Passwords are stored as salted SHA-256 hashes in the form
//! `sha256$<salt-b64>$<digest-b64>`; the plaintext never touches disk.

use crate::config::CoreConfig;
use crate::error::AuthError;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::sync::Arc;
use uuid::Uuid;

const HASH_SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// A stored user record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// File-backed user credential store.
#[derive(Clone, Debug)]
pub struct UserStore {
    cfg: Arc<CoreConfig>,
}

impl UserStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Register a new user.
    ///
    /// The password is hashed with a fresh random salt before the record is
    /// written. Username and email must not collide with an existing record;
    /// emails are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// * [`AuthError::MissingField`] - a field is empty after trimming
    /// * [`AuthError::AccountExists`] - username or email already registered
    /// * storage variants - the record could not be persisted
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingField);
        }

        let taken = self
            .list()
            .into_iter()
            .any(|user| user.username == username || user.email.eq_ignore_ascii_case(email));
        if taken {
            return Err(AuthError::AccountExists);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };

        let users_dir = self.cfg.user_data_dir();
        fs::create_dir_all(users_dir).map_err(AuthError::StorageDirCreation)?;
        let contents =
            serde_json::to_string_pretty(&record).map_err(AuthError::Serialization)?;
        let path = users_dir.join(format!("{}.json", record.id.simple()));
        fs::write(&path, contents).map_err(AuthError::FileWrite)?;

        tracing::info!("registered user {} ({})", record.username, record.id);
        Ok(record)
    }

    /// Authenticate a user by email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email and for
    /// a wrong password alike, so the response does not reveal whether an
    /// account exists.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let email = email.trim();
        let user = self
            .list()
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if verify_password(password, &user.password_hash) {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// List all stored user records.
    ///
    /// A missing directory reads as an empty store. Files that cannot be
    /// read or parsed are logged and skipped.
    pub fn list(&self) -> Vec<UserRecord> {
        let users_dir = self.cfg.user_data_dir();

        let entries = match fs::read_dir(users_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut users = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("failed to read user file {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_str::<UserRecord>(&contents) {
                Ok(user) => users.push(user),
                Err(e) => {
                    tracing::warn!("failed to parse user file {}: {}", path.display(), e);
                }
            }
        }

        users
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(secret: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = salted_digest(&salt, secret);
    format!(
        "{HASH_SCHEME}${}${}",
        general_purpose::STANDARD.encode(salt),
        general_purpose::STANDARD.encode(digest)
    )
}

/// Verify a password against a stored hash.
///
/// Malformed stored hashes verify as `false`, never panic.
pub fn verify_password(secret: &str, stored_hash: &str) -> bool {
    let mut parts = stored_hash.split('$');
    let (Some(scheme), Some(salt), Some(digest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }

    let Ok(salt) = general_purpose::STANDARD.decode(salt) else {
        return false;
    };
    let Ok(expected) = general_purpose::STANDARD.decode(digest) else {
        return false;
    };

    salted_digest(&salt, secret).as_slice() == expected.as_slice()
}

fn salted_digest(salt: &[u8], secret: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_store(dir: &Path) -> UserStore {
        let cfg = Arc::new(CoreConfig::new(
            dir.join("unused-dataset.csv"),
            dir.join("users"),
        ));
        UserStore::new(cfg)
    }

    #[test]
    fn register_then_authenticate_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());

        let registered = store
            .register("priya", "priya@example.org", "s3cret")
            .expect("register should succeed");
        let authenticated = store
            .authenticate("priya@example.org", "s3cret")
            .expect("authenticate should succeed");

        assert_eq!(registered.id, authenticated.id);
        assert_eq!(authenticated.username, "priya");
    }

    #[test]
    fn duplicate_username_or_email_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());
        store
            .register("priya", "priya@example.org", "s3cret")
            .expect("register should succeed");

        assert!(matches!(
            store.register("priya", "other@example.org", "pw"),
            Err(AuthError::AccountExists)
        ));
        // Email collision is case-insensitive.
        assert!(matches!(
            store.register("someone", "PRIYA@example.org", "pw"),
            Err(AuthError::AccountExists)
        ));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());

        assert!(matches!(
            store.register("  ", "priya@example.org", "pw"),
            Err(AuthError::MissingField)
        ));
        assert!(matches!(
            store.register("priya", "priya@example.org", ""),
            Err(AuthError::MissingField)
        ));
    }

    #[test]
    fn wrong_password_and_unknown_email_look_alike() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());
        store
            .register("priya", "priya@example.org", "s3cret")
            .expect("register should succeed");

        assert!(matches!(
            store.authenticate("priya@example.org", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody@example.org", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn stored_hash_is_salted_and_never_plaintext() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());
        let user = store
            .register("priya", "priya@example.org", "s3cret")
            .expect("register should succeed");

        assert_ne!(user.password_hash, "s3cret");
        assert!(user.password_hash.starts_with("sha256$"));
        // Two hashes of the same secret differ through the salt.
        assert_ne!(hash_password("s3cret"), hash_password("s3cret"));
    }

    #[test]
    fn verify_rejects_malformed_stored_hashes() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "plaintext"));
        assert!(!verify_password("pw", "md5$abc$def"));
        assert!(!verify_password("pw", "sha256$not-base64!$also-not"));
        assert!(!verify_password("pw", "sha256$YWJj$YWJj$extra"));
    }

    #[test]
    fn list_skips_damaged_files() {
        let dir = TempDir::new().expect("tempdir");
        let store = test_store(dir.path());
        store
            .register("priya", "priya@example.org", "s3cret")
            .expect("register should succeed");
        std::fs::write(dir.path().join("users").join("broken.json"), "{ nope")
            .expect("write damaged file");

        let users = store.list();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "priya");
    }
}
