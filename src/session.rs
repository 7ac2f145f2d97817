//! Demo authentication session.
//!
//! There is no server and no credential store: any well-formed email and
//! password "work". The persisted token's only meaning is that a session
//! was previously established, so startup restores a session whenever
//! both user and token slots are present, without re-validating
//! anything.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::form;
use crate::storage::Storage;

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(User),
    Error(String),
}

/// State owner for the session. At most one session exists; login and
/// register run synchronously to completion. An attempt that arrives
/// while the state machine is already `Authenticating` is rejected.
#[derive(Debug)]
pub struct SessionStore {
    storage: Storage,
    state: AuthState,
    login_delay: Duration,
}

impl SessionStore {
    /// Open the session store, restoring a persisted session when both
    /// user and token are present (trust-on-read from local storage).
    pub fn open(storage: Storage, login_delay: Duration) -> Self {
        let state = match (storage.load_user(), storage.load_token()) {
            (Some(user), Some(_token)) => {
                debug!(email = %user.email, "session restored");
                AuthState::Authenticated(user)
            }
            _ => AuthState::Anonymous,
        };
        Self {
            storage,
            state,
            login_delay,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Demo login: validate, wait the simulated network delay, then
    /// synthesize a user from the email. No storage write happens before
    /// validation passes.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.begin_attempt()?;
        if let Err(err) = validate_credentials(email, password) {
            self.state = AuthState::Error(err.to_string());
            return Err(err);
        }

        std::thread::sleep(self.login_delay);

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.clone(),
            avatar: Some(avatar_url(&name)),
        };
        self.establish(user.clone());
        Ok(user)
    }

    /// Demo registration: like login, with a name requirement on top.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<User> {
        self.begin_attempt()?;
        let trimmed = name.trim();
        if trimmed.chars().count() < 2 {
            let err = Error::validation("name", "must be at least 2 characters");
            self.state = AuthState::Error(err.to_string());
            return Err(err);
        }
        if let Err(err) = validate_credentials(email, password) {
            self.state = AuthState::Error(err.to_string());
            return Err(err);
        }

        std::thread::sleep(self.login_delay);

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: trimmed.to_string(),
            avatar: Some(avatar_url(trimmed)),
        };
        self.establish(user.clone());
        Ok(user)
    }

    /// Clear the persisted session and return to `Anonymous`,
    /// unconditionally.
    pub fn logout(&mut self) {
        self.storage.clear_auth();
        self.state = AuthState::Anonymous;
        debug!("session cleared");
    }

    /// Reset a failed attempt back to `Anonymous`.
    pub fn clear_error(&mut self) {
        if matches!(self.state, AuthState::Error(_)) {
            self.state = AuthState::Anonymous;
        }
    }

    fn begin_attempt(&mut self) -> Result<()> {
        match &self.state {
            AuthState::Authenticating => {
                Err(Error::Auth("another login attempt is in progress".into()))
            }
            _ => {
                self.state = AuthState::Authenticating;
                Ok(())
            }
        }
    }

    fn establish(&mut self, user: User) {
        let token = format!("demo-token-{}", Uuid::new_v4());
        self.storage.save_user(&user);
        self.storage.save_token(&token);
        debug!(email = %user.email, "session established");
        self.state = AuthState::Authenticated(user);
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if !form::is_valid_email(email) {
        return Err(Error::validation("email", "must be a valid email address"));
    }
    if password.chars().count() < 6 {
        return Err(Error::validation(
            "password",
            "must be at least 6 characters",
        ));
    }
    Ok(())
}

fn avatar_url(name: &str) -> String {
    // Deterministic placeholder avatar, keyed on the display name.
    let encoded: String = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_string()
            } else {
                format!("%{:02X}", ch as u32)
            }
        })
        .collect();
    format!("https://ui-avatars.com/api/?name={encoded}&background=3b82f6&color=fff")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_session() -> (TempDir, SessionStore) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        let session = SessionStore::open(storage, Duration::ZERO);
        (temp, session)
    }

    #[test]
    fn starts_anonymous_without_persisted_state() {
        let (_temp, session) = open_session();
        assert_eq!(*session.state(), AuthState::Anonymous);
    }

    #[test]
    fn login_synthesizes_user_from_email() {
        let (_temp, mut session) = open_session();
        let user = session.login("ada@example.com", "secret1").unwrap();
        assert_eq!(user.name, "ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.avatar.as_deref().unwrap().contains("ui-avatars.com"));
        assert!(matches!(session.state(), AuthState::Authenticated(_)));
    }

    #[test]
    fn bad_email_fails_before_any_storage_write() {
        let (_temp, mut session) = open_session();
        let err = session.login("bad-email", "123456").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(matches!(session.state(), AuthState::Error(_)));

        let storage = Storage::new(session.storage.data_dir().to_path_buf());
        assert!(storage.load_user().is_none());
        assert!(storage.load_token().is_none());
    }

    #[test]
    fn short_password_is_rejected() {
        let (_temp, mut session) = open_session();
        let err = session.login("ada@example.com", "12345").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn register_requires_a_name() {
        let (_temp, mut session) = open_session();
        let err = session
            .register(" a ", "ada@example.com", "123456")
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        session.clear_error();
        let user = session
            .register("Ada Lovelace", "ada@example.com", "123456")
            .unwrap();
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn session_restores_from_storage() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        {
            let mut session = SessionStore::open(storage.clone(), Duration::ZERO);
            session.login("ada@example.com", "123456").unwrap();
        }
        let restored = SessionStore::open(storage, Duration::ZERO);
        assert_eq!(restored.user().unwrap().email, "ada@example.com");
    }

    #[test]
    fn logout_clears_everything() {
        let (_temp, mut session) = open_session();
        session.login("ada@example.com", "123456").unwrap();
        session.logout();
        assert_eq!(*session.state(), AuthState::Anonymous);

        let storage = Storage::new(session.storage.data_dir().to_path_buf());
        assert!(storage.load_user().is_none());
        assert!(storage.load_token().is_none());
    }

    #[test]
    fn clear_error_resets_to_anonymous() {
        let (_temp, mut session) = open_session();
        let _ = session.login("bad", "123456");
        assert!(matches!(session.state(), AuthState::Error(_)));
        session.clear_error();
        assert_eq!(*session.state(), AuthState::Anonymous);
    }

    #[test]
    fn token_without_user_does_not_restore() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        storage.save_token("orphan");
        let session = SessionStore::open(storage, Duration::ZERO);
        assert_eq!(*session.state(), AuthState::Anonymous);
    }
}
