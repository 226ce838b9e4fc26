//! Admin login gate.
//!
//! A single admin identity is stored as one plain-text row
//! (`user`, `pass`, `email`) in the same mirrored way as the other tables.
//! Passwords are compared verbatim; there is no hashing, lockout or rate
//! limiting.

use crate::error::{AuthError, Result};
use crate::inventory::PendingDelete;
use crate::mirror::{Mirror, PersistReport};
use crate::record::{self, Fields, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

const SESSION_DURATION: u64 = 24 * 60 * 60; // 24 hours in seconds

/// The admin identity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub user: String,
    pub pass: String,
    pub email: String,
}

impl Credential {
    pub fn new(user: &str, pass: &str, email: &str) -> std::result::Result<Self, AuthError> {
        let (user, email) = (user.trim(), email.trim());
        if user.is_empty() || pass.is_empty() || email.is_empty() {
            return Err(AuthError::EmptyField);
        }
        Ok(Self {
            user: user.to_string(),
            pass: pass.to_string(),
            email: email.to_string(),
        })
    }
}

impl Record for Credential {
    const COLUMNS: &'static [&'static str] = &["user", "pass", "email"];

    fn from_fields(fields: &Fields) -> Self {
        Self {
            user: record::text(fields, "user"),
            // Passwords are kept verbatim, including surrounding spaces
            pass: fields.get("pass").cloned().unwrap_or_default(),
            email: record::text(fields, "email"),
        }
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.user.clone(), self.pass.clone(), self.email.clone()]
    }
}

/// Single-row credential store
pub struct CredentialStore {
    credential: Option<Credential>,
    mirror: Mirror,
}

impl CredentialStore {
    /// Load from remote, then the local file; absent means "not registered"
    pub fn load(mirror: Mirror) -> Result<Self> {
        let (rows, _) = mirror.load::<Credential>()?;
        let credential = rows.into_iter().find(|c: &Credential| !c.user.is_empty());
        Ok(Self { credential, mirror })
    }

    pub fn is_registered(&self) -> bool {
        self.credential.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.user.as_str())
    }

    /// Create the admin account; only allowed while none exists
    pub fn register(&mut self, user: &str, pass: &str, email: &str) -> Result<PersistReport> {
        if self.is_registered() {
            return Err(AuthError::AlreadyRegistered.into());
        }
        let credential = Credential::new(user, pass, email)?;
        log::info!("Registering admin account {}", credential.user);
        self.commit(credential)
    }

    /// Replace the admin identity wholesale
    pub fn update(&mut self, user: &str, pass: &str, email: &str) -> Result<PersistReport> {
        if !self.is_registered() {
            return Err(AuthError::NotRegistered.into());
        }
        let credential = Credential::new(user, pass, email)?;
        log::info!("Updating admin credentials for {}", credential.user);
        self.commit(credential)
    }

    fn commit(&mut self, credential: Credential) -> Result<PersistReport> {
        let report = self.mirror.persist(std::slice::from_ref(&credential))?;
        self.credential = Some(credential);
        Ok(report)
    }

    /// Exact string comparison of both fields
    pub fn verify(&self, user: &str, pass: &str) -> bool {
        self.credential
            .as_ref()
            .is_some_and(|c| c.user == user && c.pass == pass)
    }

    pub fn login(&self, user: &str, pass: &str) -> std::result::Result<(), AuthError> {
        if self.verify(user, pass) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Return the stored password if `email` matches the recovery address
    ///
    /// A missing account and a wrong email produce the same error.
    pub fn recover(&self, email: &str) -> std::result::Result<String, AuthError> {
        let email = email.trim();
        // Email addresses are matched case-insensitively on purpose
        match &self.credential {
            Some(c) if !email.is_empty() && c.email.eq_ignore_ascii_case(email) => {
                Ok(c.pass.clone())
            }
            _ => Err(AuthError::EmailMismatch),
        }
    }

    pub fn persist(&self) -> Result<PersistReport> {
        let rows: Vec<Credential> = self.credential.iter().cloned().collect();
        self.mirror.persist(&rows)
    }
}

/// User session data
///
/// Represents an authenticated admin session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Username of the authenticated user
    pub user_id: String,

    /// Time when the session expires
    pub expires_at: SystemTime,

    /// Delete awaiting the admin's confirmation
    pub pending_delete: Option<PendingDelete>,
}

/// Active admin sessions, keyed by cookie value
#[derive(Debug)]
pub struct Sessions {
    sessions: HashMap<String, Session>,
    ttl: Duration,
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new(Duration::from_secs(SESSION_DURATION))
    }
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Create a new session and return its id
    pub fn create(&mut self, username: &str) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            user_id: username.to_string(),
            expires_at: SystemTime::now() + self.ttl,
            pending_delete: None,
        };
        self.sessions.insert(session_id.clone(), session);
        session_id
    }

    /// Username for a live session; expired sessions are dropped
    pub fn validate(&mut self, session_id: &str) -> Option<String> {
        let now = SystemTime::now();
        self.sessions.retain(|_, s| s.expires_at > now);
        self.sessions.get(session_id).map(|s| s.user_id.clone())
    }

    pub fn remove(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Remember a delete until the admin confirms or cancels it
    pub fn set_pending_delete(&mut self, session_id: &str, pending: Option<PendingDelete>) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.pending_delete = pending;
        }
    }

    /// Take the pending delete if it targets `barcode`
    pub fn take_pending_delete(&mut self, session_id: &str, barcode: &str) -> Option<PendingDelete> {
        let session = self.sessions.get_mut(session_id)?;
        match &session.pending_delete {
            Some(p) if p.barcode() == barcode.trim() => session.pending_delete.take(),
            _ => None,
        }
    }
}
