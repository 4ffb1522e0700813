//! Session persistence seam.
//!
//! The game orchestrator only talks to [`SessionStore`]. The SQLite-backed
//! [`SessionRepository`] is the production store; [`MemoryStore`] keeps
//! serialized sessions in process.

use crate::db::{DbError, SessionRepository};
use chrono::NaiveDate;
use derive_more::{Display, Error};
use matrixle_core::Session;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Which side of a load or save failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// The backing store could not be read or written.
    #[display("backend")]
    Backend,
    /// A saved payload exists but does not decode into a session.
    #[display("payload")]
    Payload,
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Which side failed.
    pub kind: StoreErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a backend error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(StoreErrorKind::Backend, message)
    }

    /// Creates an error for a saved payload that cannot be decoded.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn payload(message: impl Into<String>) -> Self {
        Self::with_kind(StoreErrorKind::Payload, message)
    }

    #[track_caller]
    fn with_kind(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true if a save exists but is unreadable.
    pub fn is_payload(&self) -> bool {
        self.kind == StoreErrorKind::Payload
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(err.message)
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::payload(format!("Session payload error: {}", err))
    }
}

/// Loads and saves one session per play date.
pub trait SessionStore {
    /// Returns the session saved for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be read, or a
    /// [`StoreErrorKind::Payload`] error if the saved session does not decode.
    fn load(&self, date: NaiveDate) -> Result<Option<Session>, StoreError>;

    /// Saves a session under its puzzle date, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be written.
    fn save(&self, session: &Session) -> Result<(), StoreError>;
}

impl SessionStore for SessionRepository {
    fn load(&self, date: NaiveDate) -> Result<Option<Session>, StoreError> {
        let Some(payload) = self.load_payload(date)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&payload)?))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        Ok(self.save_session(session)?)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self, date: NaiveDate) -> Result<Option<Session>, StoreError> {
        (**self).load(date)
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        (**self).save(session)
    }
}

/// In-process store holding sessions as JSON, keyed by date.
///
/// Sessions go through the same serialization as the database payload, so a
/// session that survives this store survives the repository too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RefCell<HashMap<NaiveDate, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved sessions.
    pub fn len(&self) -> usize {
        self.sessions.borrow().len()
    }

    /// Returns true if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.sessions.borrow().is_empty()
    }

    /// Stores a raw payload for a date.
    ///
    /// Used to simulate stale or foreign saves.
    pub fn insert_raw(&self, date: NaiveDate, payload: impl Into<String>) {
        self.sessions.borrow_mut().insert(date, payload.into());
    }
}

impl SessionStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self, date: NaiveDate) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.borrow();
        let Some(payload) = sessions.get(&date) else {
            debug!("No session in memory");
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(payload)?))
    }

    #[instrument(skip(self, session), fields(date = %session.puzzle().date()))]
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let payload = serde_json::to_string(session)?;
        self.sessions
            .borrow_mut()
            .insert(*session.puzzle().date(), payload);
        debug!("Session stored in memory");
        Ok(())
    }
}
