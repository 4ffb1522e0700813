//! Database repository for saved sessions.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use matrixle_core::Session;
use tracing::{debug, info, instrument, warn};

use crate::db::models::DATE_FORMAT;
use crate::db::{DbError, NewSavedSession, PlayStats, SavedSession, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for session persistence, keyed by play date.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db_path: String,
}

impl SessionRepository {
    /// Opens the database at the given path and applies pending migrations.
    ///
    /// Use `":memory:"` only for throwaway checks: every call opens a new
    /// connection, so an in-memory database does not survive between calls.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening SessionRepository");
        let repo = Self { db_path };
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Saves a session under its puzzle date, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization or the write fails.
    #[instrument(skip(self, session), fields(date = %session.puzzle().date(), status = %session.status()))]
    pub fn save_session(&self, session: &Session) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        let row = NewSavedSession::new(
            session.puzzle().date().format(DATE_FORMAT).to_string(),
            i32::try_from(*session.puzzle().id())
                .map_err(|_| DbError::new(format!("Puzzle id {} out of range", session.puzzle().id())))?,
            session.status().to_string(),
            i32::try_from(session.history().len())
                .map_err(|_| DbError::new("Too many guesses to store"))?,
            serde_json::to_string(session)?,
            Utc::now().naive_utc(),
        );

        diesel::replace_into(schema::saved_sessions::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(attempts = row.attempts(), "Session saved");
        Ok(())
    }

    /// Loads the session saved for a date. Returns `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails or the payload is unreadable.
    #[instrument(skip(self))]
    pub fn load_session(&self, date: NaiveDate) -> Result<Option<Session>, DbError> {
        let Some(payload) = self.load_payload(date)? else {
            return Ok(None);
        };
        let session: Session = serde_json::from_str(&payload)?;
        Ok(Some(session))
    }

    /// Loads the raw JSON payload saved for a date, without decoding it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn load_payload(&self, date: NaiveDate) -> Result<Option<String>, DbError> {
        let key = date.format(DATE_FORMAT).to_string();
        debug!(key = %key, "Loading session");
        let mut conn = self.connection()?;

        let row = schema::saved_sessions::table
            .filter(schema::saved_sessions::play_date.eq(&key))
            .select(SavedSession::as_select())
            .first::<SavedSession>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            debug!("No saved session");
            return Ok(None);
        };

        info!(status = %row.status(), attempts = row.attempts(), "Saved session found");
        Ok(Some(row.payload().clone()))
    }

    /// Deletes the session saved for a date. Returns true if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_session(&self, date: NaiveDate) -> Result<bool, DbError> {
        let key = date.format(DATE_FORMAT).to_string();
        let mut conn = self.connection()?;

        let removed = diesel::delete(
            schema::saved_sessions::table.filter(schema::saved_sessions::play_date.eq(&key)),
        )
        .execute(&mut conn)?;

        info!(removed, "Session deleted");
        Ok(removed > 0)
    }

    /// Lists all saved sessions, ordered by play date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SavedSession>, DbError> {
        debug!("Listing saved sessions");
        let mut conn = self.connection()?;

        let rows = schema::saved_sessions::table
            .order(schema::saved_sessions::play_date.asc())
            .select(SavedSession::as_select())
            .load::<SavedSession>(&mut conn)?;

        info!(count = rows.len(), "Saved sessions loaded");
        Ok(rows)
    }

    /// Computes play statistics over every saved session.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn stats(&self) -> Result<PlayStats, DbError> {
        let rows = self.list_sessions()?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match (row.parse_date(), row.parse_status()) {
                (Ok(date), Ok(status)) => {
                    let attempts = usize::try_from(*row.attempts()).unwrap_or_default();
                    records.push((date, status, attempts));
                }
                (date, status) => {
                    warn!(
                        play_date = %row.play_date(),
                        date_ok = date.is_ok(),
                        status_ok = status.is_ok(),
                        "Skipping unreadable saved session"
                    );
                }
            }
        }

        let stats = PlayStats::from_records(&records);
        info!(
            played = stats.played(),
            wins = stats.wins(),
            win_rate = %format!("{:.1}%", stats.win_rate()),
            "Play stats computed"
        );
        Ok(stats)
    }
}
