//! Database persistence layer for saved sessions and play statistics.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{NewSavedSession, PlayStats, SavedSession};
pub use repository::SessionRepository;
