//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    category::{CategoryStore, SQLiteCategoryStore},
    db::initialize,
    question::{QuestionStore, SQLiteQuestionStore},
};

/// The state of the REST server.
///
/// The stores are injected so that route handlers can be tested against
/// other implementations than the SQLite ones.
#[derive(Debug, Clone)]
pub struct AppState<C, Q>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    /// The store for managing [categories](crate::Category).
    pub category_store: C,
    /// The store for managing [questions](crate::Question) and their answers.
    pub question_store: Q,
}

impl<C, Q> AppState<C, Q>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    /// Create a new [AppState].
    pub fn new(category_store: C, question_store: Q) -> Self {
        Self {
            category_store,
            question_store,
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteCategoryStore, SQLiteQuestionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteQuestionStore::new(connection),
    ))
}
