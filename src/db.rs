//! Sets up the application's database.

use rusqlite::Connection;

use crate::{Error, category::create_category_table, question::create_question_tables};

/// Create the tables for the domain models and enable foreign key checks.
///
/// Tables that already exist are left untouched, so it is safe to call this
/// every time the server starts.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // SQLite ignores foreign keys unless they are enabled on each connection.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_category_table(connection)?;
    create_question_tables(connection)?;

    Ok(())
}
