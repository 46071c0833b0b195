//! Implements a SQLite backed question store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::CategoryId,
    question::{Answer, NewAnswer, NewQuestion, Question, QuestionId, QuestionStore},
};

/// Creates, retrieves, updates and deletes questions in a SQLite database.
///
/// Operations that touch both a question and its answers run in a single
/// transaction, so a failure part way through leaves the database unchanged.
#[derive(Debug, Clone)]
pub struct SQLiteQuestionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteQuestionStore {
    /// Create a new question store with a SQLite database.
    ///
    /// The database must have been set up with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl QuestionStore for SQLiteQuestionStore {
    fn get_all(&self) -> Result<Vec<Question>, Error> {
        let connection = self.lock()?;

        let rows = connection
            .prepare("SELECT id, text, cat_id FROM question ORDER BY id ASC;")?
            .query_map([], map_question_row)?
            .collect::<Result<Vec<_>, _>>()?;

        with_answers(&connection, rows)
    }

    fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Question>, Error> {
        let connection = self.lock()?;

        let rows = connection
            .prepare("SELECT id, text, cat_id FROM question WHERE cat_id = ?1 ORDER BY id ASC;")?
            .query_map([category_id], map_question_row)?
            .collect::<Result<Vec<_>, _>>()?;

        with_answers(&connection, rows)
    }

    fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        let connection = self.lock()?;

        select_answers(&connection, question_id)
    }

    fn get(&self, question_id: QuestionId) -> Result<Option<Question>, Error> {
        let connection = self.lock()?;

        let Some(row) = select_question(&connection, question_id)? else {
            return Ok(None);
        };

        let answers = select_answers(&connection, row.id)?;

        Ok(Some(row.with_answers(answers)))
    }

    fn create(&self, question: NewQuestion) -> Result<Question, Error> {
        let mut connection = self.lock()?;
        let transaction = connection.transaction()?;

        transaction.execute(
            "INSERT INTO question (text, cat_id) VALUES (?1, ?2);",
            (&question.text, question.cat_id),
        )?;

        let id = transaction.last_insert_rowid();
        let answers = insert_answers(&transaction, id, question.answers)?;

        transaction.commit()?;

        Ok(Question {
            id,
            text: question.text,
            cat_id: question.cat_id,
            answers,
        })
    }

    fn update(&self, question: NewQuestion, question_id: QuestionId) -> Result<Question, Error> {
        let mut connection = self.lock()?;
        let transaction = connection.transaction()?;

        let rows_affected = transaction.execute(
            "UPDATE question SET text = ?1, cat_id = ?2 WHERE id = ?3;",
            (&question.text, question.cat_id, question_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingQuestion);
        }

        transaction.execute("DELETE FROM answer WHERE q_id = ?1;", [question_id])?;
        let answers = insert_answers(&transaction, question_id, question.answers)?;

        transaction.commit()?;

        Ok(Question {
            id: question_id,
            text: question.text,
            cat_id: question.cat_id,
            answers,
        })
    }

    fn delete(&self, question_id: QuestionId) -> Result<Question, Error> {
        let mut connection = self.lock()?;
        let transaction = connection.transaction()?;

        let row =
            select_question(&transaction, question_id)?.ok_or(Error::DeleteMissingQuestion)?;
        let answers = select_answers(&transaction, question_id)?;

        transaction.execute("DELETE FROM answer WHERE q_id = ?1;", [question_id])?;
        transaction.execute("DELETE FROM question WHERE id = ?1;", [question_id])?;
        transaction.commit()?;

        Ok(row.with_answers(answers))
    }
}

/// Initialize the question and answer tables and indexes.
///
/// Deleting a category deletes its questions, and deleting a question deletes
/// its answers, as long as foreign keys are enabled on the connection.
pub fn create_question_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS question (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            cat_id INTEGER NOT NULL,
            FOREIGN KEY(cat_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_question_cat_id ON question(cat_id);

        CREATE TABLE IF NOT EXISTS answer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            correct INTEGER NOT NULL,
            q_id INTEGER NOT NULL,
            FOREIGN KEY(q_id) REFERENCES question(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_answer_q_id ON answer(q_id);",
    )?;

    Ok(())
}

/// A question row without its answers.
struct QuestionRow {
    id: QuestionId,
    text: String,
    cat_id: CategoryId,
}

impl QuestionRow {
    fn with_answers(self, answers: Vec<Answer>) -> Question {
        Question {
            id: self.id,
            text: self.text,
            cat_id: self.cat_id,
            answers,
        }
    }
}

fn with_answers(connection: &Connection, rows: Vec<QuestionRow>) -> Result<Vec<Question>, Error> {
    rows.into_iter()
        .map(|row| {
            let answers = select_answers(connection, row.id)?;
            Ok(row.with_answers(answers))
        })
        .collect()
}

fn select_question(
    connection: &Connection,
    question_id: QuestionId,
) -> Result<Option<QuestionRow>, Error> {
    connection
        .query_row(
            "SELECT id, text, cat_id FROM question WHERE id = ?1;",
            [question_id],
            map_question_row,
        )
        .optional()
        .map_err(|error| error.into())
}

fn select_answers(connection: &Connection, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
    connection
        .prepare("SELECT id, text, correct, q_id FROM answer WHERE q_id = ?1 ORDER BY id ASC;")?
        .query_map([question_id], map_answer_row)?
        .map(|maybe_answer| maybe_answer.map_err(|error| error.into()))
        .collect()
}

fn insert_answers(
    connection: &Connection,
    question_id: QuestionId,
    answers: Vec<NewAnswer>,
) -> Result<Vec<Answer>, Error> {
    let mut statement =
        connection.prepare("INSERT INTO answer (text, correct, q_id) VALUES (?1, ?2, ?3);")?;

    let mut created = Vec::with_capacity(answers.len());

    for answer in answers {
        statement.execute((&answer.text, answer.correct, question_id))?;

        created.push(Answer {
            id: connection.last_insert_rowid(),
            text: answer.text,
            correct: answer.correct,
            q_id: question_id,
        });
    }

    Ok(created)
}

fn map_question_row(row: &Row) -> Result<QuestionRow, rusqlite::Error> {
    Ok(QuestionRow {
        id: row.get(0)?,
        text: row.get(1)?,
        cat_id: row.get(2)?,
    })
}

fn map_answer_row(row: &Row) -> Result<Answer, rusqlite::Error> {
    Ok(Answer {
        id: row.get(0)?,
        text: row.get(1)?,
        correct: row.get(2)?,
        q_id: row.get(3)?,
    })
}
