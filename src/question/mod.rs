//! Trivia questions and the answers they own.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod store;

pub use create::create_question_endpoint;
pub use db::{SQLiteQuestionStore, create_question_tables};
pub use delete::delete_question_endpoint;
pub use domain::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId};
pub use edit::patch_question_endpoint;
pub use list::{get_category_questions_endpoint, get_questions_endpoint};
pub use store::QuestionStore;

use crate::{Error, category::CategoryId};

/// Parse a question ID from a path parameter.
pub(crate) fn parse_question_id(raw: &str) -> Result<QuestionId, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidQuestionId(raw.to_owned()))
}

/// Parse a category ID from a path parameter.
pub(crate) fn parse_category_id(raw: &str) -> Result<CategoryId, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidCategoryId(raw.to_owned()))
}
