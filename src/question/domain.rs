//! Core question domain types.

use serde::{Deserialize, Serialize};

use crate::{category::CategoryId, sanitize::escape_html};

/// Database identifier for a question.
pub type QuestionId = i64;

/// Database identifier for an answer.
pub type AnswerId = i64;

/// One of the possible answers to a question.
///
/// Answers are owned by their question and are only ever created, replaced or
/// deleted together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Answer {
    /// The ID assigned by the database.
    pub id: AnswerId,
    /// The answer as shown to the player.
    pub text: String,
    /// Whether this answer is a correct answer to the question.
    pub correct: bool,
    /// The ID of the question that owns this answer.
    pub q_id: QuestionId,
}

/// A question together with its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Question {
    /// The ID assigned by the database.
    pub id: QuestionId,
    /// The question prompt.
    pub text: String,
    /// The ID of the category the question belongs to.
    pub cat_id: CategoryId,
    /// Between 2 and 8 answers, in the order they were created.
    pub answers: Vec<Answer>,
}

/// The data needed to create an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnswer {
    /// The answer as shown to the player.
    pub text: String,
    /// Whether this answer is a correct answer to the question.
    pub correct: bool,
}

/// The data needed to create a question or replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    /// The question prompt.
    pub text: String,
    /// The ID of the category the question belongs to.
    pub cat_id: CategoryId,
    /// The answers to create for the question.
    pub answers: Vec<NewAnswer>,
}

impl NewQuestion {
    /// Escape any HTML in the question text and the answer text.
    pub fn escape_html(self) -> Self {
        Self {
            text: escape_html(&self.text),
            cat_id: self.cat_id,
            answers: self
                .answers
                .into_iter()
                .map(|answer| NewAnswer {
                    text: escape_html(&answer.text),
                    correct: answer.correct,
                })
                .collect(),
        }
    }
}
