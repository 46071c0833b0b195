//! Defines the question store trait.

use crate::{
    Error,
    category::CategoryId,
    question::{Answer, NewQuestion, Question, QuestionId},
};

/// Creates, retrieves, updates and deletes questions along with their answers.
///
/// Every question returned by a store is a composite record: the question
/// merged with all of its answers.
pub trait QuestionStore {
    /// Get every question.
    fn get_all(&self) -> Result<Vec<Question>, Error>;

    /// Get the questions that belong to the category with `category_id`.
    fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Question>, Error>;

    /// Get the answers for the question with `question_id`.
    fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error>;

    /// Get the question with `question_id`, or `None` if there is no such question.
    fn get(&self, question_id: QuestionId) -> Result<Option<Question>, Error>;

    /// Create a question and its answers.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategory] if `cat_id` does not refer to a category.
    fn create(&self, question: NewQuestion) -> Result<Question, Error>;

    /// Replace the text and category of the question with `question_id`, and
    /// replace all of its answers with freshly created ones.
    ///
    /// # Errors
    ///
    /// Returns [Error::UpdateMissingQuestion] if there is no such question.
    fn update(&self, question: NewQuestion, question_id: QuestionId) -> Result<Question, Error>;

    /// Delete the question with `question_id` and its answers, returning the
    /// question and answers as they were immediately before deletion.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingQuestion] if there is no such question.
    fn delete(&self, question_id: QuestionId) -> Result<Question, Error>;
}
