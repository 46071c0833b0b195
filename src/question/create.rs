//! Question creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::CategoryStore,
    question::{Question, QuestionStore},
    validation::validate_question_create,
};

/// A route handler for creating a question and its answers.
///
/// Responds with 201 and the created question, 400 if the body is not valid
/// or if `cat_id` does not refer to an existing category.
pub async fn create_question_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let Json(body) = body?;

    let new_question = validate_question_create(&body)?;

    if state.category_store.get(new_question.cat_id)?.is_none() {
        return Err(Error::InvalidCategory);
    }

    let question = state.question_store.create(new_question.escape_html())?;
    tracing::info!(
        "Created question {} with {} answers in category {}",
        question.id,
        question.answers.len(),
        question.cat_id
    );

    Ok((StatusCode::CREATED, Json(question)))
}
