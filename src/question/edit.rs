//! Question patch endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::CategoryStore,
    question::{Question, QuestionStore, parse_question_id},
    validation::validate_question_create,
};

/// A route handler for replacing the question with `id` and all of its answers.
///
/// The body has the same shape as for creating a question. Responds with 201
/// and the replaced question, 400 if the body or ID is not valid or `cat_id`
/// does not refer to a category, and 404 if there is no question with `id`.
pub async fn patch_question_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let Json(body) = body?;

    let new_question = validate_question_create(&body)?;
    let question_id = parse_question_id(&id)?;

    if state.question_store.get(question_id)?.is_none() {
        return Err(Error::QuestionNotFound);
    }

    if state.category_store.get(new_question.cat_id)?.is_none() {
        return Err(Error::InvalidCategory);
    }

    let question = state
        .question_store
        .update(new_question.escape_html(), question_id)?;
    tracing::info!(
        "Patched question {} which now has {} answers",
        question.id,
        question.answers.len()
    );

    Ok((StatusCode::CREATED, Json(question)))
}
