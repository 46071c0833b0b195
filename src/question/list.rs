//! Endpoints for listing questions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    category::CategoryStore,
    question::{Question, QuestionStore, parse_category_id},
};

/// A route handler for listing every question with its answers.
pub async fn get_questions_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
) -> Result<Json<Vec<Question>>, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    state.question_store.get_all().map(Json)
}

/// A route handler for listing the questions in the category with `id`.
///
/// Responds with 400 if `id` is not a number and 404 if the category does not
/// exist. A category without questions gives an empty list.
pub async fn get_category_questions_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Question>>, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let category_id = parse_category_id(&id)?;

    if state.category_store.get(category_id)?.is_none() {
        return Err(Error::CategoryNotFound);
    }

    state.question_store.get_by_category(category_id).map(Json)
}
