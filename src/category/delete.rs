//! Category deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    AppState, Error, category::CategoryStore, question::QuestionStore,
    validation::validate_slug,
};

/// A route handler for deleting the category with `slug`, along with its
/// questions.
///
/// Responds with 204 and an empty body, 400 if `slug` is not valid and 404 if
/// there is no category with `slug`.
pub async fn delete_category_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let slug = validate_slug(&Value::String(slug))?;

    if state.category_store.get_by_slug(&slug)?.is_none() {
        return Err(Error::NotFound);
    }

    let deleted = state.category_store.delete(&slug)?;
    tracing::info!("Deleted category {deleted:?}");

    Ok(StatusCode::NO_CONTENT)
}
