//! Category patch endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::{Category, CategoryStore},
    question::QuestionStore,
    validation::{validate_category_patch, validate_slug},
};

/// A route handler for replacing the title of the category with `slug`.
///
/// The slug is derived again from the new title. Responds with 201 and the
/// patched category, 400 if the body or slug is not valid and 404 if there is
/// no category with `slug`.
pub async fn patch_category_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(slug): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let Json(body) = body?;

    let new_category = validate_category_patch(&body)?.escape_html();
    let prev_slug = validate_slug(&Value::String(slug))?;

    if state.category_store.get_by_slug(&prev_slug)?.is_none() {
        return Err(Error::NotFound);
    }

    new_category.checked_slug()?;

    let category = state.category_store.update(new_category, &prev_slug)?;
    tracing::info!("Patched category {prev_slug}, its slug is now {}", category.slug);

    Ok((StatusCode::CREATED, Json(category)))
}
