//! Endpoints for listing categories and getting a single category.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::{Category, CategoryStore},
    question::QuestionStore,
    validation::validate_slug,
};

/// A route handler for listing every category.
pub async fn get_categories_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
) -> Result<Json<Vec<Category>>, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    state.category_store.get_all().map(Json)
}

/// A route handler for getting a category by its slug.
///
/// Responds with 400 if `slug` is not a valid slug and 404 if there is no
/// category with `slug`.
pub async fn get_category_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let slug = validate_slug(&Value::String(slug))?;

    state
        .category_store
        .get_by_slug(&slug)?
        .map(Json)
        .ok_or(Error::NotFound)
}
