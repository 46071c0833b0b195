//! Category creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::{Category, CategoryStore},
    question::QuestionStore,
    validation::validate_category_create,
};

/// A route handler for creating a category from a JSON body `{"title": ...}`.
///
/// The slug is derived from the title. Responds with 201 and the created
/// category, or 400 if the body is not valid.
pub async fn create_category_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let Json(body) = body?;

    let new_category = validate_category_create(&body)?.escape_html();
    new_category.checked_slug()?;

    let category = state.category_store.create(new_category)?;
    tracing::info!("Created category {} with ID {}", category.slug, category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use crate::{
        category::{Category, CategoryStore, Slug, create_category_endpoint},
        test_utils::{create_test_category, get_test_state, parse_json},
    };

    #[tokio::test]
    async fn can_create_category() {
        let state = get_test_state();

        let response =
            create_category_endpoint(State(state.clone()), Ok(Json(json!({ "title": "html" }))))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let got: Category = parse_json(response).await;
        assert_eq!(got.title, "html");
        assert_eq!(got.slug, Slug::new_unchecked("html"));
        assert_eq!(state.category_store.get(got.id), Ok(Some(got)));
    }

    #[tokio::test]
    async fn slug_replaces_spaces_with_hyphens() {
        let state = get_test_state();

        let response = create_category_endpoint(
            State(state),
            Ok(Json(json!({ "title": "not html" }))),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let got: Category = parse_json(response).await;
        assert_eq!(got.slug, Slug::new_unchecked("not-html"));
    }

    #[tokio::test]
    async fn create_category_fails_on_short_title() {
        let state = get_test_state();

        let response =
            create_category_endpoint(State(state.clone()), Ok(Json(json!({ "title": "aa" }))))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = parse_json(response).await;
        assert_eq!(body["error"], "invalid data");
        assert_eq!(
            body["errors"]["fieldErrors"]["title"][0],
            "title must be at least three letters"
        );
        assert_eq!(state.category_store.get_all(), Ok(vec![]));
    }

    #[tokio::test]
    async fn create_category_fails_when_slug_would_be_invalid() {
        let state = get_test_state();

        let response = create_category_endpoint(
            State(state.clone()),
            Ok(Json(json!({ "title": "<b>bold</b>" }))),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.category_store.get_all(), Ok(vec![]));
    }

    #[tokio::test]
    async fn slug_problems_are_reported_against_title() {
        let state = get_test_state();

        let response = create_category_endpoint(
            State(state.clone()),
            Ok(Json(json!({ "title": "What's New" }))),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = parse_json(response).await;
        assert_eq!(body["error"], "invalid data");
        assert_eq!(body["errors"]["formErrors"], json!([]));
        assert_eq!(
            body["errors"]["fieldErrors"]["title"],
            json!(["title does not give a valid slug: invalid slug format"])
        );
        assert_eq!(state.category_store.get_all(), Ok(vec![]));
    }

    #[tokio::test]
    async fn create_category_fails_on_duplicate_slug() {
        let state = get_test_state();
        create_test_category(&state, "html");

        let response =
            create_category_endpoint(State(state), Ok(Json(json!({ "title": "HTML" }))))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
