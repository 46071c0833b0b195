//! Question deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    category::CategoryStore,
    question::{QuestionStore, parse_question_id},
};

/// A route handler for deleting the question with `id` and its answers.
///
/// Responds with 204 and an empty body, 400 if `id` is not a number and 404 if
/// there is no question with `id`.
pub async fn delete_question_endpoint<C, Q>(
    State(state): State<AppState<C, Q>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore,
    Q: QuestionStore,
{
    let question_id = parse_question_id(&id)?;

    if state.question_store.get(question_id)?.is_none() {
        return Err(Error::QuestionNotFound);
    }

    let deleted = state.question_store.delete(question_id)?;
    tracing::info!("Deleted question {deleted:?}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod delete_question_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use serde_json::{Value, json};

    use crate::{
        question::{QuestionStore, delete_question_endpoint},
        test_utils::{create_test_category, create_test_question, get_test_state, parse_json},
    };

    #[tokio::test]
    async fn deletes_question_and_answers() {
        let state = get_test_state();
        let html = create_test_category(&state, "html");
        let question = create_test_question(&state, "What is a div?", html.id);
        let kept = create_test_question(&state, "What is a span?", html.id);

        let response = delete_question_endpoint(State(state.clone()), Path(question.id.to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.question_store.get(question.id), Ok(None));
        assert_eq!(state.question_store.get_answers(question.id), Ok(vec![]));
        assert_eq!(state.question_store.get_all(), Ok(vec![kept]));
    }

    #[tokio::test]
    async fn unknown_question_is_not_found() {
        let state = get_test_state();

        let response = delete_question_endpoint(State(state), Path("42".to_owned()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = parse_json(response).await;
        assert_eq!(body, json!({ "message": "question does not exist" }));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let state = get_test_state();

        let response = delete_question_endpoint(State(state), Path("abc".to_owned()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
