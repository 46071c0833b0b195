//! Application router configuration.

use axum::{
    Json, Router,
    routing::get,
};
use serde::Serialize;

use crate::{
    AppState, Error,
    category::{
        CategoryStore, create_category_endpoint, delete_category_endpoint,
        get_categories_endpoint, get_category_endpoint, patch_category_endpoint,
    },
    endpoints,
    question::{
        QuestionStore, create_question_endpoint, delete_question_endpoint,
        get_category_questions_endpoint, get_questions_endpoint, patch_question_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<C, Q>(state: AppState<C, Q>) -> Router
where
    C: CategoryStore + Clone + Send + Sync + 'static,
    Q: QuestionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint::<C, Q>).post(create_category_endpoint::<C, Q>),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint::<C, Q>)
                .patch(patch_category_endpoint::<C, Q>)
                .delete(delete_category_endpoint::<C, Q>),
        )
        .route(
            endpoints::QUESTIONS,
            get(get_questions_endpoint::<C, Q>).post(create_question_endpoint::<C, Q>),
        )
        .route(
            endpoints::QUESTION,
            get(get_category_questions_endpoint::<C, Q>)
                .patch(patch_question_endpoint::<C, Q>)
                .delete(delete_question_endpoint::<C, Q>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// An entry in the endpoint index served from the root route.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct EndpointDescription {
    href: &'static str,
    methods: &'static [&'static str],
}

static ENDPOINT_INDEX: &[EndpointDescription] = &[
    EndpointDescription {
        href: endpoints::CATEGORIES,
        methods: &["GET", "POST"],
    },
    EndpointDescription {
        href: endpoints::CATEGORY,
        methods: &["GET", "PATCH", "DELETE"],
    },
    EndpointDescription {
        href: endpoints::QUESTIONS,
        methods: &["GET", "POST"],
    },
    EndpointDescription {
        href: endpoints::QUESTION,
        methods: &["GET", "PATCH", "DELETE"],
    },
];

/// The root path '/' lists the available endpoints.
async fn get_index() -> Json<&'static [EndpointDescription]> {
    Json(ENDPOINT_INDEX)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
