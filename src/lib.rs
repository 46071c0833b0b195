//! Trivia API is a small REST API for a quiz application.
//!
//! Categories group questions, and each question owns a fixed set of answers,
//! one or more of which are marked correct. All request and response bodies
//! are JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::{Value, json};
use tokio::signal;

mod app_state;
mod category;
mod db;
mod endpoints;
mod logging;
mod question;
mod routing;
mod sanitize;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use category::{
    Category, CategoryId, CategoryStore, NewCategory, SQLiteCategoryStore, Slug,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use question::{
    Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId, QuestionStore,
    SQLiteQuestionStore,
};
pub use routing::build_router;
pub use sanitize::escape_html;
pub use validation::{
    ValidationErrors, validate_category_create, validate_category_patch,
    validate_question_create, validate_slug,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body could not be parsed as JSON.
    #[error("the request body is not valid JSON")]
    InvalidJson,

    /// The request data did not pass validation.
    ///
    /// The wrapped errors are safe to send to the client.
    #[error("invalid data: {0}")]
    InvalidData(ValidationErrors),

    /// A category with the same slug already exists in the database.
    #[error("a category with the same slug already exists")]
    DuplicateSlug,

    /// A question referred to a category that does not exist.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// A category ID path parameter was not a number.
    #[error("\"{0}\" is not a valid category ID")]
    InvalidCategoryId(String),

    /// A question ID path parameter was not a number.
    #[error("\"{0}\" is not a valid question ID")]
    InvalidQuestionId(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., slug) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The category whose questions were requested does not exist.
    #[error("the category could not be found")]
    CategoryNotFound,

    /// The requested question does not exist.
    #[error("the question could not be found")]
    QuestionNotFound,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a question that does not exist
    #[error("tried to update a question that is not in the database")]
    UpdateMissingQuestion,

    /// Tried to delete a question that does not exist
    #[error("tried to delete a question that is not in the database")]
    DeleteMissingQuestion,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request body is larger than [REQUEST_BODY_LIMIT] bytes.
    #[error("the request body is too large")]
    PayloadTooLarge,

    /// The body of a request or response could not be read.
    #[error("could not read the message body: {0}")]
    BodyReadError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.slug") =>
            {
                Error::DuplicateSlug
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::InvalidCategory
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::InvalidData(errors)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("could not parse request body as JSON: {rejection}");
        Error::InvalidJson
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidJson => {
                json_response(StatusCode::BAD_REQUEST, json!({ "error": "invalid json" }))
            }
            Error::InvalidData(errors) => json_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid data", "errors": errors }),
            ),
            Error::DuplicateSlug => json_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": "a category with this slug already exists" }),
            ),
            Error::InvalidCategory => {
                json_response(StatusCode::BAD_REQUEST, json!({ "message": "invalid category" }))
            }
            Error::InvalidCategoryId(_) => json_response(
                StatusCode::BAD_REQUEST,
                json!({ "message": "category id must be a number" }),
            ),
            Error::InvalidQuestionId(_) => json_response(
                StatusCode::BAD_REQUEST,
                json!({ "message": "question id must be a number" }),
            ),
            Error::NotFound | Error::UpdateMissingCategory | Error::DeleteMissingCategory => {
                json_response(StatusCode::NOT_FOUND, json!({ "message": "not found" }))
            }
            Error::PayloadTooLarge => json_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "message": "payload too large" }),
            ),
            Error::CategoryNotFound => json_response(
                StatusCode::NOT_FOUND,
                json!({ "message": "category not found" }),
            ),
            Error::QuestionNotFound
            | Error::UpdateMissingQuestion
            | Error::DeleteMissingQuestion => json_response(
                StatusCode::NOT_FOUND,
                json!({ "message": "question does not exist" }),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "an error came up" }),
                )
            }
        }
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}
