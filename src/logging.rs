//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{header::CONTENT_LENGTH, request, response},
    middleware::Next,
    response::Response,
};

use crate::Error;

/// The maximum number of characters of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, that is read into memory.
///
/// Matches the default limit of axum's `Json` extractor.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
///
/// # Errors
///
/// Returns [Error::PayloadTooLarge] if the request body is known to be longer
/// than [REQUEST_BODY_LIMIT] bytes, and [Error::BodyReadError] if the request
/// or response body cannot be read.
pub async fn logging_middleware(request: Request, next: Next) -> Result<Response, Error> {
    let (parts, body) = request.into_parts();

    let declared_length = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_default();

    let known_length = declared_length.max(body.size_hint().lower());

    if known_length > REQUEST_BODY_LIMIT as u64 {
        tracing::debug!("Rejected request with a body of at least {known_length} bytes");
        return Err(Error::PayloadTooLarge);
    }

    let body = read_body(body, REQUEST_BODY_LIMIT).await?;
    log_request(&parts, &String::from_utf8_lossy(&body));

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = read_body(body, usize::MAX).await?;
    log_response(&parts, &String::from_utf8_lossy(&body));

    Ok(Response::from_parts(parts, Body::from(body)))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, Error> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|error| Error::BodyReadError(error.to_string()))
}

/// Return the first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None`
/// if `body` is not longer than that.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}


#[cfg(test)]
mod logging_middleware_tests {
    use axum::{Json, Router, http::StatusCode, middleware, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::{REQUEST_BODY_LIMIT, logging_middleware};

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    #[tokio::test]
    async fn passes_bodies_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");
        let body = json!({ "text": "a".repeat(200) });

        let response = server.post("/echo").json(&body).await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<Value>(), body);
    }

    #[tokio::test]
    async fn rejects_bodies_over_the_limit() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .bytes(vec![b' '; REQUEST_BODY_LIMIT + 1].into())
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "payload too large" })
        );
    }
}
