//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{slug}', use [format_endpoint].

use std::fmt::Display;

/// The root route which lists the available endpoints.
pub const ROOT: &str = "/";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/categories";
/// The route to get, patch and delete a single category.
pub const CATEGORY: &str = "/categories/{slug}";
/// The route to list and create questions.
pub const QUESTIONS: &str = "/questions";
/// The route for a single ID under questions.
///
/// A GET treats the ID as a category ID and lists that category's questions,
/// PATCH and DELETE treat it as a question ID.
pub const QUESTION: &str = "/questions/{id}";

/// Replace the parameter in `endpoint_path` with `param`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{slug}', '{slug}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, param: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        param,
        &endpoint_path[param_end..]
    )
}
