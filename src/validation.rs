//! Validation of untrusted request data.
//!
//! Each validator takes an arbitrary JSON value and returns either the typed
//! value or a [ValidationErrors] that lists every problem that was found.
//! Validators never touch the database.
//!
//! Text lengths are counted in grapheme clusters, so "ö" counts as a single
//! character regardless of how it is encoded. Lengths are measured on the text
//! as it will be stored, after [escape_html], so a `<` counts as four
//! characters.

use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;
use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    category::{NewCategory, Slug},
    question::{NewAnswer, NewQuestion},
    sanitize::escape_html,
};

const MIN_ANSWERS: usize = 2;
const MAX_ANSWERS: usize = 8;

const CATEGORY_KEYS: &[&str] = &["title"];
const QUESTION_KEYS: &[&str] = &["text", "cat_id", "answers"];
const ANSWER_KEYS: &[&str] = &["text", "correct"];

/// Inclusive bounds on the length of a string and the messages reported when
/// a string falls outside of them.
struct LengthLimit {
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
}

impl LengthLimit {
    fn check(&self, text: &str) -> Option<&'static str> {
        let length = escape_html(text).graphemes(true).count();

        if length < self.min {
            Some(self.too_short)
        } else if length > self.max {
            Some(self.too_long)
        } else {
            None
        }
    }
}

const SLUG_LENGTH: LengthLimit = LengthLimit {
    min: 3,
    max: 1024,
    too_short: "slug must be at least three letters",
    too_long: "slug must be at most 1024 letters",
};

const TITLE_LENGTH: LengthLimit = LengthLimit {
    min: 3,
    max: 1024,
    too_short: "title must be at least three letters",
    too_long: "title must be at most 1024 letters",
};

const QUESTION_LENGTH: LengthLimit = LengthLimit {
    min: 3,
    max: 1024,
    too_short: "question must be at least 3 letters",
    too_long: "question must be at most 1024 letters",
};

const ANSWER_LENGTH: LengthLimit = LengthLimit {
    min: 1,
    max: 1024,
    too_short: "answer must be at least 1 letter",
    too_long: "answer must be at most 1024 letters",
};

/// The problems found while validating a value.
///
/// Problems with the value as a whole (e.g., a string where an object was
/// expected) are form errors, problems with a single field are recorded under
/// the field's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    /// Errors that apply to the value as a whole.
    pub form_errors: Vec<String>,
    /// Errors keyed by the name of the top-level field they apply to.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Whether no problems have been recorded.
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// The errors recorded for `field`, empty if there are none.
    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(|errors| errors.as_slice())
            .unwrap_or_default()
    }

    fn add_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_errors = self
            .field_errors
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |error| format!("{field}: {error}")));

        let messages: Vec<String> = self.form_errors.iter().cloned().chain(field_errors).collect();

        write!(f, "{}", messages.join("; "))
    }
}

/// Validate a category slug.
///
/// A slug must be a string of lowercase ASCII letters, digits and hyphens
/// between 3 and 1024 characters long. A valid slug is returned unchanged.
///
/// # Errors
///
/// Returns the problems as form errors if `value` is not a string or breaks
/// any of the rules above.
pub fn validate_slug(value: &Value) -> Result<Slug, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(slug) = value.as_str() else {
        errors.add_form_error(type_mismatch("string", value));
        return Err(errors);
    };

    let is_slug_format = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !is_slug_format {
        errors.add_form_error("invalid slug format");
    }

    if let Some(message) = SLUG_LENGTH.check(slug) {
        errors.add_form_error(message);
    }

    errors.into_result(Slug::new_unchecked(slug))
}

/// Check that `slug`, derived from a category title, is a valid slug.
///
/// # Errors
///
/// Returns the slug problems as errors for the `title` field, since the title
/// is what the client controls.
pub(crate) fn validate_title_slug(slug: &Slug) -> Result<Slug, ValidationErrors> {
    validate_slug(&Value::from(slug.as_ref())).map_err(|slug_errors| {
        let mut errors = ValidationErrors::default();

        for message in slug_errors.form_errors {
            errors.add_field_error("title", format!("title does not give a valid slug: {message}"));
        }

        errors
    })
}

/// Validate the request body for creating a category.
///
/// The body must be an object with exactly one field, `title`, which must be a
/// string between 3 and 1024 characters long.
///
/// # Errors
///
/// Returns every problem found with the body.
pub fn validate_category_create(value: &Value) -> Result<NewCategory, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(object) = expect_object(value, CATEGORY_KEYS, &mut errors) else {
        return Err(errors);
    };

    let title = string_field(object, "title", &mut errors);

    if let Some(message) = title.and_then(|title| TITLE_LENGTH.check(title)) {
        errors.add_field_error("title", message);
    }

    match title {
        Some(title) => errors.into_result(NewCategory {
            title: title.to_owned(),
        }),
        None => Err(errors),
    }
}

/// Validate the request body for patching a category.
///
/// Follows the same rules as [validate_category_create]. The slug of a
/// category is always derived from its title, so a `slug` field is rejected
/// like any other unknown field.
///
/// # Errors
///
/// Returns every problem found with the body.
pub fn validate_category_patch(value: &Value) -> Result<NewCategory, ValidationErrors> {
    validate_category_create(value)
}

/// Validate the request body for creating or patching a question.
///
/// The body must be an object with the fields:
/// - `text`: a string between 3 and 1024 characters long,
/// - `cat_id`: a whole number (`9` or `9.0`),
/// - `answers`: an array of 2 to 8 objects, each with a `text` string between
///   1 and 1024 characters long and a boolean `correct`.
///
/// # Errors
///
/// Returns every problem found with the body. Problems with individual answers
/// are recorded under `answers`, prefixed with the path to the answer field.
pub fn validate_question_create(value: &Value) -> Result<NewQuestion, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(object) = expect_object(value, QUESTION_KEYS, &mut errors) else {
        return Err(errors);
    };

    let text = string_field(object, "text", &mut errors);

    if let Some(message) = text.and_then(|text| QUESTION_LENGTH.check(text)) {
        errors.add_field_error("text", message);
    }

    let cat_id = integer_field(object, "cat_id", &mut errors);
    let answers = answers_field(object, &mut errors);

    match (text, cat_id, answers) {
        (Some(text), Some(cat_id), Some(answers)) => errors.into_result(NewQuestion {
            text: text.to_owned(),
            cat_id,
            answers,
        }),
        _ => Err(errors),
    }
}

fn answers_field(
    object: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<Vec<NewAnswer>> {
    let answers = match object.get("answers") {
        Some(Value::Array(answers)) => answers,
        Some(other) => {
            errors.add_field_error("answers", type_mismatch("array", other));
            return None;
        }
        None => {
            errors.add_field_error("answers", "required");
            return None;
        }
    };

    if answers.len() < MIN_ANSWERS {
        errors.add_field_error("answers", "a question must have at least 2 answers");
    } else if answers.len() > MAX_ANSWERS {
        errors.add_field_error("answers", "a question must have at most 8 answers");
    }

    let mut validated = Vec::with_capacity(answers.len());

    for (index, answer) in answers.iter().enumerate() {
        match validate_answer(answer) {
            Ok(answer) => validated.push(answer),
            Err(problems) => {
                for problem in problems {
                    errors.add_field_error("answers", format!("answers.{index}{problem}"));
                }
            }
        }
    }

    Some(validated)
}

/// Problems are returned as path suffixes, e.g. ".text: required".
fn validate_answer(value: &Value) -> Result<NewAnswer, Vec<String>> {
    let Value::Object(object) = value else {
        return Err(vec![format!(": {}", type_mismatch("object", value))]);
    };

    let mut problems = Vec::new();

    if let Some(message) = unrecognized_keys(object, ANSWER_KEYS) {
        problems.push(format!(": {message}"));
    }

    let text = match object.get("text") {
        Some(Value::String(text)) => {
            if let Some(message) = ANSWER_LENGTH.check(text) {
                problems.push(format!(".text: {message}"));
            }
            Some(text)
        }
        Some(other) => {
            problems.push(format!(".text: {}", type_mismatch("string", other)));
            None
        }
        None => {
            problems.push(".text: required".to_owned());
            None
        }
    };

    let correct = match object.get("correct") {
        Some(Value::Bool(correct)) => Some(*correct),
        Some(other) => {
            problems.push(format!(".correct: {}", type_mismatch("boolean", other)));
            None
        }
        None => {
            problems.push(".correct: required".to_owned());
            None
        }
    };

    match (text, correct) {
        (Some(text), Some(correct)) if problems.is_empty() => Ok(NewAnswer {
            text: text.to_owned(),
            correct,
        }),
        _ => Err(problems),
    }
}

fn expect_object<'a>(
    value: &'a Value,
    known_keys: &[&str],
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    let Value::Object(object) = value else {
        errors.add_form_error(type_mismatch("object", value));
        return None;
    };

    if let Some(message) = unrecognized_keys(object, known_keys) {
        errors.add_form_error(message);
    }

    Some(object)
}

fn unrecognized_keys(object: &Map<String, Value>, known_keys: &[&str]) -> Option<String> {
    let unknown: Vec<String> = object
        .keys()
        .filter(|key| !known_keys.contains(&key.as_str()))
        .map(|key| format!("'{key}'"))
        .collect();

    if unknown.is_empty() {
        None
    } else {
        Some(format!(
            "unrecognized key(s) in object: {}",
            unknown.join(", ")
        ))
    }
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match object.get(field) {
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            errors.add_field_error(field, type_mismatch("string", other));
            None
        }
        None => {
            errors.add_field_error(field, "required");
            None
        }
    }
}

fn integer_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match object.get(field) {
        Some(Value::Number(number)) => {
            if let Some(integer) = number.as_i64() {
                return Some(integer);
            }

            match number.as_f64() {
                Some(float) if float.fract() != 0.0 => {
                    errors.add_field_error(field, "expected integer, received float");
                    None
                }
                // A whole float such as 9.0, as long as it fits in an i64.
                Some(float) if float >= i64::MIN as f64 && float < i64::MAX as f64 => {
                    Some(float as i64)
                }
                _ => {
                    errors.add_field_error(field, "number is too large");
                    None
                }
            }
        }
        Some(other) => {
            errors.add_field_error(field, type_mismatch("number", other));
            None
        }
        None => {
            errors.add_field_error(field, "required");
            None
        }
    }
}

fn type_mismatch(expected: &str, value: &Value) -> String {
    format!("expected {expected}, received {}", type_name(value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
