//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use crate::{ValidationErrors, sanitize::escape_html, validation::validate_title_slug};

/// Database identifier for a category.
pub type CategoryId = i64;

/// A URL-safe identifier for a category, e.g. "not-html".
///
/// Serializes as a plain string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Slug(String);

impl Slug {
    /// Create a slug without validation.
    ///
    /// Untrusted input should go through [crate::validate_slug] instead.
    pub fn new_unchecked(slug: &str) -> Self {
        Self(slug.to_string())
    }

    /// Derive a slug from a category title by lowercasing it and replacing
    /// every space with a hyphen.
    ///
    /// The result is not validated, titles containing characters other than
    /// letters, digits, hyphens and spaces produce slugs that [crate::validate_slug]
    /// rejects.
    pub fn from_title(title: &str) -> Self {
        Self(title.to_lowercase().replace(' ', "-"))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category of trivia questions, e.g. 'HTML'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID assigned by the database.
    pub id: CategoryId,
    /// The human-readable name of the category.
    pub title: String,
    /// The unique, URL-safe identifier derived from `title`.
    pub slug: Slug,
}

/// The data needed to create a category or replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// The human-readable name of the category.
    pub title: String,
}

impl NewCategory {
    /// The slug derived from the title.
    pub fn slug(&self) -> Slug {
        Slug::from_title(&self.title)
    }

    /// The slug derived from the title, checked against the slug rules.
    ///
    /// # Errors
    ///
    /// Returns the slug problems, recorded against `title`, if the title does
    /// not produce a valid slug.
    pub fn checked_slug(&self) -> Result<Slug, ValidationErrors> {
        validate_title_slug(&self.slug())
    }

    /// Escape any HTML in the title.
    pub fn escape_html(self) -> Self {
        Self {
            title: escape_html(&self.title),
        }
    }
}
