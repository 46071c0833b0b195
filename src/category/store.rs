//! Defines the category store trait.

use crate::{
    Error,
    category::{Category, CategoryId, NewCategory, Slug},
};

/// Creates, retrieves, updates and deletes trivia categories.
///
/// Lookups report a missing category as `Ok(None)`, not as an error.
pub trait CategoryStore {
    /// Get every category.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Get the category with exactly `slug`.
    fn get_by_slug(&self, slug: &Slug) -> Result<Option<Category>, Error>;

    /// Get the category with `category_id`.
    fn get(&self, category_id: CategoryId) -> Result<Option<Category>, Error>;

    /// Create a category with a slug derived from its title.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateSlug] if the derived slug is taken.
    fn create(&self, category: NewCategory) -> Result<Category, Error>;

    /// Replace the title of the category with `prev_slug` and derive a new
    /// slug from it.
    ///
    /// # Errors
    ///
    /// Returns [Error::UpdateMissingCategory] if no category has `prev_slug`.
    fn update(&self, category: NewCategory, prev_slug: &Slug) -> Result<Category, Error>;

    /// Delete the category with `slug` and return it as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingCategory] if no category has `slug`.
    fn delete(&self, slug: &Slug) -> Result<Category, Error>;
}
