//! Categories that group trivia questions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod store;

pub use create::create_category_endpoint;
pub use db::{SQLiteCategoryStore, create_category_table};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, NewCategory, Slug};
pub use edit::patch_category_endpoint;
pub use list::{get_categories_endpoint, get_category_endpoint};
pub use store::CategoryStore;
