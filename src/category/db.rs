//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryStore, NewCategory, Slug},
};

/// Creates, retrieves, updates and deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    ///
    /// The database must have been set up with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, title, slug FROM category ORDER BY id ASC;")?
            .query_map([], map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn get_by_slug(&self, slug: &Slug) -> Result<Option<Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, title, slug FROM category WHERE slug = :slug;")?
            .query_row(&[(":slug", slug.as_ref())], map_row)
            .optional()
            .map_err(|error| error.into())
    }

    fn get(&self, category_id: CategoryId) -> Result<Option<Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, title, slug FROM category WHERE id = :id;")?
            .query_row(&[(":id", &category_id)], map_row)
            .optional()
            .map_err(|error| error.into())
    }

    fn create(&self, category: NewCategory) -> Result<Category, Error> {
        let slug = category.slug();
        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO category (title, slug) VALUES (?1, ?2);",
            (&category.title, slug.as_ref()),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category {
            id,
            title: category.title,
            slug,
        })
    }

    fn update(&self, category: NewCategory, prev_slug: &Slug) -> Result<Category, Error> {
        let slug = category.slug();
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE category SET title = ?1, slug = ?2 WHERE slug = ?3;",
            (&category.title, slug.as_ref(), prev_slug.as_ref()),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingCategory);
        }

        connection
            .query_row(
                "SELECT id, title, slug FROM category WHERE slug = ?1;",
                [slug.as_ref()],
                map_row,
            )
            .map_err(|error| error.into())
    }

    fn delete(&self, slug: &Slug) -> Result<Category, Error> {
        let mut connection = self.lock()?;
        let transaction = connection.transaction()?;

        let category = transaction
            .query_row(
                "SELECT id, title, slug FROM category WHERE slug = ?1;",
                [slug.as_ref()],
                map_row,
            )
            .optional()?
            .ok_or(Error::DeleteMissingCategory)?;

        // Questions and their answers go with the category via ON DELETE CASCADE.
        transaction.execute("DELETE FROM category WHERE id = ?1;", [category.id])?;
        transaction.commit()?;

        Ok(category)
    }
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let raw_slug: String = row.get(2)?;

    Ok(Category {
        id,
        title,
        slug: Slug::new_unchecked(&raw_slug),
    })
}

#[cfg(test)]
mod category_store_tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryStore, NewCategory, Slug},
        db::initialize,
    };

    use super::SQLiteCategoryStore;

    fn get_test_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_category(title: &str) -> NewCategory {
        NewCategory {
            title: title.to_owned(),
        }
    }

    #[test]
    fn create_category_derives_slug() {
        let store = get_test_store();

        let html = store.create(new_category("html")).unwrap();
        let not_html = store.create(new_category("not html")).unwrap();

        assert!(html.id > 0);
        assert_eq!(html.title, "html");
        assert_eq!(html.slug, Slug::new_unchecked("html"));
        assert_eq!(not_html.slug, Slug::new_unchecked("not-html"));
    }

    #[test]
    fn create_category_with_taken_slug_fails() {
        let store = get_test_store();
        store.create(new_category("Not HTML")).unwrap();

        let result = store.create(new_category("not html"));

        assert_eq!(result, Err(Error::DuplicateSlug));
    }

    #[test]
    fn get_by_slug_succeeds() {
        let store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        let selected_category = store.get_by_slug(&Slug::new_unchecked("foo"));

        assert_eq!(selected_category, Ok(Some(inserted_category)));
    }

    #[test]
    fn get_by_slug_with_unknown_slug_returns_none() {
        let store = get_test_store();
        store.create(new_category("Foo")).unwrap();

        let selected_category = store.get_by_slug(&Slug::new_unchecked("bar"));

        assert_eq!(selected_category, Ok(None));
    }

    #[test]
    fn get_by_id_succeeds() {
        let store = get_test_store();
        let inserted_category = store.create(new_category("Foo")).unwrap();

        assert_eq!(
            store.get(inserted_category.id),
            Ok(Some(inserted_category.clone()))
        );
        assert_eq!(store.get(inserted_category.id + 123), Ok(None));
    }

    #[test]
    fn get_all_categories() {
        let store = get_test_store();

        let inserted_categories = HashSet::from([
            store.create(new_category("Foo")).unwrap(),
            store.create(new_category("Bar")).unwrap(),
        ]);

        let selected_categories = store.get_all().unwrap();
        let selected_categories = HashSet::from_iter(selected_categories);

        assert_eq!(inserted_categories, selected_categories);
    }

    #[test]
    fn update_replaces_title_and_slug() {
        let store = get_test_store();
        let category = store.create(new_category("html")).unwrap();

        let updated = store
            .update(new_category("not html"), &category.slug)
            .unwrap();

        assert_eq!(updated.id, category.id);
        assert_eq!(updated.title, "not html");
        assert_eq!(updated.slug, Slug::new_unchecked("not-html"));
        assert_eq!(store.get_by_slug(&category.slug), Ok(None));
    }

    #[test]
    fn update_with_unknown_slug_fails() {
        let store = get_test_store();

        let result = store.update(new_category("Updated"), &Slug::new_unchecked("missing"));

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_returns_deleted_category() {
        let store = get_test_store();
        let category = store.create(new_category("ToDelete")).unwrap();

        let deleted = store.delete(&category.slug);

        assert_eq!(deleted, Ok(category.clone()));
        assert_eq!(store.get_by_slug(&category.slug), Ok(None));
    }

    #[test]
    fn delete_with_unknown_slug_fails() {
        let store = get_test_store();

        let result = store.delete(&Slug::new_unchecked("missing"));

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn deleted_category_ids_are_not_reused() {
        let store = get_test_store();
        let deleted = store.create(new_category("html")).unwrap();
        store.delete(&deleted.slug).unwrap();

        let created = store.create(new_category("html")).unwrap();

        assert_ne!(created.id, deleted.id);
    }

    #[test]
    fn poisoned_lock_is_database_lock_error() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));
        let store = SQLiteCategoryStore::new(connection.clone());

        let _ = std::thread::spawn(move || {
            let _guard = connection.lock().unwrap();
            panic!("panic while holding the connection lock");
        })
        .join();

        assert_eq!(store.get_all(), Err(Error::DatabaseLockError));
        assert_eq!(
            store.create(new_category("html")),
            Err(Error::DatabaseLockError)
        );
    }
}
