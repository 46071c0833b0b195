use rusqlite::Connection;

use crate::{
    Error, SQLAppState,
    app_state::create_app_state,
    category::{Category, CategoryId, CategoryStore, NewCategory, Slug},
    question::{Answer, NewAnswer, NewQuestion, Question, QuestionId, QuestionStore},
};

pub(crate) fn get_test_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    create_app_state(connection).expect("Could not create app state")
}

pub(crate) fn create_test_category(state: &SQLAppState, title: &str) -> Category {
    state
        .category_store
        .create(NewCategory {
            title: title.to_owned(),
        })
        .expect("Could not create test category")
}

fn new_question(text: &str, cat_id: CategoryId) -> NewQuestion {
    NewQuestion {
        text: text.to_owned(),
        cat_id,
        answers: vec![
            NewAnswer {
                text: "answer1".to_owned(),
                correct: true,
            },
            NewAnswer {
                text: "answer2".to_owned(),
                correct: false,
            },
        ],
    }
}

pub(crate) fn create_test_question(state: &SQLAppState, text: &str, cat_id: CategoryId) -> Question {
    state
        .question_store
        .create(new_question(text, cat_id))
        .expect("Could not create test question")
}

/// A store where every operation fails as if the database were unavailable.
#[derive(Debug, Clone)]
pub(crate) struct FailingStore;

impl CategoryStore for FailingStore {
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_by_slug(&self, _slug: &Slug) -> Result<Option<Category>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _category_id: CategoryId) -> Result<Option<Category>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create(&self, _category: NewCategory) -> Result<Category, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _category: NewCategory, _prev_slug: &Slug) -> Result<Category, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _slug: &Slug) -> Result<Category, Error> {
        Err(Error::DatabaseLockError)
    }
}

impl QuestionStore for FailingStore {
    fn get_all(&self) -> Result<Vec<Question>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_by_category(&self, _category_id: CategoryId) -> Result<Vec<Question>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_answers(&self, _question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _question_id: QuestionId) -> Result<Option<Question>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create(&self, _question: NewQuestion) -> Result<Question, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _question: NewQuestion, _question_id: QuestionId) -> Result<Question, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _question_id: QuestionId) -> Result<Question, Error> {
        Err(Error::DatabaseLockError)
    }
}
