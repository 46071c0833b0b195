#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod stores;

pub(crate) use http::{assert_content_type, parse_json};
pub(crate) use stores::{FailingStore, create_test_category, create_test_question, get_test_state};
