//! PostService: post lifecycle over the store, plus request validation.

mod posts;
pub mod validation;
pub use posts::PostService;
pub use validation::{parse_new_post, parse_post_patch, RequestValidator};
