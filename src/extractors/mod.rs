//! Request extractors that reject with [`crate::error::AppError`] so every failure
//! renders the standard error body.

pub mod json;
pub mod post_id;

pub use json::JsonBody;
pub use post_id::{parse_id, PostId};
