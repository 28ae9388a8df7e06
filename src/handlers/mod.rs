//! HTTP handlers for post CRUD.

pub mod posts;
pub use posts::*;
