mod common;
mod posts;

pub use common::common_routes_with_ready;
pub use posts::post_routes;
