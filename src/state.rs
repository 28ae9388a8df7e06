//! Shared application state for all routes.

use crate::logger::Logger;
use crate::service::PostService;
use crate::store::PostStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, logger: Arc<dyn Logger>) -> Self {
        AppState {
            posts: PostService::new(store, logger.clone()),
            logger,
        }
    }
}
