//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::SqliteShortenedUrlRepository;

/// Service wired to the SQLite store.
pub type SqliteLinkService = LinkService<SqliteShortenedUrlRepository>;

/// Process-scoped handles, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<SqliteLinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<SqliteLinkService>) -> Self {
        Self { link_service }
    }
}
