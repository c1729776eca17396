pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::ai_search_client::AiSearchClient;
use std::sync::Arc;

/// Shared application state containing the upstream client
#[derive(Clone)]
pub struct AppState {
    pub ai_search: Arc<AiSearchClient>,
}

impl AppState {
    pub fn new(ai_search: Arc<AiSearchClient>) -> Self {
        Self { ai_search }
    }
}
