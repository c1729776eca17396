pub mod ai_search_client;
pub mod metrics;

pub use ai_search_client::{AiSearchClient, AiSearchError};
pub use self::metrics::{get_metrics, init_metrics, record_search, SearchOutcome};
