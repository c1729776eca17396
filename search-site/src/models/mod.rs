pub mod search;

pub use search::{
    AiSearchEnvelope, AiSearchRequest, AiSearchResult, ErrorBody, SearchParams, SearchResponse,
    SearchResult,
};
