use crate::models::{ErrorBody, SearchParams, SearchResponse};
use crate::services::{record_search, AiSearchError, SearchOutcome};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use service_core::observability::REQUEST_ID_HEADER;
use thiserror::Error;

pub const MISSING_QUERY_MESSAGE: &str = "Missing query";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to perform search";

/// Errors visible to callers of `/api/search`.
///
/// Upstream detail is logged and never returned.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing query")]
    MissingQuery,

    #[error(transparent)]
    Upstream(#[from] AiSearchError),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        match self {
            SearchError::MissingQuery => {
                (StatusCode::BAD_REQUEST, MISSING_QUERY_MESSAGE).into_response()
            }
            SearchError::Upstream(err) => {
                tracing::error!(error = %err, "Search handler error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: SEARCH_FAILED_MESSAGE,
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, SearchError> {
    let query = match SearchParams::from_pairs(pairs).q {
        Some(q) if !q.is_empty() => q,
        _ => {
            record_search(SearchOutcome::Rejected);
            return Err(SearchError::MissingQuery);
        }
    };

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok());

    let answer = state
        .ai_search
        .search(&query, request_id)
        .await
        .map_err(|e| {
            record_search(SearchOutcome::Failed);
            SearchError::from(e)
        })?;

    record_search(if answer.is_some() {
        SearchOutcome::Answer
    } else {
        SearchOutcome::Empty
    });

    Ok(Json(SearchResponse::from_answer(answer)))
}
