use serde::{Deserialize, Serialize};

/// Title given to the single record built from the generated answer.
pub const ANSWER_TITLE: &str = "AI Generated Answer";

/// Query string accepted by `/api/search`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// Build from decoded query pairs. A repeated `q` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            q: pairs
                .into_iter()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Answer,
}

/// A result record as rendered by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn answer(snippet: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Answer,
            title: ANSWER_TITLE.to_string(),
            snippet: snippet.into(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// One answer record when the upstream produced an answer, none otherwise.
    pub fn from_answer(answer: Option<String>) -> Self {
        Self {
            results: answer.map(SearchResult::answer).into_iter().collect(),
        }
    }
}

/// Generic body returned for any upstream failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Request body sent to the upstream AI search endpoint.
#[derive(Debug, Serialize)]
pub struct AiSearchRequest<'a> {
    pub query: &'a str,
    pub top_k: u32,
}

/// Upstream success body. Only the generated answer is read.
#[derive(Debug, Deserialize)]
pub struct AiSearchEnvelope {
    #[serde(default)]
    pub result: Option<AiSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct AiSearchResult {
    #[serde(default)]
    pub response: Option<String>,
}

impl AiSearchEnvelope {
    /// The generated answer, if present and non-empty.
    pub fn into_answer(self) -> Option<String> {
        self.result
            .and_then(|result| result.response)
            .filter(|response| !response.is_empty())
    }
}
