use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// How a call to `/api/search` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Upstream produced an answer.
    Answer,
    /// Upstream succeeded without an answer.
    Empty,
    /// Upstream call failed.
    Failed,
    /// Rejected before any upstream call (missing query).
    Rejected,
}

impl SearchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOutcome::Answer => "answer",
            SearchOutcome::Empty => "empty",
            SearchOutcome::Failed => "failed",
            SearchOutcome::Rejected => "rejected",
        }
    }
}

/// Install the Prometheus recorder. Call once, from `main`.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("failed to set metrics handle: already initialized"))
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_search(outcome: SearchOutcome) {
    counter!("search_requests_total", "outcome" => outcome.as_str()).increment(1);
}
