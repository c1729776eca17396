use search_site::config::{AiSearchSettings, ServerSettings, Settings, TelemetrySettings};
use search_site::startup::Application;
use secrecy::Secret;
use wiremock::MockServer;

pub const TEST_ACCOUNT_ID: &str = "test-account";
pub const TEST_RAG_NAME: &str = "test-rag";
pub const TEST_TOKEN: &str = "test-token";
pub const SEARCH_PATH: &str = "/accounts/test-account/autorag/rags/test-rag/ai-search";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the site against a stub upstream with full credentials.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn the site without any upstream credentials.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_with(|ai_search| {
            ai_search.account_id = None;
            ai_search.rag_name = None;
            ai_search.api_token = None;
        })
        .await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut AiSearchSettings)) -> Self {
        let upstream = MockServer::start().await;

        let mut ai_search = AiSearchSettings {
            api_base_url: upstream.uri(),
            account_id: Some(TEST_ACCOUNT_ID.to_string()),
            rag_name: Some(TEST_RAG_NAME.to_string()),
            api_token: Some(Secret::new(TEST_TOKEN.to_string())),
            top_k: 5,
        };
        customize(&mut ai_search);

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            ai_search,
            telemetry: TelemetrySettings::default(),
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            upstream,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Number of calls the stub upstream has seen so far.
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}
