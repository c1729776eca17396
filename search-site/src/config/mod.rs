use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_TOP_K: u32 = 5;

/// Platform-style variables consumed as-is, mapped onto `ai_search.*`.
const ACCOUNT_ID_VAR: &str = "ACCOUNT_ID";
const RAG_NAME_VAR: &str = "AUTORAG_NAME";
const API_TOKEN_VAR: &str = "AI_SEARCH_TOKEN";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ai_search: AiSearchSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    /// Port 0 binds a random port (used by the integration tests).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

#[derive(Deserialize, Clone, Debug)]
pub struct AiSearchSettings {
    /// Base of the upstream REST API, without trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    pub account_id: Option<String>,
    /// Name of the AI search (AutoRAG) instance.
    pub rag_name: Option<String>,
    pub api_token: Option<Secret<String>>,
    /// Result-count hint forwarded upstream.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl Default for AiSearchSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            account_id: None,
            rag_name: None,
            api_token: None,
            top_k: default_top_k(),
        }
    }
}

impl AiSearchSettings {
    /// Names of the credentials that are unset or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.account_id.as_deref()) {
            missing.push("account_id");
        }
        if is_blank(self.rag_name.as_deref()) {
            missing.push("rag_name");
        }
        if is_blank(self.api_token.as_ref().map(|t| t.expose_secret().as_str())) {
            missing.push("api_token");
        }
        missing
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector, e.g. `http://tempo:4317`. Export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Works from the workspace root as well as from inside the crate
    let configuration_directory = if base_path.ends_with("search-site") {
        base_path.join("config")
    } else {
        base_path.join("search-site").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("ai_search.account_id", env_var(ACCOUNT_ID_VAR))?
        .set_override_option("ai_search.rag_name", env_var(RAG_NAME_VAR))?
        .set_override_option("ai_search.api_token", env_var(API_TOKEN_VAR))?
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
