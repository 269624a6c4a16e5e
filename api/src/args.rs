use std::{net::IpAddr, path::PathBuf, time::Duration};

use clap::{Args as ClapArgs, Parser};
use productlens_core::domain::common::{
    AnalysisConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DatabaseConfig, LLMConfig,
    ProductLensConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "productlens", version, about = "Product package analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long = "server-port", env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/productlens`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5000"
    )]
    pub allowed_origins: Vec<String>,

    /// Built front end to serve for non-API paths
    #[arg(long = "static-dir", env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Fallback when `GEMINI_API_KEY` is not set
    #[arg(long = "google-ai-api-key", env = "GOOGLE_AI_API_KEY", hide_env_values = true)]
    pub google_ai_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

impl LlmArgs {
    pub fn api_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| self.google_ai_api_key.clone())
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnalysisArgs {
    /// Images analyzed at the same time within one upload
    #[arg(long = "analysis-concurrency", env = "ANALYSIS_CONCURRENCY", default_value_t = 4)]
    pub concurrency: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    /// Postgres URL; products are kept in memory when unset
    #[arg(long = "database-url", env = "DATABASE_URL", hide_env_values = true)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for ProductLensConfig {
    fn from(args: Args) -> Self {
        ProductLensConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.api_key(),
                gemini_model: args.llm.gemini_model,
                base_url: args.llm.gemini_base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            analysis: AnalysisConfig {
                concurrency: args.analysis.concurrency,
            },
            database: args
                .database
                .url
                .filter(|url| !url.is_empty())
                .map(|url| DatabaseConfig { url }),
        }
    }
}
