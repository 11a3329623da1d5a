use std::{path::PathBuf, time::Duration};

use clap::{Args as ClapArgs, Parser, ValueEnum};
use inciscope_core::domain::common::{
    EnrichmentConfig, InciscopeConfig, KnowledgeBaseConfig, MAX_EXTERNAL_TIMEOUT,
    QuotaBackendKind, QuotaConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "inciscope-api", version, about = "Cosmetic composition analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub knowledge_base: KnowledgeBaseArgs,

    #[command(flatten)]
    pub quota: QuotaArgs,

    #[command(flatten)]
    pub enrichment: EnrichmentArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Bearer token for subscription administration. Admin routes reject every call when unset.
    #[arg(long = "admin-token", env = "ADMIN_TOKEN")]
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct KnowledgeBaseArgs {
    #[arg(
        long = "knowledge-base-path",
        env = "KNOWLEDGE_BASE_PATH",
        default_value = "data/ingredients_db.json"
    )]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuotaBackendArg {
    Redis,
    Memory,
}

impl From<QuotaBackendArg> for QuotaBackendKind {
    fn from(value: QuotaBackendArg) -> Self {
        match value {
            QuotaBackendArg::Redis => QuotaBackendKind::Redis,
            QuotaBackendArg::Memory => QuotaBackendKind::Memory,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct QuotaArgs {
    #[arg(
        long = "quota-backend",
        env = "QUOTA_BACKEND",
        value_enum,
        default_value_t = QuotaBackendArg::Redis
    )]
    pub backend: QuotaBackendArg,

    #[arg(long = "redis-url", env = "REDIS_URL", default_value = "redis://127.0.0.1:6379/0")]
    pub redis_url: String,

    #[arg(long = "daily-request-limit", env = "DAILY_REQUEST_LIMIT", default_value_t = 5)]
    pub daily_request_limit: u64,

    #[arg(
        long = "daily-enrichment-limit",
        env = "DAILY_ENRICHMENT_LIMIT",
        default_value_t = 10
    )]
    pub daily_enrichment_limit: u64,

    #[arg(
        long = "quota-store-timeout-ms",
        env = "QUOTA_STORE_TIMEOUT_MS",
        default_value_t = 2000
    )]
    pub store_timeout_ms: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct EnrichmentArgs {
    #[arg(
        long = "enrichment-enabled",
        env = "ENRICHMENT_ENABLED",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub enabled: bool,

    #[arg(
        long = "enrichment-base-url",
        env = "ENRICHMENT_BASE_URL",
        default_value = "https://incidecoder.com/ingredients/"
    )]
    pub base_url: String,

    /// Capped at 10 seconds.
    #[arg(
        long = "enrichment-timeout-secs",
        env = "ENRICHMENT_TIMEOUT_SECS",
        default_value_t = 10
    )]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for InciscopeConfig {
    fn from(args: Args) -> Self {
        InciscopeConfig {
            knowledge_base: KnowledgeBaseConfig {
                path: args.knowledge_base.path,
            },
            quota: QuotaConfig {
                backend: args.quota.backend.into(),
                redis_url: args.quota.redis_url,
                daily_request_limit: args.quota.daily_request_limit,
                daily_enrichment_limit: args.quota.daily_enrichment_limit,
                store_timeout: Duration::from_millis(args.quota.store_timeout_ms)
                    .min(MAX_EXTERNAL_TIMEOUT),
            },
            enrichment: EnrichmentConfig {
                enabled: args.enrichment.enabled,
                base_url: args.enrichment.base_url,
                timeout: Duration::from_secs(args.enrichment.timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_convert_into_config() {
        let args = Args::try_parse_from([
            "inciscope-api",
            "--quota-backend",
            "memory",
            "--daily-request-limit",
            "3",
            "--enrichment-enabled",
            "false",
            "--enrichment-timeout-secs",
            "4",
            "--knowledge-base-path",
            "/tmp/kb.json",
        ])
        .unwrap();

        let config = InciscopeConfig::from(args);

        assert_eq!(config.quota.backend, QuotaBackendKind::Memory);
        assert_eq!(config.quota.daily_request_limit, 3);
        assert!(!config.enrichment.enabled);
        assert_eq!(config.enrichment.timeout, Duration::from_secs(4));
        assert_eq!(config.knowledge_base.path, PathBuf::from("/tmp/kb.json"));
    }

    #[test]
    fn test_store_timeout_is_capped() {
        let args =
            Args::try_parse_from(["inciscope-api", "--quota-store-timeout-ms", "60000"]).unwrap();

        let config = InciscopeConfig::from(args);

        assert_eq!(config.quota.store_timeout, MAX_EXTERNAL_TIMEOUT);
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = Args::try_parse_from([
            "inciscope-api",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = Args::try_parse_from(["inciscope-api", "--quota-backend", "postgres"]);

        assert!(result.is_err());
    }
}
