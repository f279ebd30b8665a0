use std::time::Duration;

use serde::Deserialize;

use crate::domain::{ConfidenceThresholds, DomainError};
use crate::infrastructure::answer::GenerationSettings;
use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Similarity tiers and miss handling
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: ConfidenceThresholds,
    #[serde(default)]
    pub coalesce_concurrent_misses: bool,
    /// Upper bound on how long an in-flight miss is shared
    #[serde(default = "default_coalesce_ttl_secs")]
    pub coalesce_ttl_secs: u64,
}

/// OpenAI-compatible embedding and chat endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Falls back to `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback_answer")]
    pub fallback_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Falls back to `DATABASE_URL`
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_coalesce_ttl_secs() -> u64 {
    120
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_chat_model() -> String {
    GenerationSettings::default().model
}

fn default_temperature() -> f32 {
    GenerationSettings::default().temperature
}

fn default_max_tokens() -> u32 {
    GenerationSettings::default().max_tokens
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_fallback_answer() -> String {
    GenerationSettings::default().fallback_answer
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: ConfidenceThresholds::default(),
            coalesce_concurrent_misses: false,
            coalesce_ttl_secs: default_coalesce_ttl_secs(),
        }
    }
}

impl EngineConfig {
    pub fn coalesce_ttl(&self) -> Duration {
        Duration::from_secs(self.coalesce_ttl_secs)
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            embedding_model: default_embedding_model(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            fallback_answer: default_fallback_answer(),
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.chat_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            fallback_answer: self.fallback_answer.clone(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StorageSettings {
    /// Resolve the backend selection into a connectable storage config
    pub fn storage_config(&self) -> Result<StorageConfig, DomainError> {
        match self.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(StorageConfig::InMemory),
            StorageType::Postgres => {
                let url = self.database_url.clone().ok_or_else(|| {
                    DomainError::configuration(
                        "storage.database_url or DATABASE_URL is required for the postgres backend",
                    )
                })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl AppConfig {
    /// Layer `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, DomainError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config = Self::from_builder(builder)?;
        config.apply_env_secrets(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, DomainError> {
        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Fill unset secrets from their conventional environment variables
    fn apply_env_secrets(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.providers.api_key.is_none() {
            self.providers.api_key = lookup("OPENAI_API_KEY");
        }
        if self.storage.database_url.is_none() {
            self.storage.database_url = lookup("DATABASE_URL");
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.engine.thresholds.validate()?;
        self.storage.backend.parse::<StorageType>()?;

        if !(0.0..=2.0).contains(&self.providers.temperature) {
            return Err(DomainError::configuration(
                "providers.temperature must be within [0, 2]",
            ));
        }
        if self.providers.fallback_answer.trim().is_empty() {
            return Err(DomainError::configuration(
                "providers.fallback_answer must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_json(json: &str) -> Result<AppConfig, DomainError> {
        AppConfig::from_builder(
            config::Config::builder().add_source(File::from_str(json, FileFormat::Json)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_json("{}").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.engine.thresholds, ConfidenceThresholds::default());
        assert!(!config.engine.coalesce_concurrent_misses);
        assert_eq!(config.providers.chat_model, "gpt-4o-mini");
        assert_eq!(config.providers.max_tokens, 500);
        assert_eq!(config.storage.backend, "memory");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = from_json(
            r#"{
                "logging": { "level": "debug", "format": "json" },
                "engine": {
                    "thresholds": { "high": 0.95, "medium": 0.85, "low": 0.75 },
                    "coalesce_concurrent_misses": true
                },
                "providers": { "chat_model": "gpt-4o", "temperature": 0.2 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.engine.thresholds.low, 0.75);
        assert!(config.engine.coalesce_concurrent_misses);

        let settings = config.providers.generation_settings();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_tokens, 500);
    }

    #[test]
    fn test_inverted_thresholds_fail_validation() {
        let config = from_json(
            r#"{ "engine": { "thresholds": { "high": 0.7, "medium": 0.8, "low": 0.9 } } }"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_unknown_backend_fails_validation() {
        let config = from_json(r#"{ "storage": { "backend": "redis" } }"#).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_secrets_fill_only_missing_values() {
        let mut config = from_json(r#"{ "providers": { "api_key": "from-file" } }"#).unwrap();

        config.apply_env_secrets(|name| match name {
            "OPENAI_API_KEY" => Some("from-env".to_string()),
            "DATABASE_URL" => Some("postgres://db/qa".to_string()),
            _ => None,
        });

        assert_eq!(config.providers.api_key.as_deref(), Some("from-file"));
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("postgres://db/qa")
        );
    }

    #[test]
    fn test_postgres_requires_url() {
        let settings = StorageSettings {
            backend: "postgres".to_string(),
            ..Default::default()
        };
        assert!(settings.storage_config().is_err());

        let settings = StorageSettings {
            backend: "postgres".to_string(),
            database_url: Some("postgres://localhost/qa".to_string()),
            max_connections: 4,
        };
        match settings.storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://localhost/qa");
                assert_eq!(pg.max_connections, 4);
            }
            other => panic!("unexpected storage config: {:?}", other),
        }
    }
}
