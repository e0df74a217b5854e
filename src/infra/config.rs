use serde::{Deserialize, Serialize};

fn default_max_connections() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub log_path: String,
    /// Console filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub allow_origins: Vec<String>,
    pub address: String,
    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub db: DatabaseConfig,
    pub logger: LoggerConfig,
    pub application: ApplicationConfig,
}

impl AppConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<AppConfig> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::infra::config::AppConfig;

    #[rstest]
    fn test_config_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
                [db]
                url = "postgres://localhost/profiles"

                [logger]
                log_path = "./logs"

                [application]
                allow_origins = ["*"]
                address = "0.0.0.0:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.db.max_connections, 10);
        assert_eq!(config.logger.level, "info");
        assert_eq!(config.application.body_limit, 10 * 1024 * 1024);
    }

    #[rstest]
    fn test_sample_config_parses() {
        let config = AppConfig::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config/base.toml")).unwrap();

        assert_eq!(config.application.address, "0.0.0.0:5000");
    }
}
