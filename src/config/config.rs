use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::credentials::CredentialStoreConfig;
use super::logging::LoggingConfig;

/// Environment variables with this prefix override values from the YAML file.
/// Nested keys are separated by a double underscore, e.g. `ZEROWASTE_API__BASE_URL`.
pub const ENV_PREFIX: &str = "ZEROWASTE_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: the API to talk to, where tokens live, and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialStoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from a YAML file, then apply `ZEROWASTE_*` environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(
            Env::prefixed(ENV_PREFIX)
                // ZEROWASTE_CONFIG and ZEROWASTE_PASSWORD belong to the CLI.
                .ignore(&["config", "password"])
                .split("__"),
        );
    extract_config(figment)
}

/// Extract a versioned config from an already assembled figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileStoreConfig;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:8000"
"#;
        let config = extract_config(Figment::new().merge(Yaml::string(yaml)))
            .expect("config should parse");

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.refresh_path, "/auth/refresh");
        assert_eq!(config.api.login_path, "/auth/login/");
        assert_eq!(config.credentials, CredentialStoreConfig::Memory);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn test_file_store_and_custom_paths() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "https://api.example.com"
  refresh_path: "/api/token/refresh/"
credentials:
  type: file
  path: "/tmp/zerowaste/credentials.json"
logging:
  level: "debug"
  format: "json"
"#;
        let config = extract_config(Figment::new().merge(Yaml::string(yaml)))
            .expect("config should parse");

        assert_eq!(config.api.refresh_path, "/api/token/refresh/");
        assert_eq!(
            config.credentials,
            CredentialStoreConfig::File(FileStoreConfig {
                path: "/tmp/zerowaste/credentials.json".into()
            })
        );
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let yaml = r#"
version: "9.9.9"
api:
  base_url: "http://localhost:8000"
"#;
        let result = extract_config(Figment::new().merge(Yaml::string(yaml)));
        assert!(result.is_err(), "Expected unknown version to be rejected");
    }

    #[test]
    fn test_env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
version: "1.0.0"
api:
  base_url: "http://from-file:8000"
"#,
            )?;
            jail.set_env("ZEROWASTE_API__BASE_URL", "http://from-env:9000");

            let config = load_config("config.yaml")?;
            assert_eq!(config.api.base_url, "http://from-env:9000");
            Ok(())
        });
    }

    #[test]
    fn test_schema_mentions_api_section() {
        let schema = config_schema().expect("schema should serialize");
        assert!(schema.contains("base_url"));
        assert!(schema.contains("refresh_path"));
    }
}
