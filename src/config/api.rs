use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Connection settings for the remote REST API.
///
/// Every path is relative to `base_url`. The defaults match the routes
/// exposed by the Zero Waste backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_password_reset_path")]
    pub password_reset_path: String,
    #[serde(default = "default_test_protected_path")]
    pub test_protected_path: String,
}

impl ApiConfig {
    /// Config pointing at `base_url` with every path left at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: default_refresh_path(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            password_reset_path: default_password_reset_path(),
            test_protected_path: default_test_protected_path(),
        }
    }
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_login_path() -> String {
    "/auth/login/".to_string()
}

fn default_register_path() -> String {
    "/auth/register/".to_string()
}

fn default_password_reset_path() -> String {
    "/auth/password/reset/".to_string()
}

fn default_test_protected_path() -> String {
    "/auth/test-protected/".to_string()
}
