//! Client Configuration
//!
//! Values are baked in at build time (`trunk build` passes the environment
//! through to `option_env!`), since a browser has no process environment.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://destined-boxer-44.hasura.app/v1/graphql";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Hasura admin secret, sent as `x-hasura-admin-secret`
    pub admin_secret: Option<String>,
    /// Console log level (`error`..`trace`)
    pub log_level: String,
    /// Ask before deleting a todo
    pub confirm_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            admin_secret: None,
            log_level: "info".to_string(),
            confirm_deletes: true,
        }
    }
}

impl Config {
    /// Build from `CHECKLIST_*` variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| match name {
            "CHECKLIST_GRAPHQL_ENDPOINT" => option_env!("CHECKLIST_GRAPHQL_ENDPOINT"),
            "CHECKLIST_ADMIN_SECRET" => option_env!("CHECKLIST_ADMIN_SECRET"),
            "CHECKLIST_LOG_LEVEL" => option_env!("CHECKLIST_LOG_LEVEL"),
            "CHECKLIST_CONFIRM_DELETES" => option_env!("CHECKLIST_CONFIRM_DELETES"),
            _ => None,
        })
    }

    fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = lookup("CHECKLIST_GRAPHQL_ENDPOINT").filter(|v| !v.is_empty()) {
            config.endpoint = endpoint.to_string();
        }
        config.admin_secret = lookup("CHECKLIST_ADMIN_SECRET").map(str::to_string);
        if let Some(level) = lookup("CHECKLIST_LOG_LEVEL") {
            config.log_level = level.to_string();
        }
        if let Some(confirm) = lookup("CHECKLIST_CONFIRM_DELETES") {
            config.confirm_deletes = !matches!(confirm.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
        }
        config
    }
}
