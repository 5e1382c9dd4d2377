//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `contact.phone_number`.
pub const PHONE_ENV_VAR: &str = "TORQ_WHATSAPP_NUMBER";

/// File names searched for in the working directory and its parents.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["torq.toml", ".torq.toml", "torq.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where orders are sent.
    #[serde(default)]
    pub contact: ContactConfig,

    /// Cart snapshot storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout hand-off behaviour.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().map_or(false, |e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Phone number to send orders to, environment first.
    ///
    /// Returns `None` when neither source sets a non-blank number.
    pub fn phone_number(&self) -> Option<String> {
        resolve_phone_number(
            std::env::var(PHONE_ENV_VAR).ok(),
            self.contact.phone_number.as_deref(),
        )
    }
}

/// Pick the environment value over the configured one, ignoring blanks.
pub fn resolve_phone_number(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|n| !n.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string)
        })
}

/// Contact settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    /// WhatsApp number, any formatting; non-digits are stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot directory (default: `~/.local/share/torq/store`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Try the system URL opener first.
    #[serde(default = "default_true")]
    pub open_browser: bool,

    /// File receiving the message when the link cannot be opened.
    #[serde(default = "default_handoff_file")]
    pub handoff_file: String,
}

fn default_true() -> bool {
    true
}

fn default_handoff_file() -> String {
    "torq-order.txt".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            open_browser: true,
            handoff_file: default_handoff_file(),
        }
    }
}

/// Generate a default torq.toml config file.
pub fn generate_default_config() -> String {
    r#"# Torq catalog configuration

[contact]
# Overridden by the TORQ_WHATSAPP_NUMBER environment variable.
# phone_number = "+55 11 99999-9999"

[storage]
# dir = "/home/me/.local/share/torq/store"

[checkout]
open_browser = true
handoff_file = "torq-order.txt"
"#
    .to_string()
}
