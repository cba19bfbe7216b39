//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "ZONEKEEPER_CONFIG";

/// Keys accepted by `zk config set`.
pub const KEYS: [&str; 5] = [
    "api_token",
    "base_url",
    "output_format",
    "max_response_chars",
    "default_zone",
];

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Directory API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Default output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Response budget in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_chars: Option<usize>,

    /// Zone used when a command omits one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zone: Option<String>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "zonekeeper", "zonekeeper")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_token" | "token" => self.api_token = Some(value.to_string()),
            "base_url" => {
                url::Url::parse(value).with_context(|| format!("invalid base_url '{value}'"))?;
                self.base_url = Some(value.trim_end_matches('/').to_string());
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "max_response_chars" => {
                let chars: usize = value
                    .parse()
                    .with_context(|| format!("invalid max_response_chars '{value}'"))?;
                anyhow::ensure!(chars > 0, "max_response_chars must be positive");
                self.max_response_chars = Some(chars);
            }
            "default_zone" | "zone" => self.default_zone = Some(value.to_string()),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 api_token          - Directory API token\n  \
                 base_url           - Directory API base URL\n  \
                 output_format      - Default output format (pretty/json/csv/yaml)\n  \
                 max_response_chars - Response size budget in characters\n  \
                 default_zone       - Zone used when --zone is omitted"
            ),
        }
        Ok(())
    }

    /// Token with the middle masked, for display.
    pub fn masked_token(&self) -> Option<String> {
        self.api_token.as_deref().map(mask)
    }
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
