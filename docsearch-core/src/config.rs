use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DocsearchError;
use crate::index::IndexFormat;
use crate::matcher::{MatchMode, Matcher};
use crate::presenter::DEFAULT_CONTAINER_ID;

/// Configuration for docsearch, read from ~/.docsearch/config.toml
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsearchConfig {
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index artifact (search.js or JSON item list); `${VAR}` references are expanded
    pub path: Option<PathBuf>,
    /// Omit to detect from content
    pub format: Option<IndexFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: MatchMode,
    /// Upper bound on compiled pattern size, in bytes
    pub size_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// External name of the results container
    pub container_id: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
        }
    }
}

impl DocsearchConfig {
    /// Load config from ~/.docsearch/config.toml, defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = ?config_path, "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path (must exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;

        config.expand_variables();
        config.validate()?;

        Ok(config)
    }

    /// Get config file path: ~/.docsearch/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".docsearch/config.toml")
    }

    /// Reject values that would make every search fail
    pub fn validate(&self) -> std::result::Result<(), DocsearchError> {
        if self.render.container_id.trim().is_empty() {
            return Err(DocsearchError::config("render.container_id must not be empty"));
        }
        if self.search.size_limit == Some(0) {
            return Err(DocsearchError::config("search.size_limit must be greater than zero"));
        }
        Ok(())
    }

    /// Matcher built from the [search] section
    pub fn matcher(&self) -> Matcher {
        let matcher = Matcher::new(self.search.mode);
        match self.search.size_limit {
            Some(limit) => matcher.with_size_limit(limit),
            None => matcher,
        }
    }

    /// Expand ${var} references in the index path
    fn expand_variables(&mut self) {
        let mut vars = HashMap::new();
        vars.insert("HOME".to_string(), env::var("HOME").unwrap_or_default());
        vars.insert(
            "DOCSEARCH_HOME".to_string(),
            Self::config_path()
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );

        if let Some(ref path) = self.index.path {
            self.index.path = Some(PathBuf::from(Self::expand_string(
                &path.display().to_string(),
                &vars,
            )));
        }
    }

    /// Expand ${var} references in a string
    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(config_path, self.to_toml()?)
            .context(format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}
