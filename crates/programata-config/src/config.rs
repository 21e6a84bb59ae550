use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Optional overrides for the data file locations managed by PathManager.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub channels_file: Option<String>,
    #[serde(default)]
    pub movies_file: Option<String>,
    #[serde(default)]
    pub oscars_file: Option<String>,
    #[serde(default)]
    pub blacklist_file: Option<String>,
    #[serde(default)]
    pub programs_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_watch_region")]
    pub watch_region: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            watch_region: default_watch_region(),
        }
    }
}

impl TmdbConfig {
    /// API key with the TMDB_API_KEY environment variable taking precedence.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("TMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Watch region with the TMDB_WATCH_REGION environment variable taking precedence.
    pub fn resolved_watch_region(&self) -> String {
        std::env::var("TMDB_WATCH_REGION")
            .ok()
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| self.watch_region.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Listing site base URL; None means the built-in BNT site.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_watch_region() -> String {
    "BG".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load the config file, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.tmdb.watch_region, "BG");
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.fetch.base_url.is_none());
    }

    #[test]
    fn test_parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tmdb]\nwatch_region = \"US\"\n\n[fetch]\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.tmdb.watch_region, "US");
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.data.channels_file.is_none());
    }

    #[test]
    fn test_rejects_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
