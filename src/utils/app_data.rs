use crate::rank::pipeline::RankOptions;
use crate::rank::strategy::{ScoringWeights, StrategyKind};
use crate::utils::alpha::MAX_WIDTH;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "quickpick";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the platform config directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ranking strategy used for every refresh
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Weights for the fuzzy strategy
    #[serde(default)]
    pub weights: ScoringWeights,

    /// Character placed between searchable columns for whole-row matching
    #[serde(default = "default_column_separator")]
    pub column_separator: char,

    /// Minimum number of letters in fast-select labels
    #[serde(default = "default_min_codec_width")]
    pub min_codec_width: usize,

    /// Candidate count below which scoring stays on the calling thread
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_column_separator() -> char {
    ' '
}

fn default_min_codec_width() -> usize {
    1
}

fn default_parallel_threshold() -> usize {
    512
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            weights: ScoringWeights::default(),
            column_separator: default_column_separator(),
            min_codec_width: default_min_codec_width(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from an explicit path, or return default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values the engine cannot honor.
    ///
    /// The separator must be whitespace: the built-in strategies skip
    /// whitespace, so a whole-row match never lands between two columns.
    pub fn validate(&self) -> Result<()> {
        if !self.column_separator.is_whitespace() {
            bail!(
                "column_separator must be a whitespace character, got {:?}",
                self.column_separator
            );
        }
        if self.min_codec_width > MAX_WIDTH {
            bail!(
                "min_codec_width must be at most {}, got {}",
                MAX_WIDTH,
                self.min_codec_width
            );
        }
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    /// Pipeline options derived from this config
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            separator: self.column_separator,
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Save config to `config_path`, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Get the application config directory (not created)
pub fn get_config_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config, Windows: roaming AppData
        dirs::config_dir()
    };

    let base = base.context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("quickpick_config_{}_{}", name, std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_config_path("missing");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.column_separator, ' ');
        assert_eq!(config.min_codec_width, 1);
        assert_eq!(config.strategy, StrategyKind::Fuzzy);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_config_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "strategy": "char-count", "min_codec_width": 2 }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.strategy, StrategyKind::CharCount);
        assert_eq!(config.min_codec_width, 2);
        assert_eq!(config.parallel_threshold, 512);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path("save");
        let mut config = AppConfig::default();
        config.column_separator = '\t';
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.column_separator, '\t');

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_config_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_non_whitespace_separator_is_rejected() {
        let path = temp_config_path("separator");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "column_separator": "-" }"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("column_separator"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_oversized_codec_width_is_rejected() {
        let path = temp_config_path("width");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "min_codec_width": 100000 }"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("min_codec_width"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
