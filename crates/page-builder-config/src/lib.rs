use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How the renderer treats ids that are referenced but not in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBlocks {
    Fail,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub padding: f64,
    pub line_width: f64,
    pub color: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            line_width: 2.0,
            color: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub edit_mode: bool,
    /// JSON block map to start from instead of the built-in page
    pub seed_path: Option<PathBuf>,
    /// Unset means: fail in debug builds, skip in release builds
    pub missing_blocks: Option<MissingBlocks>,
    pub indicator: IndicatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edit_mode: true,
            seed_path: None,
            missing_blocks: None,
            indicator: IndicatorConfig::default(),
        }
    }
}

impl Config {
    /// Parse TOML, expanding shell variables and tilde in `seed_path`
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.seed_path = config
            .seed_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        Ok(config)
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::parse(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/page-builder");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/page-builder/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config, Config::default());
        assert!(config.edit_mode);
        assert_eq!(config.indicator.padding, 10.0);
        assert_eq!(config.indicator.line_width, 2.0);
        assert_eq!(config.indicator.color, "blue");
    }

    #[test]
    fn test_partial_indicator_table() {
        let config = Config::parse(
            r#"
edit_mode = false
missing_blocks = "skip"

[indicator]
color = "red"
"#,
        )
        .unwrap();

        assert!(!config.edit_mode);
        assert_eq!(config.missing_blocks, Some(MissingBlocks::Skip));
        assert_eq!(
            config.indicator,
            IndicatorConfig {
                color: "red".to_string(),
                ..IndicatorConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_missing_blocks_value_is_rejected() {
        assert!(Config::parse(r#"missing_blocks = "ignore""#).is_err());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_seed_path_with_env_var_in_toml() {
        unsafe {
            env::set_var("PAGE_BUILDER_PAGES", "/custom/pages");
        }

        let config = Config::parse(r#"seed_path = "$PAGE_BUILDER_PAGES/home.json""#).unwrap();

        assert_eq!(
            config.seed_path,
            Some(PathBuf::from("/custom/pages/home.json"))
        );

        unsafe {
            env::remove_var("PAGE_BUILDER_PAGES");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "edit_mode = \"yes\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_full_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r##"
edit_mode = false
seed_path = "/tmp/pages/home.json"
missing_blocks = "fail"

[indicator]
padding = 6.0
line_width = 3.0
color = "#0af"
"##,
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            loaded,
            Config {
                edit_mode: false,
                seed_path: Some(PathBuf::from("/tmp/pages/home.json")),
                missing_blocks: Some(MissingBlocks::Fail),
                indicator: IndicatorConfig {
                    padding: 6.0,
                    line_width: 3.0,
                    color: "#0af".to_string(),
                },
            }
        );
    }
}
