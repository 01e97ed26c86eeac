//! Everything the UI needs before the first render: settings and the page
//! to edit, or a failure to show instead.

use crate::ui::UiSettings;
use page_builder_config::{Config, ConfigError};
use page_builder_engine::{BlockMap, io, seed};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct StartupFailure {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    pub settings: UiSettings,
    pub page: Result<BlockMap, StartupFailure>,
}

/// Combine the loaded config with an optional seed path from the command
/// line. The CLI path wins over `seed_path` from the config.
pub fn resolve(config: Result<Option<Config>, ConfigError>, seed_arg: Option<PathBuf>) -> Startup {
    let config = match config {
        Ok(Some(config)) => {
            log::info!("Loaded config file");
            config
        }
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            log::error!("Config::load() failed with error: {e}");
            return Startup {
                settings: UiSettings::default(),
                page: Err(StartupFailure {
                    title: "Configuration Error".to_string(),
                    message: "Failed to load the config file".to_string(),
                    details: Some(e.to_string()),
                }),
            };
        }
    };

    let settings = UiSettings::from_config(&config);
    let page = match seed_arg.or(config.seed_path) {
        Some(path) => io::load_block_map(&path).map_err(|e| StartupFailure {
            title: "Page Error".to_string(),
            message: format!("Failed to load page from {}", path.display()),
            details: Some(e.to_string()),
        }),
        None => seed::default_block_map().map_err(|e| StartupFailure {
            title: "Page Error".to_string(),
            message: "The built-in page is broken".to_string(),
            details: Some(format!("{e:#}")),
        }),
    };

    Startup { settings, page }
}
