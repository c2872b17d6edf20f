//! # Settings Module
//!
//! ## Purpose
//! Persisted settings of the command line front end: default Chebyshev degrees
//! for fits that do not name them and the log level of the terminal logger.
//! The kinetics models themselves never read settings.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "chebyshev_degree_T": 6,
//!   "chebyshev_degree_P": 4,
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use KiRate::settings::SettingsManager;
//!
//! let manager = SettingsManager::with_config_file("no_such_config.json");
//! assert_eq!(manager.get_settings().chebyshev_degree_T, 6);
//! assert_eq!(manager.get_settings().level_filter(), log::LevelFilter::Info);
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// default configuration file, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "kinetics_config.json";

/// Settings of the fitting front end.
///
/// # Fields
/// * `chebyshev_degree_T` - number of Chebyshev terms in inverse temperature
/// * `chebyshev_degree_P` - number of Chebyshev terms in log pressure
/// * `log_level` - one of `off`, `error`, `warn`, `info`, `debug`, `trace`
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSettings {
    pub chebyshev_degree_T: usize,
    pub chebyshev_degree_P: usize,
    pub log_level: String,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            chebyshev_degree_T: 6,
            chebyshev_degree_P: 4,
            log_level: "info".to_string(),
        }
    }
}

impl FitSettings {
    /// Log level as a filter for the logger. Unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Loads, updates and saves [`FitSettings`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: FitSettings,
    config_file: String,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Manager for `kinetics_config.json` in the current directory.
    /// A missing or unreadable file gives the default settings.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let settings = Self::load_config(config_file).unwrap_or_default();
        Self {
            settings,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<FitSettings, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let settings: FitSettings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(FitSettings::default())
        }
    }

    /// Writes the settings to the config file.
    /// Does nothing during tests so that the real config file is left alone.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.settings)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    pub fn get_settings(&self) -> &FitSettings {
        &self.settings
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    #[allow(non_snake_case)]
    pub fn set_chebyshev_degrees(
        &mut self,
        degreeT: usize,
        degreeP: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if degreeT == 0 || degreeP == 0 {
            return Err(format!(
                "Chebyshev degrees must be positive, got {} x {}",
                degreeT, degreeP
            )
            .into());
        }
        self.settings.chebyshev_degree_T = degreeT;
        self.settings.chebyshev_degree_P = degreeP;
        self.save_config()
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), Box<dyn std::error::Error>> {
        if LevelFilter::from_str(level).is_err() {
            return Err(format!("Unknown log level: {}", level).into());
        }
        self.settings.log_level = level.to_lowercase();
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.settings = FitSettings::default();
        self.save_config()
    }
}
