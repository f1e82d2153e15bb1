//! Chart settings.
//!
//! [`ChartSettings`] is the serializable preferences document (JSON), tolerant
//! of missing fields. [`ChartSettings::resolve`] validates it into the runtime
//! [`ChartOptions`] the controller consumes; malformed calendar configuration
//! is rejected there, before any window is built.
//!
//! Only preferences live here. Chart state such as the pivot date or the active
//! selection is never written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::calendar::Calendar;
use crate::error::ConfigError;
use crate::grouping::GroupingMode;
use crate::transition::DEFAULT_SETTLE_DELAY;
use crate::units::Unit;

/// Pages of lead/lag grouped around the pivot on each side
pub const DEFAULT_LEAD_PAGES: u32 = 3;

/// User preferences for the trend chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Settings file version for migration support
    pub version: u32,
    pub grouping_mode: GroupingMode,
    pub display_unit: Unit,
    /// Decimal places used by label formatting
    pub precision: u8,
    /// IANA zone name, e.g. "Europe/Berlin"
    pub time_zone: String,
    /// Weekday name, e.g. "monday" or "sun"
    pub week_start: String,
    pub allow_negative: bool,
    pub settle_delay_ms: u64,
    pub lead_pages: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            version: 1,
            grouping_mode: GroupingMode::default(),
            display_unit: Unit::default(),
            precision: 1,
            time_zone: "UTC".to_string(),
            week_start: "monday".to_string(),
            allow_negative: true,
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            lead_pages: DEFAULT_LEAD_PAGES,
        }
    }
}

impl ChartSettings {
    /// Get the config directory path for trend-pager
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("TrendPager"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("TrendPager"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("trend-pager"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the platform config directory, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine config directory for chart settings");
                return Self::default();
            }
        };

        if !path.exists() {
            tracing::info!("Chart settings not found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Loaded chart settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::error!("Failed to load chart settings: {}", e);
                Self::default()
            }
        }
    }

    /// Read a settings document from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate into runtime options
    pub fn resolve(&self) -> Result<ChartOptions, ConfigError> {
        let calendar = Calendar::from_names(&self.time_zone, &self.week_start)?;

        if self.settle_delay_ms == 0 {
            return Err(ConfigError::InvalidSettleDelay(self.settle_delay_ms));
        }
        if self.lead_pages == 0 {
            return Err(ConfigError::InvalidLeadPages(self.lead_pages));
        }

        Ok(ChartOptions {
            calendar,
            grouping_mode: self.grouping_mode,
            display_unit: self.display_unit,
            precision: self.precision,
            allow_negative: self.allow_negative,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            lead_pages: self.lead_pages,
        })
    }
}

/// Validated runtime configuration for a [`PagingController`](crate::pager::PagingController)
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub calendar: Calendar,
    /// Mode the controller starts in
    pub grouping_mode: GroupingMode,
    pub display_unit: Unit,
    pub precision: u8,
    pub allow_negative: bool,
    pub settle_delay: Duration,
    pub lead_pages: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            calendar: Calendar::default(),
            grouping_mode: GroupingMode::default(),
            display_unit: Unit::default(),
            precision: 1,
            allow_negative: true,
            settle_delay: DEFAULT_SETTLE_DELAY,
            lead_pages: DEFAULT_LEAD_PAGES,
        }
    }
}
