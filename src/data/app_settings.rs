use crate::calc::validator::ValidationRules;
use crate::data::balance::DEFAULT_ANNUAL_ALLOWANCE;
use crate::data::feed::HolidayFeedConfig;
use crate::data::holiday::RegionSelector;
use crate::data::persistence::Persistable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 14;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub region: RegionSelector,
    #[serde(default = "default_annual_allowance")]
    pub annual_allowance: u32,
    #[serde(default = "default_max_consecutive_days")]
    pub max_consecutive_days: u32,
    /// Required; there is no sensible default for how far ahead leave may be booked.
    #[serde(default)]
    pub max_months_ahead: Option<u32>,
    /// Required; see `max_months_ahead`.
    #[serde(default)]
    pub max_concurrent_requests: Option<u32>,
    #[serde(default)]
    pub default_department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_feed: Option<HolidayFeedConfig>,
}

fn default_annual_allowance() -> u32 {
    DEFAULT_ANNUAL_ALLOWANCE
}

fn default_max_consecutive_days() -> u32 {
    DEFAULT_MAX_CONSECUTIVE_DAYS
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            region: RegionSelector::default(),
            annual_allowance: DEFAULT_ANNUAL_ALLOWANCE,
            max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
            max_months_ahead: None,
            max_concurrent_requests: None,
            default_department: String::new(),
            holiday_feed: None,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save(&self) -> Result<()> {
        self.wrap().save()
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        self.wrap().save_to(dir)
    }

    fn wrap(&self) -> SettingsWrapper {
        SettingsWrapper {
            settings: self.clone(),
        }
    }

    /// Validator limits; fails when a required limit is not configured.
    pub fn rules(&self) -> Result<ValidationRules> {
        let max_months_ahead = self
            .max_months_ahead
            .context("settings.max_months_ahead must be set in config.yaml")?;
        let max_concurrent_requests = self
            .max_concurrent_requests
            .context("settings.max_concurrent_requests must be set in config.yaml")?;
        Ok(ValidationRules {
            max_consecutive_days: self.max_consecutive_days,
            max_months_ahead,
            max_concurrent_requests,
        })
    }
}
