//! Engine configuration.
//!
//! Defaults reproduce the fixed thresholds of the analyzers. Only the forecast
//! horizon and fallback lead time can be overridden from the environment:
//!
//! - `MENUWISE_FORECAST_HORIZON_DAYS`
//! - `MENUWISE_DEFAULT_LEAD_TIME_DAYS`

use serde::{Deserialize, Serialize};

use crate::inventory::ForecastSettings;
use crate::menu::MenuThresholds;

pub const HORIZON_ENV: &str = "MENUWISE_FORECAST_HORIZON_DAYS";
pub const LEAD_TIME_ENV: &str = "MENUWISE_DEFAULT_LEAD_TIME_DAYS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub menu: MenuThresholds,
    pub forecast: ForecastSettings,
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Bad values log a warning and keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(days) = positive_days(&lookup, HORIZON_ENV) {
            config.forecast.horizon_days = days;
        }
        if let Some(days) = positive_days(&lookup, LEAD_TIME_ENV) {
            config.forecast.default_lead_time_days = days;
        }
        config
    }
}

fn positive_days(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u32> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Some(days),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid day count; using default");
            None
        }
    }
}
