//! Rule-based inventory forecasting.
//!
//! Model, per item:
//! - Project usage over the horizon: `daily_usage * horizon_days`.
//! - Scale by the event tier and (for comfort items) the weather condition.
//! - Order enough to cover the projection plus the lead-time reorder point.
//! - Flag URGENT when stock is already below the reorder point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use menuwise_core::{DomainError, DomainResult};

use crate::demand::{EventDemand, WeatherDemand};
use crate::validate::non_negative;

pub const DEFAULT_LEAD_TIME_DAYS: u32 = 3;
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Historical usage and current stock for one ingredient or item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUsageRecord {
    pub name: String,
    pub average_daily_usage: f64,
    pub current_stock: f64,
    #[serde(default = "default_lead_time")]
    pub supplier_lead_time_days: u32,
}

fn default_lead_time() -> u32 {
    DEFAULT_LEAD_TIME_DAYS
}

impl InventoryUsageRecord {
    pub fn new(name: impl Into<String>, average_daily_usage: f64, current_stock: f64) -> Self {
        Self {
            name: name.into(),
            average_daily_usage,
            current_stock,
            supplier_lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }

    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.supplier_lead_time_days = days;
        self
    }

    fn validate(&self) -> DomainResult<()> {
        non_negative("average_daily_usage", self.average_daily_usage)?;
        non_negative("current_stock", self.current_stock)?;
        if self.supplier_lead_time_days == 0 {
            return Err(DomainError::validation(
                "supplier_lead_time_days",
                "lead time must be at least one day",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Urgent,
    Adequate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPrediction {
    pub item_name: String,
    pub current_stock: f64,
    /// Projected usage over the forecast horizon.
    pub predicted_usage: f64,
    pub reorder_point: f64,
    /// Never negative.
    pub recommended_order: f64,
    /// `0` when the item has no recorded usage.
    pub days_of_stock_remaining: f64,
    pub status: StockStatus,
}

/// Forecast knobs. `Default` is the 7-day / 3-day-lead-time model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSettings {
    pub horizon_days: u32,
    /// Lead time used when a decoded record omits it.
    pub default_lead_time_days: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            default_lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryForecast {
    pub horizon_days: u32,
    pub event_demand: EventDemand,
    pub weather_demand: WeatherDemand,
    /// Keyed by item name.
    pub predictions: BTreeMap<String, InventoryPrediction>,
}

impl InventoryForecast {
    pub fn get(&self, item_name: &str) -> Option<&InventoryPrediction> {
        self.predictions.get(item_name)
    }

    /// Items whose stock is already below their reorder point, by name.
    pub fn urgent_items(&self) -> Vec<&str> {
        self.predictions
            .values()
            .filter(|p| p.status == StockStatus::Urgent)
            .map(|p| p.item_name.as_str())
            .collect()
    }

    /// Demand uplift from the event tier, in percent (e.g. `30.0` for festive).
    pub fn event_impact_percent(&self) -> f64 {
        (self.event_demand.multiplier() - 1.0) * 100.0
    }
}

/// Project per-item needs over the default 7-day horizon.
pub fn predict_inventory_needs(
    usage_records: &[InventoryUsageRecord],
    upcoming_events: Option<&str>,
    weather_forecast: Option<&str>,
) -> DomainResult<InventoryForecast> {
    predict_inventory_needs_with(
        &ForecastSettings::default(),
        usage_records,
        upcoming_events,
        weather_forecast,
    )
}

/// Like [`predict_inventory_needs`], with explicit settings.
///
/// Fails on the first invalid record; nothing is forecast in that case.
pub fn predict_inventory_needs_with(
    settings: &ForecastSettings,
    usage_records: &[InventoryUsageRecord],
    upcoming_events: Option<&str>,
    weather_forecast: Option<&str>,
) -> DomainResult<InventoryForecast> {
    if settings.horizon_days == 0 {
        return Err(DomainError::validation(
            "horizon_days",
            "forecast horizon must be at least one day",
        ));
    }
    for (i, record) in usage_records.iter().enumerate() {
        record.validate().map_err(|e| e.at("usage_records", i))?;
    }

    let event_demand = EventDemand::from_text(upcoming_events.unwrap_or_default());
    let weather_demand = WeatherDemand::from_text(weather_forecast.unwrap_or_default());

    let mut predictions = BTreeMap::new();
    for record in usage_records {
        let prediction = predict_item(record, settings.horizon_days, event_demand, weather_demand);
        if predictions.insert(record.name.clone(), prediction).is_some() {
            warn!(
                item = %record.name,
                "duplicate inventory item; later record replaces earlier one"
            );
        }
    }

    let forecast = InventoryForecast {
        horizon_days: settings.horizon_days,
        event_demand,
        weather_demand,
        predictions,
    };

    debug!(
        items = forecast.predictions.len(),
        urgent = forecast.urgent_items().len(),
        event = ?event_demand,
        weather = ?weather_demand,
        "inventory needs predicted"
    );

    Ok(forecast)
}

fn predict_item(
    record: &InventoryUsageRecord,
    horizon_days: u32,
    event_demand: EventDemand,
    weather_demand: WeatherDemand,
) -> InventoryPrediction {
    let daily = record.average_daily_usage;
    let stock = record.current_stock;

    let base_need = daily * f64::from(horizon_days);
    let predicted_usage =
        base_need * event_demand.multiplier() * weather_demand.multiplier_for(&record.name);
    let reorder_point = daily * f64::from(record.supplier_lead_time_days);

    let recommended_order = (predicted_usage + reorder_point - stock).max(0.0);
    let days_of_stock_remaining = if daily > 0.0 { stock / daily } else { 0.0 };

    // Urgency looks at lead-time cover only, not at the projected need.
    let status = if stock < reorder_point {
        StockStatus::Urgent
    } else {
        StockStatus::Adequate
    };

    InventoryPrediction {
        item_name: record.name.clone(),
        current_stock: stock,
        predicted_usage,
        reorder_point,
        recommended_order,
        days_of_stock_remaining,
        status,
    }
}
