//! `menuwise-analytics`
//!
//! **Responsibility:** deterministic restaurant analytics.
//!
//! - Menu performance: per-item margin/profit scoring and classification.
//! - Inventory forecasting: rule-based short-horizon projection with demand modifiers.
//! - Sales trends: daily/hourly/item aggregation, peak hours, week-over-week growth.
//!
//! Every analyzer is a pure function over caller-owned inputs. Nothing here
//! performs IO or keeps state between calls; narration of the results belongs
//! to the calling layer.

pub mod config;
pub mod decode;
pub mod demand;
pub mod insight;
pub mod inventory;
pub mod job;
pub mod menu;
pub mod metrics;
pub mod sales;
pub mod tools;

mod validate;

pub use config::AnalyticsConfig;
pub use demand::{EventDemand, WeatherDemand};
pub use insight::Insight;
pub use inventory::{
    ForecastSettings, InventoryForecast, InventoryPrediction, InventoryUsageRecord, StockStatus,
    predict_inventory_needs, predict_inventory_needs_with,
};
pub use job::{AnalysisJob, InventoryForecastJob, MenuPerformanceJob, SalesTrendJob};
pub use menu::{
    ItemPerformance, MENU_ADVISORIES, MenuItem, MenuPerformanceReport, MenuThresholds, SalesRecord,
    analyze_menu_performance, analyze_menu_performance_with,
};
pub use sales::{
    AnalysisPeriod, HourlySales, ItemQuantity, LineItem, SalesEvent, SalesTrendReport,
    analyze_sales_trends,
};
pub use tools::{AnalysisTool, ToolCall, dispatch};
