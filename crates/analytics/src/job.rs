use serde::Serialize;

use menuwise_core::DomainResult;

use crate::inventory::{
    ForecastSettings, InventoryForecast, InventoryUsageRecord, predict_inventory_needs_with,
};
use crate::menu::{
    MenuItem, MenuPerformanceReport, MenuThresholds, SalesRecord, analyze_menu_performance_with,
};
use crate::sales::{AnalysisPeriod, SalesEvent, SalesTrendReport, analyze_sales_trends};

/// A self-contained analysis unit: owned inputs plus settings.
///
/// Jobs are pure: `run` reads the inputs and returns a fresh report, so the
/// same job may be run any number of times, from any thread.
pub trait AnalysisJob: Send + Sync {
    type Output: Serialize;

    /// Stable identifier of the analysis (used as `Insight::kind`).
    fn kind(&self) -> &'static str;

    fn run(&self) -> DomainResult<Self::Output>;

    /// One-line, count-based summary of a report produced by this job.
    fn summarize(&self, output: &Self::Output) -> String;
}

#[derive(Debug, Clone)]
pub struct MenuPerformanceJob {
    menu_items: Vec<MenuItem>,
    sales_records: Vec<SalesRecord>,
    thresholds: MenuThresholds,
}

impl MenuPerformanceJob {
    pub fn new(menu_items: Vec<MenuItem>, sales_records: Vec<SalesRecord>) -> Self {
        Self {
            menu_items,
            sales_records,
            thresholds: MenuThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: MenuThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl AnalysisJob for MenuPerformanceJob {
    type Output = MenuPerformanceReport;

    fn kind(&self) -> &'static str {
        "menu.performance"
    }

    fn run(&self) -> DomainResult<Self::Output> {
        analyze_menu_performance_with(&self.thresholds, &self.menu_items, &self.sales_records)
    }

    fn summarize(&self, output: &Self::Output) -> String {
        format!(
            "{} top performer(s), {} underperformer(s), {} profitability leader(s) across {} menu item(s)",
            output.top_performers.len(),
            output.underperformers.len(),
            output.profitability_leaders.len(),
            self.menu_items.len()
        )
    }
}

#[derive(Debug, Clone)]
pub struct InventoryForecastJob {
    usage_records: Vec<InventoryUsageRecord>,
    upcoming_events: Option<String>,
    weather_forecast: Option<String>,
    settings: ForecastSettings,
}

impl InventoryForecastJob {
    pub fn new(usage_records: Vec<InventoryUsageRecord>) -> Self {
        Self {
            usage_records,
            upcoming_events: None,
            weather_forecast: None,
            settings: ForecastSettings::default(),
        }
    }

    pub fn with_upcoming_events(mut self, events: impl Into<String>) -> Self {
        self.upcoming_events = Some(events.into());
        self
    }

    pub fn with_weather_forecast(mut self, weather: impl Into<String>) -> Self {
        self.weather_forecast = Some(weather.into());
        self
    }

    pub fn with_settings(mut self, settings: ForecastSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl AnalysisJob for InventoryForecastJob {
    type Output = InventoryForecast;

    fn kind(&self) -> &'static str {
        "inventory.forecast"
    }

    fn run(&self) -> DomainResult<Self::Output> {
        predict_inventory_needs_with(
            &self.settings,
            &self.usage_records,
            self.upcoming_events.as_deref(),
            self.weather_forecast.as_deref(),
        )
    }

    fn summarize(&self, output: &Self::Output) -> String {
        format!(
            "{} of {} item(s) need urgent restocking over a {}-day horizon (event impact {:+.0}%)",
            output.urgent_items().len(),
            output.predictions.len(),
            output.horizon_days,
            output.event_impact_percent()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SalesTrendJob {
    events: Vec<SalesEvent>,
    period: AnalysisPeriod,
}

impl SalesTrendJob {
    pub fn new(events: Vec<SalesEvent>) -> Self {
        Self {
            events,
            period: AnalysisPeriod::default(),
        }
    }

    pub fn with_period(mut self, period: AnalysisPeriod) -> Self {
        self.period = period;
        self
    }
}

impl AnalysisJob for SalesTrendJob {
    type Output = SalesTrendReport;

    fn kind(&self) -> &'static str {
        "sales.trends"
    }

    fn run(&self) -> DomainResult<Self::Output> {
        analyze_sales_trends(&self.events, self.period)
    }

    fn summarize(&self, output: &Self::Output) -> String {
        format!(
            "{} sale(s) over {} day(s) ({}), week-over-week growth {:+.1}%",
            self.events.len(),
            output.daily_totals.len(),
            output.period,
            output.growth_rate_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::Insight;
    use crate::inventory::StockStatus;

    #[test]
    fn menu_job_wraps_report_in_insight() {
        let job = MenuPerformanceJob::new(
            vec![MenuItem::new("A", "Burger", 10.0, 3.0)],
            vec![SalesRecord::new("A", 60, 600.0)],
        );

        let insight = Insight::from_job(&job).unwrap();

        assert_eq!(insight.kind, "menu.performance");
        assert_eq!(
            insight.summary,
            "1 top performer(s), 0 underperformer(s), 0 profitability leader(s) across 1 menu item(s)"
        );
        assert_eq!(insight.payload["top_performers"][0]["name"], "Burger");
        assert_eq!(insight.payload["advisories"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn inventory_job_applies_builders() {
        let job =
            InventoryForecastJob::new(vec![InventoryUsageRecord::new("Tomato Soup", 10.0, 20.0)])
                .with_upcoming_events("Festival on Saturday")
                .with_weather_forecast("Rain all week");

        let forecast = job.run().unwrap();
        let soup = forecast.get("Tomato Soup").unwrap();

        assert!((soup.predicted_usage - 70.0 * 1.3 * 1.2).abs() < 1e-9);
        assert_eq!(soup.status, StockStatus::Urgent);
        assert_eq!(
            job.summarize(&forecast),
            "1 of 1 item(s) need urgent restocking over a 7-day horizon (event impact +30%)"
        );
    }

    #[test]
    fn sales_job_payload_uses_wire_labels() {
        let job = SalesTrendJob::new(Vec::new()).with_period(AnalysisPeriod::SevenDays);

        let insight = Insight::from_job(&job).unwrap();

        assert_eq!(insight.kind, "sales.trends");
        assert_eq!(insight.payload["period"], "7_days");
        assert_eq!(insight.payload["growth_rate_percent"], 0.0);
        assert!(insight.payload["daily_totals"].as_object().unwrap().is_empty());
    }

    #[test]
    fn failing_job_propagates_validation_error() {
        let job = InventoryForecastJob::new(vec![InventoryUsageRecord::new("Eggs", -2.0, 5.0)]);

        let err = Insight::from_job(&job).unwrap_err();
        assert_eq!(err.field(), Some("usage_records[0].average_daily_usage"));
    }
}
