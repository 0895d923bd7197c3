//! Name-based dispatch for the chat layer's tool calls.
//!
//! The agent calls analyses by name with JSON arguments. Record arguments may
//! be inline JSON arrays or JSON-encoded strings (the agent frequently
//! double-encodes); both are accepted.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use menuwise_core::{DomainError, DomainResult};

use crate::config::AnalyticsConfig;
use crate::decode;
use crate::insight::Insight;
use crate::job::{InventoryForecastJob, MenuPerformanceJob, SalesTrendJob};
use crate::sales::AnalysisPeriod;

/// A tool invocation as emitted by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: JsonValue,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnalysisTool {
    MenuPerformance,
    InventoryNeeds,
    SalesTrends,
}

impl AnalysisTool {
    pub const ALL: [AnalysisTool; 3] = [
        AnalysisTool::MenuPerformance,
        AnalysisTool::InventoryNeeds,
        AnalysisTool::SalesTrends,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisTool::MenuPerformance => "analyze_menu_performance",
            AnalysisTool::InventoryNeeds => "predict_inventory_needs",
            AnalysisTool::SalesTrends => "analyze_sales_trends",
        }
    }

    /// Argument names, required first.
    pub fn arguments(&self) -> &'static [&'static str] {
        match self {
            AnalysisTool::MenuPerformance => &["menu_data", "sales_data"],
            AnalysisTool::InventoryNeeds => {
                &["historical_usage", "upcoming_events", "weather_forecast"]
            }
            AnalysisTool::SalesTrends => &["sales_data", "time_period"],
        }
    }
}

impl FromStr for AnalysisTool {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| DomainError::unknown_tool(s))
    }
}

/// Run the analysis named by `call` and wrap its report.
pub fn dispatch(config: &AnalyticsConfig, call: &ToolCall) -> DomainResult<Insight> {
    let tool: AnalysisTool = call.name.parse().inspect_err(|_| {
        warn!(tool = %call.name, "rejected unknown analysis tool");
    })?;
    let args = Arguments::new(&call.arguments)?;
    for name in args.unrecognized(tool.arguments()) {
        warn!(tool = tool.name(), argument = name, "ignoring unrecognized tool argument");
    }

    debug!(tool = tool.name(), "dispatching analysis tool");

    match tool {
        AnalysisTool::MenuPerformance => {
            let menu = decode::menu_items(&args.records("menu_data")?)?;
            let sales = decode::sales_records(&args.records("sales_data")?)?;
            Insight::from_job(&MenuPerformanceJob::new(menu, sales).with_thresholds(config.menu))
        }
        AnalysisTool::InventoryNeeds => {
            let usage = decode::usage_records(
                &args.records("historical_usage")?,
                config.forecast.default_lead_time_days,
            )?;
            let mut job = InventoryForecastJob::new(usage).with_settings(config.forecast);
            if let Some(events) = args.text("upcoming_events")? {
                job = job.with_upcoming_events(events);
            }
            if let Some(weather) = args.text("weather_forecast")? {
                job = job.with_weather_forecast(weather);
            }
            Insight::from_job(&job)
        }
        AnalysisTool::SalesTrends => {
            let events = decode::sales_events(&args.records("sales_data")?)?;
            let period = match args.text("time_period")? {
                Some(label) => label.parse::<AnalysisPeriod>()?,
                None => AnalysisPeriod::default(),
            };
            Insight::from_job(&SalesTrendJob::new(events).with_period(period))
        }
    }
}

struct Arguments<'a> {
    object: Option<&'a serde_json::Map<String, JsonValue>>,
}

impl<'a> Arguments<'a> {
    fn new(value: &'a JsonValue) -> DomainResult<Self> {
        match value {
            JsonValue::Null => Ok(Self { object: None }),
            JsonValue::Object(object) => Ok(Self {
                object: Some(object),
            }),
            _ => Err(DomainError::validation("arguments", "expected an object")),
        }
    }

    fn unrecognized(&self, known: &'static [&'static str]) -> Vec<&'a str> {
        self.object
            .into_iter()
            .flat_map(|o| o.keys())
            .map(String::as_str)
            .filter(|key| !known.contains(key))
            .collect()
    }

    fn get(&self, name: &str) -> Option<&'a JsonValue> {
        self.object
            .and_then(|o| o.get(name))
            .filter(|v| !v.is_null())
    }

    /// Required record collection; a string value is parsed as JSON.
    fn records(&self, name: &str) -> DomainResult<JsonValue> {
        match self.get(name) {
            None => Err(DomainError::validation(name, "argument is required")),
            Some(JsonValue::String(encoded)) => serde_json::from_str(encoded)
                .map_err(|e| DomainError::validation(name, format!("invalid JSON: {e}"))),
            Some(value) => Ok(value.clone()),
        }
    }

    fn text(&self, name: &str) -> DomainResult<Option<&'a str>> {
        match self.get(name) {
            None => Ok(None),
            Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(DomainError::validation(name, "expected a string")),
        }
    }
}
