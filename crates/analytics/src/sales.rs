//! Sales trend detection over transaction-level events.

use core::str::FromStr;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use menuwise_core::{DomainError, DomainResult};

use crate::metrics::{growth_rate, mean};
use crate::validate::non_negative;

const PEAK_HOURS: usize = 3;
const TOP_ITEMS: usize = 5;
/// Days per comparison window for week-over-week growth.
const GROWTH_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u64,
}

/// One sale (ticket) as recorded by the point of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesEvent {
    pub date: NaiveDate,
    /// Hour of day, `0..=23`.
    pub hour: u8,
    pub amount: f64,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl SalesEvent {
    fn validate(&self) -> DomainResult<()> {
        if self.hour > 23 {
            return Err(DomainError::validation(
                "hour",
                format!("must be within 0..=23 (got {})", self.hour),
            ));
        }
        non_negative("amount", self.amount)
    }
}

/// Label of the analysed window. Informational; it does not filter events.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "7_days")]
    SevenDays,
    #[default]
    #[serde(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "90_days")]
    NinetyDays,
}

impl AnalysisPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPeriod::SevenDays => "7_days",
            AnalysisPeriod::ThirtyDays => "30_days",
            AnalysisPeriod::NinetyDays => "90_days",
        }
    }
}

impl core::fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7_days" => Ok(AnalysisPeriod::SevenDays),
            "30_days" => Ok(AnalysisPeriod::ThirtyDays),
            "90_days" => Ok(AnalysisPeriod::NinetyDays),
            other => Err(DomainError::validation(
                "time_period",
                format!("expected one of 7_days, 30_days, 90_days (got '{other}')"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySales {
    pub hour: u8,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantity {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTrendReport {
    pub period: AnalysisPeriod,
    pub daily_totals: BTreeMap<NaiveDate, f64>,
    pub hourly_totals: BTreeMap<u8, f64>,
    /// Highest-grossing hours, descending; ties go to the earlier hour.
    pub peak_hours: Vec<HourlySales>,
    /// Best-selling items by quantity, descending; ties go to the lexically smaller name.
    pub top_items: Vec<ItemQuantity>,
    pub growth_rate_percent: f64,
    pub total_revenue: f64,
    /// `0` when there are no sales days.
    pub average_daily_revenue: f64,
}

/// Aggregate sales events into daily, hourly and per-item summaries.
///
/// Fails on the first malformed event; empty input is not an error.
pub fn analyze_sales_trends(
    events: &[SalesEvent],
    period: AnalysisPeriod,
) -> DomainResult<SalesTrendReport> {
    for (i, event) in events.iter().enumerate() {
        event.validate().map_err(|e| e.at("sales", i))?;
    }

    let mut daily_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut hourly_totals: BTreeMap<u8, f64> = BTreeMap::new();
    let mut item_totals: BTreeMap<&str, u64> = BTreeMap::new();

    for event in events {
        *daily_totals.entry(event.date).or_insert(0.0) += event.amount;
        *hourly_totals.entry(event.hour).or_insert(0.0) += event.amount;
        for line in &event.items {
            let total = item_totals.entry(line.name.as_str()).or_insert(0);
            *total = total.saturating_add(line.quantity);
        }
    }

    let peak_hours = rank(
        hourly_totals.iter().map(|(h, a)| (*h, *a)),
        PEAK_HOURS,
        |a, b| b.total_cmp(a),
    )
    .into_iter()
    .map(|(hour, amount)| HourlySales { hour, amount })
    .collect();

    let top_items = rank(item_totals.iter().map(|(n, q)| (*n, *q)), TOP_ITEMS, |a, b| b.cmp(a))
        .into_iter()
        .map(|(name, quantity)| ItemQuantity {
            name: name.to_string(),
            quantity,
        })
        .collect();

    let totals: Vec<f64> = daily_totals.values().copied().collect();
    let growth_rate_percent = week_over_week_growth(&totals);
    let total_revenue: f64 = totals.iter().sum();
    let average_daily_revenue = mean(&totals);

    debug!(
        events = events.len(),
        days = daily_totals.len(),
        growth_rate_percent,
        period = %period,
        "sales trends analysed"
    );

    Ok(SalesTrendReport {
        period,
        daily_totals,
        hourly_totals,
        peak_hours,
        top_items,
        growth_rate_percent,
        total_revenue,
        average_daily_revenue,
    })
}

/// Take the `n` best entries by value.
///
/// `entries` arrive in ascending key order and the sort is stable, so ties
/// resolve to the smaller key.
fn rank<K, V>(
    entries: impl Iterator<Item = (K, V)>,
    n: usize,
    by_value_desc: impl Fn(&V, &V) -> core::cmp::Ordering,
) -> Vec<(K, V)> {
    let mut ranked: Vec<(K, V)> = entries.collect();
    ranked.sort_by(|a, b| by_value_desc(&a.1, &b.1));
    ranked.truncate(n);
    ranked
}

/// Growth of the last 7 daily totals over the 7 before them.
///
/// `daily_totals` must be in date order. With fewer than 7 days the result is
/// `0`; with fewer than 14 the previous window falls back to the recent one.
fn week_over_week_growth(daily_totals: &[f64]) -> f64 {
    let days = daily_totals.len();
    if days < GROWTH_WINDOW_DAYS {
        return 0.0;
    }

    let recent_avg = mean(&daily_totals[days - GROWTH_WINDOW_DAYS..]);
    let previous_avg = if days >= 2 * GROWTH_WINDOW_DAYS {
        mean(&daily_totals[days - 2 * GROWTH_WINDOW_DAYS..days - GROWTH_WINDOW_DAYS])
    } else {
        recent_avg
    };

    growth_rate(recent_avg, previous_avg)
}
