//! Metric primitives shared by every analyzer.
//!
//! All functions are total: zero denominators yield `0.0` instead of
//! infinities or NaN. Results are unrounded; rounding belongs to whoever
//! renders them.

/// Share of the selling price retained after food cost, in percent.
pub fn profit_margin(price: f64, food_cost: f64) -> f64 {
    if price > 0.0 {
        (price - food_cost) / price * 100.0
    } else {
        0.0
    }
}

/// Profit over `quantity` units sold.
pub fn total_profit(price: f64, food_cost: f64, quantity: u64) -> f64 {
    (price - food_cost) * quantity as f64
}

/// Food cost as a percentage of the selling price.
pub fn food_cost_percentage(food_cost: f64, price: f64) -> f64 {
    if price > 0.0 {
        food_cost / price * 100.0
    } else {
        0.0
    }
}

/// Period-over-period growth, in percent.
pub fn growth_rate(recent_avg: f64, previous_avg: f64) -> f64 {
    if previous_avg > 0.0 {
        (recent_avg - previous_avg) / previous_avg * 100.0
    } else {
        0.0
    }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}
