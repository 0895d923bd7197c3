//! Qualitative demand modifiers for the inventory forecast.
//!
//! Free-text context ("holiday weekend", "cold and rainy") is reduced to a
//! small tagged enumeration by keyword lookup. The multipliers are fixed
//! constants, not learned coefficients.

use serde::{Deserialize, Serialize};

/// Demand tier derived from upcoming-events text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDemand {
    /// Holidays and festivals.
    Festive,
    Weekend,
    Normal,
}

impl EventDemand {
    /// Keyword sets in precedence order; the first tier with a hit wins.
    const TIERS: [(EventDemand, &'static [&'static str]); 2] = [
        (EventDemand::Festive, &["holiday", "festival"]),
        (EventDemand::Weekend, &["weekend"]),
    ];

    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        Self::TIERS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(tier, _)| *tier)
            .unwrap_or(EventDemand::Normal)
    }

    pub fn multiplier(self) -> f64 {
        match self {
            EventDemand::Festive => 1.3,
            EventDemand::Weekend => 1.15,
            EventDemand::Normal => 1.0,
        }
    }
}

/// Weather condition derived from forecast text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherDemand {
    ColdOrWet,
    Mild,
}

impl WeatherDemand {
    const KEYWORDS: [&'static str; 2] = ["rain", "cold"];

    /// Item names that sell more in cold or wet weather.
    const COMFORT_ITEM_KEYWORDS: [&'static str; 2] = ["soup", "hot"];

    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if Self::KEYWORDS.iter().any(|k| text.contains(k)) {
            WeatherDemand::ColdOrWet
        } else {
            WeatherDemand::Mild
        }
    }

    /// Whether this weather boosts demand for `item_name`.
    pub fn boosts(self, item_name: &str) -> bool {
        match self {
            WeatherDemand::ColdOrWet => {
                let name = item_name.to_lowercase();
                Self::COMFORT_ITEM_KEYWORDS.iter().any(|k| name.contains(k))
            }
            WeatherDemand::Mild => false,
        }
    }

    pub fn multiplier_for(self, item_name: &str) -> f64 {
        if self.boosts(item_name) { 1.2 } else { 1.0 }
    }
}
