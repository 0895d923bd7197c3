use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use menuwise_core::{DomainError, DomainResult, MenuItemId};

use crate::metrics::{food_cost_percentage, profit_margin, total_profit};
use crate::validate::{finite, non_negative};

/// Static menu-optimisation advice attached to every menu report.
///
/// This is configuration text, not a data-derived insight.
pub const MENU_ADVISORIES: [&str; 5] = [
    "Consider promoting high-margin items through strategic menu placement",
    "Review recipes and suppliers for underperforming items to reduce food costs",
    "Bundle slow-moving items with popular choices",
    "Adjust portion sizes for items with low profit margins",
    "Test price increases on high-demand, low-competition items",
];

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub food_cost: f64,
}

impl MenuItem {
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        price: f64,
        food_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            food_cost,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.id.is_blank() {
            return Err(DomainError::validation("id", "menu item id cannot be blank"));
        }
        non_negative("price", self.price)?;
        non_negative("food_cost", self.food_cost)?;
        Ok(())
    }
}

/// Item-level sales totals for the analysed period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// `None` means the record cannot be joined to any catalog entry.
    pub item_id: Option<MenuItemId>,
    pub quantity_sold: u64,
    pub total_revenue: f64,
}

impl SalesRecord {
    pub fn new(item_id: impl Into<MenuItemId>, quantity_sold: u64, total_revenue: f64) -> Self {
        Self {
            item_id: Some(item_id.into()),
            quantity_sold,
            total_revenue,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        non_negative("total_revenue", self.total_revenue)
    }
}

/// Derived per-item metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPerformance {
    pub name: String,
    pub quantity_sold: u64,
    pub revenue: f64,
    /// Percent.
    pub profit_margin: f64,
    pub total_profit: f64,
    /// Percent.
    pub food_cost_percentage: f64,
}

impl ItemPerformance {
    fn score(item: &MenuItem, sales: &SalesRecord) -> DomainResult<Self> {
        let performance = Self {
            name: item.name.clone(),
            quantity_sold: sales.quantity_sold,
            revenue: sales.total_revenue,
            profit_margin: profit_margin(item.price, item.food_cost),
            total_profit: total_profit(item.price, item.food_cost, sales.quantity_sold),
            food_cost_percentage: food_cost_percentage(item.food_cost, item.price),
        };
        finite("profit_margin", performance.profit_margin)?;
        finite("total_profit", performance.total_profit)?;
        finite("food_cost_percentage", performance.food_cost_percentage)?;
        Ok(performance)
    }
}

/// Classification thresholds. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuThresholds {
    /// Top performer: volume above this...
    pub top_min_quantity: u64,
    /// ...and margin above this.
    pub top_min_margin: f64,
    /// Underperformer: volume below this...
    pub under_max_quantity: u64,
    /// ...or margin below this.
    pub under_max_margin: f64,
    /// Profitability leader: margin above this.
    pub leader_min_margin: f64,
}

impl Default for MenuThresholds {
    fn default() -> Self {
        Self {
            top_min_quantity: 50,
            top_min_margin: 60.0,
            under_max_quantity: 20,
            under_max_margin: 40.0,
            leader_min_margin: 70.0,
        }
    }
}

impl MenuThresholds {
    pub fn is_top_performer(&self, p: &ItemPerformance) -> bool {
        p.quantity_sold > self.top_min_quantity && p.profit_margin > self.top_min_margin
    }

    pub fn is_underperformer(&self, p: &ItemPerformance) -> bool {
        p.quantity_sold < self.under_max_quantity || p.profit_margin < self.under_max_margin
    }

    pub fn is_profitability_leader(&self, p: &ItemPerformance) -> bool {
        p.profit_margin > self.leader_min_margin
    }
}

/// Menu analysis output. Buckets overlap: one item may appear in several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPerformanceReport {
    pub top_performers: Vec<ItemPerformance>,
    pub underperformers: Vec<ItemPerformance>,
    pub profitability_leaders: Vec<ItemPerformance>,
    pub advisories: Vec<String>,
}

impl MenuPerformanceReport {
    fn empty() -> Self {
        Self {
            top_performers: Vec::new(),
            underperformers: Vec::new(),
            profitability_leaders: Vec::new(),
            advisories: MENU_ADVISORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Score and classify every catalog item that has sales.
pub fn analyze_menu_performance(
    menu_items: &[MenuItem],
    sales_records: &[SalesRecord],
) -> DomainResult<MenuPerformanceReport> {
    analyze_menu_performance_with(&MenuThresholds::default(), menu_items, sales_records)
}

/// Like [`analyze_menu_performance`], with explicit thresholds.
///
/// Fails on the first invalid record; nothing is scored in that case.
pub fn analyze_menu_performance_with(
    thresholds: &MenuThresholds,
    menu_items: &[MenuItem],
    sales_records: &[SalesRecord],
) -> DomainResult<MenuPerformanceReport> {
    let mut seen: HashSet<&MenuItemId> = HashSet::with_capacity(menu_items.len());
    for (i, item) in menu_items.iter().enumerate() {
        item.validate().map_err(|e| e.at("menu_items", i))?;
        if !seen.insert(&item.id) {
            return Err(DomainError::validation(
                "id",
                format!("duplicate menu item id '{}'", item.id),
            )
            .at("menu_items", i));
        }
    }
    for (i, record) in sales_records.iter().enumerate() {
        record.validate().map_err(|e| e.at("sales_records", i))?;
    }

    let mut report = MenuPerformanceReport::empty();
    let mut unmatched = 0usize;

    for (i, item) in menu_items.iter().enumerate() {
        // First matching record wins.
        let Some(sales) = sales_records
            .iter()
            .find(|s| s.item_id.as_ref() == Some(&item.id))
        else {
            unmatched += 1;
            continue;
        };

        let performance = ItemPerformance::score(item, sales).map_err(|e| e.at("menu_items", i))?;

        if thresholds.is_top_performer(&performance) {
            report.top_performers.push(performance.clone());
        }
        if thresholds.is_underperformer(&performance) {
            report.underperformers.push(performance.clone());
        }
        if thresholds.is_profitability_leader(&performance) {
            report.profitability_leaders.push(performance);
        }
    }

    debug!(
        items = menu_items.len(),
        unmatched,
        top = report.top_performers.len(),
        under = report.underperformers.len(),
        leaders = report.profitability_leaders.len(),
        "menu performance analysed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(items: &[ItemPerformance]) -> Vec<&str> {
        items.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn high_volume_item_at_seventy_percent_is_a_top_performer() {
        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let sales = vec![SalesRecord::new("A", 60, 600.0)];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        let top = &report.top_performers[0];
        assert!((top.profit_margin - 70.0).abs() < 1e-9);
        assert!((top.total_profit - 420.0).abs() < 1e-9);
        assert!((top.food_cost_percentage - 30.0).abs() < 1e-9);
        assert_eq!(top.revenue, 600.0);
        assert!(report.underperformers.is_empty());
        // The leader threshold is strict: exactly 70% does not qualify.
        assert!(report.profitability_leaders.is_empty());
    }

    #[test]
    fn item_can_land_in_several_buckets() {
        let menu = vec![MenuItem::new("A", "Steak", 20.0, 4.0)];
        let sales = vec![SalesRecord::new("A", 80, 1600.0)];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        assert_eq!(names(&report.top_performers), vec!["Steak"]);
        assert_eq!(names(&report.profitability_leaders), vec!["Steak"]);
        assert!(report.underperformers.is_empty());
    }

    #[test]
    fn low_margin_or_low_volume_is_an_underperformer() {
        let menu = vec![
            MenuItem::new("a", "Lobster", 30.0, 25.0),
            MenuItem::new("b", "Fries", 4.0, 0.5),
            MenuItem::new("c", "Salad", 8.0, 3.0),
        ];
        let sales = vec![
            SalesRecord::new("a", 100, 3000.0),
            SalesRecord::new("b", 5, 20.0),
            SalesRecord::new("c", 30, 240.0),
        ];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        assert_eq!(names(&report.underperformers), vec!["Lobster", "Fries"]);
        // Fries: 87.5% margin makes it a leader despite low volume.
        assert_eq!(names(&report.profitability_leaders), vec!["Fries"]);
        assert!(report.top_performers.is_empty());
    }

    #[test]
    fn zero_price_item_gets_zero_margin_and_underperforms() {
        let menu = vec![MenuItem::new("w", "Water", 0.0, 0.2)];
        let sales = vec![SalesRecord::new("w", 200, 0.0)];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        let under = &report.underperformers[0];
        assert_eq!(under.profit_margin, 0.0);
        assert_eq!(under.food_cost_percentage, 0.0);
    }

    #[test]
    fn unmatched_items_and_records_are_skipped() {
        let menu = vec![
            MenuItem::new("A", "Burger", 10.0, 3.0),
            MenuItem::new("B", "Pasta", 12.0, 4.0),
        ];
        let sales = vec![
            SalesRecord::new("A", 60, 600.0),
            SalesRecord {
                item_id: None,
                quantity_sold: 10,
                total_revenue: 50.0,
            },
            SalesRecord::new("Z", 10, 50.0),
        ];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        assert_eq!(names(&report.top_performers), vec!["Burger"]);
        assert!(report.underperformers.is_empty());
    }

    #[test]
    fn first_matching_sales_record_wins() {
        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let sales = vec![SalesRecord::new("A", 5, 50.0), SalesRecord::new("A", 90, 900.0)];

        let report = analyze_menu_performance(&menu, &sales).unwrap();

        assert_eq!(report.underperformers[0].quantity_sold, 5);
        assert!(report.top_performers.is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty_buckets_with_advisories() {
        let report = analyze_menu_performance(&[], &[]).unwrap();
        assert!(report.top_performers.is_empty());
        assert!(report.underperformers.is_empty());
        assert!(report.profitability_leaders.is_empty());
        assert_eq!(report.advisories.len(), MENU_ADVISORIES.len());

        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let report = analyze_menu_performance(&menu, &[]).unwrap();
        assert!(report.top_performers.is_empty());
    }

    #[test]
    fn negative_price_is_rejected_with_field_path() {
        let menu = vec![
            MenuItem::new("A", "Burger", 10.0, 3.0),
            MenuItem::new("B", "Pasta", -1.0, 4.0),
        ];

        let err = analyze_menu_performance(&menu, &[]).unwrap_err();
        assert_eq!(err.field(), Some("menu_items[1].price"));
    }

    #[test]
    fn non_finite_revenue_is_rejected() {
        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let sales = vec![SalesRecord::new("A", 1, f64::NAN)];

        let err = analyze_menu_performance(&menu, &sales).unwrap_err();
        assert_eq!(err.field(), Some("sales_records[0].total_revenue"));
    }

    #[test]
    fn tiny_price_overflowing_the_margin_is_rejected() {
        let menu = vec![
            MenuItem::new("A", "Burger", 10.0, 3.0),
            MenuItem::new("B", "Garnish", 1e-310, 1.0),
        ];
        let sales = vec![SalesRecord::new("A", 60, 600.0), SalesRecord::new("B", 5, 0.0)];

        let err = analyze_menu_performance(&menu, &sales).unwrap_err();
        assert_eq!(err.field(), Some("menu_items[1].profit_margin"));
    }

    #[test]
    fn huge_price_overflowing_total_profit_is_rejected() {
        let menu = vec![MenuItem::new("A", "Caviar", 1e308, 0.0)];
        let sales = vec![SalesRecord::new("A", 60, 1e308)];

        let err = analyze_menu_performance(&menu, &sales).unwrap_err();
        assert_eq!(err.field(), Some("menu_items[0].total_profit"));
    }

    #[test]
    fn report_survives_a_json_round_trip() {
        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let sales = vec![SalesRecord::new("A", 60, 600.0)];
        let report = analyze_menu_performance(&menu, &sales).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        let back: MenuPerformanceReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn duplicate_menu_ids_are_rejected() {
        let menu = vec![
            MenuItem::new("A", "Burger", 10.0, 3.0),
            MenuItem::new("A", "Cheeseburger", 11.0, 3.5),
        ];

        let err = analyze_menu_performance(&menu, &[]).unwrap_err();
        match err {
            DomainError::Validation { field, reason } => {
                assert_eq!(field, "menu_items[1].id");
                assert!(reason.contains("duplicate"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn custom_thresholds_change_classification() {
        let thresholds = MenuThresholds {
            leader_min_margin: 65.0,
            ..MenuThresholds::default()
        };
        let menu = vec![MenuItem::new("A", "Burger", 10.0, 3.0)];
        let sales = vec![SalesRecord::new("A", 60, 600.0)];

        let report = analyze_menu_performance_with(&thresholds, &menu, &sales).unwrap();
        assert_eq!(names(&report.profitability_leaders), vec!["Burger"]);
    }

    fn arb_catalog() -> impl Strategy<Value = (Vec<MenuItem>, Vec<SalesRecord>)> {
        prop::collection::vec((0.0f64..50.0, 0.0f64..50.0, 0u64..200), 0..20).prop_map(|rows| {
            let menu = rows
                .iter()
                .enumerate()
                .map(|(i, (price, cost, _))| {
                    MenuItem::new(format!("item-{i}"), format!("Item {i}"), *price, *cost)
                })
                .collect();
            let sales = rows
                .iter()
                .enumerate()
                .map(|(i, (price, _, qty))| {
                    SalesRecord::new(format!("item-{i}"), *qty, price * *qty as f64)
                })
                .collect();
            (menu, sales)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: re-running on identical input gives identical buckets and order.
        #[test]
        fn classification_is_idempotent((menu, sales) in arb_catalog()) {
            let first = analyze_menu_performance(&menu, &sales).unwrap();
            let second = analyze_menu_performance(&menu, &sales).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: with default thresholds no item is both a top performer and an underperformer.
        #[test]
        fn top_and_under_are_disjoint((menu, sales) in arb_catalog()) {
            let report = analyze_menu_performance(&menu, &sales).unwrap();
            for top in &report.top_performers {
                prop_assert!(!report.underperformers.iter().any(|u| u.name == top.name));
            }
        }
    }
}
