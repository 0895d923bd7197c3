//! Decode loosely-typed JSON records into analyzer inputs.
//!
//! Payloads come from the chat layer's tool calls and are forgiving about
//! *missing* fields (numbers default to `0`, lead time to the configured
//! default, names to `""`), but a field that is present with the wrong type is
//! an error naming `collection[index].field`.

use chrono::NaiveDate;
use serde_json::{Map, Value as JsonValue};

use menuwise_core::{DomainError, DomainResult, MenuItemId};

use crate::inventory::InventoryUsageRecord;
use crate::menu::{MenuItem, SalesRecord};
use crate::sales::{LineItem, SalesEvent};

type Object = Map<String, JsonValue>;

pub fn menu_items(value: &JsonValue) -> DomainResult<Vec<MenuItem>> {
    records(value, "menu_items", |obj| {
        Ok(MenuItem {
            id: MenuItemId::from(string(obj, "id")?),
            name: string(obj, "name")?,
            price: number(obj, "price")?,
            food_cost: number(obj, "food_cost")?,
        })
    })
}

pub fn sales_records(value: &JsonValue) -> DomainResult<Vec<SalesRecord>> {
    records(value, "sales_records", |obj| {
        let item_id = match obj.get("item_id") {
            None | Some(JsonValue::Null) => None,
            Some(_) => Some(MenuItemId::from(string(obj, "item_id")?)),
        };
        Ok(SalesRecord {
            item_id,
            quantity_sold: count(obj, "quantity_sold")?,
            total_revenue: number(obj, "total_revenue")?,
        })
    })
}

pub fn usage_records(
    value: &JsonValue,
    default_lead_time_days: u32,
) -> DomainResult<Vec<InventoryUsageRecord>> {
    records(value, "usage_records", |obj| {
        let lead_time = match obj.get("supplier_lead_time") {
            None | Some(JsonValue::Null) => default_lead_time_days,
            Some(_) => u32::try_from(count(obj, "supplier_lead_time")?).map_err(|_| {
                DomainError::validation("supplier_lead_time", "lead time is out of range")
            })?,
        };
        Ok(InventoryUsageRecord {
            name: string(obj, "name")?,
            average_daily_usage: number(obj, "average_daily_usage")?,
            current_stock: number(obj, "current_stock")?,
            supplier_lead_time_days: lead_time,
        })
    })
}

pub fn sales_events(value: &JsonValue) -> DomainResult<Vec<SalesEvent>> {
    records(value, "sales", |obj| {
        let hour = u8::try_from(count(obj, "hour")?)
            .map_err(|_| DomainError::validation("hour", "must be within 0..=23"))?;
        let items = match obj.get("items") {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(lines)) => lines
                .iter()
                .enumerate()
                .map(|(i, line)| line_item(line).map_err(|e| e.at("items", i)))
                .collect::<DomainResult<Vec<LineItem>>>()?,
            Some(_) => return Err(DomainError::validation("items", "expected an array")),
        };
        Ok(SalesEvent {
            date: date(obj, "date")?,
            hour,
            amount: number(obj, "amount")?,
            items,
        })
    })
}

fn line_item(value: &JsonValue) -> DomainResult<LineItem> {
    let obj = value
        .as_object()
        .ok_or_else(|| DomainError::validation("", "expected an object"))?;
    Ok(LineItem {
        name: string(obj, "name")?,
        quantity: count(obj, "quantity")?,
    })
}

fn records<T>(
    value: &JsonValue,
    collection: &str,
    decode: impl Fn(&Object) -> DomainResult<T>,
) -> DomainResult<Vec<T>> {
    let rows = value
        .as_array()
        .ok_or_else(|| DomainError::validation(collection, "expected an array of records"))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object()
                .ok_or_else(|| DomainError::validation("", "expected an object"))
                .and_then(&decode)
                .map_err(|e| e.at(collection, i))
        })
        .collect()
}

fn string(obj: &Object, field: &str) -> DomainResult<String> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(other) => Err(DomainError::validation(
            field,
            format!("expected a string, got {}", kind(other)),
        )),
    }
}

fn number(obj: &Object, field: &str) -> DomainResult<f64> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(0.0),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| DomainError::validation(field, "number is not representable")),
        Some(other) => Err(DomainError::validation(
            field,
            format!("expected a number, got {}", kind(other)),
        )),
    }
}

/// Non-negative whole number.
fn count(obj: &Object, field: &str) -> DomainResult<u64> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(0),
        Some(JsonValue::Number(n)) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            // Accept integral floats such as `12.0`.
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
                _ => Err(DomainError::validation(
                    field,
                    format!("expected a non-negative whole number, got {n}"),
                )),
            }
        }
        Some(other) => Err(DomainError::validation(
            field,
            format!("expected a whole number, got {}", kind(other)),
        )),
    }
}

/// `YYYY-MM-DD`, read from the first 10 characters so timestamps are accepted.
fn date(obj: &Object, field: &str) -> DomainResult<NaiveDate> {
    let raw = match obj.get(field) {
        Some(JsonValue::String(s)) => s,
        None | Some(JsonValue::Null) => {
            return Err(DomainError::validation(field, "date is required"));
        }
        Some(other) => {
            return Err(DomainError::validation(
                field,
                format!("expected a date string, got {}", kind(other)),
            ));
        }
    };
    let day: String = raw.chars().take(10).collect();
    NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
        DomainError::validation(field, format!("expected YYYY-MM-DD, got '{raw}': {e}"))
    })
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
