//! Database filter builders.
//!
//! Pure constructors for the filter objects accepted by
//! `POST /databases/{id}/query`. Property names match the task database
//! layout used by the task tools.

use crate::error::NotionApiError;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

pub const STATUS_PROPERTY: &str = "Status";
pub const OWNER_PROPERTY: &str = "Owner";
pub const TEAM_PROPERTY: &str = "Team";
pub const SYSTEM_PROPERTY: &str = "System";

/// Logical operator joining compound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOperator {
    #[default]
    And,
    Or,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::And => "and",
            FilterOperator::Or => "or",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = NotionApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" => Ok(FilterOperator::And),
            "or" => Ok(FilterOperator::Or),
            other => Err(NotionApiError::InvalidRequest(format!(
                "operator must be \"and\" or \"or\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Tasks whose `Status` equals `status`.
pub fn status_filter(status: &str) -> Value {
    json!({
        "property": STATUS_PROPERTY,
        "status": { "equals": status }
    })
}

/// Tasks whose `Owner` people list contains `person_name`.
pub fn owner_filter_by_name(person_name: &str) -> Value {
    people_contains(OWNER_PROPERTY, person_name)
}

/// Tasks whose `Team` people list contains `person_name`.
pub fn team_member_filter(person_name: &str) -> Value {
    people_contains(TEAM_PROPERTY, person_name)
}

/// Select property equal to `value`.
pub fn select_filter(property_name: &str, value: &str) -> Value {
    json!({
        "property": property_name,
        "select": { "equals": value }
    })
}

/// Rich-text property containing `value`.
pub fn text_contains_filter(property_name: &str, value: &str) -> Value {
    json!({
        "property": property_name,
        "rich_text": { "contains": value }
    })
}

/// Join several filters under one operator: `{"and": [...]}` or `{"or": [...]}`.
pub fn combined_filter(filters: Vec<Value>, operator: FilterOperator) -> Value {
    let mut combined = Map::new();
    combined.insert(operator.as_str().to_string(), Value::Array(filters));
    Value::Object(combined)
}

fn people_contains(property_name: &str, value: &str) -> Value {
    json!({
        "property": property_name,
        "people": { "contains": value }
    })
}
