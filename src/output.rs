use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::state::ResourceState;

#[derive(Tabled)]
struct AttrRow {
    #[tabled(rename = "FIELD")]
    field: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

/// Renders resource state as a two-column field/value table.
pub fn render_state(state: &ResourceState) -> String {
    let rows: Vec<AttrRow> = state
        .attrs
        .iter()
        .map(|(name, value)| AttrRow {
            field: name.clone(),
            value: render_value(value),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "(null)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
