use cascade_core::enums::FieldStatus;
use cascade_core::responses::{ItemReport, ItemStatus, SyncReport};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(key_value_table(&serde_json::to_value(value)?).render(options())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a sync report; the table form lists one row per item.
pub fn render_report(report: &SyncReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(report_table(report).render(options())),
        OutputFormat::Json | OutputFormat::Raw => render(report, format),
    }
}

fn options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn report_table(report: &SyncReport) -> Table {
    let mut table = Table::new(["item", "record", "ancestor", "status", "detail"]);
    for item in &report.items {
        table.push_row(vec![
            item.item_id.clone(),
            item.record_id.clone().unwrap_or_else(|| "-".into()),
            item.ancestor_record_id.clone().unwrap_or_else(|| "-".into()),
            match item.status {
                ItemStatus::Synced => "synced".into(),
                ItemStatus::Skipped => "skipped".into(),
            },
            item_detail(item),
        ]);
    }
    table
}

fn item_detail(item: &ItemReport) -> String {
    if let Some(skip) = &item.skip {
        return skip.to_string();
    }
    item.fields
        .iter()
        .map(|outcome| match &outcome.status {
            FieldStatus::Updated {
                option_id,
                option_name,
            }
            | FieldStatus::Planned {
                option_id,
                option_name,
            } => format!(
                "{}={} ({})",
                outcome.field,
                option_name.as_deref().unwrap_or(option_id),
                outcome.status
            ),
            status => format!("{}: {status}", outcome.field),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_value_table(value: &Value) -> Table {
    let mut table = Table::new(["key", "value"]);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                table.push_row(vec![key.clone(), value_to_cell(value)]);
            }
        }
        other => table.push_row(vec!["value".into(), value_to_cell(other)]),
    }
    table
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
