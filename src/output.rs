use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::Value;
use std::io::{self, Write};

use crate::alert::AlertConfig;

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty JSON with two-space indentation.
pub fn format_json(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

fn format_table(config: &Value) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![
        "type".to_string(),
        display_value(config.get("type").unwrap_or(&Value::Null)),
    ]);
    match config.get("params") {
        Some(Value::Object(params)) => {
            for (key, value) in params {
                table.add_row(vec![key.clone(), display_value(value)]);
            }
        }
        Some(other) => {
            table.add_row(vec!["params".to_string(), display_value(other)]);
        }
        None => {}
    }
    table.to_string()
}

pub fn format_config(config: &Value, format: &str) -> String {
    match format {
        "yaml" => serde_yaml::to_string(config).unwrap_or_else(|_| format_json(config)),
        "table" => format_table(config),
        _ => format_json(config),
    }
}

/// Success banner, the configuration and, for known types, the explanation.
pub fn render_alert(
    out: &mut impl Write,
    config: &Value,
    alert: &AlertConfig,
    format: &str,
) -> io::Result<()> {
    use colored::Colorize;
    writeln!(out, "{}", "Alert configuration generated successfully!".green())?;
    writeln!(out, "{}", "Generated Alert Configuration:".bold())?;
    writeln!(out, "{}", format_config(config, format))?;
    if let Some(explanation) = alert.explanation() {
        writeln!(out, "{}", "Alert Explanation:".bold())?;
        writeln!(out, "{explanation}")?;
    }
    Ok(())
}

pub fn print_heading(msg: &str) {
    use colored::Colorize;
    println!("{}", msg.bold());
}

pub fn print_success(msg: &str) {
    use colored::Colorize;
    println!("{}", msg.green());
}

pub fn print_warning(msg: &str) {
    use colored::Colorize;
    eprintln!("{}", msg.yellow());
}

pub fn print_error(msg: &str) {
    use colored::Colorize;
    eprintln!("{}", msg.red());
}
