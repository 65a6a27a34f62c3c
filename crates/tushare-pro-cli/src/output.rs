/*
[INPUT]:  Result table and requested output format
[OUTPUT]: Rendered text for stdout (aligned table, JSON records, CSV)
[POS]:    CLI layer - presentation
[UPDATE]: When adding output formats
*/

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;
use tushare_pro_adapter::DataFrame;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render(table: &DataFrame, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(table)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.records())?),
        OutputFormat::Csv => Ok(render_csv(table)),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_table(table: &DataFrame) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns().iter().map(|column| column.width()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, table.columns(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&format!("({} rows)", table.len()));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell}{}", " ".repeat(width - cell.width())))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn render_csv(table: &DataFrame) -> String {
    let mut out = String::new();
    let header: Vec<String> = table.columns().iter().map(|column| csv_field(column)).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in table.rows() {
        let fields: Vec<String> = row.iter().map(|value| csv_field(&cell_text(value))).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
