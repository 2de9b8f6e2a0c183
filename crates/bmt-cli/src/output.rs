use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Display width of a cell. Severity and workflow glyphs are multi-byte, so
/// byte length would over-pad them.
fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell_width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell_width(cell));
        }
    }

    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(
        headers.iter().zip(&widths).map(|(h, w)| pad(h, *w)).collect(),
    ));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(
            row.iter()
                .enumerate()
                .map(|(i, cell)| pad(cell, widths.get(i).copied().unwrap_or(0)))
                .collect(),
        ));
    }
    out.join("\n")
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("(none)");
        return;
    }
    println!("{}", render_table(headers, &rows));
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
