use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::model::Item;
use crate::ops::since::{format_local_date, since_label};
use crate::util::unicode::display_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    /// 1-based position in the list
    pub index: usize,
    pub name: String,
    /// RFC 3339, UTC
    pub since: String,
    pub elapsed_secs: i64,
}

impl ItemJson {
    pub fn new(index: usize, item: &Item, now: DateTime<Utc>) -> Self {
        ItemJson {
            index,
            name: item.name.clone(),
            since: item.since.to_rfc3339_opts(SecondsFormat::Secs, true),
            elapsed_secs: now.signed_duration_since(item.since).num_seconds().max(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Table of `(1-based index, item)` rows: `#  Name  Since  Date`
pub fn format_table(rows: &[(usize, &Item)], now: DateTime<Utc>) -> String {
    let header = ["#", "Name", "Since", "Date"];
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|(index, item)| {
            [
                index.to_string(),
                item.name.clone(),
                since_label(item.since, now),
                format_local_date(item.since),
            ]
        })
        .collect();

    let mut widths = header.map(display_width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        // Right-pad all but the last column
        if i < row.len() - 1 {
            line.push_str(&" ".repeat(width - display_width(cell)));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
