use std::fmt;

use super::Cell;

/// Format rows as a right-aligned text table with a leading row-number column
pub fn format_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(value.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", header.as_ref(), width = *width));
    }
    out.push('\n');

    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>width$}", i, width = index_width));
        for (value, width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", value, width = *width));
        }
        out.push('\n');
    }
    out
}

/// Display adapter for the first rows of a table
pub struct TablePreview<'a> {
    headers: &'a [String],
    rows: &'a [Vec<Cell>],
    limit: usize,
}

impl<'a> TablePreview<'a> {
    pub(crate) fn new(headers: &'a [String], rows: &'a [Vec<Cell>], limit: usize) -> Self {
        TablePreview {
            headers,
            rows,
            limit,
        }
    }
}

impl fmt::Display for TablePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(self.limit)
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        write!(f, "{}", format_table(self.headers, &rows))
    }
}
