//! In-memory tabular input handed to the pipeline by the loaders.

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A single spreadsheet value as read from an export.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A native workbook date/time value.
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Builds a text cell; empty strings are treated as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as it appears in exports and grouping keys.
    /// Missing values render as `None`.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            Cell::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Header row plus data rows, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with [`Cell::Empty`] and dropping
    /// cells beyond the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Stacks tables in the given order, aligning cells by column name.
    ///
    /// The result carries the union of all headers in first-seen order;
    /// a table lacking a column contributes empty cells for it.
    pub fn concat(tables: Vec<RawTable>) -> RawTable {
        let mut headers: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for table in &tables {
            for header in &table.headers {
                if !positions.contains_key(header) {
                    positions.insert(header.clone(), headers.len());
                    headers.push(header.clone());
                }
            }
        }

        let mut merged = RawTable::new(headers);
        for table in tables {
            let mapping: Vec<usize> = table.headers.iter().map(|h| positions[h]).collect();
            for row in table.rows {
                let mut aligned = vec![Cell::Empty; merged.headers.len()];
                for (cell, &target) in row.into_iter().zip(&mapping) {
                    aligned[target] = cell;
                }
                merged.rows.push(aligned);
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut t = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|v| Cell::text(*v)).collect());
        }
        t
    }

    #[test]
    fn test_empty_text_is_missing() {
        assert_eq!(Cell::text(""), Cell::Empty);
        assert!(!Cell::text("").is_present());
        assert!(Cell::text(" ").is_present());
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(Cell::Number(12.0).render().as_deref(), Some("12"));
        assert_eq!(Cell::Number(1.5).render().as_deref(), Some("1.5"));
        assert_eq!(Cell::Empty.render(), None);
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut t = RawTable::new(vec!["a".into(), "b".into()]);
        t.push_row(vec![Cell::text("x")]);
        assert_eq!(t.rows()[0], vec![Cell::text("x"), Cell::Empty]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let t = RawTable::new(vec![" Area ".into()]);
        assert_eq!(t.column_index("Area"), Some(0));
    }

    #[test]
    fn test_concat_aligns_by_name_in_caller_order() {
        let first = table(&["a", "b"], &[&["1", "2"]]);
        let second = table(&["b", "c"], &[&["3", "4"]]);

        let merged = RawTable::concat(vec![first, second]);

        assert_eq!(merged.headers(), &["a", "b", "c"]);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.rows()[0],
            vec![Cell::text("1"), Cell::text("2"), Cell::Empty]
        );
        assert_eq!(
            merged.rows()[1],
            vec![Cell::Empty, Cell::text("3"), Cell::text("4")]
        );
    }
}
