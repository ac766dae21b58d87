//! Extraction output types.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::Result;

/// One data row: header name to cell text, in header order.
///
/// A row only holds the headers it had cells for. A header that appears
/// twice keeps its first position and takes the later cell's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `headers` with `values` positionally, stopping at the shorter one.
    pub fn zip(headers: &[String], values: Vec<String>) -> Self {
        let mut row = Self::new();
        for (header, value) in headers.iter().zip(values) {
            row.insert(header.clone(), value);
        }
        row
    }

    pub fn insert(&mut self, header: String, value: String) {
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.iter().find(|(h, _)| h == header).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, header: &str) -> bool {
        self.get(header).is_some()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (header, value) in &self.cells {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

/// The normalized table pulled out of one page.
///
/// Serializes as `{"title", "headers", "data", "source_url"}`, plus
/// `"message"` when the page had no table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Page heading, or the configured fallback title.
    pub title: String,

    /// Column names, from markup or synthesized.
    pub headers: Vec<String>,

    /// Data rows in document order.
    #[serde(rename = "data")]
    pub rows: Vec<Row>,

    /// URL the page was retrieved from.
    pub source_url: String,

    /// Set when no table was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExtractionResult {
    /// Converts the result to a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Renders the result as plain text: title, source, then aligned columns.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{}\n", self.title, self.source_url);

        if let Some(message) = &self.message {
            out.push('\n');
            out.push_str(message);
            out.push('\n');
            return out;
        }

        let widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| {
                let widest_cell = self.rows.iter().filter_map(|r| r.get(h)).map(|v| v.chars().count()).max();
                widest_cell.unwrap_or(0).max(h.chars().count())
            })
            .collect();

        let line = |values: Vec<&str>| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{:<width$}", v, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        out.push('\n');
        out.push_str(&line(self.headers.iter().map(String::as_str).collect()));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(self.headers.iter().map(|h| row.get(h).unwrap_or("")).collect()));
            out.push('\n');
        }

        out
    }
}
