//! Row decoding: one scraped table row into typed candidate fields.

use super::layout::{Layout, MIN_CELLS};

/// Text cells of one table row, in column order. May be shorter than any layout expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Trimmed cell text, or `""` past the end of the row.
    pub fn text(&self, idx: usize) -> &str {
        self.cells.get(idx).map_or("", |c| c.trim())
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Typed fields of a decoded row, not yet filtered.
///
/// `company_name` is empty under the screener layout; it is defaulted to the
/// ticker when the candidate is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub ticker: String,
    pub company_name: String,
    pub insider_name: String,
    pub insider_title: String,
    pub trade_date: String,
    pub filing_date: String,
    pub trade_type: String,
    pub price: f64,
    pub quantity: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Candidate(Candidate),
    /// Too few cells to hold the required fields.
    Malformed,
}

/// Decodes `row` under `layout`. Never fails on individual cells: missing
/// text becomes `""` and unparsable numbers become `0`.
pub fn decode(row: &RawRow, layout: Layout) -> DecodeOutcome {
    if row.len() < MIN_CELLS {
        return DecodeOutcome::Malformed;
    }
    let cols = layout.columns();
    let text = |idx: usize| row.text(idx).to_string();

    DecodeOutcome::Candidate(Candidate {
        ticker: text(cols.ticker),
        company_name: cols.company_name.map(text).unwrap_or_default(),
        insider_name: text(cols.insider_name),
        insider_title: text(cols.insider_title),
        trade_date: text(cols.trade_date),
        filing_date: text(cols.filing_date),
        trade_type: text(cols.trade_type),
        price: parse_amount(row.text(cols.price)),
        quantity: parse_quantity(row.text(cols.quantity)),
        value: parse_amount(row.text(cols.value)),
    })
}

/// `"+$1,234.50"` -> `1234.5`. Anything unparsable (or non-finite) is `0.0`.
pub(crate) fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',' | '+')).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `"+12,000"` -> `12000`. A trailing or leading `+` means "at least"; it is dropped.
pub(crate) fn parse_quantity(raw: &str) -> i64 {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '+')).collect();
    cleaned.trim().parse::<i64>().unwrap_or(0)
}
