//! Renderer-agnostic tabular model.
//!
//! A [`TabularModel`] is laid out the way a spreadsheet renderer would write
//! it: one row per metadata field, then the header row, then the data rows.
//! Formula cells use A1 references against that layout and carry their
//! evaluated value, so JSON or plain-text renderers never need a formula
//! engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labelled value shown above the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Field label, e.g. `Employee`.
    pub label: String,
    /// Field value.
    pub value: String,
}

impl MetadataField {
    /// Creates a metadata field.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text.
    pub header: String,
}

impl Column {
    /// Creates a column with the given header.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

/// What a row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// An ordinary data row.
    Data,
    /// Column sums across all data rows.
    Summary,
    /// Per-column totals on a pay slip.
    Total,
    /// The net amount line.
    Net,
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value.
    Empty,
    /// Free text.
    Text(String),
    /// Whole number, used for identifiers.
    Integer(u64),
    /// Calendar date.
    Date(NaiveDate),
    /// Monetary amount.
    Amount(Decimal),
    /// Spreadsheet formula with its evaluated value.
    Formula {
        /// A1-notation expression without the leading `=`.
        expression: String,
        /// The value the expression evaluates to.
        value: Decimal,
    },
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Creates a formula cell.
    pub fn formula(expression: impl Into<String>, value: Decimal) -> Self {
        Cell::Formula {
            expression: expression.into(),
            value,
        }
    }

    /// The numeric value of an amount or formula cell.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Cell::Amount(value) | Cell::Formula { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The formula expression, if this is a formula cell.
    pub fn expression(&self) -> Option<&str> {
        match self {
            Cell::Formula { expression, .. } => Some(expression),
            _ => None,
        }
    }

    /// The text of a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One row of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// What the row represents.
    pub kind: RowKind,
    /// Cells, one per column.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Creates a row.
    pub fn new(kind: RowKind, cells: Vec<Cell>) -> Self {
        Self { kind, cells }
    }
}

/// A titled table with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularModel {
    /// Sheet or document title.
    pub title: String,
    /// Fields rendered above the header row.
    pub metadata: Vec<MetadataField>,
    /// Column headers.
    pub columns: Vec<Column>,
    /// Data, summary and total rows.
    pub rows: Vec<Row>,
}

impl TabularModel {
    /// Creates an empty model with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            metadata: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// 1-based sheet row of the row at `index` in [`rows`](Self::rows).
    pub fn sheet_row(&self, index: usize) -> usize {
        self.metadata.len() + 2 + index
    }

    /// The cell at (`row`, `column`), both 0-based into rows and columns.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(column)
    }

    /// Rows of the given kind.
    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |row| row.kind == kind)
    }

    /// Index of the column with the given header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.header == header)
    }
}

/// Spreadsheet column letters for a 0-based column index.
///
/// ```
/// use payroll_report_engine::views::column_letter;
///
/// assert_eq!(column_letter(0), "A");
/// assert_eq!(column_letter(25), "Z");
/// assert_eq!(column_letter(26), "AA");
/// ```
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// A1 reference for a 0-based column and a 1-based sheet row.
pub(crate) fn cell_ref(column: usize, sheet_row: usize) -> String {
    format!("{}{}", column_letter(column), sheet_row)
}

/// `SUM` over a horizontal run of columns `[first, last]` on one sheet row.
pub(crate) fn sum_across(first: usize, last: usize, sheet_row: usize) -> String {
    format!(
        "SUM({}:{})",
        cell_ref(first, sheet_row),
        cell_ref(last, sheet_row)
    )
}

/// `SUM` over a vertical run of sheet rows `[first, last]` in one column.
pub(crate) fn sum_down(column: usize, first: usize, last: usize) -> String {
    format!("SUM({}:{})", cell_ref(column, first), cell_ref(column, last))
}
