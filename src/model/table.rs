//! Table types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Separator placed between non-empty cell texts of a row.
pub const CELL_SEPARATOR: &str = " | ";

/// A table structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.plain_text().is_empty())
    }

    /// Get plain text representation of the table, one line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(TableRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Add a cell to the row.
    pub fn add_cell(&mut self, cell: TableCell) {
        self.cells.push(cell);
    }

    /// Non-empty cell texts joined with [`CELL_SEPARATOR`].
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(TableCell::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR)
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Paragraphs inside the cell
    pub content: Vec<Paragraph>,
}

impl TableCell {
    /// Create a cell with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
        }
    }

    /// Add a paragraph to the cell.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(paragraph);
    }

    /// Cell text: trimmed non-empty paragraphs joined with a space.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_plain_text() {
        let row = TableRow::new(vec![TableCell::with_text("A"), TableCell::with_text("B")]);
        assert_eq!(row.plain_text(), "A | B");
    }

    #[test]
    fn test_row_skips_empty_cells() {
        let row = TableRow::new(vec![
            TableCell::with_text("A"),
            TableCell::default(),
            TableCell::with_text("  "),
            TableCell::with_text("C"),
        ]);
        assert_eq!(row.plain_text(), "A | C");
    }

    #[test]
    fn test_cell_joins_paragraphs() {
        let mut cell = TableCell::with_text("first");
        cell.add_paragraph(Paragraph::with_text(" second "));
        assert_eq!(cell.plain_text(), "first second");
    }

    #[test]
    fn test_table_dimensions() {
        let mut table = Table::new();
        assert!(table.is_empty());
        table.add_row(TableRow::new(vec![
            TableCell::with_text("1"),
            TableCell::with_text("2"),
        ]));
        table.add_row(TableRow::new(vec![
            TableCell::with_text("3"),
            TableCell::with_text("4"),
        ]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.plain_text(), "1 | 2\n3 | 4");
    }
}
