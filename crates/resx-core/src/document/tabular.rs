//! CSV to text conversion.

use crate::error::DocumentError;

/// Flatten CSV data into text: one line per data row, non-empty cells joined by spaces.
///
/// The first row is treated as a header and skipped. Rows may have differing
/// numbers of cells.
pub fn csv_to_text(data: &[u8]) -> Result<String, DocumentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<&str> = record.iter().filter(|cell| !cell.is_empty()).collect();
        lines.push(cells.join(" "));
    }

    Ok(lines.join("\n"))
}
