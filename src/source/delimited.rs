use std::fs;
use std::path::Path;

use csv::{Position, ReaderBuilder};

use super::{Grid, cell::Cell, unreadable};
use crate::error::DataSourceError;

/// Reads a comma-separated export of the result sheet into a cell grid.
///
/// Banner rows have fewer fields than data rows, so records are read without
/// a header and with flexible lengths. Every field stays text until the
/// parser coerces it. The reader skips blank lines; they come back as empty
/// rows so grid indices match the physical rows of the export.
pub fn read_delimited(path: &Path) -> Result<Grid, DataSourceError> {
    let content = fs::read(path).map_err(|e| unreadable(path, e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut grid: Grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| unreadable(path, e))?;
        if let Some(position) = record.position() {
            let row = first_row(&content, position);
            grid.resize(row.max(grid.len()), Vec::new());
        }
        grid.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(grid)
}

/// 0-based physical row a record starts on.
///
/// A record's position is taken before the blank lines in front of it are
/// consumed, so those line breaks are counted here.
fn first_row(content: &[u8], position: &Position) -> usize {
    let start = (position.byte() as usize).min(content.len());
    let skipped = content[start..]
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|&&b| b == b'\n')
        .count();

    (position.line() as usize).saturating_sub(1) + skipped
}
