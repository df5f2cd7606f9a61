use std::path::Path;

use calamine::{Reader, open_workbook_auto};

use super::{Grid, cell::Cell, unreadable};
use crate::error::DataSourceError;

/// Reads the first worksheet of a workbook into a cell grid.
///
/// calamine trims leading empty rows from the used range; those rows are
/// restored as empty rows so banner skipping counts physical rows.
pub fn read_workbook(path: &Path) -> Result<Grid, DataSourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable(path, "workbook has no worksheets"))?
        .map_err(|e| unreadable(path, e))?;

    let (leading_rows, leading_cols) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); leading_rows];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; leading_cols];
        cells.extend(row.iter().map(Cell::from));
        grid.push(cells);
    }

    Ok(grid)
}
