//! Raw access to the result spreadsheet.
//!
//! [`read_grid`] turns a workbook or CSV export into rows of [`Cell`]s with no
//! schema applied. Interpreting the grid is the parser's job.

mod cell;
mod delimited;
mod xlsx;

pub use cell::Cell;
pub use delimited::read_delimited;
pub use xlsx::read_workbook;

use std::fmt::Display;
use std::path::Path;

use tracing::debug;

use crate::error::DataSourceError;

/// Rows of cells in physical sheet order.
pub type Grid = Vec<Vec<Cell>>;

static WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads the whole source file, dispatching on its extension.
pub fn read_grid(path: &Path) -> Result<Grid, DataSourceError> {
    if !path.exists() {
        return Err(DataSourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let grid = if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)?
    } else if extension == "csv" {
        read_delimited(path)?
    } else {
        return Err(DataSourceError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };

    debug!(path = %path.display(), rows = grid.len(), "Source grid read");
    Ok(grid)
}

pub(crate) fn unreadable(path: &Path, reason: impl Display) -> DataSourceError {
    DataSourceError::Unreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
