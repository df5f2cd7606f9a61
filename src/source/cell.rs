use calamine::Data;

/// A single spreadsheet cell before any schema is applied.
///
/// Cells carry no fixed type in the source sheet, so coercion into numbers or
/// identifiers happens later and can fail per cell without aborting the load.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Builds a cell from raw text, trimming surrounding whitespace.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric value of the cell, or `None` when it cannot be read as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Text form of the cell. Whole numbers keep a `.0` suffix the way a
    /// float column does when converted to text.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Number(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Float(v) => Cell::Number(*v),
            Data::Int(v) => Cell::Number(*v as f64),
            Data::String(v) => Cell::from_text(v),
            Data::Bool(v) => Cell::Text(v.to_string()),
            Data::DateTime(v) => Cell::Number(v.as_f64()),
            Data::DateTimeIso(v) | Data::DurationIso(v) => Cell::from_text(v),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}
