use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the race-results table
// ---------------------------------------------------------------------------

/// Literal column names the pipeline reads. Matched exactly, no aliases.
pub mod columns {
    pub const PERFORMANCE: &str = "Athlete performance";
    pub const YEAR: &str = "Year of event";
    pub const DISTANCE: &str = "Event distance/length";
    pub const FINISHERS: &str = "Event number of finishers";
    pub const EVENT_NAME: &str = "Event name";
    pub const AGE: &str = "Age";
    pub const COUNTRY: &str = "Athlete country";

    /// Every column the cleaner needs, in the order the sample generator writes them.
    pub const REQUIRED: [&str; 7] = [
        EVENT_NAME,
        YEAR,
        DISTANCE,
        FINISHERS,
        PERFORMANCE,
        COUNTRY,
        AGE,
    ];
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`. NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integral numbers only: `2018` and `2018.0` qualify, `2018.5` does not.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Text form of any non-missing cell, used for categorical columns.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the file as loaded
// ---------------------------------------------------------------------------

/// The loaded table: column names in source order and one cell per column per row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(column_names: Vec<String>) -> Self {
        RawTable {
            column_names,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with `Null` and truncating long ones.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.column_names.len(), CellValue::Null);
        self.rows.push(cells);
    }

    /// Position of a column by literal name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RaceResult – one cleaned row
// ---------------------------------------------------------------------------

/// A single finisher's result with the derived `performance_sec`.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub event_name: Option<String>,
    pub year: i64,
    /// Distance label such as `50km` or `100mi`.
    pub distance: Option<String>,
    /// Finisher count of the whole event, repeated on each of its rows.
    pub finishers: Option<f64>,
    pub performance_sec: u64,
    pub age: Option<f64>,
    pub country: Option<String>,
}

impl RaceResult {
    pub fn performance_hours(&self) -> f64 {
        self.performance_sec as f64 / 3600.0
    }
}

// ---------------------------------------------------------------------------
// Derived datasets
// ---------------------------------------------------------------------------

/// Rows whose performance parsed and whose year is an integer.
#[derive(Debug, Clone, Default)]
pub struct CleanedDataset {
    pub results: Vec<RaceResult>,
    /// Source rows discarded while cleaning.
    pub dropped: usize,
}

impl CleanedDataset {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Cleaned rows restricted to the most frequent distance labels.
#[derive(Debug, Clone, Default)]
pub struct TopDistanceDataset {
    /// Selected labels, most frequent first.
    pub distances: Vec<String>,
    pub results: Vec<RaceResult>,
}

impl TopDistanceDataset {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_count_as_years() {
        assert_eq!(CellValue::Float(2018.0).as_i64(), Some(2018));
        assert_eq!(CellValue::Float(2018.5).as_i64(), None);
        assert_eq!(CellValue::String("2018".into()).as_i64(), None);
    }

    #[test]
    fn nan_is_not_a_number_or_label() {
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_label(), None);
        assert_eq!(CellValue::Integer(50).as_label().as_deref(), Some("50"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = RawTable::new(vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![CellValue::Integer(1)]);
        assert_eq!(table.rows[0].len(), 3);
        assert!(table.rows[0][2].is_null());
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("B"), None);
    }
}
