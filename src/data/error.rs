use thiserror::Error;

/// Failures of the data layer that callers may want to match on.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("expected a top-level JSON array of records")]
    NotARecordArray,

    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),
}
