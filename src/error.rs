use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series {series} length mismatch: expected {expected} points, got {actual}")]
    SeriesLengthMismatch {
        series: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
