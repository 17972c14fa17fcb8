use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// 1-based index of a value series inside an [`AlignedDataset`].
///
/// Index `0` is reserved for the shared x-axis row.
pub type SeriesIndex = usize;

/// Row-oriented dataset shared by every series of one chart.
///
/// Row 0 is the x-axis; rows `1..=series_count()` are value series with one
/// optional sample per x position. All rows have the same length.
///
/// Serializes to the plotting engine's row-array shape
/// (`[[x...], [s1...], ...]`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<Option<f64>>>",
    into = "Vec<Vec<Option<f64>>>"
)]
pub struct AlignedDataset {
    x: Vec<f64>,
    series: Vec<Vec<Option<f64>>>,
}

impl AlignedDataset {
    /// Builds a dataset, rejecting series whose length differs from the x-axis.
    pub fn new(x: Vec<f64>, series: Vec<Vec<Option<f64>>>) -> ChartResult<Self> {
        for (offset, values) in series.iter().enumerate() {
            if values.len() != x.len() {
                return Err(ChartError::SeriesLengthMismatch {
                    series: offset + 1,
                    expected: x.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Self { x, series })
    }

    /// Convenience constructor for fully populated series.
    pub fn from_values(x: Vec<f64>, series: Vec<Vec<f64>>) -> ChartResult<Self> {
        let series = series
            .into_iter()
            .map(|values| values.into_iter().map(Some).collect())
            .collect();
        Self::new(x, series)
    }

    /// Builds a dataset from raw rows where row 0 is the x-axis.
    ///
    /// An empty row list yields an empty dataset. The x-axis must not contain
    /// missing entries.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> ChartResult<Self> {
        let mut rows = rows.into_iter();
        let Some(x_row) = rows.next() else {
            return Ok(Self::default());
        };
        let x = x_row
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                value.ok_or_else(|| {
                    ChartError::InvalidData(format!("x-axis value at {position} must not be null"))
                })
            })
            .collect::<ChartResult<Vec<f64>>>()?;
        Self::new(x, rows.collect())
    }

    /// Rebuilds a dataset whose rows are already known to share the x length.
    pub(crate) fn from_parts_unchecked(x: Vec<f64>, series: Vec<Vec<Option<f64>>>) -> Self {
        debug_assert!(series.iter().all(|values| values.len() == x.len()));
        Self { x, series }
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Number of x positions (the length of every row).
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Rows including the x-axis.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.series.len() + 1
    }

    /// Returns the values of a 1-based series index.
    #[must_use]
    pub fn series(&self, index: SeriesIndex) -> Option<&[Option<f64>]> {
        index
            .checked_sub(1)
            .and_then(|offset| self.series.get(offset))
            .map(Vec::as_slice)
    }

    /// Iterates value series paired with their 1-based index.
    pub fn iter_series(&self) -> impl DoubleEndedIterator<Item = (SeriesIndex, &[Option<f64>])> {
        self.series
            .iter()
            .enumerate()
            .map(|(offset, values)| (offset + 1, values.as_slice()))
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<Option<f64>>> {
        let mut rows = Vec::with_capacity(self.series.len() + 1);
        rows.push(self.x.into_iter().map(Some).collect());
        rows.extend(self.series);
        rows
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize dataset: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse dataset json: {e}")))
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for AlignedDataset {
    type Error = ChartError;

    fn try_from(rows: Vec<Vec<Option<f64>>>) -> ChartResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<AlignedDataset> for Vec<Vec<Option<f64>>> {
    fn from(dataset: AlignedDataset) -> Self {
        dataset.into_rows()
    }
}
