use serde::{Deserialize, Serialize};

use crate::core::{AlignedDataset, SeriesIndex};

/// Fill region between two series, rendered between their stacked lines.
///
/// `series[0]` is the upper (smaller index) layer, `series[1]` the next
/// visible layer beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FillBand {
    pub series: [SeriesIndex; 2],
}

impl FillBand {
    #[must_use]
    pub const fn new(upper: SeriesIndex, lower: SeriesIndex) -> Self {
        Self {
            series: [upper, lower],
        }
    }

    #[must_use]
    pub const fn upper(self) -> SeriesIndex {
        self.series[0]
    }

    #[must_use]
    pub const fn lower(self) -> SeriesIndex {
        self.series[1]
    }
}

/// Stacked dataset together with the bands to fill between visible layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StackedResult {
    pub data: AlignedDataset,
    pub bands: Vec<FillBand>,
}

/// Stacks value series bottom-up and computes fill bands.
///
/// Series are accumulated from the highest index down to `1`: every series
/// not omitted adds its value (missing samples count as `0`) to a per-point
/// running sum and takes that sum as its output. Omitted series are copied
/// through untouched and never contribute to the running sum.
///
/// `omit` is queried at call time and may be called several times for the
/// same index; it must answer consistently within one call.
pub fn stack_series<F>(data: &AlignedDataset, mut omit: F) -> StackedResult
where
    F: FnMut(SeriesIndex) -> bool,
{
    let mut running = vec![0.0_f64; data.len()];
    let mut stacked: Vec<Vec<Option<f64>>> = vec![Vec::new(); data.series_count()];

    for (index, values) in data.iter_series().rev() {
        stacked[index - 1] = if omit(index) {
            values.to_vec()
        } else {
            values
                .iter()
                .zip(running.iter_mut())
                .map(|(value, sum)| {
                    *sum += value.unwrap_or(0.0);
                    Some(*sum)
                })
                .collect()
        };
    }

    let bands = visible_bands(data.series_count(), &mut omit);

    StackedResult {
        data: AlignedDataset::from_parts_unchecked(data.x().to_vec(), stacked),
        bands,
    }
}

/// Bands for a chart where nothing has been hidden yet: `[i, i + 1]` for
/// every adjacent pair.
#[must_use]
pub fn initial_stacked_bands(series_count: usize) -> Vec<FillBand> {
    (1..series_count)
        .map(|index| FillBand::new(index, index + 1))
        .collect()
}

// Pairs each visible series with the next visible one, searching forward
// past hidden layers. Hidden series never anchor a band.
fn visible_bands<F>(series_count: usize, omit: &mut F) -> Vec<FillBand>
where
    F: FnMut(SeriesIndex) -> bool,
{
    let mut bands = Vec::new();
    for index in 1..=series_count {
        if omit(index) {
            continue;
        }
        if let Some(next) = (index + 1..=series_count).find(|&candidate| !omit(candidate)) {
            bands.push(FillBand::new(index, next));
        }
    }
    bands
}
