use tracing::trace;

use crate::chart::{ChartHandle, HookEvent, HookRegistry, SeriesChange, SeriesState};
use crate::core::{AlignedDataset, FillBand, SeriesIndex};
use crate::error::{ChartError, ChartResult};

/// In-memory chart model without a renderer.
///
/// Keeps the dataset, per-series display state, fill bands and hook table
/// the way a plotting engine would, and dispatches hooks synchronously. Used
/// by headless hosts, tests and benches.
#[derive(Debug)]
pub struct HeadlessChart {
    data: AlignedDataset,
    series: Vec<SeriesState>,
    bands: Vec<FillBand>,
    hooks: HookRegistry,
}

impl HeadlessChart {
    #[must_use]
    pub fn new(data: AlignedDataset) -> Self {
        let mut chart = Self {
            data,
            series: vec![SeriesState::new("x")],
            bands: Vec::new(),
            hooks: HookRegistry::new(),
        };
        chart.sync_series_states();
        chart
    }

    #[must_use]
    pub fn bands(&self) -> &[FillBand] {
        &self.bands
    }

    /// Applies display options to a value series and fires `SetSeries` hooks.
    pub fn set_series(&mut self, index: SeriesIndex, change: SeriesChange) -> ChartResult<()> {
        if index == 0 || index >= self.series.len() {
            return Err(ChartError::InvalidData(format!(
                "series index {index} out of range 1..{}",
                self.series.len()
            )));
        }
        let state = &mut self.series[index];
        if let Some(show) = change.show {
            state.show = show;
        }
        if let Some(focus) = change.focus {
            state.focused = focus;
        }
        trace!(index, ?change, "set series");

        let hooks = self.hooks.clone();
        hooks.dispatch(self, HookEvent::SetSeries { index, change });
        Ok(())
    }

    fn sync_series_states(&mut self) {
        let rows = self.data.row_count();
        if self.series.len() > rows {
            self.series.truncate(rows);
        }
        while self.series.len() < rows {
            let index = self.series.len();
            self.series.push(SeriesState::new(format!("series-{index}")));
        }
    }
}

impl ChartHandle for HeadlessChart {
    fn data(&self) -> &AlignedDataset {
        &self.data
    }

    fn series(&self) -> &[SeriesState] {
        &self.series
    }

    fn set_data(&mut self, data: AlignedDataset) {
        self.data = data;
        self.sync_series_states();
        trace!(points = self.data.len(), "set chart data");

        let hooks = self.hooks.clone();
        hooks.dispatch(self, HookEvent::SetData);
    }

    fn add_band(&mut self, band: FillBand) {
        self.bands.push(band);
    }

    fn clear_bands(&mut self) {
        self.bands.clear();
    }

    fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }
}
