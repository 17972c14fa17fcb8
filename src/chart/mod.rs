//! Capability surface the stacking pipeline needs from a live chart.

mod headless;
mod hooks;

pub use headless::HeadlessChart;
pub use hooks::{
    ChartHook, HookCallback, HookDisposer, HookEvent, HookId, HookRegistry, SeriesChange,
};

use serde::{Deserialize, Serialize};

use crate::core::{AlignedDataset, FillBand, SeriesIndex};

/// Display state of one chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesState {
    pub label: String,
    pub show: bool,
    #[serde(default)]
    pub focused: bool,
}

impl SeriesState {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            show: true,
            focused: false,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Mutable plotting engine driven by the stacking orchestrator.
///
/// `series()` is index-aligned with the dataset rows; entry `0` stands for
/// the x-axis and is ignored. Implementations must dispatch
/// [`ChartHook::SetData`] synchronously from `set_data`, before returning.
pub trait ChartHandle {
    fn data(&self) -> &AlignedDataset;

    fn series(&self) -> &[SeriesState];

    fn set_data(&mut self, data: AlignedDataset);

    fn add_band(&mut self, band: FillBand);

    /// Removes every band currently attached to the chart.
    fn clear_bands(&mut self);

    fn hooks(&self) -> &HookRegistry;

    /// Series the chart does not know about count as shown.
    fn is_series_shown(&self, index: SeriesIndex) -> bool {
        self.series().get(index).is_none_or(|state| state.show)
    }
}
