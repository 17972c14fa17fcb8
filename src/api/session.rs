use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::chart::{ChartHandle, SeriesChange};
use crate::core::{AlignedDataset, stack_series};

use super::{ApplyOutcome, StackingDiagnostics};

/// State shared between the orchestrator and the hooks it registers.
///
/// Single-threaded by construction: hooks run on the thread that owns the
/// chart, and may re-enter through the chart's own `SetData` dispatch.
#[derive(Debug, Default)]
pub(crate) struct StackingSession {
    unstacked_source: RefCell<Option<Rc<AlignedDataset>>>,
    is_applying_update: Cell<bool>,
    diagnostics: Cell<StackingDiagnostics>,
}

impl StackingSession {
    pub(crate) fn replace_source(&self, source: Option<AlignedDataset>) {
        *self.unstacked_source.borrow_mut() = source.map(Rc::new);
    }

    pub(crate) fn has_source(&self) -> bool {
        self.unstacked_source.borrow().is_some()
    }

    pub(crate) fn is_applying_update(&self) -> bool {
        self.is_applying_update.get()
    }

    pub(crate) fn diagnostics(&self) -> StackingDiagnostics {
        self.diagnostics.get()
    }

    pub(crate) fn on_data_changed(&self, chart: &mut dyn ChartHandle) -> ApplyOutcome {
        if self.is_applying_update.get() {
            return self.skip(ApplyOutcome::SkippedReentrant);
        }
        self.apply_to_chart(chart)
    }

    pub(crate) fn on_series_changed(
        &self,
        chart: &mut dyn ChartHandle,
        change: SeriesChange,
    ) -> ApplyOutcome {
        if change.is_focus_change() {
            return self.skip(ApplyOutcome::SkippedFocusOnly);
        }
        self.apply_to_chart(chart)
    }

    /// Restacks the cached source against the chart's live visibility and
    /// writes the result back.
    pub(crate) fn apply_to_chart(&self, chart: &mut dyn ChartHandle) -> ApplyOutcome {
        let Some(source) = self.unstacked_source.borrow().clone() else {
            return self.skip(ApplyOutcome::SkippedInactive);
        };
        if self.is_applying_update.get() {
            return self.skip(ApplyOutcome::SkippedReentrant);
        }
        let chart_points = chart.data().len();
        if chart_points != source.len() {
            return self.skip(ApplyOutcome::SkippedShapeMismatch {
                source_points: source.len(),
                chart_points,
            });
        }

        let stacked = stack_series(&source, |index| !chart.is_series_shown(index));

        chart.clear_bands();
        for band in &stacked.bands {
            chart.add_band(*band);
        }
        let outcome = ApplyOutcome::Applied {
            bands: stacked.bands.len(),
        };

        {
            let _applying = ApplyingGuard::enter(&self.is_applying_update);
            chart.set_data(stacked.data);
        }

        debug!(
            series = source.series_count(),
            points = source.len(),
            bands = stacked.bands.len(),
            "applied stacked data to chart"
        );
        self.record(outcome);
        outcome
    }

    fn skip(&self, outcome: ApplyOutcome) -> ApplyOutcome {
        trace!(?outcome, "skipping stacking pass");
        self.record(outcome);
        outcome
    }

    fn record(&self, outcome: ApplyOutcome) {
        let mut diagnostics = self.diagnostics.get();
        diagnostics.record(outcome);
        self.diagnostics.set(diagnostics);
    }
}

// Clears the flag on scope exit, including unwinds out of `set_data`.
struct ApplyingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ApplyingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for ApplyingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
