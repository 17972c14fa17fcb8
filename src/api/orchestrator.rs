use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{ChartHandle, ChartHook, HookDisposer, HookEvent, HookRegistry};
use crate::core::{AlignedDataset, stack_series};

use super::session::StackingSession;
use super::{ApplyOutcome, StackingConfig, StackingDiagnostics};

/// Whether the orchestrator currently has hooks registered on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// Inputs of one orchestrator update.
#[derive(Clone, Copy)]
pub struct StackingParams<'a> {
    pub data: &'a AlignedDataset,
    pub config: StackingConfig,
    pub chart: Option<&'a dyn ChartHandle>,
}

impl<'a> StackingParams<'a> {
    #[must_use]
    pub fn new(data: &'a AlignedDataset, config: impl Into<StackingConfig>) -> Self {
        Self {
            data,
            config: config.into(),
            chart: None,
        }
    }

    #[must_use]
    pub fn with_chart(mut self, chart: &'a dyn ChartHandle) -> Self {
        self.chart = Some(chart);
        self
    }
}

struct HookBinding {
    set_data: HookDisposer,
    set_series: HookDisposer,
}

impl HookBinding {
    fn is_bound_to(&self, registry: &HookRegistry) -> bool {
        self.set_data.is_registered_with(registry)
    }

    fn dispose(self) {
        self.set_data.dispose();
        self.set_series.dispose();
    }
}

/// Keeps a chart's data stacked while series are shown and hidden.
///
/// Each [`update`](Self::update) caches the unstacked input, returns the
/// dataset to render for this cycle and, when stacking is enabled and a chart
/// is supplied, makes sure `SetData`/`SetSeries` hooks are registered on that
/// chart. Those hooks restack the cached input against the chart's live
/// visibility and write the result back, ignoring the `SetData` their own
/// write-back triggers.
///
/// Hooks are unregistered when stacking is disabled, when a different chart
/// is supplied (before the new one is bound), and when the orchestrator is
/// dropped.
pub struct StackingOrchestrator {
    session: Rc<StackingSession>,
    binding: Option<HookBinding>,
}

impl Default for StackingOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl StackingOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Rc::new(StackingSession::default()),
            binding: None,
        }
    }

    /// Caches the input, syncs hook registration and returns the dataset to
    /// render.
    ///
    /// Returns `data` unchanged when stacking is disabled or there is at most
    /// one value series; otherwise the fully visible stack.
    pub fn update(&mut self, params: StackingParams<'_>) -> AlignedDataset {
        let enabled = params.config.enabled;
        self.session
            .replace_source(enabled.then(|| params.data.clone()));

        match (enabled, params.chart) {
            (true, Some(chart)) => self.bind(chart.hooks()),
            _ => self.unbind(),
        }

        if !enabled || params.data.series_count() < 2 {
            return params.data.clone();
        }
        stack_series(params.data, |_| false).data
    }

    /// Restacks the cached source into `chart` on demand.
    ///
    /// Same routine the registered hooks run.
    pub fn recompute(&self, chart: &mut dyn ChartHandle) -> ApplyOutcome {
        self.session.apply_to_chart(chart)
    }

    /// Unregisters hooks from the bound chart, if any.
    pub fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.dispose();
            debug!("stacking hooks unbound");
        }
    }

    #[must_use]
    pub fn state(&self) -> BindingState {
        if self.binding.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    #[must_use]
    pub fn is_bound_to(&self, chart: &dyn ChartHandle) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.is_bound_to(chart.hooks()))
    }

    #[must_use]
    pub fn is_applying_update(&self) -> bool {
        self.session.is_applying_update()
    }

    #[must_use]
    pub fn has_unstacked_source(&self) -> bool {
        self.session.has_source()
    }

    #[must_use]
    pub fn diagnostics(&self) -> StackingDiagnostics {
        self.session.diagnostics()
    }

    fn bind(&mut self, registry: &HookRegistry) {
        if self
            .binding
            .as_ref()
            .is_some_and(|binding| binding.is_bound_to(registry))
        {
            return;
        }
        self.unbind();

        let session = Rc::downgrade(&self.session);
        let set_data = registry.add(ChartHook::SetData, move |chart, _event| {
            if let Some(session) = Weak::upgrade(&session) {
                session.on_data_changed(chart);
            }
        });

        let session = Rc::downgrade(&self.session);
        let set_series = registry.add(ChartHook::SetSeries, move |chart, event| {
            let HookEvent::SetSeries { change, .. } = event else {
                return;
            };
            if let Some(session) = Weak::upgrade(&session) {
                session.on_series_changed(chart, change);
            }
        });

        self.binding = Some(HookBinding {
            set_data,
            set_series,
        });
        debug!("stacking hooks bound");
    }
}
