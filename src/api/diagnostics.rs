use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const STACKING_DIAGNOSTICS_JSON_SCHEMA_V1: u32 = 1;

/// Result of one attempt to push a recomputed stack into a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    Applied {
        bands: usize,
    },
    /// Stacking is disabled; there is no unstacked source to work from.
    SkippedInactive,
    /// A write-back is already in progress.
    SkippedReentrant,
    /// The chart's x-axis no longer matches the unstacked source.
    SkippedShapeMismatch {
        source_points: usize,
        chart_points: usize,
    },
    /// Hover/focus change; visibility did not change.
    SkippedFocusOnly,
}

impl ApplyOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Counters describing how chart-originated restack requests were handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StackingDiagnostics {
    pub applied: u64,
    pub skipped_inactive: u64,
    pub skipped_reentrant: u64,
    pub skipped_shape_mismatch: u64,
    pub skipped_focus_only: u64,
}

impl StackingDiagnostics {
    pub fn record(&mut self, outcome: ApplyOutcome) {
        let counter = match outcome {
            ApplyOutcome::Applied { .. } => &mut self.applied,
            ApplyOutcome::SkippedInactive => &mut self.skipped_inactive,
            ApplyOutcome::SkippedReentrant => &mut self.skipped_reentrant,
            ApplyOutcome::SkippedShapeMismatch { .. } => &mut self.skipped_shape_mismatch,
            ApplyOutcome::SkippedFocusOnly => &mut self.skipped_focus_only,
        };
        *counter = counter.saturating_add(1);
    }

    #[must_use]
    pub fn skipped(self) -> u64 {
        self.skipped_inactive
            + self.skipped_reentrant
            + self.skipped_shape_mismatch
            + self.skipped_focus_only
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackingDiagnosticsJsonContractV1 {
    pub schema_version: u32,
    pub diagnostics: StackingDiagnostics,
}

impl StackingDiagnostics {
    pub fn to_json_contract_v1_pretty(self) -> ChartResult<String> {
        let payload = StackingDiagnosticsJsonContractV1 {
            schema_version: STACKING_DIAGNOSTICS_JSON_SCHEMA_V1,
            diagnostics: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize stacking diagnostics contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare diagnostics object or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(diagnostics) = serde_json::from_str::<StackingDiagnostics>(input) {
            return Ok(diagnostics);
        }
        let payload: StackingDiagnosticsJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse diagnostics json payload: {e}"))
            })?;
        if payload.schema_version != STACKING_DIAGNOSTICS_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported stacking diagnostics schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.diagnostics)
    }
}
