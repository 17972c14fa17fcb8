use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Stacking options supplied by the host on every update.
///
/// Serializable so panel settings can persist it alongside the rest of the
/// chart setup; missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackingConfig {
    pub enabled: bool,
}

impl StackingConfig {
    #[must_use]
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize stacking config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse stacking config: {e}")))
    }
}

impl From<bool> for StackingConfig {
    fn from(enabled: bool) -> Self {
        Self { enabled }
    }
}
