mod config;
mod diagnostics;
mod orchestrator;
mod session;

pub use config::StackingConfig;
pub use diagnostics::{
    ApplyOutcome, STACKING_DIAGNOSTICS_JSON_SCHEMA_V1, StackingDiagnostics,
    StackingDiagnosticsJsonContractV1,
};
pub use orchestrator::{BindingState, StackingOrchestrator, StackingParams};
