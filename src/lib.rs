//! chart-stack: stacked-series pipeline for time-series bar charts.
//!
//! The crate splits into a pure stacking engine (`core`), the capability
//! surface it needs from a live chart (`chart`), and the orchestrator that
//! keeps a chart's data in sync with the stack as series are toggled (`api`).

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{StackingConfig, StackingOrchestrator};
pub use error::{ChartError, ChartResult};
