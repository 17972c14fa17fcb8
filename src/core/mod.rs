pub mod dataset;
pub mod stacking;

pub use dataset::{AlignedDataset, SeriesIndex};
pub use stacking::{FillBand, StackedResult, initial_stacked_bands, stack_series};
