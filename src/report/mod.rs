//! Report module - terminal summaries of a conversion

mod summary;

pub use summary::CalibrationSummary;
