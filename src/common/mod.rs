//! Shared infrastructure for the analysis and visualization stages

pub mod histogram;
pub mod plots;

pub use plots::PlotError;
