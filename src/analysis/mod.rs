//! Statistical reduction of counter telemetry into percentile reports

pub mod percentiles;
pub mod report;

pub use report::{generate_reports, ReportError};
