//! Output module for batch summaries and reports
//!
//! This module handles:
//! - Tallying summary counters over a batch
//! - Rendering a plain-text report

mod report;
mod summary;

pub use report::{print_report, render_report};
pub use summary::BatchSummary;
