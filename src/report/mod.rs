//! Final report assembly

mod builder;
mod types;

pub use builder::{confidence_notes, limitations, overall_risk, Degradation, ReportBuilder};
pub use types::Report;
