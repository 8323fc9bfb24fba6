//! Report pipeline
//!
//! The business logic of one run: gate, fetch, format, resolve, send.

pub mod format;
pub mod gate;
pub mod recipients;
pub mod runner;
pub mod spreadsheet;
pub mod summary;

pub use gate::GateDecision;
pub use recipients::Recipients;
pub use runner::ReportRunner;
pub use summary::{RunOutcome, RunSummary};
