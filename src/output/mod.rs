//! Output module
//! Report assembly, highlighting and formatting

pub mod formatter;
pub mod highlighter;
pub mod report;

pub use formatter::{ReportGenerator, save_report_to_file, suggest_filename};
pub use report::{MatchReport, ReportContext};
