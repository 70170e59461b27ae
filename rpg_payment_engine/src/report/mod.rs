//! # Payment report export
//!
//! The report is a single-sheet xlsx workbook listing every payment record, most recent first. It is rebuilt from
//! scratch whenever a record changes and overwrites the previous export atomically, so readers only ever see a
//! complete file.
mod error;
mod generator;
#[cfg(feature = "sqlite")]
mod hook;

pub use error::ReportError;
pub use generator::{read_report, ReportFile, ReportGenerator, REPORT_CONTENT_TYPE, REPORT_FILE_NAME};
#[cfg(feature = "sqlite")]
pub use hook::export_hook;
