use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::traits::PaymentRecordStoreError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Could not read payment records for the report. {0}")]
    Storage(#[from] PaymentRecordStoreError),
    #[error("Could not build the workbook. {0}")]
    Xlsx(#[from] XlsxError),
    #[error("Could not write the report file. {0}")]
    Io(#[from] std::io::Error),
    #[error("The report task did not complete. {0}")]
    Join(String),
    #[error("No report has been generated yet at {0}")]
    NotGenerated(PathBuf),
}
