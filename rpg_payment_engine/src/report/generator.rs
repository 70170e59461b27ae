use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::*;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::NamedTempFile;

use crate::{db_types::PaymentRecord, report::ReportError, traits::PaymentRecordStore};

/// The name the report is downloaded as, wherever it is stored.
pub const REPORT_FILE_NAME: &str = "payments_report.xlsx";
pub const REPORT_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Payments";
const COLUMNS: [(&str, f64); 9] = [
    ("ID", 8.0),
    ("Order ID", 28.0),
    ("Payment ID", 28.0),
    ("Amount", 14.0),
    ("Status", 12.0),
    ("Name", 18.0),
    ("Email", 25.0),
    ("Contact", 18.0),
    ("Created At", 22.0),
];

/// Rebuilds the payments report from a [`PaymentRecordStore`].
#[derive(Clone)]
pub struct ReportGenerator<B> {
    store: B,
    path: PathBuf,
}

impl<B: PaymentRecordStore> ReportGenerator<B> {
    pub fn new<P: Into<PathBuf>>(store: B, path: P) -> Self {
        Self { store, path: path.into() }
    }

    /// Reads every record and replaces the report file. Returns the path that was written.
    pub async fn regenerate(&self) -> Result<PathBuf, ReportError> {
        let records = self.store.fetch_all_records().await?;
        let count = records.len();
        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || write_report(&records, &path).map(|_| path))
            .await
            .map_err(|e| ReportError::Join(e.to_string()))??;
        info!("📊️ Payment report with {count} record(s) written to {}", written.display());
        Ok(written)
    }
}

/// The bytes of an existing report, ready to be sent to a client.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub contents: Vec<u8>,
}

/// Loads the last report written to `path`. Fails with [`ReportError::NotGenerated`] if there isn't one.
pub async fn read_report(path: &Path) -> Result<ReportFile, ReportError> {
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(ReportFile { file_name: REPORT_FILE_NAME, content_type: REPORT_CONTENT_TYPE, contents }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReportError::NotGenerated(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}

fn build_workbook(records: &[PaymentRecord]) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("0.00");
    for (col, (title, width)) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &bold)?;
        sheet.set_column_width(col, width)?;
    }
    for (row, record) in (1u32..).zip(records) {
        #[allow(clippy::cast_precision_loss)]
        sheet.write_number(row, 0, record.id as f64)?;
        sheet.write_string(row, 1, record.order_id.as_str())?;
        sheet.write_number_with_format(row, 3, record.amount.to_major(), &money)?;
        sheet.write_string(row, 4, record.status.to_string())?;
        sheet.write_string(row, 8, record.created_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
        // Missing values are left as blank cells
        let optional = [
            (2, &record.payment_id),
            (5, &record.customer_name),
            (6, &record.customer_email),
            (7, &record.customer_contact),
        ];
        for (col, value) in optional {
            if let Some(value) = value {
                sheet.write_string(row, col, value)?;
            }
        }
    }
    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// Writes to a temporary file next to `path`, then renames it over `path`.
fn write_report(records: &[PaymentRecord], path: &Path) -> Result<(), ReportError> {
    let buffer = build_workbook(records)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(&buffer)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    trace!("📊️ {} bytes written to {}", buffer.len(), path.display());
    Ok(())
}
