//! Plain-text export of completed exchanges
//!
//! Each export writes one UTF-8 file named `qa_result_<YYYYMMDD_HHMMSS>.txt`
//! into the output directory:
//!
//! ```text
//! [Question]
//! <question text>
//!
//! [Answer]
//! <answer text>
//! ```
//!
//! The file name uses the export time with one-second resolution. Two
//! exports within the same second share a name and the later one replaces
//! the earlier file.

use crate::error::QaError;
use crate::session::QueryRecord;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Format of the timestamp embedded in export file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes query records to timestamped text files
#[derive(Debug, Clone)]
pub struct ResultExporter {
    output_dir: PathBuf,
}

impl ResultExporter {
    /// Create an exporter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory exports are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export a record, naming the file after the current local time
    ///
    /// # Errors
    ///
    /// Returns `QaError::Io` if the directory cannot be created or the
    /// file cannot be written
    pub fn export(&self, record: &QueryRecord) -> std::result::Result<PathBuf, QaError> {
        self.export_at(record, Local::now().naive_local())
    }

    /// Export a record, naming the file after `exported_at`
    pub fn export_at(
        &self,
        record: &QueryRecord,
        exported_at: NaiveDateTime,
    ) -> std::result::Result<PathBuf, QaError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(Self::file_name(exported_at));
        std::fs::write(&path, Self::render(record))?;

        tracing::info!("Exported answer to {}", path.display());
        Ok(path)
    }

    /// File name for an export made at `exported_at`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lexqa::export::ResultExporter;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
    /// assert_eq!(ResultExporter::file_name(at), "qa_result_20240102_030405.txt");
    /// ```
    pub fn file_name(exported_at: NaiveDateTime) -> String {
        format!("qa_result_{}.txt", exported_at.format(FILE_TIMESTAMP_FORMAT))
    }

    /// The document written for a record
    pub fn render(record: &QueryRecord) -> String {
        format!(
            "[Question]\n{}\n\n[Answer]\n{}\n",
            record.query(),
            record.response()
        )
    }
}
