//! Report download trigger.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use crate::country::Country;
use crate::i18n::MessageKey;
use crate::report::{DateRange, ReportData};

/// Export formats offered on the preview screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DownloadFormat {
    #[default]
    Pdf,
    Docx,
}

impl DownloadFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DownloadFormat::Pdf => "application/pdf",
            DownloadFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(&self) -> &str {
        self.as_ref()
    }

    /// Upper-case label used in user-facing messages ("PDF", "DOCX").
    pub fn label(&self) -> String {
        self.as_ref().to_uppercase()
    }
}

/// Everything the download trigger needs to export one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub country: Country,
    pub date_range: DateRange,
    pub report_data: ReportData,
    pub format: DownloadFormat,
}

impl DownloadRequest {
    /// `NGO_Report_<Country_Name>_<start>_to_<end>.<ext>`
    pub fn file_name(&self) -> String {
        format!(
            "NGO_Report_{}_{}_to_{}.{}",
            self.country.name.replace(' ', "_"),
            self.date_range.start_date,
            self.date_range.end_date,
            self.format.extension()
        )
    }
}

/// Acknowledgement returned by a completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReceipt {
    pub format: DownloadFormat,
    pub file_name: String,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("no report available to download")]
    NoReport,

    #[error("download failed: {0}")]
    Failed(String),
}

impl DownloadError {
    pub fn message_key(&self) -> MessageKey {
        MessageKey::ErrorDownload
    }
}

/// Exports a built report.
#[async_trait]
pub trait ReportDownloader: Send + Sync {
    /// Starts the export for `request`, translating messages into `language`.
    async fn download(
        &self,
        request: &DownloadRequest,
        language: &str,
    ) -> Result<DownloadReceipt, DownloadError>;
}
