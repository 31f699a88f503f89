//! Mock report export.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use datahelp_core::download::{DownloadError, DownloadReceipt, DownloadRequest, ReportDownloader};
use datahelp_core::i18n::{MessageKey, Translator};

/// Waits a bounded delay, then acknowledges the export without writing
/// anything.
pub struct MockReportDownloader {
    delay: Duration,
    translator: Arc<dyn Translator>,
}

impl MockReportDownloader {
    pub fn new(delay: Duration, translator: Arc<dyn Translator>) -> Self {
        Self { delay, translator }
    }
}

#[async_trait]
impl ReportDownloader for MockReportDownloader {
    async fn download(
        &self,
        request: &DownloadRequest,
        language: &str,
    ) -> Result<DownloadReceipt, DownloadError> {
        tokio::time::sleep(self.delay).await;

        let file_name = request.file_name();
        let message = format!(
            "{} {} report... ({})",
            self.translator.message(language, MessageKey::Downloading),
            request.format.label(),
            self.translator.message(language, MessageKey::MockDownload),
        );
        tracing::info!(
            format = %request.format,
            file_name = %file_name,
            "[MockReportDownloader] Download acknowledged"
        );

        Ok(DownloadReceipt {
            format: request.format,
            file_name,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datahelp_core::country::Country;
    use datahelp_core::download::DownloadFormat;
    use datahelp_core::i18n::TranslationTable;
    use datahelp_core::report::{DateRange, ReportData};

    fn request(format: DownloadFormat) -> DownloadRequest {
        DownloadRequest {
            country: Country::new("KE", "Kenya"),
            date_range: DateRange::new("2024-01-01", "2024-03-31"),
            report_data: ReportData {
                summary: "s".to_string(),
                key_events: vec![],
                trends: vec![],
                risks: vec![],
                chart_data: vec![],
            },
            format,
        }
    }

    fn downloader() -> MockReportDownloader {
        MockReportDownloader::new(Duration::from_millis(1), Arc::new(TranslationTable::builtin()))
    }

    #[tokio::test]
    async fn test_english_acknowledgement() {
        let receipt = downloader()
            .download(&request(DownloadFormat::Pdf), "en")
            .await
            .unwrap();
        assert_eq!(receipt.message, "Downloading PDF report... (This is a mock download)");
        assert_eq!(receipt.file_name, "NGO_Report_Kenya_2024-01-01_to_2024-03-31.pdf");
    }

    #[tokio::test]
    async fn test_localized_acknowledgement() {
        let receipt = downloader()
            .download(&request(DownloadFormat::Docx), "es")
            .await
            .unwrap();
        assert_eq!(receipt.format, DownloadFormat::Docx);
        assert!(receipt.message.starts_with("Descargando DOCX"));
        assert!(receipt.message.contains("Esta es una descarga simulada"));
    }
}
