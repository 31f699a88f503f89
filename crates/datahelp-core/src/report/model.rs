//! Report domain models.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::country::Country;

/// Requested reporting window.
///
/// Dates are ISO `YYYY-MM-DD` strings. No ordering between the two is
/// enforced here or in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// True when both ends are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.start_date.is_empty() && !self.end_date.is_empty()
    }
}

/// One labeled numeric point consumed by chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The report artifact produced by a successful build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub summary: String,
    pub key_events: Vec<String>,
    pub trends: Vec<String>,
    pub risks: Vec<String>,
    pub chart_data: Vec<ChartDataPoint>,
}

/// A built report as persisted in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    /// Time-ordered unique identifier (UUID v7).
    pub id: String,
    pub country: Country,
    pub date_range: DateRange,
    pub report_data: ReportData,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub title: String,
}

impl SavedReport {
    /// Creates a history record for a freshly built report.
    pub fn new(country: Country, date_range: DateRange, report_data: ReportData) -> Self {
        let title = Self::title_for(&country, &date_range);
        Self {
            id: Uuid::now_v7().to_string(),
            country,
            date_range,
            report_data,
            created_at: Utc::now().to_rfc3339(),
            title,
        }
    }

    /// `"<country name> Report - <start> to <end>"`
    pub fn title_for(country: &Country, date_range: &DateRange) -> String {
        format!(
            "{} Report - {} to {}",
            country.name, date_range.start_date, date_range.end_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ReportData {
        ReportData {
            summary: "Summary".to_string(),
            key_events: vec!["event".to_string()],
            trends: vec![],
            risks: vec![],
            chart_data: vec![ChartDataPoint {
                name: "Jan".to_string(),
                value: 42.0,
                date: None,
            }],
        }
    }

    #[test]
    fn test_title_derivation() {
        let report = SavedReport::new(
            Country::new("KE", "Kenya"),
            DateRange::new("2024-01-01", "2024-03-31"),
            sample_data(),
        );
        assert_eq!(report.title, "Kenya Report - 2024-01-01 to 2024-03-31");
        assert!(!report.id.is_empty());
    }

    #[test]
    fn test_ids_are_unique_for_rapid_builds() {
        let a = SavedReport::new(
            Country::new("KE", "Kenya"),
            DateRange::new("2024-01-01", "2024-03-31"),
            sample_data(),
        );
        let b = SavedReport::new(
            Country::new("KE", "Kenya"),
            DateRange::new("2024-01-01", "2024-03-31"),
            sample_data(),
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_date_range_completeness() {
        assert!(DateRange::new("2024-01-01", "2024-02-01").is_complete());
        assert!(!DateRange::new("", "2024-02-01").is_complete());
        assert!(!DateRange::new("2024-01-01", "").is_complete());
        // only the empty string counts as missing
        assert!(DateRange::new(" ", " ").is_complete());
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let report = SavedReport::new(
            Country::new("KE", "Kenya"),
            DateRange::new("2024-01-01", "2024-03-31"),
            sample_data(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("dateRange").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["reportData"].get("keyEvents").is_some());
        assert!(json["reportData"]["chartData"][0].get("date").is_none());
        assert_eq!(json["dateRange"]["startDate"], "2024-01-01");
    }
}
