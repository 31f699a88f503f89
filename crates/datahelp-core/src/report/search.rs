//! History search.

use super::model::SavedReport;

/// Filters reports by a free-text term.
///
/// Matches case-insensitively against the country name, the title and both
/// date strings. A blank term returns every report, order preserved.
pub fn filter_reports(reports: &[SavedReport], term: &str) -> Vec<SavedReport> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return reports.to_vec();
    }

    reports
        .iter()
        .filter(|report| matches_term(report, &needle))
        .cloned()
        .collect()
}

fn matches_term(report: &SavedReport, needle: &str) -> bool {
    report.country.name.to_lowercase().contains(needle)
        || report.title.to_lowercase().contains(needle)
        || report.date_range.start_date.to_lowercase().contains(needle)
        || report.date_range.end_date.to_lowercase().contains(needle)
}
