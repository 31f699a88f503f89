//! Mock report content.

use async_trait::async_trait;
use datahelp_core::country::Country;
use datahelp_core::error::Result;
use datahelp_core::report::{ChartDataPoint, DateRange, ReportData, ReportGenerator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

const MONTHS: [(&str, &str); 6] = [
    ("Jan", "2024-01-01"),
    ("Feb", "2024-02-01"),
    ("Mar", "2024-03-01"),
    ("Apr", "2024-04-01"),
    ("May", "2024-05-01"),
    ("Jun", "2024-06-01"),
];

const TRENDS: [&str; 5] = [
    "Gradual improvement in education access indicators",
    "Healthcare infrastructure showing positive development",
    "Economic stability remains a concern in certain regions",
    "Technology adoption increasing among youth populations",
    "Environmental sustainability initiatives gaining momentum",
];

const RISKS: [&str; 5] = [
    "Political instability may affect ongoing development programs",
    "Economic volatility could impact funding availability",
    "Climate change continues to pose significant challenges",
    "Resource constraints may limit program expansion",
    "Security concerns in certain regions affecting aid delivery",
];

/// Template text plus random monthly indicator values in `20..=120`.
pub struct MockReportGenerator {
    rng: Mutex<StdRng>,
}

impl MockReportGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic chart values for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportGenerator for MockReportGenerator {
    async fn generate(&self, country: &Country, date_range: &DateRange) -> Result<ReportData> {
        let chart_data: Vec<ChartDataPoint> = {
            let mut rng = self.rng.lock().await;
            MONTHS
                .iter()
                .map(|(name, date)| ChartDataPoint {
                    name: name.to_string(),
                    value: f64::from(rng.gen_range(20u32..=120)),
                    date: Some(date.to_string()),
                })
                .collect()
        };

        tracing::debug!(country = %country.code, "[MockReportGenerator] Generated report content");

        Ok(ReportData {
            summary: format!(
                "This report provides an analysis of humanitarian and development indicators for {} from {} to {}. \
                 The data shows significant variations in key metrics, with particular attention to economic \
                 stability, social development, and humanitarian needs.",
                country.name, date_range.start_date, date_range.end_date
            ),
            key_events: vec![
                format!(
                    "Major policy changes announced in {} affecting development priorities",
                    country.name
                ),
                "International aid programs launched targeting vulnerable populations".to_string(),
                "Economic indicators show mixed results with some sectors improving".to_string(),
                "New partnerships established with local NGOs and government agencies".to_string(),
                "Climate-related challenges continue to impact rural communities".to_string(),
            ],
            trends: TRENDS.iter().map(|s| s.to_string()).collect(),
            risks: RISKS.iter().map(|s| s.to_string()).collect(),
            chart_data,
        })
    }
}
