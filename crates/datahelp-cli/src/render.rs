//! Plain-text report rendering.

use datahelp_core::report::{ReportData, SavedReport};

const BAR_WIDTH: f64 = 40.0;

pub fn print_report(title: &str, report: &ReportData) {
    println!();
    println!("📄 {}", title);
    println!();
    println!("📋 Executive Summary");
    println!("   {}", report.summary);

    print_list("📅 Key Events", &report.key_events);
    print_list("📈 Trends", &report.trends);
    print_list("⚠️  Risks", &report.risks);

    if !report.chart_data.is_empty() {
        println!();
        println!("📊 Monthly Indicators");
        let max = report
            .chart_data
            .iter()
            .map(|p| p.value)
            .fold(f64::MIN, f64::max)
            .max(1.0);
        for point in &report.chart_data {
            let width = ((point.value / max) * BAR_WIDTH).round() as usize;
            println!("   {:<4} {:>6.0} {}", point.name, point.value, "█".repeat(width));
        }
    }
    println!();
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", heading);
    for (i, item) in items.iter().enumerate() {
        println!("   {}. {}", i + 1, item);
    }
}

pub fn print_saved_line(report: &SavedReport) {
    println!("  {}  {}  (saved {})", report.id, report.title, report.created_at);
}
