use anyhow::Result;
use datahelp_application::ReportSessionUseCase;

use crate::render;

pub async fn list(usecase: &ReportSessionUseCase, search: Option<&str>) -> Result<()> {
    let reports = match search {
        Some(term) => usecase.search_history(term).await?,
        None => usecase.list_history().await?,
    };

    if reports.is_empty() {
        println!("📭 No saved reports.");
        return Ok(());
    }

    println!("🗂️  Saved reports ({}):", reports.len());
    for report in &reports {
        render::print_saved_line(report);
    }
    Ok(())
}

pub async fn show(usecase: &ReportSessionUseCase, id: &str) -> Result<()> {
    let report = usecase.open_saved_report(id).await?;
    render::print_report(&report.title, &report.report_data);
    Ok(())
}

pub async fn remove(usecase: &ReportSessionUseCase, id: &str) -> Result<()> {
    if usecase.delete_report(id).await? {
        println!("🗑️  Removed {}", id);
    } else {
        println!("No saved report with id {}", id);
    }
    Ok(())
}

pub async fn clear(usecase: &ReportSessionUseCase) -> Result<()> {
    usecase.clear_history().await?;
    println!("🧹 History cleared.");
    Ok(())
}
