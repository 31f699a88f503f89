use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use datahelp_application::ReportSessionUseCase;
use datahelp_core::country;
use datahelp_core::download::DownloadFormat;
use datahelp_core::report::DateRange;
use datahelp_core::session::AppSession;
use tokio_util::sync::CancellationToken;

use crate::render;

pub async fn run(
    usecase: &ReportSessionUseCase,
    app_title: &str,
    country_code: &str,
    start: &str,
    end: &str,
    download: Option<DownloadFormat>,
) -> Result<()> {
    let Some(country) = country::find_by_code(country_code) else {
        bail!(
            "Unknown country code '{}'. Run `datahelp countries` to see the list.",
            country_code
        );
    };

    usecase.select_country(country.clone()).await;
    usecase.select_date_range(DateRange::new(start, end)).await;

    println!("🔨 [{}] Building report for {}...", app_title, country.name);

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let build = usecase.build_report(&cancel);
    tokio::pin!(build);
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut printed = 0;
    let outcome = loop {
        tokio::select! {
            outcome = &mut build => break outcome,
            _ = ticker.tick() => {
                printed = print_new_steps(&usecase.snapshot().await, printed);
            }
        }
    };
    ctrl_c.abort();

    let session = usecase.snapshot().await;
    let saved = match outcome {
        Ok(saved) => {
            print_new_steps(&session, printed);
            saved
        }
        Err(e) if e.is_cancelled() => {
            if let Some(message) = session.error().message() {
                println!("🛑 {}", message);
            }
            return Ok(());
        }
        Err(e) => {
            if let Some(message) = session.error().message() {
                eprintln!("❌ {}", message);
            }
            return Err(anyhow!(e));
        }
    };

    render::print_report(&saved.title, &saved.report_data);
    if let Some(message) = session.error().message() {
        eprintln!("⚠️  {}", message);
    } else {
        println!("💾 Saved to history as {}", saved.id);
    }

    if let Some(format) = download {
        match usecase.download(format).await {
            Ok(receipt) => {
                println!("📥 {}", receipt.message);
                println!("   {} ({})", receipt.file_name, receipt.format.mime_type());
            }
            Err(e) => {
                if let Some(message) = usecase.snapshot().await.error().message() {
                    eprintln!("❌ {}", message);
                }
                return Err(anyhow!(e));
            }
        }
    }

    Ok(())
}

/// Prints steps completed since the last call; returns the new count.
fn print_new_steps(session: &AppSession, printed: usize) -> usize {
    let completed: Vec<_> = session
        .progress()
        .steps()
        .iter()
        .filter(|step| step.completed)
        .collect();
    for step in completed.iter().skip(printed) {
        println!("  ✅ {}", step.label);
    }
    completed.len().max(printed)
}
