use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use datahelp_core::download::DownloadFormat;
use datahelp_infrastructure::{ConfigService, DataHelpPaths};

mod commands;
mod context;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "datahelp")]
#[command(about = "DataHelp - country reports for NGO data helpers", long_about = None)]
struct Cli {
    /// Store records under this directory instead of the platform data dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries reports can be built for
    Countries,
    /// Build a report for a country and date range
    Build {
        /// Country code, e.g. KE
        #[arg(long)]
        country: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Export the finished report (pdf or docx)
        #[arg(long)]
        download: Option<DownloadFormat>,
    },
    /// Browse and manage saved reports
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change the interface language
    Language {
        #[command(subcommand)]
        action: Option<LanguageAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved reports
    List {
        /// Filter by country name, title or date
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one saved report
    Show { id: String },
    /// Delete one saved report
    Remove { id: String },
    /// Delete all saved reports
    Clear,
}

#[derive(Subcommand)]
enum LanguageAction {
    /// Print the current language
    Get,
    /// Change the language (en, es, fr, ar)
    Set { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(DataHelpPaths::new(None));
    let config = config_service.load()?;
    logging::init(config.debug);
    if let Err(e) = config_service.ensure_file() {
        tracing::warn!("[Main] Could not write default configuration: {}", e);
    }

    let data_dir = cli.data_dir.clone().or_else(|| config.data_dir.clone());
    let paths = DataHelpPaths::new(None).with_data_dir(data_dir);

    if let Commands::Countries = cli.command {
        commands::countries::run();
        return Ok(());
    }

    let usecase = context::build_usecase(&config, &paths).await?;

    match cli.command {
        Commands::Countries => {}
        Commands::Build {
            country,
            start,
            end,
            download,
        } => {
            commands::build::run(&usecase, &config.app_title, &country, &start, &end, download)
                .await?
        }
        Commands::History { action } => match action {
            HistoryAction::List { search } => {
                commands::history::list(&usecase, search.as_deref()).await?
            }
            HistoryAction::Show { id } => commands::history::show(&usecase, &id).await?,
            HistoryAction::Remove { id } => commands::history::remove(&usecase, &id).await?,
            HistoryAction::Clear => commands::history::clear(&usecase).await?,
        },
        Commands::Language { action } => match action {
            None | Some(LanguageAction::Get) => commands::language::get(&usecase).await,
            Some(LanguageAction::Set { code }) => commands::language::set(&usecase, &code).await?,
        },
    }

    Ok(())
}
