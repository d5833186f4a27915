use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobsentry_application::Dashboard;
use jobsentry_infrastructure::{ConfigService, EnvOverrides};
use jobsentry_interaction::HttpInsightsClient;

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "jobsentry")]
#[command(about = "JobSentry - spot fake job postings and plan your next role", long_about = None)]
struct Cli {
    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a job posting for signs of fraud
    Detect {
        /// Job description text
        #[arg(required_unless_present = "file")]
        text: Option<String>,
        /// Read the job description from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Search genuine listings for a role
    Alternatives {
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Generate a preparation roadmap
    Roadmap {
        #[arg(long)]
        job_title: String,
        /// Available preparation time, e.g. "3 months"
        #[arg(long)]
        time: String,
    },
    /// Upload a PDF résumé and get suggested roles
    Resume { path: PathBuf },
    /// Talk to the career assistant
    Chat,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new();
    let mut config = config_service.effective(&EnvOverrides::from_env())?;
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    let log_dir = config_service.paths().log_dir().ok();
    let _guard = logging::init(&config.logging, log_dir.as_deref())?;

    let service = match &cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => commands::config::show(&config_service, &config),
                ConfigAction::Init => commands::config::init(&config_service),
            };
        }
        _ => Arc::new(HttpInsightsClient::from_config(&config.backend)?),
    };
    let mut dashboard = Dashboard::new(service);

    match cli.command {
        Commands::Detect { text, file } => {
            commands::detect::run(&mut dashboard, text, file).await?
        }
        Commands::Alternatives { role, location } => {
            commands::alternatives::run(&mut dashboard, role, location).await?
        }
        Commands::Roadmap { job_title, time } => {
            commands::roadmap::run(&mut dashboard, job_title, time).await?
        }
        Commands::Resume { path } => commands::resume::run(&mut dashboard, &path).await?,
        Commands::Chat => commands::chat::run(&mut dashboard).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
