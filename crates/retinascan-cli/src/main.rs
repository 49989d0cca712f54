mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use retinascan_client::{PredictClient, ScreeningSession};
use retinascan_core::AnalysisResult;
use retinascan_store::ResultStore;

/// Diabetic-retinopathy screening client.
///
/// Submits retinal fundus images to the inference service and keeps the
/// graded results locally for review.
#[derive(Parser, Debug)]
#[command(name = "retinascan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the inference service.
    #[arg(
        long,
        global = true,
        env = "RETINASCAN_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    /// Directory holding persisted analysis results.
    #[arg(
        long,
        global = true,
        env = "RETINASCAN_DATA_DIR",
        default_value = ".retinascan"
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a fundus image for grading (JPEG, PNG, or TIFF, max 10 MiB)
    Submit {
        /// Path to the image file
        image: PathBuf,

        /// Patient identifier to attach to the result
        #[arg(long)]
        patient: Option<String>,
    },

    /// Show a stored analysis result
    Show {
        /// Result id
        id: String,
    },

    /// List the analyses from this session, newest first
    History {
        /// Only show results with this grade (0-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        grade: Option<u8>,

        /// Only show results whose patient id contains this text
        #[arg(long)]
        patient: Option<String>,
    },

    /// Delete a stored analysis result
    Delete {
        /// Result id
        id: String,
    },

    /// Check that the inference service is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::info!("retinascan v{}", env!("CARGO_PKG_VERSION"));

    let client = PredictClient::new(cli.api_url);
    let store = ResultStore::open(&cli.data_dir)
        .with_context(|| format!("opening result store at {}", cli.data_dir.display()))?;
    let mut session = ScreeningSession::new(client, store);

    match cli.command {
        Commands::Submit { image, patient } => {
            let id = session
                .submit(&image, patient)
                .await
                .context("Failed to upload image. Please try again.")?;
            let record = session.result(&id)?;
            display::print_result_card(&record);
            println!();
            println!("Saved as {id}. View again with: retinascan show {id}");
        }
        Commands::Show { id } => {
            let record = session
                .result(&id)
                .context("Failed to load analysis results. Please try again.")?;
            display::print_result_card(&record);
        }
        Commands::History { grade, patient } => {
            let query = patient.map(|p| p.to_lowercase());
            let results: Vec<AnalysisResult> = session
                .history()
                .iter()
                .filter(|r| grade.is_none_or(|g| r.grade.number() == g))
                .filter(|r| {
                    query.as_deref().is_none_or(|q| {
                        r.patient_id
                            .as_deref()
                            .is_some_and(|p| p.to_lowercase().contains(q))
                    })
                })
                .cloned()
                .collect();
            display::print_history(&results);
        }
        Commands::Delete { id } => {
            session
                .delete(&id)
                .context("Failed to delete analysis.")?;
            println!("Deleted analysis {id}.");
        }
        Commands::Health => {
            let report = session
                .health()
                .await
                .context("Inference service is unreachable.")?;
            match report.backend.as_deref() {
                Some(backend) => println!("Service status: {} ({backend})", report.status),
                None => println!("Service status: {}", report.status),
            }
        }
    }

    Ok(())
}
