//! derm-guidance: command-line entrypoint.

use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use derm_core::labels::{is_known_label, label_at};
use derm_guidance::apply_fallbacks;

#[derive(Parser)]
#[command(name = "derm-guidance", version, about = "Structured guidance for skin conditions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch guidance for a disease label and print it as JSON
    Guidance {
        /// Disease label, usually one of the classifier labels
        disease: String,
    },
    /// Parse a saved completion (file or stdin) without calling the API
    Parse {
        file: Option<PathBuf>,
    },
    /// List the classifier labels
    Labels,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up OPENROUTER_* settings from a local .env if present
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<String, Box<dyn Error>> {
    match command {
        Command::Guidance { disease } => {
            if !is_known_label(&disease) {
                tracing::warn!(disease = %disease, "Not a classifier label, querying anyway");
            }
            let service = derm_guidance::build_service()?;
            let record = service.get_guidance(&disease).await?;
            Ok(serde_json::to_string_pretty(&record)?)
        }
        Command::Parse { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            Ok(render_parsed(&text)?)
        }
        Command::Labels => Ok(render_labels()),
    }
}

/// Parse a completion, fill fallbacks and render the record as pretty JSON
fn render_parsed(text: &str) -> Result<String, serde_json::Error> {
    let mut record = derm_core::parse(text);
    for kind in record.empty_sections() {
        tracing::debug!(section = kind.title(), "Section missing from input");
    }
    apply_fallbacks(&mut record);
    serde_json::to_string_pretty(&record)
}

/// One `index<TAB>label` line per classifier output
fn render_labels() -> String {
    (0..)
        .map_while(|i| label_at(i).map(|label| format!("{}\t{}", i, label)))
        .collect::<Vec<_>>()
        .join("\n")
}
