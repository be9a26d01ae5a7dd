use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use datesift::{DateExtractor, ExtractionRules};

#[derive(Parser, Debug)]
#[command(name = "datesift")]
#[command(about = "Extract valid calendar dates from unstructured text")]
#[command(version)]
struct Args {
    /// Input text file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Emit a JSON report instead of one date per line
    #[arg(long)]
    json: bool,

    /// Also report date-shaped candidates that failed validation
    #[arg(long)]
    show_rejected: bool,
}

fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let text = match &args.input {
        Some(path) => {
            // WHY: validate input exists early to fail fast with a clear error
            if !path.exists() {
                anyhow::bail!("Input file does not exist: {}", path.display());
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let extractor = DateExtractor::new(ExtractionRules::default())?;
    let extraction = extractor.extract_with_diagnostics(&text);

    info!(
        accepted = extraction.accepted.len(),
        rejected = extraction.rejected.len(),
        "Extraction complete"
    );

    if args.json {
        let report = serde_json::json!({
            "accepted": extraction.accepted,
            "rejected": if args.show_rejected {
                Some(&extraction.rejected)
            } else {
                None
            },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for date in &extraction.accepted {
            println!("{}", date.render());
        }
        if args.show_rejected {
            for candidate in &extraction.rejected {
                eprintln!(
                    "rejected {:?} [{}..{}]: {}",
                    candidate.text, candidate.span.start, candidate.span.end, candidate.reason
                );
            }
        }
    }

    Ok(())
}
