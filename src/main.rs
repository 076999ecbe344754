use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contract_review::model::{Config, Document};
use contract_review::report::{self, ReviewReport};
use contract_review::service::{ContractService, LlmClient};

const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Debug, Parser)]
#[command(
    name = "contract-review",
    version,
    about = "LLM-based contract analysis and risk review"
)]
struct Cli {
    /// Contract document to review (pdf, docx, or txt)
    input: PathBuf,

    /// Directory the JSON and Markdown artifacts are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let api_key = std::env::var(ENV_OPENAI_API_KEY).context("OPENAI_API_KEY is not set")?;

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let name = cli
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("contract")
        .to_string();
    let document = Document::from_bytes(name, bytes)?;

    let analysis_model = Arc::new(LlmClient::for_analysis(&api_key, &config.llm)?);
    let review_model = Arc::new(LlmClient::for_review(&api_key, &config.llm)?);
    let service = ContractService::new(analysis_model, review_model);

    let review = service.review_document(&document).await?;

    let report = ReviewReport::new(&document, &review, chrono::Utc::now());
    let markdown = report::to_markdown(
        &review.text,
        Some(&format!("Contract Analysis: {}", document.name)),
    );

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");

    let json_path = cli.out_dir.join(format!("{stem}_review.json"));
    fs::write(&json_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let md_path = cli.out_dir.join(format!("{stem}.md"));
    fs::write(&md_path, markdown)
        .with_context(|| format!("failed to write {}", md_path.display()))?;

    tracing::info!(
        json = %json_path.display(),
        markdown = %md_path.display(),
        contract_type = %report.contract_analysis.contract_type,
        total_risks = report.summary.total_risks,
        high = report.summary.high_risk_count,
        medium = report.summary.medium_risk_count,
        low = report.summary.low_risk_count,
        "Contract review artifacts written"
    );

    Ok(())
}
