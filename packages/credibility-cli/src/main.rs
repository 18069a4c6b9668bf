//! credcheck - score a news article or text for reliability.
//!
//! Reads text from a file or stdin, or fetches it from `--url`, runs it
//! through the engine with the built-in backends and prints the verdict.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use credibility::backends::{HeuristicNlp, HttpClassifier, HttpFetcher, KeywordClassifier, LexiconSentiment};
use credibility::credentials::ClassifierCredentials;
use credibility::{
    AnalysisReport, AnalysisRequest, AnalysisResult, ArticleMetadata, Engine, EngineConfig,
    ReputationTable, TextClassifier, VerificationStatus,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "credcheck", version, about = "Score news text for reliability")]
struct Args {
    /// Article URL. Fetched unless --file supplies the text.
    #[arg(long)]
    url: Option<String>,

    /// Read the text from a file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Headline, used by the clickbait signal.
    #[arg(long)]
    title: Option<String>,

    /// JSON object of domain -> score, merged over the built-in table.
    #[arg(long, env = "CREDIBILITY_REPUTATION_PATH")]
    reputation: Option<PathBuf>,

    /// Print percentages instead of the full result.
    #[arg(long)]
    report: bool,

    /// Print a human-readable summary instead of JSON.
    #[arg(long, conflicts_with = "report")]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,credibility=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let args = Args::parse();
    let engine = build_engine(&args)?;

    let result = match (&args.url, &args.file) {
        (Some(url), None) => {
            tracing::info!(url = %url, "Fetching article");
            engine
                .analyze_url(&HttpFetcher::new(), url)
                .await
                .with_context(|| format!("Failed to analyze {}", url))?
        }
        (url, file) => {
            let text = read_text(file.as_ref())?;
            let request = match url {
                Some(url) => AnalysisRequest::article(text, url.clone()),
                None => AnalysisRequest::text(text),
            };
            let metadata = args
                .title
                .as_ref()
                .map(|title| ArticleMetadata::new().with_title(title.clone()));
            engine
                .analyze(&request, metadata.as_ref())
                .await
                .context("Failed to analyze text")?
        }
    };

    if args.summary {
        print_summary(&result);
    } else if args.report {
        println!("{}", serde_json::to_string_pretty(&AnalysisReport::from(&result))?);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn build_engine(args: &Args) -> Result<Engine> {
    let config = EngineConfig::from_env().context("Invalid engine configuration")?;

    let reputation = ReputationTable::default();
    if let Some(path) = &args.reputation {
        let merged = reputation
            .merge_json_file(path)
            .with_context(|| format!("Failed to load reputation table {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = merged, "Reputation table merged");
    }

    let classifier: Arc<dyn TextClassifier> = match ClassifierCredentials::from_env() {
        Some(credentials) => {
            tracing::info!(endpoint = %credentials.endpoint, "Using hosted classifier");
            Arc::new(HttpClassifier::new(credentials))
        }
        None => Arc::new(KeywordClassifier::new()),
    };

    Engine::builder(
        Arc::new(LexiconSentiment::new()),
        Arc::new(HeuristicNlp::new()),
        classifier,
    )
    .with_config(config)
    .with_reputation(Arc::new(reputation))
    .build()
    .context("Failed to build engine")
}

fn read_text(file: Option<&PathBuf>) -> Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        bail!("No text to analyze: pass --file, --url or pipe text on stdin");
    }
    Ok(text)
}

fn print_summary(result: &AnalysisResult) {
    let status = result.status().to_string();
    let status = match result.status() {
        VerificationStatus::Verified | VerificationStatus::LikelyTrue => status.bright_green(),
        VerificationStatus::Uncertain => status.bright_yellow(),
        VerificationStatus::LikelyFalse | VerificationStatus::Misinformation => status.bright_red(),
    };

    println!(
        "{} {}  score {:.2}  confidence {:.2}",
        "Verdict:".bold(),
        status.bold(),
        result.reliability_score(),
        result.confidence()
    );

    for (signal, score) in result.breakdown().iter() {
        println!("  {:<10} {:.2}", signal.as_str(), score.score);
    }
    for failure in result.omitted() {
        println!("  {:<10} {}", failure.signal.as_str(), failure.error.as_str().dimmed());
    }

    if !result.reasons().is_empty() {
        println!("{}", "Reasons:".bold());
        for reason in result.reasons() {
            println!("  - {}", reason);
        }
    }
}
