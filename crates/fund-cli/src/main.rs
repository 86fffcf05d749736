//! Command-line front-end for the hedge fund analysis API

mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fund_client::{ClientConfig, HedgeFundClient, Submission, SubmissionState};
use fund_core::AnalysisRequest;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fund-cli")]
#[command(about = "AI hedge fund analysis from the terminal", long_about = None)]
struct Args {
    /// Base URL of the analysis API (defaults to FUND_API_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an analysis run and render its results
    Run {
        /// Tickers to analyze, e.g. "AAPL,MSFT"
        #[arg(short, long, value_delimiter = ',', required = true)]
        tickers: Vec<String>,

        /// Analyst identifiers to consult, e.g. "warren_buffett,ben_graham"
        #[arg(short, long, value_delimiter = ',', required = true)]
        analysts: Vec<String>,

        /// Model identifier, e.g. "gpt-4o"
        #[arg(short, long)]
        model: String,

        /// Model provider
        #[arg(long, default_value = "OpenAI")]
        provider: String,

        /// Analysis window start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Analysis window end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Starting cash balance
        #[arg(long, default_value_t = fund_core::DEFAULT_INITIAL_CASH)]
        cash: f64,

        /// Include analyst reasoning in the output
        #[arg(long)]
        show_reasoning: bool,
    },

    /// List the selectable analysts
    Analysts,

    /// List the selectable models
    Models,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = match args.endpoint {
        Some(endpoint) => ClientConfig::new(endpoint),
        None => ClientConfig::from_env(),
    };
    let client = HedgeFundClient::new(config)?;

    match args.command {
        Command::Run {
            tickers,
            analysts,
            model,
            provider,
            start,
            end,
            cash,
            show_reasoning,
        } => {
            let mut builder = AnalysisRequest::builder()
                .tickers(tickers)
                .analysts(analysts)
                .model(model, provider)
                .initial_cash(cash)
                .show_reasoning(show_reasoning);
            if let Some(start) = start {
                builder = builder.start_date(start);
            }
            if let Some(end) = end {
                builder = builder.end_date(end);
            }
            let request = builder.build()?;

            info!(
                tickers = request.tickers.len(),
                model = %request.model_name,
                "submitting analysis"
            );

            let submission = Submission::run(&client, &request).await;
            match submission.state() {
                SubmissionState::Succeeded(result) => {
                    print!("{}", render::result_report(result, request.show_reasoning));
                }
                SubmissionState::Failed(error) => {
                    eprintln!("{}", render::error_line(&error.to_string()));
                    std::process::exit(1);
                }
                state => anyhow::bail!("submission ended in the {} state", state.label()),
            }
        }
        Command::Analysts => {
            let analysts = client.analysts().await?;
            print!("{}", render::analyst_table(&analysts));
        }
        Command::Models => {
            let models = client.models().await?;
            print!("{}", render::model_table(&models));
        }
    }

    Ok(())
}
