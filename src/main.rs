use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use plagcheck::config::Config;
use plagcheck::similarity::{format_score, EmptyPolicy, SimilarityScorer};
use plagcheck::web::{self, AppState};

/// plagcheck: compare two texts by cosine similarity of their word counts.
#[derive(Parser)]
#[command(name = "plagcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides PLAGCHECK_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score two texts and print the similarity
    Score {
        text1: String,
        text2: String,

        /// Fail instead of printing 0 when a text has no words
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("plagcheck=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            match config.bucket.as_deref() {
                Some(bucket) => info!(bucket = bucket, "Reporting timed results to Cloud Storage"),
                None => info!("PLAGCHECK_BUCKET not set, timed results will not be stored"),
            }

            let sink = config.result_sink()?;
            web::run_server(AppState::new(config, sink)).await?;
        }

        Commands::Score {
            text1,
            text2,
            strict,
        } => {
            let policy = if strict {
                EmptyPolicy::Error
            } else {
                Config::load()?.empty_policy
            };
            let similarity = SimilarityScorer::new(policy).score(&text1, &text2)?;
            println!("{}", format_score(similarity));
        }
    }

    Ok(())
}
