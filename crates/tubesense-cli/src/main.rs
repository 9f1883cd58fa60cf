mod files;
mod videos;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tubesense_youtube::YouTubeClient;

#[derive(Debug, Parser)]
#[command(name = "tubesense-cli")]
#[command(about = "Search videos, analyse comment sentiment and inspect saved results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search videos by keyword
    Search {
        query: String,

        #[arg(long, default_value_t = 10)]
        max_results: u32,
    },
    /// Fetch a video's comments, analyse them and save a report
    AnalyzeVideo {
        video_id: String,

        #[arg(long, default_value_t = 100)]
        max_comments: usize,

        /// Label stored with the report
        #[arg(long, default_value = "politik")]
        query: String,
    },
    /// List saved CSV and JSON files in the data directory
    Files,
    /// Recompute sentiment statistics from a saved comment file
    Stats { filename: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tubesense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search { query, max_results } => {
            let youtube = youtube_client(&config)?;
            videos::run_search(&youtube, &query, max_results).await?;
        }
        Commands::AnalyzeVideo {
            video_id,
            max_comments,
            query,
        } => {
            let youtube = youtube_client(&config)?;
            videos::run_analyze_video(&config, &youtube, &video_id, max_comments, &query).await?;
        }
        Commands::Files => files::run_files(&config.data_dir)?,
        Commands::Stats { filename } => files::run_stats(&config.data_dir, &filename)?,
    }

    Ok(())
}

fn youtube_client(config: &tubesense_core::AppConfig) -> anyhow::Result<YouTubeClient> {
    let client = YouTubeClient::with_base_url(
        &config.youtube_api_key,
        config.youtube_request_timeout_secs,
        &config.youtube_base_url,
    )?
    .with_relevance_language(&config.youtube_relevance_language);
    Ok(client)
}
