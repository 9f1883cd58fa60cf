//! Commands that talk to the video API.

use tubesense_core::AppConfig;
use tubesense_sentiment::{analyze_comments, http_candidates, SentimentAnalyzer};
use tubesense_store::DataStore;
use tubesense_youtube::YouTubeClient;

/// Print matching videos, one per line.
///
/// # Errors
///
/// Returns an error if the search request fails.
pub(crate) async fn run_search(
    youtube: &YouTubeClient,
    query: &str,
    max_results: u32,
) -> anyhow::Result<()> {
    let videos = youtube.search(query, max_results).await?;

    if videos.is_empty() {
        println!("no videos found for '{query}'");
    } else {
        println!("{:<14}{:<22}{:<26}TITLE", "VIDEO ID", "PUBLISHED", "CHANNEL");
        for video in &videos {
            println!(
                "{:<14}{:<22}{:<26}{}",
                video.video_id,
                video.published_at,
                truncate(&video.channel, 24),
                truncate(&video.title, 60)
            );
        }
    }

    print_quota(youtube);
    Ok(())
}

/// Fetch, analyse and save a report for one video.
///
/// # Errors
///
/// Returns an error if fetching fails, the video has no comments, or the
/// report cannot be written.
pub(crate) async fn run_analyze_video(
    config: &AppConfig,
    youtube: &YouTubeClient,
    video_id: &str,
    max_comments: usize,
    query: &str,
) -> anyhow::Result<()> {
    let mut comments = youtube.get_comments(video_id, max_comments).await?;
    if comments.is_empty() {
        anyhow::bail!("no comments found for video {video_id}");
    }

    let analyzer = SentimentAnalyzer::load(http_candidates(
        &config.sentiment_inference_url,
        &config.sentiment_models,
        config.sentiment_api_token.as_deref(),
        config.sentiment_request_timeout_secs,
    ))
    .await;
    if !analyzer.is_loaded() {
        tracing::warn!(video_id, "analysing without a sentiment model");
    }

    let stats = analyze_comments(&analyzer, &mut comments).await;

    let store = DataStore::new(&config.data_dir)?;
    let path = store.export_analysis_report(&comments, &stats, query, None)?;

    println!("video:    {video_id}");
    crate::files::print_statistics(&stats);
    println!("saved to: {}", path.display());
    print_quota(youtube);
    Ok(())
}

/// Quota is tracked per process, so this reports only this run's calls.
fn print_quota(youtube: &YouTubeClient) {
    let usage = youtube.quota_usage();
    println!(
        "quota: {} used of {} ({} remaining)",
        usage.quota_used, usage.daily_limit, usage.remaining
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}
