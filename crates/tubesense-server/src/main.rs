mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tubesense_sentiment::{http_candidates, SentimentAnalyzer};
use tubesense_store::DataStore;
use tubesense_youtube::YouTubeClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tubesense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        data_dir = %config.data_dir.display(),
        "starting tubesense server"
    );

    let youtube = YouTubeClient::with_base_url(
        &config.youtube_api_key,
        config.youtube_request_timeout_secs,
        &config.youtube_base_url,
    )?
    .with_relevance_language(&config.youtube_relevance_language);

    let analyzer = SentimentAnalyzer::load(http_candidates(
        &config.sentiment_inference_url,
        &config.sentiment_models,
        config.sentiment_api_token.as_deref(),
        config.sentiment_request_timeout_secs,
    ))
    .await;

    let store = DataStore::new(&config.data_dir)?;

    let app = build_app(AppState {
        youtube: Arc::new(youtube),
        analyzer: Arc::new(analyzer),
        store: Arc::new(store),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
