use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_SENTIMENT_MODELS: &str = "w11wo/indonesian-roberta-base-sentiment-classifier,\
                                            nlptown/bert-base-multilingual-uncased-sentiment";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let env = parse_environment(&or_default("TUBESENSE_ENV", "development"))?;
    let bind_addr = parse("TUBESENSE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("TUBESENSE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("TUBESENSE_DATA_DIR", "data"));

    let youtube_base_url = or_default("YOUTUBE_API_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);
    let youtube_relevance_language = or_default("YOUTUBE_RELEVANCE_LANGUAGE", "id");
    let youtube_request_timeout_secs = parse_u64("YOUTUBE_REQUEST_TIMEOUT_SECS", "30")?;

    let sentiment_inference_url = or_default("SENTIMENT_INFERENCE_URL", DEFAULT_INFERENCE_URL);
    let sentiment_models =
        parse_model_list(&or_default("SENTIMENT_MODELS", DEFAULT_SENTIMENT_MODELS))?;
    let sentiment_api_token = lookup("SENTIMENT_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let sentiment_request_timeout_secs = parse_u64("SENTIMENT_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        youtube_api_key,
        youtube_base_url,
        youtube_relevance_language,
        youtube_request_timeout_secs,
        sentiment_inference_url,
        sentiment_models,
        sentiment_api_token,
        sentiment_request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TUBESENSE_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

/// Split a comma-separated model list, dropping blanks. At least one entry is required.
fn parse_model_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if models.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTIMENT_MODELS".to_string(),
            reason: "at least one model identifier is required".to_string(),
        });
    }
    Ok(models)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
