//! Client for the video platform's public Data API.
//!
//! Covers keyword search and top-level comment listing, and keeps a running
//! estimate of the request quota spent by this process.

pub mod client;
pub mod error;
pub mod quota;
pub mod types;

pub use client::YouTubeClient;
pub use error::YouTubeError;
pub use quota::{QuotaTracker, QuotaUsage, DAILY_QUOTA_LIMIT};
