//! Flat-file persistence for comment batches and analysis reports.
//!
//! Everything lives in one directory: auto-named `.csv` and `.json` files,
//! no subdirectories and no index. Discovery is a directory listing.

use thiserror::Error;

pub mod store;
mod tabular;

pub use store::{AnalysisReport, DataStore, SavedFiles};
pub use tubesense_core::CommentRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {index} is not a JSON object")]
    NotARecord { index: usize },
}
