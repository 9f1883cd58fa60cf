//! Commands over the data directory. No network access.

use std::path::Path;

use serde_json::Value;
use tubesense_core::Statistics;
use tubesense_sentiment::get_statistics;
use tubesense_store::{CommentRecord, DataStore};

/// # Errors
///
/// Returns an error if the data directory cannot be read.
pub(crate) fn run_files(data_dir: &Path) -> anyhow::Result<()> {
    let store = DataStore::new(data_dir)?;
    let files = store.list_saved_files()?;

    if files.csv.is_empty() && files.json.is_empty() {
        println!("no saved files in {}", data_dir.display());
        return Ok(());
    }

    for name in &files.csv {
        println!("csv   {name}");
    }
    for name in &files.json {
        println!("json  {name}");
    }
    Ok(())
}

/// Load a saved comment file and print statistics over its `sentiment` column.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub(crate) fn run_stats(data_dir: &Path, filename: &str) -> anyhow::Result<()> {
    let store = DataStore::new(data_dir)?;
    let records = if filename.ends_with(".csv") {
        store.load_comments_csv(filename)?
    } else {
        store.load_comments_json(filename)?
    };

    if records.is_empty() {
        println!("no comments in {filename}");
        return Ok(());
    }

    let stats = statistics_for(&records);
    println!("file:     {filename}");
    print_statistics(&stats);
    Ok(())
}

pub(crate) fn print_statistics(stats: &Statistics) {
    println!("comments: {}", stats.total);
    println!("positive: {:>5} ({:.1}%)", stats.positive, stats.positive_pct);
    println!("negative: {:>5} ({:.1}%)", stats.negative, stats.negative_pct);
    println!("neutral:  {:>5} ({:.1}%)", stats.neutral, stats.neutral_pct);
}

/// Records without a string `sentiment` count as neutral.
pub(crate) fn statistics_for(records: &[CommentRecord]) -> Statistics {
    let labels: Vec<&str> = records
        .iter()
        .map(|r| r.get("sentiment").and_then(Value::as_str).unwrap_or("neutral"))
        .collect();
    get_statistics(&labels)
}
