//! The data directory and the operations over it.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tubesense_core::{CommentRecord, Statistics};

use crate::tabular;
use crate::StoreError;

/// Saved artifacts in the data directory, split by extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFiles {
    pub csv: Vec<String>,
    pub json: Vec<String>,
}

/// The document written by [`DataStore::export_analysis_report`].
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a, T> {
    pub query: &'a str,
    pub timestamp: String,
    pub statistics: &'a Statistics,
    pub comments: &'a [T],
}

/// Gateway to the flat data directory.
///
/// Writes overwrite silently. Auto-generated names have one-second
/// resolution, so two unnamed saves within the same second share a file and
/// the last write wins.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Open the data directory, creating it (and any parents) if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `comments` as CSV with a UTF-8 BOM.
    ///
    /// Columns are the union of every record's keys in first-seen order;
    /// records lacking a column get an empty cell. Defaults the file name to
    /// `comments_<YYYYMMDD_HHMMSS>.csv`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotARecord`] if a comment does not serialize to
    /// a JSON object, or an I/O or encoding error from the write.
    pub fn save_comments_csv<T: Serialize>(
        &self,
        comments: &[T],
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let records = to_records(comments)?;
        let path = self.resolve(filename, "comments", "csv");

        let file = File::create(&path)?;
        tabular::write_records(BufWriter::new(file), &records)?;

        tracing::info!(path = %path.display(), rows = records.len(), "saved comments as CSV");
        Ok(path)
    }

    /// Write `comments` as pretty-printed JSON, non-ASCII kept literal.
    ///
    /// Defaults the file name to `comments_<YYYYMMDD_HHMMSS>.json`.
    ///
    /// # Errors
    ///
    /// Returns an I/O or encoding error from the write.
    pub fn save_comments_json<T: Serialize>(
        &self,
        comments: &[T],
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let path = self.resolve(filename, "comments", "json");
        write_json(&path, comments)?;

        tracing::info!(path = %path.display(), rows = comments.len(), "saved comments as JSON");
        Ok(path)
    }

    /// Read a CSV file written by [`Self::save_comments_csv`] (or any CSV
    /// with a header row). Each column is typed from all of its cells, so a
    /// text column holding `"2024"` keeps it as a string.
    ///
    /// A missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an I/O or CSV error if the file exists but cannot be read.
    pub fn load_comments_csv(&self, filename: &str) -> Result<Vec<CommentRecord>, StoreError> {
        match File::open(self.dir.join(filename)) {
            Ok(file) => tabular::read_records(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a JSON array of comment objects.
    ///
    /// A missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error if the file exists but cannot be read.
    pub fn load_comments_json(&self, filename: &str) -> Result<Vec<CommentRecord>, StoreError> {
        match File::open(self.dir.join(filename)) {
            Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// List `.csv` and `.json` files in the data directory, sorted by name.
    ///
    /// Both lists are empty if the directory has gone away.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory exists but cannot be read.
    pub fn list_saved_files(&self) -> Result<SavedFiles, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SavedFiles::default()),
            Err(e) => return Err(e.into()),
        };

        let mut files = SavedFiles::default();
        for entry in entries {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(".csv") {
                files.csv.push(name);
            } else if name.ends_with(".json") {
                files.json.push(name);
            }
        }
        files.csv.sort();
        files.json.sort();
        Ok(files)
    }

    /// Bundle a query label, a local timestamp, the statistics and the full
    /// comment batch into one JSON document.
    ///
    /// Defaults the file name to `analysis_report_<YYYYMMDD_HHMMSS>.json`.
    ///
    /// # Errors
    ///
    /// Returns an I/O or encoding error from the write.
    pub fn export_analysis_report<T: Serialize>(
        &self,
        comments: &[T],
        statistics: &Statistics,
        query: &str,
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let path = self.resolve(filename, "analysis_report", "json");
        let report = AnalysisReport {
            query,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            statistics,
            comments,
        };
        write_json(&path, &report)?;

        tracing::info!(path = %path.display(), query, "exported analysis report");
        Ok(path)
    }

    fn resolve(&self, filename: Option<&str>, prefix: &str, extension: &str) -> PathBuf {
        match filename {
            Some(name) if !name.is_empty() => self.dir.join(name),
            _ => self.dir.join(timestamped_name(prefix, extension)),
        }
    }
}

fn timestamped_name(prefix: &str, extension: &str) -> String {
    format!("{prefix}_{}.{extension}", Local::now().format("%Y%m%d_%H%M%S"))
}

fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<CommentRecord>, StoreError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match serde_json::to_value(item)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotARecord { index }),
        })
        .collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamped_name_has_second_resolution() {
        let name = timestamped_name("comments", "csv");
        let stamp = name
            .strip_prefix("comments_")
            .and_then(|s| s.strip_suffix(".csv"))
            .expect("prefix and suffix");
        assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(stamp
            .chars()
            .enumerate()
            .all(|(i, c)| i == 8 || c.is_ascii_digit()));
    }

    #[test]
    fn scalar_items_are_rejected_for_csv() {
        let err = to_records(&[1, 2]).expect_err("scalars are not records");
        assert!(matches!(err, StoreError::NotARecord { index: 0 }));
    }
}
