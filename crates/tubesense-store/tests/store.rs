//! File-system tests for `DataStore` against a temporary directory.

use serde_json::{json, Value};
use tempfile::TempDir;
use tubesense_core::{Comment, SentimentLabel, Statistics};
use tubesense_store::{DataStore, SavedFiles};

fn sample_comments() -> Vec<Comment> {
    vec![
        Comment {
            text: "Pemilu harus jujur dan adil 👍".to_owned(),
            author: "Budi".to_owned(),
            likes: 42,
            published_at: "2024-01-05T10:00:00Z".to_owned(),
            video_id: "vid1".to_owned(),
            sentiment: Some(SentimentLabel::Positive),
            sentiment_score: Some(0.912),
            ..Comment::default()
        },
        Comment {
            text: "Kecewa, \"janji\" tidak ditepati".to_owned(),
            author: "Sari".to_owned(),
            likes: 0,
            published_at: "2024-01-05T11:00:00Z".to_owned(),
            video_id: "vid1".to_owned(),
            sentiment: Some(SentimentLabel::Negative),
            sentiment_score: Some(0.77),
            ..Comment::default()
        },
    ]
}

fn open_store() -> (TempDir, DataStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = DataStore::new(dir.path().join("data")).expect("store");
    (dir, store)
}

#[test]
fn new_creates_missing_directory() {
    let dir = TempDir::new().expect("tempdir");
    let target = dir.path().join("nested").join("data");
    assert!(!target.exists());

    DataStore::new(&target).expect("store");
    assert!(target.is_dir());
}

#[test]
fn new_fails_when_path_is_a_file() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("occupied");
    std::fs::write(&file, "x").expect("write");

    assert!(DataStore::new(&file).is_err());
}

#[test]
fn json_round_trip_is_field_for_field() {
    let (_dir, store) = open_store();
    let comments = sample_comments();

    let path = store
        .save_comments_json(&comments, Some("batch.json"))
        .expect("save");
    assert_eq!(path, store.dir().join("batch.json"));

    let loaded = store.load_comments_json("batch.json").expect("load");
    let reparsed: Vec<Comment> = loaded
        .into_iter()
        .map(|r| serde_json::from_value(Value::Object(r)).expect("comment"))
        .collect();
    assert_eq!(reparsed, comments);
}

#[test]
fn json_keeps_non_ascii_literal() {
    let (_dir, store) = open_store();
    let path = store
        .save_comments_json(&sample_comments(), None)
        .expect("save");

    let raw = std::fs::read_to_string(path).expect("read");
    assert!(raw.contains("👍"));
    assert!(!raw.contains("\\u"));
}

#[test]
fn csv_starts_with_bom_and_uses_field_order() {
    let (_dir, store) = open_store();
    let path = store
        .save_comments_csv(&sample_comments(), Some("batch.csv"))
        .expect("save");

    let raw = std::fs::read(path).expect("read");
    assert!(raw.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(raw[3..].to_vec()).expect("utf8");
    assert_eq!(
        text.lines().next(),
        Some("text,author,likes,published_at,video_id,sentiment,sentiment_score")
    );
}

#[test]
fn csv_columns_are_union_of_record_keys() {
    let (_dir, store) = open_store();
    let records = vec![
        json!({"text": "satu", "likes": 1}),
        json!({"text": "dua", "channel": "Kanal Berita"}),
    ];
    store
        .save_comments_csv(&records, Some("mixed.csv"))
        .expect("save");

    let loaded = store.load_comments_csv("mixed.csv").expect("load");
    assert_eq!(loaded.len(), 2);
    let columns: Vec<&str> = loaded[0].keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["text", "likes", "channel"]);
    assert_eq!(loaded[0]["channel"], Value::Null);
    assert_eq!(loaded[1]["likes"], Value::Null);
    assert_eq!(loaded[1]["channel"], json!("Kanal Berita"));
}

#[test]
fn csv_round_trip_preserves_text_and_numbers() {
    let (_dir, store) = open_store();
    store
        .save_comments_csv(&sample_comments(), Some("batch.csv"))
        .expect("save");

    let loaded = store.load_comments_csv("batch.csv").expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0]["text"], json!("Pemilu harus jujur dan adil 👍"));
    assert_eq!(loaded[0]["likes"], json!(42));
    assert_eq!(loaded[0]["sentiment"], json!("positive"));
    assert_eq!(loaded[0]["sentiment_score"], json!(0.912));
    assert_eq!(loaded[1]["text"], json!("Kecewa, \"janji\" tidak ditepati"));
}

#[test]
fn csv_numeric_looking_text_stays_text() {
    let (_dir, store) = open_store();
    let records = vec![
        json!({"text": "2024", "likes": 3}),
        json!({"text": "bagus", "likes": 10}),
        json!({"text": "007", "likes": null}),
    ];
    store
        .save_comments_csv(&records, Some("angka.csv"))
        .expect("save");

    let loaded = store.load_comments_csv("angka.csv").expect("load");
    let texts: Vec<&Value> = loaded.iter().map(|r| &r["text"]).collect();
    assert_eq!(texts, vec![&json!("2024"), &json!("bagus"), &json!("007")]);
    assert_eq!(loaded[0]["likes"], json!(3));
    assert_eq!(loaded[2]["likes"], Value::Null);
}

#[test]
fn loading_missing_files_yields_empty() {
    let (_dir, store) = open_store();
    assert!(store.load_comments_csv("nope.csv").expect("csv").is_empty());
    assert!(store.load_comments_json("nope.json").expect("json").is_empty());
}

#[test]
fn list_partitions_by_extension() {
    let (_dir, store) = open_store();
    store
        .save_comments_csv(&sample_comments(), Some("b.csv"))
        .expect("csv");
    store
        .save_comments_json(&sample_comments(), Some("a.json"))
        .expect("json");
    store
        .save_comments_csv(&sample_comments(), Some("a.csv"))
        .expect("csv");
    std::fs::write(store.dir().join("notes.txt"), "ignored").expect("txt");

    let files = store.list_saved_files().expect("list");
    assert_eq!(
        files,
        SavedFiles {
            csv: vec!["a.csv".to_owned(), "b.csv".to_owned()],
            json: vec!["a.json".to_owned()],
        }
    );
}

#[test]
fn list_is_empty_when_directory_is_gone() {
    let (_dir, store) = open_store();
    std::fs::remove_dir_all(store.dir()).expect("remove");

    assert_eq!(store.list_saved_files().expect("list"), SavedFiles::default());
}

#[test]
fn analysis_report_bundles_query_statistics_and_comments() {
    let (_dir, store) = open_store();
    let comments = sample_comments();
    let stats = Statistics {
        total: 2,
        positive: 1,
        negative: 1,
        neutral: 0,
        positive_pct: 50.0,
        negative_pct: 50.0,
        neutral_pct: 0.0,
    };

    let path = store
        .export_analysis_report(&comments, &stats, "politik", None)
        .expect("export");

    let name = path.file_name().and_then(|n| n.to_str()).expect("name");
    assert!(name.starts_with("analysis_report_"));
    assert!(name.ends_with(".json"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(report["query"], json!("politik"));
    assert_eq!(report["statistics"]["positive_pct"], json!(50.0));
    assert_eq!(report["comments"].as_array().map(Vec::len), Some(2));
    let timestamp = report["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}
