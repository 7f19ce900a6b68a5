use std::fs;
use std::path::Path;

use fuzzy_duper::storage;
use fuzzy_duper::{AppConfig, Error, FileRecord, MatchEngine, SilentReporter};
use tempfile::tempdir;

/// Layout:
///   downloads/
///     chan_a/
///       @SomeChannel Report 2021.pdf
///       My Book.pdf
///     chan_b/
///       Report_2021.pdf
///       my_book.pdf
///       Alpha.pdf
///     Zebra.pdf
fn create_test_tree(root: &Path) {
    let chan_a = root.join("chan_a");
    let chan_b = root.join("chan_b");
    fs::create_dir_all(&chan_a).unwrap();
    fs::create_dir_all(&chan_b).unwrap();

    fs::write(chan_a.join("@SomeChannel Report 2021.pdf"), "report a").unwrap();
    fs::write(chan_a.join("My Book.pdf"), "book a").unwrap();
    fs::write(chan_b.join("Report_2021.pdf"), "report b").unwrap();
    fs::write(chan_b.join("my_book.pdf"), "book b").unwrap();
    fs::write(chan_b.join("Alpha.pdf"), "alpha").unwrap();
    fs::write(root.join("Zebra.pdf"), "zebra").unwrap();
}

fn test_config(base: &Path) -> AppConfig {
    AppConfig {
        source_root: base.join("downloads"),
        destination_root: base.join("matched_downloads"),
        clusters_file: base.join("founded_books.json"),
        ..AppConfig::default()
    }
}

#[test]
fn test_full_pipeline() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());
    create_test_tree(&config.source_root);

    let engine = MatchEngine::new(config.clone());
    let result = engine.run(&SilentReporter).unwrap();

    let names: Vec<&str> = result
        .clusters
        .iter()
        .map(|c| c.representative_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["@SomeChannel Report 2021.pdf", "Alpha.pdf", "My Book.pdf", "Zebra.pdf"]
    );

    let report = result.clusters.get(0).unwrap();
    assert_eq!(report.representative_path, "chan_a/@SomeChannel Report 2021.pdf");
    assert_eq!(report.collisions, vec!["chan_b/Report_2021.pdf"]);
    let book = result.clusters.get(2).unwrap();
    assert_eq!(book.collisions, vec!["chan_b/my_book.pdf"]);

    assert_eq!(result.summary.total_files, 6);
    assert_eq!(result.summary.unique_files, 4);
    assert_eq!(result.summary.collisions, 2);
    assert_eq!(result.summary.clusters_with_collisions, 2);
    assert_eq!(result.summary.clusters_without_collisions, 2);

    // persisted clusters match the in-memory result
    let saved = storage::load(&config.clusters_file).unwrap();
    assert_eq!(saved, result.clusters);
    let json = fs::read_to_string(&config.clusters_file).unwrap();
    assert!(json.contains("\"colisions\""));

    // one folder per cluster
    let dest = &config.destination_root;
    let mut folders: Vec<String> = fs::read_dir(dest)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    folders.sort();
    assert_eq!(folders, vec!["Alpha", "My", "Somechannel Report 2021", "Zebra"]);

    let my = dest.join("My");
    assert_eq!(fs::read_to_string(my.join("My.pdf")).unwrap(), "book a");
    assert_eq!(fs::read_to_string(my.join("My_duplicate.pdf")).unwrap(), "book b");

    let reconcile = result.summary.reconcile.unwrap();
    assert_eq!(reconcile.files_copied, 6);
    assert_eq!(reconcile.files_renamed, 1);
    assert_eq!(reconcile.sources_missing, 0);
}

#[test]
fn test_cluster_only_does_not_touch_destination() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());
    create_test_tree(&config.source_root);

    let engine = MatchEngine::new(config.clone());
    let result = engine.cluster(&SilentReporter).unwrap();

    assert_eq!(result.clusters.len(), 4);
    assert!(result.summary.reconcile.is_none());
    assert!(config.clusters_file.is_file());
    assert!(!config.destination_root.exists());
}

#[test]
fn test_materialize_from_saved_clusters() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());
    create_test_tree(&config.source_root);

    let engine = MatchEngine::new(config.clone());
    engine.cluster(&SilentReporter).unwrap();
    let stats = engine.materialize_saved(&SilentReporter).unwrap();

    assert_eq!(stats.folders_created, 4);
    assert_eq!(stats.files_copied, 6);
    assert!(config.destination_root.join("Zebra").join("Zebra.pdf").is_file());
}

#[test]
fn test_invalid_source_root_is_fatal() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());

    let engine = MatchEngine::new(config.clone());
    let err = engine.run(&SilentReporter).unwrap_err();

    assert!(matches!(err, Error::InvalidSourceRoot(_)));
    assert!(!config.clusters_file.exists());
    assert!(!config.destination_root.exists());
}

#[test]
fn test_rerun_is_deterministic() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path());
    create_test_tree(&config.source_root);

    let engine = MatchEngine::new(config);
    let first = engine.run(&SilentReporter).unwrap();
    let second = engine.run(&SilentReporter).unwrap();
    assert_eq!(first.clusters, second.clusters);
}

#[test]
fn test_cluster_from_provided_files() {
    let tmp = tempdir().unwrap();
    let engine = MatchEngine::new(test_config(tmp.path()));

    let files = vec![
        FileRecord::new("Zebra.pdf", "Zebra.pdf"),
        FileRecord::new("alpha.pdf", "b/alpha.pdf"),
        FileRecord::new("Alpha.pdf", "a/Alpha.pdf"),
    ];
    let result = engine.cluster_from(&files, &SilentReporter).unwrap();

    assert_eq!(result.clusters.len(), 2);
    let alpha = result.clusters.get(0).unwrap();
    assert_eq!(alpha.representative_path, "b/alpha.pdf");
    assert_eq!(alpha.collisions, vec!["a/Alpha.pdf"]);
}

#[test]
fn test_stats_csv_written() {
    let tmp = tempdir().unwrap();
    let mut config = test_config(tmp.path());
    config.stats_csv = Some(tmp.path().join("stats.csv"));
    create_test_tree(&config.source_root);

    MatchEngine::new(config.clone()).run(&SilentReporter).unwrap();

    let text = fs::read_to_string(config.stats_csv.unwrap()).unwrap();
    assert_eq!(text.lines().count(), 2);
}
