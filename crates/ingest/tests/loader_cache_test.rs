//! Loader cache behavior against real files: hits on unchanged sources,
//! reloads on rewrites, explicit invalidation, and the disabled path.

use adlens_core::AdLensError;
use adlens_ingest::ReportLoader;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "Campaign Name,Ad Set Name,Day,Amount Spent (NGN),Results\n";

fn write_report(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("{HEADER}{body}")).unwrap();
    path
}

#[test]
fn test_unchanged_file_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "ads.csv", "Summer Push,Lagos,2024-05-01,1000,10\n");

    let loader = ReportLoader::new(true);
    let first = loader.load(&path).unwrap();
    let second = loader.load(&path).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.cached_sources(), 1);
}

#[test]
fn test_rewritten_file_is_reloaded() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "ads.csv", "Summer Push,Lagos,2024-05-01,1000,10\n");

    let loader = ReportLoader::new(true);
    let first = loader.load(&path).unwrap();
    assert_eq!(first.records.len(), 1);

    // Appending changes the length, so the fingerprint moves even on
    // filesystems with coarse modification timestamps.
    write_report(
        &dir,
        "ads.csv",
        "Summer Push,Lagos,2024-05-01,1000,10\nSummer Push,Abuja,2024-05-02,500,5\n",
    );

    let second = loader.load(&path).unwrap();
    assert_eq!(second.records.len(), 2);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_invalidate_drops_the_cached_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "ads.csv", "Summer Push,Lagos,2024-05-01,1000,10\n");

    let loader = ReportLoader::new(true);
    let first = loader.load(&path).unwrap();

    assert!(loader.invalidate(&path));
    assert_eq!(loader.cached_sources(), 0);
    assert!(!loader.invalidate(&path));

    let second = loader.load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.records, second.records);
}

#[test]
fn test_disabled_cache_always_reparses() {
    let dir = TempDir::new().unwrap();
    let path = write_report(&dir, "ads.csv", "Summer Push,Lagos,2024-05-01,1000,10\n");

    let loader = ReportLoader::new(false);
    let first = loader.load(&path).unwrap();
    let second = loader.load(&path).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(loader.cached_sources(), 0);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let loader = ReportLoader::new(true);

    let err = loader.load(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, AdLensError::Io(_)));
}

#[test]
fn test_missing_required_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ads.csv");
    fs::write(&path, "Campaign Name,Results\nSummer Push,10\n").unwrap();

    let loader = ReportLoader::new(true);
    let err = loader.load(&path).unwrap_err();
    match err {
        AdLensError::MissingColumn { field } => assert_eq!(field, "ad_set_name"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}
