// End-to-end provisioning tests over real temp directories

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::pipelines::{provision_asin, run};
use super::pure::build_image_set;
use super::types::{ImageRef, ProvisionFailure};

fn make_images(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, format!("img:{name}")).unwrap();
            path
        })
        .collect()
}

fn image_set(dir: &Path, names: &[&str]) -> HashMap<u8, ImageRef> {
    build_image_set(&make_images(dir, names)).unwrap()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

fn asins(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn provisioning_writes_renamed_copies_for_supplied_slots_only() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg", "5.png"]);
    let (written, failures) = provision_asin("X123", &set, &dest).unwrap();

    assert!(failures.is_empty());
    assert_eq!(written.len(), 2);
    assert_eq!(
        file_names(&dest.join("X123")),
        ["X123.MAIN.jpg", "X123.PT04.png"]
    );
    assert_eq!(
        fs::read_to_string(dest.join("X123/X123.MAIN.jpg")).unwrap(),
        "img:1.jpg"
    );
}

#[test]
fn provisioning_twice_yields_the_same_file_set() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg", "2.gif"]);
    provision_asin("B007", &set, &dest).unwrap();
    let first = file_names(&dest.join("B007"));

    let (written, failures) = provision_asin("B007", &set, &dest).unwrap();
    assert!(failures.is_empty());
    assert_eq!(written.len(), 2);
    assert_eq!(file_names(&dest.join("B007")), first);
}

#[test]
fn copy_failure_leaves_remaining_slots_intact() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg", "5.png"]);
    fs::remove_file(src.join("1.jpg")).unwrap();

    let (written, failures) = provision_asin("X123", &set, &dest).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(failures.len(), 1);
    assert!(
        matches!(&failures[0], ProvisionFailure::Copy { image, .. } if image == "1.jpg"),
        "unexpected failure: {}",
        failures[0]
    );
    assert_eq!(file_names(&dest.join("X123")), ["X123.PT04.png"]);
}

#[test]
fn run_with_compression_leaves_only_the_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg", "5.png"]);
    let outcome = run("ACME", &set, &asins(&["X123"]), &dest, true).unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.processed, 1);
    assert_eq!(file_names(&dest.join("ACME/X123")), ["X123.zip"]);

    let file = fs::File::open(dest.join("ACME/X123/X123.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("X123.MAIN.jpg").is_ok());
    assert!(archive.by_name("X123.PT04.png").is_ok());
}

#[test]
fn run_without_compression_keeps_loose_copies() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg", "5.png"]);
    let outcome = run("ACME", &set, &asins(&["X123"]), &dest, false).unwrap();

    assert!(outcome.is_clean());
    assert_eq!(
        file_names(&dest.join("ACME/X123")),
        ["X123.MAIN.jpg", "X123.PT04.png"]
    );
}

#[test]
fn archive_includes_pre_existing_files_in_the_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(dest.join("ACME/X9")).unwrap();
    fs::write(dest.join("ACME/X9/stray.txt"), "keep me").unwrap();

    let set = image_set(&src, &["1.jpg"]);
    let outcome = run("ACME", &set, &asins(&["X9"]), &dest, true).unwrap();

    assert!(outcome.is_clean());
    // Only the written copies are cleaned up; the stray file stays
    assert_eq!(file_names(&dest.join("ACME/X9")), ["X9.zip", "stray.txt"]);

    let file = fs::File::open(dest.join("ACME/X9/X9.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("stray.txt").is_ok());
    assert!(archive.by_name("X9.MAIN.jpg").is_ok());
}

#[test]
fn failed_identifier_does_not_abort_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(dest.join("ACME")).unwrap();
    // A file where the A2 folder should go makes its creation fail
    fs::write(dest.join("ACME/A2"), "collision").unwrap();

    let set = image_set(&src, &["1.jpg"]);
    let outcome = run("ACME", &set, &asins(&["A1", "A2"]), &dest, false).unwrap();

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(
        matches!(&outcome.failures[0], ProvisionFailure::Folder { asin, .. } if asin == "A2"),
        "unexpected failure: {}",
        outcome.failures[0]
    );
    assert_eq!(file_names(&dest.join("ACME/A1")), ["A1.MAIN.jpg"]);
}

#[test]
fn client_root_collision_aborts_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("ACME"), "collision").unwrap();

    let set = image_set(&src, &["1.jpg"]);
    let err = run("ACME", &set, &asins(&["A1"]), &dest, false).unwrap_err();

    assert!(err.to_string().contains("ACME"));
}

#[test]
fn duplicate_identifiers_reprocess_the_same_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let set = image_set(&src, &["1.jpg"]);
    let outcome = run("ACME", &set, &asins(&["X1", "X1"]), &dest, false).unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.processed, 2);
    assert_eq!(file_names(&dest.join("ACME/X1")), ["X1.MAIN.jpg"]);
}
