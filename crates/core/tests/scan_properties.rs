use std::fs;

use tempfile::TempDir;

use diskscout_core::{
    analyze_by_extension, clean_dirs, find_large, HistoryStore, ScanSnapshot, TreeWalk,
};

fn populate(temp: &TempDir) {
    fs::write(temp.path().join("report.txt"), vec![1_u8; 120]).expect("write");
    fs::write(temp.path().join("image.JPG"), vec![1_u8; 400]).expect("write");
    fs::create_dir_all(temp.path().join("deep/deeper")).expect("mkdir");
    fs::write(temp.path().join("deep/data.bin"), vec![1_u8; 250]).expect("write");
    fs::write(temp.path().join("deep/deeper/noext"), vec![1_u8; 30]).expect("write");
}

#[test]
fn extension_totals_match_walked_bytes() {
    let temp = TempDir::new().expect("tempdir");
    populate(&temp);

    let walked: u64 = TreeWalk::new(temp.path())
        .expect("walk")
        .map(|entry| entry.size_bytes)
        .sum();
    let summary = analyze_by_extension(temp.path()).expect("analyze");
    let classified: u64 = summary.iter().map(|usage| usage.total_bytes).sum();

    assert_eq!(walked, 800);
    assert_eq!(classified, walked);
}

#[test]
fn large_files_are_the_filtered_walk_superset() {
    let temp = TempDir::new().expect("tempdir");
    populate(&temp);
    let threshold = 200;

    let mut expected: Vec<_> = TreeWalk::new(temp.path())
        .expect("walk")
        .filter(|entry| entry.size_bytes > threshold)
        .collect();
    expected.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

    let large = find_large(temp.path(), threshold).expect("large");
    assert_eq!(large, expected);
    assert!(large.iter().all(|entry| entry.size_bytes > threshold));
    assert!(large
        .windows(2)
        .all(|pair| pair[0].size_bytes >= pair[1].size_bytes));
}

#[test]
fn clean_empties_the_tree_then_reports_zero() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("t1"), vec![0_u8; 10]).expect("write");
    fs::write(temp.path().join("t2"), vec![0_u8; 20]).expect("write");
    fs::write(temp.path().join("t3"), vec![0_u8; 30]).expect("write");

    let targets = vec![temp.path().to_path_buf()];
    let outcome = clean_dirs(&targets);
    assert_eq!(outcome.bytes_freed, 60);
    assert_eq!(
        TreeWalk::new(temp.path()).expect("walk").count(),
        0,
        "cleaned directory still contains files"
    );

    let rerun = clean_dirs(&targets);
    assert_eq!(rerun.bytes_freed, 0);
    assert_eq!(rerun.files_skipped, 0);
}

#[test]
fn scan_results_survive_a_failed_history_append() {
    let temp = TempDir::new().expect("tempdir");
    populate(&temp);

    let summary = analyze_by_extension(temp.path()).expect("analyze");

    // A directory path cannot be opened for appending.
    let store = HistoryStore::new(temp.path());
    let append = store.append(&ScanSnapshot::now("/", 50.0));
    assert!(append.is_err());

    // The failure is reported, the scan output above is untouched.
    assert_eq!(
        summary,
        analyze_by_extension(temp.path()).expect("re-analyze")
    );
}
