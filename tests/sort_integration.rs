//! Integration tests for the sort pipeline

mod common;

use common::{snapshot, TreeBuilder};
use sortwords::sort::{self, ConflictPolicy, SkipReason, SortOptions};
use sortwords::Error;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

fn options(tree: &common::TestTree) -> SortOptions {
    SortOptions::new(&tree.source, &tree.output)
}

#[tokio::test]
async fn test_every_file_lands_in_its_extension_folder() {
    let tree = TreeBuilder::new()
        .with_file("notes.txt", "plain notes")
        .with_file("docs/Report.PDF", [0x25u8, 0x50, 0x44, 0x46, 0x00, 0xff])
        .with_file("docs/deep/more/data.csv", "a,b\n1,2\n")
        .with_file("img/photo.JpG", [0xffu8, 0xd8, 0xff, 0xe0])
        .with_file("img/other.jpg", [0x01u8, 0x02])
        .build();

    let report = sort::run(&options(&tree)).await.unwrap();

    assert_eq!(report.discovered, 5);
    assert_eq!(report.copied, 5);
    assert!(report.failed.is_empty());
    assert!(report.is_clean());

    let expected: BTreeMap<PathBuf, Vec<u8>> = [
        ("txt/notes.txt", b"plain notes".to_vec()),
        ("pdf/Report.PDF", vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff]),
        ("csv/data.csv", b"a,b\n1,2\n".to_vec()),
        ("jpg/photo.JpG", vec![0xff, 0xd8, 0xff, 0xe0]),
        ("jpg/other.jpg", vec![0x01, 0x02]),
    ]
    .into_iter()
    .map(|(path, content)| (PathBuf::from(path), content))
    .collect();
    assert_eq!(snapshot(&tree.output), expected);
}

#[tokio::test]
async fn test_source_tree_is_untouched() {
    let tree = TreeBuilder::new()
        .with_file("a.txt", "a")
        .with_file("nested/b.rs", "b")
        .build();
    let before = snapshot(&tree.source);

    sort::run(&options(&tree)).await.unwrap();

    assert_eq!(snapshot(&tree.source), before);
}

#[tokio::test]
async fn test_extensionless_files_go_to_output_root() {
    let tree = TreeBuilder::new()
        .with_file("README", "readme")
        .with_file("config/.env", "SECRET=1")
        .with_file("name.", "trailing dot")
        .build();

    let report = sort::run(&options(&tree)).await.unwrap();

    assert_eq!(report.copied, 3);
    let files = snapshot(&tree.output);
    let names: Vec<PathBuf> = files.keys().cloned().collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from(".env"),
            PathBuf::from("README"),
            PathBuf::from("name.")
        ]
    );
}

#[tokio::test]
async fn test_failed_copy_does_not_affect_others() {
    let tree = TreeBuilder::new()
        .with_file("a.txt", "blocked")
        .with_file("b.md", "fine")
        .with_file("c.rs", "fine too")
        .build();
    // A regular file where the txt folder should go makes that copy fail
    fs::create_dir_all(&tree.output).unwrap();
    fs::write(tree.output.join("txt"), "in the way").unwrap();

    let report = sort::run(&options(&tree)).await.unwrap();

    assert_eq!(report.copied, 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].source.ends_with("a.txt"));
    assert!(!report.is_clean());
    assert_eq!(fs::read_to_string(tree.output.join("md/b.md")).unwrap(), "fine");
    assert_eq!(
        fs::read_to_string(tree.output.join("rs/c.rs")).unwrap(),
        "fine too"
    );
    assert_eq!(
        fs::read_to_string(tree.output.join("txt")).unwrap(),
        "in the way"
    );
}

#[tokio::test]
async fn test_many_files_with_small_parallel_bound() {
    let mut builder = TreeBuilder::new();
    for i in 0..200 {
        builder = builder.with_file(format!("dir{}/file{i}.ext{}", i % 7, i % 3), format!("{i}"));
    }
    let tree = builder.build();

    let mut opts = options(&tree);
    opts.max_parallel = 4;
    let report = sort::run(&opts).await.unwrap();

    assert_eq!(report.copied, 200);
    let files = snapshot(&tree.output);
    assert_eq!(files.len(), 200);
    for i in 0..200 {
        let path = PathBuf::from(format!("ext{}/file{i}.ext{}", i % 3, i % 3));
        assert_eq!(files[&path], format!("{i}").into_bytes());
    }
}

#[tokio::test]
async fn test_overwrite_policy_replaces_and_last_duplicate_wins() {
    let tree = TreeBuilder::new()
        .with_file("a/same.txt", "first")
        .with_file("b/same.txt", "second")
        .build();
    fs::create_dir_all(tree.output.join("txt")).unwrap();
    fs::write(tree.output.join("txt/same.txt"), "stale").unwrap();

    let report = sort::run(&options(&tree)).await.unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped.len(), 1);
    let winner = &report.skipped[0];
    let SkipReason::Superseded { by } = &winner.reason else {
        panic!("expected superseded, got {:?}", winner.reason);
    };
    let content = fs::read_to_string(tree.output.join("txt/same.txt")).unwrap();
    assert_eq!(fs::read_to_string(by).unwrap(), content);
    assert_ne!(content, "stale");
}

#[tokio::test]
async fn test_skip_policy_keeps_existing_files() {
    let tree = TreeBuilder::new()
        .with_file("keep.txt", "new")
        .with_file("fresh.txt", "fresh")
        .build();
    fs::create_dir_all(tree.output.join("txt")).unwrap();
    fs::write(tree.output.join("txt/keep.txt"), "old").unwrap();

    let mut opts = options(&tree);
    opts.on_conflict = ConflictPolicy::Skip;
    let report = sort::run(&opts).await.unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(fs::read_to_string(tree.output.join("txt/keep.txt")).unwrap(), "old");
    assert_eq!(
        fs::read_to_string(tree.output.join("txt/fresh.txt")).unwrap(),
        "fresh"
    );
}

#[tokio::test]
async fn test_rename_policy_on_rerun() {
    let tree = TreeBuilder::new().with_file("a.txt", "v1").build();
    let mut opts = options(&tree);
    opts.on_conflict = ConflictPolicy::Rename;

    sort::run(&opts).await.unwrap();
    fs::write(tree.source.join("a.txt"), "v2").unwrap();
    sort::run(&opts).await.unwrap();

    assert_eq!(fs::read_to_string(tree.output.join("txt/a.txt")).unwrap(), "v1");
    assert_eq!(
        fs::read_to_string(tree.output.join("txt/a (1).txt")).unwrap(),
        "v2"
    );
}

#[tokio::test]
async fn test_file_named_like_a_category_never_races_its_folder() {
    let tree = TreeBuilder::new()
        .with_file("txt", "bare")
        .with_file("a.txt", "a")
        .build();

    for _ in 0..5 {
        let report = sort::run(&options(&tree)).await.unwrap();

        assert!(report.failed.is_empty());
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, tree.source.join("txt"));
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::CategoryFolder {
                folder: tree.output.join("txt")
            }
        );
        assert_eq!(fs::read_to_string(tree.output.join("txt/a.txt")).unwrap(), "a");
    }
}

#[tokio::test]
async fn test_rename_moves_file_named_like_a_category_aside() {
    let tree = TreeBuilder::new()
        .with_file("txt", "bare")
        .with_file("a.txt", "a")
        .build();
    let mut opts = options(&tree);
    opts.on_conflict = ConflictPolicy::Rename;

    let report = sort::run(&opts).await.unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.copied, 2);
    assert_eq!(fs::read_to_string(tree.output.join("txt (1)")).unwrap(), "bare");
    assert_eq!(fs::read_to_string(tree.output.join("txt/a.txt")).unwrap(), "a");
}

#[tokio::test]
async fn test_output_inside_source_is_not_resorted() {
    let tree = TreeBuilder::new().with_file("a.txt", "a").build();
    let output = tree.source.join("sorted");
    let opts = SortOptions::new(&tree.source, &output);

    sort::run(&opts).await.unwrap();
    let report = sort::run(&opts).await.unwrap();

    assert_eq!(report.discovered, 1);
    assert_eq!(
        snapshot(&output).keys().cloned().collect::<Vec<_>>(),
        vec![PathBuf::from("txt/a.txt")]
    );
}

#[tokio::test]
async fn test_empty_source() {
    let tree = TreeBuilder::new().build();

    let report = sort::run(&options(&tree)).await.unwrap();

    assert_eq!(report.discovered, 0);
    assert_eq!(report.copied, 0);
    assert!(!tree.output.exists());
}

#[tokio::test]
async fn test_missing_source_is_an_error() {
    let tree = TreeBuilder::new().build();
    let opts = SortOptions::new(tree.root().join("nope"), &tree.output);

    let result = sort::run(&opts).await;
    assert!(matches!(result, Err(Error::InvalidSource { .. })));
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let tree = TreeBuilder::new()
        .with_file("x/a.txt", "1")
        .with_file("y/a.txt", "2")
        .build();

    let report = sort::run(&options(&tree)).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["discovered"], 2);
    assert_eq!(json["copied"], 1);
    assert_eq!(json["skipped"][0]["reason"], "superseded");
    assert!(json["skipped"][0]["by"].is_string());
}
