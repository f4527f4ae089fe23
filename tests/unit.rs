use sha2::{Digest, Sha256};
use std::fs;
use treexport::{
    BinaryDetection, Entry, ExportBuilder, SkipReason, classify_file, compute_stats,
    extension_of, is_binary_extension, probe_is_binary, read_text, sha256_file,
};
use tempfile::tempdir;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[test]
fn test_sha256_of_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty");
    fs::write(&path, b"").unwrap();
    assert_eq!(sha256_file(&path, None).unwrap(), EMPTY_SHA256);
}
#[test]
fn test_sha256_of_known_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, "hello").unwrap();
    assert_eq!(sha256_file(&path, None).unwrap(), HELLO_SHA256);
}
#[test]
fn test_sha256_prefix_only_covers_leading_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello_world.txt");
    fs::write(&path, "hello world").unwrap();
    assert_eq!(sha256_file(&path, Some(5)).unwrap(), HELLO_SHA256);
    assert_ne!(sha256_file(&path, None).unwrap(), HELLO_SHA256);
}
#[test]
fn test_sha256_streams_files_larger_than_a_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&path, &data).unwrap();
    let expected = hex::encode(Sha256::digest(&data));
    assert_eq!(sha256_file(&path, None).unwrap(), expected);
}
#[test]
fn test_sha256_missing_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(sha256_file(&dir.path().join("nope"), None).is_err());
}
#[test]
fn test_read_text_keeps_valid_utf8_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.md");
    fs::write(&path, "line one\r\nblåbær ✓\n").unwrap();
    assert_eq!(read_text(&path).unwrap(), "line one\r\nblåbær ✓\n");
}
#[test]
fn test_read_text_replaces_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, [b'a', 0xff, b'b']).unwrap();
    assert_eq!(read_text(&path).unwrap(), "a\u{FFFD}b");
}
#[test]
fn test_read_text_missing_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(read_text(&dir.path().join("gone.txt")).is_err());
}
#[test]
fn test_extension_is_lowercased_with_dot() {
    assert_eq!(extension_of("photos/IMG_01.PNG".as_ref()), ".png");
    assert_eq!(extension_of("archive.tar.GZ".as_ref()), ".gz");
    assert_eq!(extension_of("Makefile".as_ref()), "");
    assert!(is_binary_extension(".safetensors"));
    assert!(!is_binary_extension(".rs"));
}
#[test]
fn test_probe_detects_nul_byte() {
    let dir = tempdir().unwrap();
    let bin = dir.path().join("blob");
    let text = dir.path().join("plain");
    fs::write(&bin, [b'x', 0, b'y']).unwrap();
    fs::write(&text, "just text").unwrap();
    assert!(probe_is_binary(&bin, BinaryDetection::Simple));
    assert!(!probe_is_binary(&text, BinaryDetection::Simple));
    assert!(probe_is_binary(&bin, BinaryDetection::Accurate));
    assert!(!probe_is_binary(&text, BinaryDetection::Accurate));
    assert!(!probe_is_binary(&bin, BinaryDetection::None));
}
#[test]
fn test_probe_only_reads_first_kilobyte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("late_nul");
    let mut data = vec![b'a'; 2048];
    data.push(0);
    fs::write(&path, data).unwrap();
    assert!(!probe_is_binary(&path, BinaryDetection::Simple));
}
#[test]
fn test_probe_failure_counts_as_binary() {
    let dir = tempdir().unwrap();
    assert!(probe_is_binary(&dir.path().join("missing"), BinaryDetection::Simple));
}
// Binary detection is a heuristic: these cases document where it is knowingly wrong.
#[test]
fn test_heuristic_misclassifications() {
    let dir = tempdir().unwrap();
    let options = ExportBuilder::new(dir.path()).build();

    let text_with_nul = dir.path().join("notes.txt");
    fs::write(&text_with_nul, b"text\0with nul").unwrap();
    let outcome = classify_file(&text_with_nul, ".txt", 13, &options);
    assert!(outcome.is_binary);

    let unlisted_binary = dir.path().join("model.weights");
    fs::write(&unlisted_binary, [0xffu8, 0xfe, 0x80, 0x81]).unwrap();
    let outcome = classify_file(&unlisted_binary, ".weights", 4, &options);
    assert!(!outcome.is_binary);
    assert_eq!(outcome.content.as_deref(), Some("\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"));
}
#[test]
fn test_extension_alone_marks_binary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fake.png");
    fs::write(&path, "not really an image").unwrap();
    let options = ExportBuilder::new(dir.path()).build();
    let outcome = classify_file(&path, ".png", 19, &options);
    assert!(outcome.is_binary);
    assert_eq!(outcome.skipped_reason, Some(SkipReason::Binary));
    assert!(outcome.content.is_none());
    assert!(outcome.sha256.is_some());
}
#[test]
fn test_binary_wins_over_threshold() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.bin");
    fs::write(&path, vec![0u8; 64]).unwrap();
    let options = ExportBuilder::new(dir.path()).max_inline_bytes(10).build();
    let outcome = classify_file(&path, ".bin", 64, &options);
    assert_eq!(outcome.skipped_reason, Some(SkipReason::Binary));
}
#[test]
fn test_vanished_text_file_is_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.rs");
    let options = ExportBuilder::new(dir.path())
        .binary_detection(BinaryDetection::None)
        .build();
    let outcome = classify_file(&path, ".rs", 3, &options);
    assert_eq!(outcome.skipped_reason, Some(SkipReason::ReadError));
    assert!(outcome.content.is_none());
    assert!(outcome.sha256.is_none());
}
#[test]
fn test_excluded_dir_names_merge_and_lowercase() {
    let options = ExportBuilder::new(".")
        .exclude_dirs(vec!["Fixtures".into(), "  ".into()])
        .build();
    let names = options.excluded_dir_names();
    assert!(names.contains("fixtures"));
    assert!(names.contains("node_modules"));
    assert!(!names.contains(""));

    let only_extra = ExportBuilder::new(".")
        .use_default_excludes(false)
        .exclude_dirs(vec!["Vendor".into()])
        .build()
        .excluded_dir_names();
    assert_eq!(only_extra.into_iter().collect::<Vec<_>>(), vec!["vendor".to_string()]);
}
#[test]
fn test_legacy_too_large_reason_is_accepted() {
    let entry: Entry = serde_json::from_str(
        r#"{"type":"file","depth":0,"path":"big.log","size_bytes":9000000,"ext":".log","is_binary":false,"skipped_reason":"too_large"}"#,
    )
    .unwrap();
    match entry {
        Entry::File { skipped_reason, .. } => {
            assert_eq!(skipped_reason, Some(SkipReason::OverThreshold))
        }
        Entry::Directory { .. } => panic!("expected a file entry"),
    }
    let json = serde_json::to_string(&SkipReason::OverThreshold).unwrap();
    assert_eq!(json, r#""over_threshold""#);
}
#[test]
fn test_stats_reconcile() {
    let file = |path: &str, reason: Option<SkipReason>, content: Option<&str>, hashed: bool| Entry::File {
        path: path.into(),
        depth: 0,
        size_bytes: 4,
        ext: String::new(),
        is_binary: reason == Some(SkipReason::Binary),
        skipped_reason: reason,
        content: content.map(String::from),
        sha256: hashed.then(|| EMPTY_SHA256.to_string()),
        sha256_prefix_bytes: None,
    };
    let items = vec![
        Entry::Directory { path: ".".into(), depth: 0, is_empty: false, note: None },
        Entry::Directory { path: "e".into(), depth: 0, is_empty: true, note: None },
        file("a", None, Some("text"), false),
        file("b", Some(SkipReason::Binary), None, true),
        file("c", Some(SkipReason::OverThreshold), None, true),
        file("d", Some(SkipReason::ReadError), None, false),
    ];
    let stats = compute_stats(&items);
    assert_eq!(stats.directories, 2);
    assert_eq!(stats.empty_directories, 1);
    assert_eq!(stats.files, 4);
    assert_eq!(stats.files_with_content, 1);
    assert_eq!(stats.files_hashed, 2);
    assert_eq!(stats.read_errors, 1);
    assert_eq!(stats.binary_files, 1);
    assert_eq!(stats.oversize_text_files, 1);
    assert_eq!(stats.total_bytes, 16);
    assert_eq!(
        stats.files,
        stats.files_with_content + stats.files_hashed + stats.read_errors
    );
}
