//! Rendering a [`Report`] as the exported JSON document.
//!
//! The document carries a context header (timestamp, root, notes and the
//! effective scan settings), a description of the item schema, the overview
//! counters, a table of contents and the items themselves.

use crate::options::ExportOptions;
use crate::types::{Entry, Report, ScanStats, TocEntry};
use crate::TreexportError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Top-level shape of the exported file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// RFC 3339 local time of the run.
    pub generated_at: String,
    pub root: PathBuf,
    pub notes: Vec<String>,
    pub scan: ExportOptions,
    pub schema: Value,
    pub overview: ScanStats,
    pub toc: Vec<TocEntry>,
    pub items: Vec<Entry>,
}

impl ExportDocument {
    pub fn new(report: Report, options: &ExportOptions) -> Self {
        let mut scan = options.clone();
        scan.root = report.root.clone();
        Self {
            generated_at: Local::now().to_rfc3339(),
            notes: notes(options),
            root: report.root,
            scan,
            schema: schema(),
            overview: report.stats,
            toc: report.toc,
            items: report.items,
        }
    }
}

fn notes(options: &ExportOptions) -> Vec<String> {
    let excluded: Vec<String> = options.excluded_dir_names().into_iter().collect();
    let hashing = match options.hash_prefix_bytes {
        Some(prefix) => format!("sha256 covers only the first {} bytes of each file (see sha256_prefix_bytes).", prefix),
        None => "sha256 covers the full file contents.".to_string(),
    };
    vec![
        "Paths are relative to root and use '/' separators; the root itself is '.'.".to_string(),
        "Depth: number of '/' in the path, so the root and its direct children have depth 0.".to_string(),
        "Order: each directory, then its files, then its subdirectories; names sorted case-insensitively.".to_string(),
        format!(
            "Text files up to {} bytes are inlined in 'content'; larger text files and all binary files carry only metadata and 'sha256'.",
            options.max_inline_bytes
        ),
        "Binary detection is a heuristic: known binary extensions, or a NUL byte in the first 1024 bytes.".to_string(),
        hashing,
        "Empty directories and empty files are included.".to_string(),
        format!("Excluded directory names (case-insensitive): {}.", excluded.join(", ")),
        "Schema: see 'schema'.".to_string(),
    ]
}

fn schema() -> Value {
    json!({
        "item_object": {
            "type": "directory | file",
            "path": "Path relative to root, '/'-separated; '.' for the root",
            "depth": "Number of '/' in path (root = 0)",
            "is_empty": "Directories only: no files or subdirectories were reported under it",
            "note": "Directories only, optional: why the listing is incomplete",
            "size_bytes": "Files only: size in bytes",
            "ext": "Files only: lowercase extension with leading dot, '' if none",
            "is_binary": "Files only: extension list OR NUL-byte probe",
            "skipped_reason": "Files only, optional: 'binary', 'over_threshold' or 'read_error'",
            "content": "Files only, optional: full text of small text files",
            "sha256": "Files only, optional: hex SHA-256 for files whose content is not inlined",
            "sha256_prefix_bytes": "Files only, optional: present when sha256 covers only this many leading bytes"
        },
        "overview": "Counters: files == files_with_content + files_hashed + read_errors",
        "toc": "One {type, path} pair per item, same order as items"
    })
}

/// Serializes the document as indented JSON with a trailing newline.
pub fn format_json(document: &ExportDocument) -> Result<String, TreexportError> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}

/// Writes the report to `path` as an [`ExportDocument`].
pub fn write_report_to_file(
    report: Report,
    options: &ExportOptions,
    path: impl AsRef<Path>,
) -> Result<(), TreexportError> {
    let path = path.as_ref();
    let document = ExportDocument::new(report, options);
    let file = File::create(path).map_err(|e| TreexportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| TreexportError::io(path, e))?;
    Ok(())
}
