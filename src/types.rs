use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Why a file's content was left out of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Binary,
    /// Text file larger than the inline threshold. Older exports called this `too_large`.
    #[serde(alias = "too_large")]
    OverThreshold,
    ReadError,
}

/// One directory or file record, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Directory {
        /// Root-relative, `/`-separated; `"."` for the root itself.
        path: String,
        depth: usize,
        is_empty: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    File {
        path: String,
        depth: usize,
        size_bytes: u64,
        /// Lowercase extension including the dot, empty when there is none.
        ext: String,
        is_binary: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        skipped_reason: Option<SkipReason>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        /// Hex SHA-256 of the file bytes, or of the first `sha256_prefix_bytes` of them.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sha256: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sha256_prefix_bytes: Option<u64>,
    },
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::Directory { path, .. } => path,
            Entry::File { path, .. } => path,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Entry::Directory { depth, .. } => *depth,
            Entry::File { depth, .. } => *depth,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Directory { .. } => EntryKind::Directory,
            Entry::File { .. } => EntryKind::File,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// Table-of-contents line mirroring one entry of `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
}

impl From<&Entry> for TocEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            kind: entry.kind(),
            path: entry.path().to_string(),
        }
    }
}

/// Counters over a finished scan.
///
/// `files == files_with_content + files_hashed + read_errors` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub directories: usize,
    pub empty_directories: usize,
    pub files: usize,
    pub files_with_content: usize,
    pub files_hashed: usize,
    pub binary_files: usize,
    pub oversize_text_files: usize,
    pub read_errors: usize,
    pub total_bytes: u64,
}

/// The complete result of an export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Absolute root the scan started from.
    pub root: PathBuf,
    pub stats: ScanStats,
    pub toc: Vec<TocEntry>,
    pub items: Vec<Entry>,
}
