use crate::classify::{classify_file, extension_of};
use crate::error::TreexportError;
use crate::options::ExportOptions;
use crate::types::{Entry, Report, ScanStats, SkipReason, TocEntry};
use crate::walker::{WalkEvent, Walker};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root-relative, `/`-separated path; `"."` for the root.
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Number of separators in a relative path. The root and its direct children are depth 0.
pub(crate) fn depth_of(relative: &str) -> usize {
    if relative == "." {
        0
    } else {
        relative.matches('/').count()
    }
}

/// True when the directory has at least one entry on disk, whether or not
/// that entry ends up in the export. An unreadable listing counts as empty.
fn has_children_on_disk(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut listing| listing.next().is_some())
}

/// Collects entries in walk order and keeps the index needed to attach
/// listing failures to directories already emitted.
struct Assembler {
    options: ExportOptions,
    root: PathBuf,
    items: Vec<Entry>,
    dir_index: HashMap<String, usize>,
}
impl Assembler {
    fn new(root: PathBuf, options: ExportOptions) -> Self {
        let mut assembler = Self {
            options,
            root,
            items: Vec::new(),
            dir_index: HashMap::new(),
        };
        // The root is always reported, even when the walker yields nothing for it.
        let is_empty = !has_children_on_disk(&assembler.root);
        assembler.push(Entry::Directory {
            path: ".".to_string(),
            depth: 0,
            is_empty,
            note: None,
        });
        assembler
    }
    fn push(&mut self, entry: Entry) {
        if entry.is_dir() {
            self.dir_index.insert(entry.path().to_string(), self.items.len());
        }
        self.items.push(entry);
    }
    fn add_dir(&mut self, path: &Path) {
        let relative = relative_path(&self.root, path);
        if relative == "." {
            return;
        }
        #[cfg(feature = "logging")]
        tracing::debug!("Directory: {}", relative);
        self.push(Entry::Directory {
            depth: depth_of(&relative),
            path: relative,
            is_empty: !has_children_on_disk(path),
            note: None,
        });
    }
    fn add_file(&mut self, path: &Path) {
        let relative = relative_path(&self.root, path);
        let ext = extension_of(path);
        let entry = match fs::metadata(path) {
            Ok(meta) => {
                let size = meta.len();
                let outcome = classify_file(path, &ext, size, &self.options);
                #[cfg(feature = "logging")]
                tracing::debug!(
                    "File: {} ({} bytes, binary: {}, skipped: {:?})",
                    relative,
                    size,
                    outcome.is_binary,
                    outcome.skipped_reason
                );
                // Only recorded when the digest really stops short of the file's end.
                let sha256_prefix_bytes = match (&outcome.sha256, self.options.hash_prefix_bytes) {
                    (Some(_), Some(prefix)) if prefix < size => Some(prefix),
                    _ => None,
                };
                Entry::File {
                    depth: depth_of(&relative),
                    path: relative,
                    size_bytes: size,
                    ext,
                    is_binary: outcome.is_binary,
                    skipped_reason: outcome.skipped_reason,
                    content: outcome.content,
                    sha256: outcome.sha256,
                    sha256_prefix_bytes,
                }
            }
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Cannot stat {}: {}", path.display(), _e);
                Entry::File {
                    depth: depth_of(&relative),
                    path: relative,
                    size_bytes: 0,
                    ext,
                    is_binary: false,
                    skipped_reason: Some(SkipReason::ReadError),
                    content: None,
                    sha256: None,
                    sha256_prefix_bytes: None,
                }
            }
        };
        self.push(entry);
    }
    fn note_unreadable(&mut self, dir: &Path, reason: String) {
        let relative = relative_path(&self.root, dir);
        #[cfg(feature = "logging")]
        tracing::warn!("Cannot list {}: {}", relative, reason);
        if let Some(&idx) = self.dir_index.get(&relative) {
            if let Entry::Directory { note, .. } = &mut self.items[idx] {
                *note = Some(format!("unreadable: {}", reason));
            }
        }
    }
    fn finish(self) -> Report {
        let stats = compute_stats(&self.items);
        let toc = self.items.iter().map(TocEntry::from).collect();
        Report {
            root: self.root,
            stats,
            toc,
            items: self.items,
        }
    }
}

/// Counters over a finished item list.
pub fn compute_stats(items: &[Entry]) -> ScanStats {
    let mut stats = ScanStats::default();
    for entry in items {
        match entry {
            Entry::Directory { is_empty, .. } => {
                stats.directories += 1;
                if *is_empty {
                    stats.empty_directories += 1;
                }
            }
            Entry::File {
                size_bytes,
                is_binary,
                skipped_reason,
                content,
                sha256,
                ..
            } => {
                stats.files += 1;
                stats.total_bytes += size_bytes;
                if *is_binary {
                    stats.binary_files += 1;
                }
                if *skipped_reason == Some(SkipReason::OverThreshold) {
                    stats.oversize_text_files += 1;
                }
                if *skipped_reason == Some(SkipReason::ReadError) {
                    stats.read_errors += 1;
                } else if content.is_some() {
                    stats.files_with_content += 1;
                } else if sha256.is_some() {
                    stats.files_hashed += 1;
                }
            }
        }
    }
    stats
}

fn resolve_root(root: &Path) -> Result<PathBuf, TreexportError> {
    let absolute = std::path::absolute(root).map_err(|e| TreexportError::io(root, e))?;
    let meta = fs::metadata(&absolute).map_err(|e| TreexportError::io(&absolute, e))?;
    if !meta.is_dir() {
        return Err(TreexportError::InvalidPath(format!(
            "{} is not a directory",
            absolute.display()
        )));
    }
    Ok(absolute)
}

/// Walks `options.root` once and builds the report.
///
/// Unreadable directories and files are recorded in the report; only an
/// invalid root or an invalid ignore pattern fails the run.
pub fn export(options: ExportOptions) -> Result<Report, TreexportError> {
    let root = resolve_root(&options.root)?;
    #[cfg(feature = "logging")]
    tracing::debug!("Starting export with root: {}", root.display());
    let walker = Walker::new(&root, &options)?;
    let mut assembler = Assembler::new(root, options);
    for event in walker.into_iter() {
        match event {
            WalkEvent::Dir(path) => assembler.add_dir(&path),
            WalkEvent::File(path) => assembler.add_file(&path),
            WalkEvent::Unreadable { dir, reason } => assembler.note_unreadable(&dir, reason),
        }
    }
    let report = assembler.finish();
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Export finished: {} directories, {} files",
        report.stats.directories,
        report.stats.files
    );
    Ok(report)
}
