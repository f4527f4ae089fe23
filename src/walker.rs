use crate::error::TreexportError;
use crate::options::ExportOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What the walker reports, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WalkEvent {
    Dir(PathBuf),
    File(PathBuf),
    /// The directory was emitted but its listing could not be read.
    Unreadable { dir: PathBuf, reason: String },
}

/// Deterministic pre-order walk: a directory, then its files, then each
/// subdirectory in turn. Both groups are sorted case-insensitively.
pub(crate) struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    pub(crate) fn new(root: &Path, options: &ExportOptions) -> Result<Self, TreexportError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .git_ignore(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .git_global(options.respect_gitignore)
            .parents(options.respect_gitignore)
            .follow_links(options.follow_links)
            .ignore(false);

        let dir_kinds = DirKindCache::new(options.follow_links);
        builder.sort_by_file_path(move |a, b| dir_kinds.compare(a, b));

        let excluded = options.excluded_dir_names();
        let matcher = build_matcher(&options.ignore_patterns)?;
        let root_owned = root.to_path_buf();
        builder.filter_entry(move |entry| keep_entry(entry, &root_owned, &excluded, matcher.as_ref()));

        Ok(Self {
            inner: builder.build(),
        })
    }
    pub(crate) fn into_iter(self) -> impl Iterator<Item = WalkEvent> {
        self.inner.filter_map(|result| match result {
            Ok(entry) => classify_entry(&entry),
            Err(e) => match error_path(&e) {
                Some(dir) => Some(WalkEvent::Unreadable {
                    dir: dir.to_path_buf(),
                    reason: root_cause(&e),
                }),
                None => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("Walk error without a path: {}", e);
                    None
                }
            },
        })
    }
}

fn build_matcher(patterns: &[String]) -> Result<Option<GlobSet>, TreexportError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| TreexportError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        glob_builder.add(glob);
    }
    glob_builder
        .build()
        .map(Some)
        .map_err(|e| TreexportError::Walk(format!("Failed to build glob set: {}", e)))
}

fn keep_entry(
    entry: &DirEntry,
    root: &Path,
    excluded: &BTreeSet<String>,
    matcher: Option<&GlobSet>,
) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    if is_dir {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if excluded.contains(&name) {
            #[cfg(feature = "logging")]
            tracing::debug!("Excluded directory: {}", entry.path().display());
            return false;
        }
    }
    match matcher {
        Some(set) => {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !set.is_match(relative)
        }
        None => true,
    }
}

/// Remembers which paths are directories so sorting a listing stats each
/// entry once instead of once per comparison.
struct DirKindCache {
    follow_links: bool,
    kinds: Mutex<HashMap<PathBuf, bool>>,
}
impl DirKindCache {
    fn new(follow_links: bool) -> Self {
        Self {
            follow_links,
            kinds: Mutex::new(HashMap::new()),
        }
    }
    fn is_dir(&self, path: &Path) -> bool {
        let mut kinds = match self.kinds.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(&is_dir) = kinds.get(path) {
            return is_dir;
        }
        let is_dir = if self.follow_links {
            path.is_dir()
        } else {
            fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
        };
        kinds.insert(path.to_path_buf(), is_dir);
        is_dir
    }
    /// Files before directories, then case-insensitive name, then exact name.
    fn compare(&self, a: &Path, b: &Path) -> Ordering {
        self.is_dir(a)
            .cmp(&self.is_dir(b))
            .then_with(|| compare_names(a, b))
    }
}

fn compare_names(a: &Path, b: &Path) -> Ordering {
    let a_name = a.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let b_name = b.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_name.cmp(&b_name))
}

fn classify_entry(entry: &DirEntry) -> Option<WalkEvent> {
    let path = entry.path();
    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
        Some(WalkEvent::Dir(path.to_path_buf()))
    } else if path.is_file() {
        Some(WalkEvent::File(path.to_path_buf()))
    } else {
        #[cfg(feature = "logging")]
        tracing::debug!("Skipping non-regular entry: {}", path.display());
        None
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } => error_path(err),
        ignore::Error::WithLineNumber { err, .. } => error_path(err),
        _ => None,
    }
}

/// Reason without the host path, which the wrapped I/O message repeats.
fn root_cause(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithPath { err, .. } => root_cause(err),
        ignore::Error::WithDepth { err, .. } => root_cause(err),
        ignore::Error::WithLineNumber { err, .. } => root_cause(err),
        ignore::Error::Io(io) => io.kind().to_string(),
        other => other.to_string(),
    }
}
