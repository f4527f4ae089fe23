use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Largest text file (in bytes) whose content is inlined by default.
pub const DEFAULT_MAX_INLINE_BYTES: u64 = 50 * 1024;

/// Directory names skipped unless `use_default_excludes` is turned off.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    ".venv",
    "venv",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    "node_modules",
    "target",
    "dist",
    "build",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryDetection {
    /// A NUL byte in the probe marks the file as binary.
    Simple,
    /// `content_inspector` heuristic over the probe (also catches UTF-16 and friends).
    Accurate,
    /// Only the extension list decides.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub root: PathBuf,
    pub max_inline_bytes: u64,
    pub exclude_dirs: Vec<String>,
    pub use_default_excludes: bool,
    pub hash_prefix_bytes: Option<u64>,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    pub binary_detection: BinaryDetection,
}
impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_inline_bytes: DEFAULT_MAX_INLINE_BYTES,
            exclude_dirs: Vec::new(),
            use_default_excludes: true,
            hash_prefix_bytes: None,
            respect_gitignore: false,
            include_hidden: true,
            follow_links: false,
            ignore_patterns: Vec::new(),
            binary_detection: BinaryDetection::Simple,
        }
    }
}
impl ExportOptions {
    /// Effective set of excluded directory names, lowercased.
    pub fn excluded_dir_names(&self) -> BTreeSet<String> {
        let defaults: &[&str] = if self.use_default_excludes {
            DEFAULT_EXCLUDED_DIRS
        } else {
            &[]
        };
        defaults
            .iter()
            .map(|name| name.to_string())
            .chain(self.exclude_dirs.iter().cloned())
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }
}
#[derive(Debug, Default)]
pub struct ExportBuilder {
    options: ExportOptions,
}
impl ExportBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ExportOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn max_inline_bytes(mut self, limit: u64) -> Self {
        self.options.max_inline_bytes = limit;
        self
    }
    pub fn exclude_dirs(mut self, names: Vec<String>) -> Self {
        self.options.exclude_dirs = names;
        self
    }
    pub fn use_default_excludes(mut self, yes: bool) -> Self {
        self.options.use_default_excludes = yes;
        self
    }
    pub fn hash_prefix_bytes(mut self, prefix: Option<u64>) -> Self {
        self.options.hash_prefix_bytes = prefix;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> ExportOptions {
        self.options
    }
}
