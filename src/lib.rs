//! # Treexport
//!
//! `treexport` walks a directory tree and exports it as a single JSON document:
//! every directory and file in a deterministic pre-order, small text files with
//! their content inlined, and binary or oversized files with a SHA-256
//! fingerprint instead.
//!
//! # Features
//!
//! - `logging` (default): debug and warning events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use treexport::{ExportBuilder, export, output};
//!
//! let options = ExportBuilder::new(".")
//!     .max_inline_bytes(50 * 1024)
//!     .exclude_dirs(vec!["fixtures".into()])
//!     .build();
//!
//! let report = export(options.clone()).expect("Failed to scan directory");
//! println!("{} files", report.stats.files);
//! output::write_report_to_file(report, &options, "tree.json").expect("Failed to write");
//! ```

mod classify;
mod engine;
mod error;
mod options;
pub mod output;
mod reader;
mod types;
mod walker;

pub use classify::{BINARY_EXTENSIONS, FileOutcome, PROBE_LEN, classify_file, extension_of, is_binary_extension, probe_is_binary};
pub use engine::{compute_stats, export};
pub use error::TreexportError;
pub use options::{BinaryDetection, DEFAULT_EXCLUDED_DIRS, DEFAULT_MAX_INLINE_BYTES, ExportBuilder, ExportOptions};
pub use reader::{read_text, sha256_file};
pub use types::{Entry, EntryKind, Report, ScanStats, SkipReason, TocEntry};
