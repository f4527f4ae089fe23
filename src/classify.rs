//! Binary/text classification and the per-file content policy.
//!
//! Binary detection is a heuristic: a text file with an embedded NUL byte is
//! reported as binary, and a binary format with an unlisted extension and no
//! NUL in its first kilobyte is reported as text.

use crate::options::{BinaryDetection, ExportOptions};
use crate::reader::{read_text, sha256_file};
use crate::types::SkipReason;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected at the start of a file by the binary probe.
pub const PROBE_LEN: u64 = 1024;

/// Extensions that are always treated as binary, whatever the probe says.
pub const BINARY_EXTENSIONS: &[&str] = &[
    ".exe", ".dll", ".bin", ".dat", ".so", ".dylib",
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp",
    ".pdf", ".zip", ".7z", ".rar", ".tar", ".gz", ".xz",
    ".mp3", ".wav", ".flac", ".ogg", ".mp4", ".mkv", ".mov", ".avi",
    ".gguf", ".onnx", ".pt", ".pth", ".safetensors",
];

/// Lowercase extension with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

pub fn is_binary_extension(ext: &str) -> bool {
    BINARY_EXTENSIONS.contains(&ext)
}

/// Looks at the first [`PROBE_LEN`] bytes. Any failure to read counts as binary.
pub fn probe_is_binary(path: &Path, method: BinaryDetection) -> bool {
    if method == BinaryDetection::None {
        return false;
    }
    let mut head = Vec::with_capacity(PROBE_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(PROBE_LEN).read_to_end(&mut head));
    if read.is_err() {
        #[cfg(feature = "logging")]
        tracing::debug!("Probe failed for {}, treating as binary", path.display());
        return true;
    }
    match method {
        BinaryDetection::Simple => head.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&head).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Extension match OR probe. The extension alone is enough.
pub fn is_binary(path: &Path, ext: &str, method: BinaryDetection) -> bool {
    is_binary_extension(ext) || probe_is_binary(path, method)
}

/// What the exporter attaches to a file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub is_binary: bool,
    pub skipped_reason: Option<SkipReason>,
    pub content: Option<String>,
    pub sha256: Option<String>,
}

/// Applies the content policy to one file of `size` bytes.
///
/// 1. binary: skipped, fingerprinted;
/// 2. larger than the threshold: skipped, fingerprinted;
/// 3. otherwise the text is inlined.
///
/// A failed read in any branch ends as `read_error` with neither content nor hash.
pub fn classify_file(path: &Path, ext: &str, size: u64, options: &ExportOptions) -> FileOutcome {
    let binary = is_binary(path, ext, options.binary_detection);
    let reason = if binary {
        Some(SkipReason::Binary)
    } else if size > options.max_inline_bytes {
        Some(SkipReason::OverThreshold)
    } else {
        None
    };

    match reason {
        Some(reason) => match sha256_file(path, options.hash_prefix_bytes) {
            Ok(digest) => FileOutcome {
                is_binary: binary,
                skipped_reason: Some(reason),
                content: None,
                sha256: Some(digest),
            },
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Hashing failed: {}", _e);
                read_error(binary)
            }
        },
        None => match read_text(path) {
            Ok(text) => FileOutcome {
                is_binary: false,
                skipped_reason: None,
                content: Some(text),
                sha256: None,
            },
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Read failed: {}", _e);
                read_error(false)
            }
        },
    }
}

fn read_error(is_binary: bool) -> FileOutcome {
    FileOutcome {
        is_binary,
        skipped_reason: Some(SkipReason::ReadError),
        content: None,
        sha256: None,
    }
}
