//! Reading file content for inlining and fingerprinting files that are not inlined.

use crate::error::TreexportError;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Reads the whole file as text.
///
/// Valid UTF-8 is returned untouched; anything else is decoded lossily with
/// U+FFFD in place of the bad sequences. Only a failure to open or read the
/// file is an error.
pub fn read_text(path: &Path) -> Result<String, TreexportError> {
    let bytes = fs::read(path).map_err(|e| TreexportError::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Lossy UTF-8 decode for {}", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Hex SHA-256 of the file, or of its first `prefix` bytes.
///
/// The file is streamed in fixed-size chunks so memory use does not depend on
/// its size.
pub fn sha256_file(path: &Path, prefix: Option<u64>) -> Result<String, TreexportError> {
    let file = File::open(path).map_err(|e| TreexportError::io(path, e))?;
    let mut reader: Box<dyn Read> = match prefix {
        Some(limit) => Box::new(file.take(limit)),
        None => Box::new(file),
    };
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TreexportError::io(path, e)),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
