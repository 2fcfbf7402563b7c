//! Writes encoded bitmaps to files or any [`std::io::Write`].
//!
//! The sink never releases the bitmap it is given, and performs no cleanup
//! on failure: after a [`SinkError::ShortWrite`] the target file may exist
//! on disk, truncated.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::bitmap::EncodedBitmap;

/// Errors from writing an encoded bitmap.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SinkError {
    #[error("output path is empty")]
    EmptyPath,

    #[error("bitmap has already been released")]
    Released,

    #[error("cannot open {} for writing", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        written: usize,
        expected: usize,
        #[source]
        source: io::Error,
    },

    #[error("flush failed")]
    FlushFailed(#[source] io::Error),
}

/// Write `bitmap` to `path`, creating the file or truncating an existing one.
pub fn write_to_file(bitmap: &EncodedBitmap, path: impl AsRef<Path>) -> Result<(), SinkError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SinkError::EmptyPath);
    }
    if bitmap.is_released() {
        return Err(SinkError::Released);
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| SinkError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    write_to(bitmap, file).inspect_err(|e| {
        log::warn!("writing bitmap to {} failed: {e}", path.display());
    })?;
    log::debug!("wrote {} byte bitmap to {}", bitmap.len(), path.display());
    Ok(())
}

/// Write `bitmap`'s file bytes to `writer` and flush it.
pub fn write_to<W: Write>(bitmap: &EncodedBitmap, mut writer: W) -> Result<(), SinkError> {
    let bytes = bitmap.bytes().ok_or(SinkError::Released)?;

    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(SinkError::ShortWrite {
                    written,
                    expected: bytes.len(),
                    source: io::ErrorKind::WriteZero.into(),
                });
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(SinkError::ShortWrite {
                    written,
                    expected: bytes.len(),
                    source,
                });
            }
        }
    }

    writer.flush().map_err(SinkError::FlushFailed)
}
