//! Byte decoding with encoding fallback.
//!
//! Survey exports arrive as UTF-8 most of the time, but the field laptops
//! that produce the raw tables occasionally write Windows-1252. Decoding
//! tries a BOM sniff first, then strict UTF-8, then falls back to lossy
//! Windows-1252 so a stray degree sign cannot kill a run. The fallback is
//! logged at warn level.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Decodes raw file bytes to text.
///
/// A BOM wins outright (UTF-8, UTF-16 LE and UTF-16 BE are recognised).
/// Without one the bytes are tried as strict UTF-8 and then re-decoded as
/// Windows-1252, which cannot fail for any byte sequence.
///
/// # Errors
///
/// [`IngestError::DataLoad`] when a BOM names an encoding the bytes then
/// fail to decode under.
pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<String> {
    if let Some((encoding, _bom_length)) = Encoding::for_bom(bytes) {
        if encoding != UTF_8 {
            tracing::debug!(
                path = %path.display(),
                encoding = encoding.name(),
                "decoding via BOM"
            );
        }
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(IngestError::DataLoad {
                path: path.to_path_buf(),
                message: format!("undecodable {} data", encoding.name()),
            });
        }
        return Ok(text.into_owned());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            tracing::warn!(
                path = %path.display(),
                fallback = WINDOWS_1252.name(),
                "file is not valid UTF-8, using fallback encoding"
            );
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            Ok(text.into_owned())
        }
    }
}

/// Reads a file and decodes it via [`decode_bytes`].
///
/// # Errors
///
/// [`IngestError::FileNotFound`] or [`IngestError::FileRead`] for filesystem
/// failures, plus anything [`decode_bytes`] reports.
pub fn read_decoded(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    decode_bytes(&bytes, path)
}
