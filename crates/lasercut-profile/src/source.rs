//! Source reading
//!
//! Opens a drawing export and hands back its text. Any failure to open or
//! read is reported as [`ParseError::SourceUnavailable`].

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ParseError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read the whole document at `path`
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(decode(bytes))
}

/// Read the whole document from an open reader
pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| ParseError::SourceUnavailable {
            path: PathBuf::from("<reader>"),
            source,
        })?;
    Ok(decode(bytes))
}

/// Drop a UTF-8 byte order mark and replace undecodable bytes
fn decode(mut bytes: Vec<u8>) -> String {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("Document is not valid UTF-8; undecodable bytes replaced");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}
