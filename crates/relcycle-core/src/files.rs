//! Text file helpers.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{CoreError, CoreResult};

const BOM: char = '\u{feff}';

/// Reads a UTF-8 file as-is.
///
/// # Errors
///
/// Returns [`CoreError::FileNotFound`] if the file does not exist, or an IO
/// error if it cannot be read.
pub fn read_text(path: &Path) -> CoreResult<String> {
    fs::read_to_string(path).map_err(|err| not_found_or_io(path, err))
}

/// Reads a UTF-8 file, dropping a leading byte-order mark.
///
/// # Errors
///
/// Same as [`read_text`].
pub fn read_text_strip_bom(path: &Path) -> CoreResult<String> {
    let text = read_text(path)?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

pub(crate) fn write_text(path: &Path, text: &str) -> CoreResult<()> {
    fs::write(path, text).map_err(|err| not_found_or_io(path, err))
}

pub(crate) fn not_found_or_io(path: &Path, err: std::io::Error) -> CoreError {
    if err.kind() == ErrorKind::NotFound {
        CoreError::FileNotFound(path.to_path_buf())
    } else {
        CoreError::Io(err)
    }
}
