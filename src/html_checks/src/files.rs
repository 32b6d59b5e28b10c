use std::{fs, path::Path};

use tracing::trace;

use crate::error::{CheckError, CheckResult};

pub const HTMLFILE_DEFAULT: &str = "index.html";
pub const CHECKSFILE_DEFAULT: &str = "checks.json";

/// Fails with [`CheckError::MissingFile`] unless `path` is an existing file.
pub fn assert_file_exists(path: &Path) -> CheckResult<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CheckError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

pub fn load_file(path: &Path) -> CheckResult<Vec<u8>> {
    let path = assert_file_exists(path)?;
    let content = fs::read(path)?;
    trace!(path = %path.display(), size = content.len(), "file loaded");
    Ok(content)
}
