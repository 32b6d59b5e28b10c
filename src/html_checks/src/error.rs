use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Error: File {} does not exist.", .path.display())]
    MissingFile { path: PathBuf },
    #[error("URL: {url}\nError: {message}")]
    Network { url: String, message: String },
    #[error("Error: {} is not a JSON array of CSS selectors: {source}", .path.display())]
    MalformedChecks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error: invalid CSS selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CheckError {
    /// Process exit code for this failure. Missing files and failed fetches
    /// exit with `1`; malformed input exits with `2`.
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckError::MissingFile { .. } | CheckError::Network { .. } => 1,
            CheckError::MalformedChecks { .. }
            | CheckError::InvalidSelector { .. }
            | CheckError::Io(_) => 2,
        }
    }

    /// Missing files and failed fetches are reported on stdout, everything
    /// else on stderr.
    pub fn reports_on_stdout(&self) -> bool {
        matches!(
            self,
            CheckError::MissingFile { .. } | CheckError::Network { .. }
        )
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
