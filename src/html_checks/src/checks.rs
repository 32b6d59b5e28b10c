use std::path::Path;

use tracing::debug;

use crate::{
    error::{CheckError, CheckResult},
    files::load_file,
};

/// The CSS selectors to look for, sorted by code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksList {
    selectors: Vec<String>,
}

impl ChecksList {
    pub fn new(mut selectors: Vec<String>) -> Self {
        selectors.sort();
        ChecksList { selectors }
    }

    /// Reads a JSON array of selector strings from `path`.
    pub fn load(path: &Path) -> CheckResult<Self> {
        let content = load_file(path)?;
        let checks = Self::from_json_slice(&content, path)?;
        debug!(path = %path.display(), checks = checks.len(), "checks loaded");
        Ok(checks)
    }

    /// `origin` is only used to name the source in errors.
    pub fn from_json_slice(content: &[u8], origin: &Path) -> CheckResult<Self> {
        let selectors: Vec<String> =
            serde_json::from_slice(content).map_err(|source| CheckError::MalformedChecks {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self::new(selectors))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
