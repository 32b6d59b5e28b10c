use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::CheckResult;

const JSON_INDENT: &[u8] = b"    ";

/// Selector to presence flag, keyed in code-point order. A selector listed
/// twice ends up as a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckResults(BTreeMap<String, bool>);

impl CheckResults {
    pub fn get(&self, selector: &str) -> Option<bool> {
        self.0.get(selector).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(selector, present)| (selector.as_str(), *present))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object indented with four spaces, no trailing newline.
    pub fn to_json(&self) -> CheckResult<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        self.serialize(&mut ser).map_err(io::Error::from)?;
        let json = String::from_utf8(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(json)
    }
}

impl FromIterator<(String, bool)> for CheckResults {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        CheckResults(iter.into_iter().collect())
    }
}

/// Writes the results as JSON followed by a newline.
pub fn report<W: Write>(results: &CheckResults, out: &mut W) -> CheckResult<()> {
    let json = results.to_json()?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}
