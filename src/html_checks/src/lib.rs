//! Reports which CSS selectors from a checks file match an HTML document.
//!
//! The document is parsed with [`scraper`] and may come from disk or from a
//! single HTTP `GET`. The report is a JSON object of selector to presence
//! flag, keys sorted, indented with four spaces.

use std::{io, path::Path};

pub mod checker;
pub mod checks;
pub mod document;
pub mod error;
pub mod evaluate;
pub mod fetch;
pub mod files;
pub mod report;

pub use checker::{Checker, InputSource};
pub use checks::ChecksList;
pub use document::{DocumentParser, HtmlDocument, ScraperParser, SelectorQuery};
pub use error::{CheckError, CheckResult};
pub use evaluate::evaluate;
pub use fetch::{Fetcher, HttpFetcher};
pub use files::{assert_file_exists, load_file, CHECKSFILE_DEFAULT, HTMLFILE_DEFAULT};
pub use report::{report, CheckResults};

/// Checks `html_file` against the selectors in `checks_file` and prints the
/// JSON report to stdout.
pub fn check_html_file(html_file: &Path, checks_file: &Path) -> CheckResult<()> {
    let html = load_file(html_file)?;
    let results = check_html_buffer(&html, checks_file)?;
    report(&results, &mut io::stdout().lock())
}

/// Evaluates already-loaded HTML without printing anything.
pub fn check_html_buffer(html: &[u8], checks_file: &Path) -> CheckResult<CheckResults> {
    let checker: Checker = Checker::default();
    checker.check_buffer(html, checks_file)
}
