use scraper::{Html, Selector};
use tracing::trace;

use crate::error::{CheckError, CheckResult};

/// A parsed document that can answer "does anything match this selector".
pub trait SelectorQuery {
    fn matches_any(&self, selector: &str) -> CheckResult<bool>;
}

/// Turns raw document bytes into something queryable.
pub trait DocumentParser {
    type Document: SelectorQuery;

    fn parse(&self, content: &[u8]) -> Self::Document;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

impl DocumentParser for ScraperParser {
    type Document = HtmlDocument;

    fn parse(&self, content: &[u8]) -> HtmlDocument {
        HtmlDocument::parse(content)
    }
}

#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Invalid UTF-8 is replaced rather than rejected; the HTML parser
    /// recovers from broken markup the same way.
    pub fn parse(content: &[u8]) -> Self {
        let source = String::from_utf8_lossy(content);
        let html = Html::parse_document(&source);
        if !html.errors.is_empty() {
            trace!(errors = html.errors.len(), "html parsed with recoverable errors");
        }
        HtmlDocument { html }
    }
}

impl SelectorQuery for HtmlDocument {
    /// A blank selector selects nothing rather than failing.
    fn matches_any(&self, selector: &str) -> CheckResult<bool> {
        if selector.trim().is_empty() {
            return Ok(false);
        }
        let parsed = Selector::parse(selector).map_err(|err| CheckError::InvalidSelector {
            selector: selector.to_string(),
            message: format!("{err:?}"),
        })?;
        Ok(self.html.select(&parsed).next().is_some())
    }
}
