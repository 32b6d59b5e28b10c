use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    checks::ChecksList,
    document::{DocumentParser, ScraperParser},
    error::CheckResult,
    evaluate::evaluate,
    fetch::{Fetcher, HttpFetcher},
    files::load_file,
    report::{report, CheckResults},
};

/// Where the HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Url(String),
}

/// Runs selector checks against a document using a pluggable parser and
/// fetcher.
#[derive(Debug, Clone)]
pub struct Checker<P = ScraperParser, F = HttpFetcher> {
    parser: P,
    fetcher: F,
}

impl Default for Checker {
    fn default() -> Self {
        Checker::new(ScraperParser, HttpFetcher::default())
    }
}

impl<P: DocumentParser, F: Fetcher> Checker<P, F> {
    pub fn new(parser: P, fetcher: F) -> Self {
        Checker { parser, fetcher }
    }

    /// Raw document bytes, read from disk or fetched over HTTP.
    pub async fn resolve_input(&self, source: &InputSource) -> CheckResult<Vec<u8>> {
        match source {
            InputSource::File(path) => load_file(path),
            InputSource::Url(url) => self.fetcher.fetch(url).await,
        }
    }

    pub fn check_buffer(&self, content: &[u8], checks_path: &Path) -> CheckResult<CheckResults> {
        let checks = ChecksList::load(checks_path)?;
        let document = self.parser.parse(content);
        evaluate(&document, &checks)
    }

    /// Acquires the input, evaluates every check and only then writes the
    /// report, so a failure at any stage leaves `out` untouched.
    pub async fn run<W: Write>(
        &self,
        source: &InputSource,
        checks_path: &Path,
        out: &mut W,
    ) -> CheckResult<CheckResults> {
        debug!(?source, checks = %checks_path.display(), "checking");
        let content = self.resolve_input(source).await?;
        let results = self.check_buffer(&content, checks_path)?;
        report(&results, out)?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::CheckError;

    /// Serves a fixed body, or fails like an unreachable host when `None`.
    struct StubFetcher {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(body: Option<&'static str>) -> Self {
            StubFetcher {
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> CheckResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(CheckError::Network {
                    url: url.to_string(),
                    message: "connect ECONNREFUSED".to_string(),
                }),
            }
        }
    }

    const PAGE: &str = r##"<html><head><title>t</title></head><body><a href="#">link</a></body></html>"##;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_file_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let html = write_fixture(dir.path(), "index.html", PAGE);
        let checks = write_fixture(dir.path(), "checks.json", r#"["head", "a", "img"]"#);

        let checker = Checker::new(ScraperParser, StubFetcher::new(None));
        let mut out = Vec::new();
        checker
            .run(&InputSource::File(html), &checks, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n    \"a\": true,\n    \"head\": true,\n    \"img\": false\n}\n"
        );
        assert_eq!(checker.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_selector_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let html = write_fixture(dir.path(), "index.html", "<p>x</p>");
        let checks = write_fixture(dir.path(), "checks.json", r#"["", "p"]"#);

        let checker = Checker::new(ScraperParser, StubFetcher::new(None));
        let mut out = Vec::new();
        checker
            .run(&InputSource::File(html), &checks, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n    \"\": false,\n    \"p\": true\n}\n"
        );
    }

    #[tokio::test]
    async fn test_url_mode_uses_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        let checks = write_fixture(dir.path(), "checks.json", r#"["title", "form"]"#);

        let checker = Checker::new(ScraperParser, StubFetcher::new(Some(PAGE)));
        let mut out = Vec::new();
        let results = checker
            .run(
                &InputSource::Url("http://example.test/".to_string()),
                &checks,
                &mut out,
            )
            .await
            .unwrap();

        assert_eq!(results.get("title"), Some(true));
        assert_eq!(results.get("form"), Some(false));
        assert_eq!(checker.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let checks = write_fixture(dir.path(), "checks.json", r#"["a"]"#);

        let checker = Checker::new(ScraperParser, StubFetcher::new(None));
        let mut out = Vec::new();
        let err = checker
            .run(
                &InputSource::Url("http://unreachable.test/".to_string()),
                &checks,
                &mut out,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CheckError::Network { ref url, .. } if url == "http://unreachable.test/"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_html_never_reads_checks() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("index.html");
        let malformed_checks = write_fixture(dir.path(), "checks.json", "not json");

        let checker = Checker::new(ScraperParser, StubFetcher::new(None));
        let mut out = Vec::new();
        let err = checker
            .run(&InputSource::File(missing.clone()), &malformed_checks, &mut out)
            .await
            .unwrap_err();

        match err {
            CheckError::MissingFile { path } => assert_eq!(path, missing),
            other => panic!("expected MissingFile, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_checks_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let html = write_fixture(dir.path(), "index.html", PAGE);
        let checks = write_fixture(dir.path(), "checks.json", r#"{"a": 1}"#);

        let checker: Checker = Checker::default();
        let mut out = Vec::new();
        let err = checker
            .run(&InputSource::File(html), &checks, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckError::MalformedChecks { .. }));
        assert!(out.is_empty());
    }
}
