use tracing::trace;

use crate::{
    checks::ChecksList,
    document::SelectorQuery,
    error::CheckResult,
    report::CheckResults,
};

/// Records, for every selector, whether the document has at least one match.
/// The first selector the engine rejects aborts the whole evaluation.
pub fn evaluate<D: SelectorQuery + ?Sized>(
    document: &D,
    checks: &ChecksList,
) -> CheckResult<CheckResults> {
    checks
        .iter()
        .map(|selector| -> CheckResult<(String, bool)> {
            let present = document.matches_any(selector)?;
            trace!(selector, present, "check evaluated");
            Ok((selector.to_string(), present))
        })
        .collect()
}
