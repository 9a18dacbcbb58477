//! Build selection by builder category and name pattern
//!
//! A selection names a set of builds either through an exact, case-sensitive
//! builder category or through a UNIX shell glob (`*`, `?`, `[...]`) matched
//! case-insensitively against builder names. When both are supplied the
//! result is the union of the two candidate sets.

use std::collections::BTreeSet;

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{BuildId, Builder, TelemetryStore};

/// Resolve a category and/or builder name pattern to a set of build ids
///
/// Iterating the returned set yields ids in ascending order. Supplying
/// neither a category nor a pattern is an error.
pub fn select_build_ids(
    store: &dyn TelemetryStore,
    category: Option<&str>,
    pattern: Option<&str>,
) -> Result<BTreeSet<BuildId>> {
    if category.is_none() && pattern.is_none() {
        return Err(Error::SelectionRequired);
    }

    let mut ids = BTreeSet::new();

    if let Some(category) = category {
        ids.extend(store.build_ids_in_category(category)?);
    }

    if let Some(pattern) = pattern {
        let matcher = builder_name_matcher(pattern)?;
        let names: BTreeSet<String> =
            store.builders()?.into_iter().map(|b| b.name).collect();
        for name in names {
            if matcher.is_match(&name) {
                ids.extend(store.build_ids_with_builder_name(&name)?);
            }
        }
    }

    debug!(builds = ids.len(), "builds selected");
    Ok(ids)
}

/// Resolve a category and/or name pattern to the matching builders
///
/// Same matching rules as [`select_build_ids`]; the result is sorted by
/// (name, id). Used when a report is keyed by builder rather than by build.
pub fn matching_builders(
    store: &dyn TelemetryStore,
    category: Option<&str>,
    pattern: Option<&str>,
) -> Result<Vec<Builder>> {
    if category.is_none() && pattern.is_none() {
        return Err(Error::SelectionRequired);
    }

    let matcher = pattern.map(builder_name_matcher).transpose()?;

    let mut matched: Vec<Builder> = store
        .builders()?
        .into_iter()
        .filter(|b| {
            let by_category = category.is_some_and(|c| b.category == c);
            let by_pattern = matcher.as_ref().is_some_and(|m| m.is_match(&b.name));
            by_category || by_pattern
        })
        .collect();

    matched.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    Ok(matched)
}

/// Compile a shell glob into a case-insensitive builder name matcher
fn builder_name_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })?;
    Ok(glob.compile_matcher())
}
