//! Building the combined regex.
//!
//! The combined pattern is every entry's named pattern joined with `|`, then
//! anchored as a whole: `^(?:(?P<..1..>p1)|(?P<..2..>p2))$`. The table's
//! anchoring is applied identically to the stand-alone patterns used for
//! fault localization and for fallback disambiguation.

use super::{Entry, RegexTable, Union};
use crate::engine::{CompiledRegex, RegexEngine};
use crate::{Error, InvalidPattern};
use std::collections::HashMap;

impl<T, E: RegexEngine> RegexTable<T, E> {
    /// Rebuild the combined regex from the current entries.
    ///
    /// With no entries this clears the matcher and succeeds; lookups then fail
    /// with [`Error::NoPatterns`]. On failure the table stays dirty, so the
    /// next lookup reports the same error again.
    pub fn recompile(&mut self) -> Result<(), Error> {
        self.compiled = None;

        if self.entries.is_empty() {
            self.needs_recompile = false;
            tracing::debug!("regex table is empty; matcher cleared");
            return Ok(());
        }

        let pattern = self.combined_pattern();
        let regex = self.engine.compile(&pattern).map_err(|err| self.localize_failure(err))?;
        let slots = group_slots(&regex, &self.entries)?;

        tracing::debug!(entries = self.entries.len(), groups = slots.len() - 1, "compiled regex table");
        self.compiled = Some(Union { regex, slots });
        self.needs_recompile = false;
        self.counters.record_compilation();
        Ok(())
    }

    /// The anchored pattern text handed to the engine.
    pub fn combined_pattern(&self) -> String {
        let alternatives = self.entries.iter().map(|e| e.named_pattern.as_str()).collect::<Vec<_>>().join("|");
        self.anchoring.apply(&alternatives)
    }

    pub(crate) fn ensure_compiled(&mut self) -> Result<(), Error> {
        if self.needs_recompile { self.recompile() } else { Ok(()) }
    }

    /// Compile each entry on its own, anchored like the table, and collect the
    /// ones that fail.
    pub fn validate_patterns(&self) -> Vec<InvalidPattern> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let err = self.engine.compile(&self.anchoring.apply(&entry.pattern)).err()?;
                Some(InvalidPattern {
                    group_name: entry.group_name.clone(),
                    pattern: entry.pattern.clone(),
                    source: Box::new(err),
                })
            })
            .collect()
    }

    fn localize_failure(&self, err: E::Error) -> Error {
        let invalid = self.validate_patterns();
        if invalid.is_empty() {
            tracing::debug!(error = %err, "combined regex failed but every entry compiles alone");
            Error::Compile(Box::new(err))
        } else {
            tracing::debug!(count = invalid.len(), "localized invalid patterns");
            Error::InvalidPatterns(invalid)
        }
    }
}

/// Map every group position of `regex` to the entry owning it.
///
/// Entry groups must appear exactly once each, in entry order; anything else
/// means the pattern text and the entry list have diverged.
fn group_slots<T, R: CompiledRegex>(regex: &R, entries: &[Entry<T, R>]) -> Result<Vec<Option<usize>>, Error> {
    let by_name: HashMap<&str, usize> = entries.iter().enumerate().map(|(i, e)| (e.group_name.as_str(), i)).collect();

    let slots: Vec<Option<usize>> = regex.group_names().into_iter().map(|name| by_name.get(name).copied()).collect();

    let order: Vec<usize> = slots.iter().flatten().copied().collect();
    if order.len() != entries.len() || order.iter().enumerate().any(|(expected, &actual)| expected != actual) {
        tracing::error!(expected = entries.len(), found = ?order, "entry groups out of step with compiled regex");
        return Err(Error::Internal(format!(
            "group layout diverged: expected {} entry groups in order, found {:?}",
            entries.len(),
            order
        )));
    }

    Ok(slots)
}
