//! Mapping a combined match back to the entry that produced it.
//!
//! The combined regex reports one flat list of submatches. Entry `i` owns its
//! synthetic group plus every following position up to the next synthetic
//! group (its own internal captures). The winner is the first synthetic group
//! whose text is non-empty.
//!
//! When every synthetic group reports `""` the flat list cannot say which
//! entry fired: a zero-length match and a group that did not participate look
//! the same. Entries are then re-tested one at a time, in registration order,
//! against their own anchored pattern; the first that matches wins and its own
//! full match is returned.

use super::{RegexTable, Union};
use crate::engine::{CompiledRegex, RegexEngine, StandardEngine};
use crate::Error;

impl<T, E: RegexEngine> RegexTable<T, E> {
    /// Bring the table up to date and return a read-only lookup view.
    ///
    /// The view's lookups take `&self`, so it can be shared across threads
    /// when the value and engine types allow it.
    pub fn classifier(&mut self) -> Result<Classifier<'_, T, E>, Error> {
        self.ensure_compiled()?;
        Ok(Classifier { table: self })
    }

    /// Match `input` and return the winning value with that entry's submatches.
    ///
    /// Element 0 of the submatches is the text of the winning entry's group;
    /// the rest are the entry's own capture groups.
    ///
    /// # Errors
    ///
    /// Compile errors from a pending recompilation, [`Error::NoPatterns`] for
    /// an empty table, [`Error::NoMatch`] when nothing matches, and
    /// [`Error::Internal`] if no entry can be attributed to a reported match.
    pub fn lookup<'h>(&mut self, input: &'h str) -> Result<(&T, Vec<&'h str>), Error> {
        self.classifier()?.lookup(input)
    }

    /// [`lookup`](RegexTable::lookup) without the failure reason.
    pub fn try_lookup<'h>(&mut self, input: &'h str) -> Option<(&T, Vec<&'h str>)> {
        self.lookup(input).map_err(|err| report_folded(&err)).ok()
    }

    /// [`lookup`](RegexTable::lookup) falling back to `default` and no submatches.
    pub fn lookup_or_else<'a, 'h>(&'a mut self, input: &'h str, default: &'a T) -> (&'a T, Vec<&'h str>) {
        match self.lookup(input) {
            Ok(found) => found,
            Err(err) => {
                report_folded(&err);
                (default, Vec::new())
            }
        }
    }
}

/// A compiled, up-to-date table borrowed for lookups.
///
/// Obtained from [`RegexTable::classifier`].
pub struct Classifier<'a, T, E: RegexEngine = StandardEngine> {
    table: &'a RegexTable<T, E>,
}

impl<T, E: RegexEngine> Clone for Classifier<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E: RegexEngine> Copy for Classifier<'_, T, E> {}

impl<'a, T, E: RegexEngine> Classifier<'a, T, E> {
    pub fn table(&self) -> &'a RegexTable<T, E> {
        self.table
    }

    /// See [`RegexTable::lookup`].
    pub fn lookup<'h>(&self, input: &'h str) -> Result<(&'a T, Vec<&'h str>), Error> {
        let table = self.table;
        let Some(union) = &table.compiled else {
            return Err(Error::NoPatterns);
        };
        table.counters.record_lookup();

        let Some(matches) = union.regex.find_submatches(input) else {
            tracing::trace!(input, "no pattern matched");
            return Err(Error::NoMatch);
        };

        if let Some((index, own)) = attribute(&union.slots, &matches) {
            let entry = &table.entries[index];
            tracing::trace!(input, group = %entry.group_name, "matched");
            return Ok((&entry.value, own));
        }

        self.resolve_individually(union, input)
    }

    /// See [`RegexTable::try_lookup`].
    pub fn try_lookup<'h>(&self, input: &'h str) -> Option<(&'a T, Vec<&'h str>)> {
        self.lookup(input).map_err(|err| report_folded(&err)).ok()
    }

    /// See [`RegexTable::lookup_or_else`].
    pub fn lookup_or_else<'h>(&self, input: &'h str, default: &'a T) -> (&'a T, Vec<&'h str>) {
        self.lookup(input).unwrap_or_else(|err| {
            report_folded(&err);
            (default, Vec::new())
        })
    }

    fn resolve_individually<'h>(&self, union: &Union<E::Regex>, input: &'h str) -> Result<(&'a T, Vec<&'h str>), Error> {
        let table = self.table;
        for entry in &table.entries {
            let Some(regex) = entry.individual(&table.engine, table.anchoring) else {
                continue;
            };
            if let Some(matches) = regex.find_submatches(input) {
                table.counters.record_fallback();
                tracing::trace!(input, group = %entry.group_name, "resolved ambiguous empty match");
                return Ok((&entry.value, matches));
            }
        }

        tracing::error!(input, groups = union.slots.len() - 1, "combined regex matched but no entry could be attributed");
        Err(Error::Internal("match found but no capture group matched".to_string()))
    }
}

/// Find the first entry group with non-empty text and slice out its own
/// submatches: the group's text followed by the positions up to the next
/// entry group.
fn attribute<'h>(slots: &[Option<usize>], matches: &[&'h str]) -> Option<(usize, Vec<&'h str>)> {
    let (position, index) = slots.iter().enumerate().find_map(|(pos, &slot)| {
        let index = slot?;
        let text = matches.get(pos)?;
        (!text.is_empty()).then_some((pos, index))
    })?;

    let rest = slots[position + 1..]
        .iter()
        .zip(matches.iter().skip(position + 1))
        .take_while(|(slot, _)| slot.is_none())
        .map(|(_, text)| *text);

    Some((index, std::iter::once(matches[position]).chain(rest).collect()))
}

/// Log a failure that a folding lookup variant is about to discard.
///
/// A no-match is the expected outcome for those variants; a broken pattern set
/// is not, and would otherwise disappear silently.
fn report_folded(err: &Error) {
    if err.is_compile_error() {
        tracing::warn!(error = %err, "lookup folded a compile error into a default result");
    }
}
