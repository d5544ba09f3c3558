//! Pattern registration, removal and introspection.

use super::{Counters, RegexTable, TableStats};
use crate::engine::{CompiledRegex, RegexEngine, StandardEngine};
use crate::{Anchoring, Error, PatternId};
use once_cell::sync::OnceCell;

const GROUP_PREFIX: &str = "__REGEXTABLE_";

/// One registered pattern.
pub(crate) struct Entry<T, R> {
    pub id: PatternId,
    /// e.g. `__REGEXTABLE_1__`
    pub group_name: String,
    /// As registered: unanchored, unmodified.
    pub pattern: String,
    /// `pattern` wrapped in the engine's named-group syntax.
    pub named_pattern: String,
    pub value: T,
    /// Anchored stand-alone compile of `pattern`, filled on first use by the
    /// fallback path. `None` inside the cell means the pattern did not compile.
    individual: OnceCell<Option<R>>,
}

impl<T, R: CompiledRegex> Entry<T, R> {
    /// The entry's own pattern, anchored like the table, compiled at most once.
    pub fn individual<E>(&self, engine: &E, anchoring: Anchoring) -> Option<&R>
    where
        E: RegexEngine<Regex = R>,
    {
        self.individual
            .get_or_init(|| match engine.compile(&anchoring.apply(&self.pattern)) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::debug!(group = %self.group_name, pattern = %self.pattern, error = %err, "entry does not compile on its own");
                    None
                }
            })
            .as_ref()
    }
}

/// Combine `patterns` into one non-capturing alternation.
///
/// `None` for an empty sequence; a single pattern is returned unwrapped.
pub(crate) fn alternation<I, S>(patterns: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let patterns: Vec<S> = patterns.into_iter().collect();
    match patterns.as_slice() {
        [] => None,
        [single] => Some(single.as_ref().to_string()),
        many => {
            let body = many.iter().map(|p| p.as_ref()).collect::<Vec<_>>().join("|");
            Some(format!("(?:{body})"))
        }
    }
}

impl<T> RegexTable<T, StandardEngine> {
    /// Empty table on the default [`StandardEngine`].
    pub fn new(anchor_start: bool, anchor_end: bool) -> Self {
        Self::with_engine(StandardEngine::new(), anchor_start, anchor_end)
    }
}

impl<T> Default for RegexTable<T, StandardEngine> {
    /// Start-anchored, not end-anchored.
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl<T, E: RegexEngine> RegexTable<T, E> {
    /// Empty table on a custom engine.
    pub fn with_engine(engine: E, anchor_start: bool, anchor_end: bool) -> Self {
        Self::with_anchoring(engine, Anchoring::from_flags(anchor_start, anchor_end))
    }

    pub fn with_anchoring(engine: E, anchoring: Anchoring) -> Self {
        RegexTable {
            engine,
            entries: Vec::new(),
            compiled: None,
            next_id: 1,
            needs_recompile: false,
            anchoring,
            counters: Counters::default(),
        }
    }

    /// Register `pattern` with `value`.
    ///
    /// Never validates the pattern: an invalid pattern is reported by the next
    /// compilation (a lookup or [`recompile`](RegexTable::recompile)).
    pub fn add_pattern(&mut self, pattern: impl Into<String>, value: T) -> PatternId {
        let id = PatternId::new(self.next_id);
        self.next_id += 1;

        let pattern = pattern.into();
        let group_name = format!("{GROUP_PREFIX}{}__", id.get());
        let named_pattern = self.engine.format_named_group(&group_name, &pattern);

        self.entries.push(Entry { id, group_name, pattern, named_pattern, value, individual: OnceCell::new() });
        self.needs_recompile = true;
        id
    }

    /// Like [`add_pattern`](RegexTable::add_pattern) but compiles immediately.
    ///
    /// The new entry is taken out again only when the failure is its own: it
    /// is blamed by name, or the combined pattern fails with every entry valid
    /// alone. An error caused by an earlier deferred pattern leaves the new
    /// entry registered.
    pub fn add_and_check_pattern(&mut self, pattern: impl Into<String>, value: T) -> Result<PatternId, Error> {
        let id = self.add_pattern(pattern, value);
        let Err(err) = self.recompile() else {
            return Ok(id);
        };

        let group_name = self.group_name(id).unwrap_or_default();
        let blamed = match &err {
            Error::Compile(_) => true,
            other => other.invalid_patterns().iter().any(|p| p.group_name == group_name),
        };
        if blamed {
            self.remove_pattern(id);
        }
        Err(err)
    }

    /// Register several alternatives that share one value, as the single
    /// pattern `(?:p1|p2|...)`. Anchoring applies to the alternation as a whole.
    ///
    /// Returns `None` (and changes nothing) for an empty sequence.
    pub fn add_sub_patterns<I, S>(&mut self, patterns: I, value: T) -> Option<PatternId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = alternation(patterns)?;
        Some(self.add_pattern(pattern, value))
    }

    /// Remove an entry, returning its value.
    pub fn remove_pattern(&mut self, id: PatternId) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(index);
        self.needs_recompile = true;
        Some(entry.value)
    }

    /// Remove every entry. Synthetic names keep counting from where they were.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.needs_recompile = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: PatternId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Synthetic capture group name assigned to `id`.
    pub fn group_name(&self, id: PatternId) -> Option<&str> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.group_name.as_str())
    }

    /// Value bound to `id`.
    pub fn value(&self, id: PatternId) -> Option<&T> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.value)
    }

    /// Registered `(id, pattern, value)` triples in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = (PatternId, &str, &T)> {
        self.entries.iter().map(|e| (e.id, e.pattern.as_str(), &e.value))
    }

    pub fn anchoring(&self) -> Anchoring {
        self.anchoring
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// True when a mutation happened since the last successful compile.
    pub fn needs_recompile(&self) -> bool {
        self.needs_recompile
    }

    pub fn stats(&self) -> TableStats {
        self.counters.snapshot()
    }
}
