//! Fluent construction of a [`RegexTable`] with a single compilation.
//!
//! The builder only accumulates `(pattern, value)` pairs; nothing is compiled
//! until [`RegexTableBuilder::build`]. Alternations that share a value can be
//! collected with [`RegexTableBuilder::begin_sub_patterns`], which hands out a
//! [`SubPatternBuilder`] that must be closed with [`SubPatternBuilder::end`]
//! before the parent builder is usable again.

use crate::engine::{RegexEngine, StandardEngine};
use crate::table::alternation;
use crate::{Anchoring, Error, RegexTable};

/// Accumulates patterns for a [`RegexTable`].
///
/// Building consumes the builder; clone it first to build several tables from
/// a shared base.
#[derive(Debug, Clone)]
pub struct RegexTableBuilder<T, E = StandardEngine> {
    patterns: Vec<(String, T)>,
    engine: E,
}

impl<T> RegexTableBuilder<T, StandardEngine> {
    pub fn new() -> Self {
        Self::with_engine(StandardEngine::new())
    }
}

impl<T> Default for RegexTableBuilder<T, StandardEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E: RegexEngine> RegexTableBuilder<T, E> {
    pub fn with_engine(engine: E) -> Self {
        RegexTableBuilder { patterns: Vec::new(), engine }
    }

    /// Queue a pattern. Never fails; validation happens in [`build`](Self::build).
    pub fn add_pattern(mut self, pattern: impl Into<String>, value: T) -> Self {
        self.patterns.push((pattern.into(), value));
        self
    }

    /// Queue several alternatives sharing `value` as one `(?:p1|p2|...)` entry.
    /// An empty sequence leaves the builder unchanged.
    pub fn add_sub_patterns<I, S>(mut self, patterns: I, value: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(pattern) = alternation(patterns) {
            self.patterns.push((pattern, value));
        }
        self
    }

    /// Start collecting alternatives for one value.
    pub fn begin_sub_patterns(self) -> SubPatternBuilder<T, E> {
        SubPatternBuilder { parent: self, sub_patterns: Vec::new() }
    }

    /// Drop every queued pattern, keeping the engine.
    pub fn clear(mut self) -> Self {
        self.patterns.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Create the table and compile it once.
    ///
    /// # Errors
    ///
    /// [`Error::Build`] wrapping the compile error.
    pub fn build(self, anchor_start: bool, anchor_end: bool) -> Result<RegexTable<T, E>, Error> {
        tracing::debug!(patterns = self.patterns.len(), anchor_start, anchor_end, "building regex table");

        let mut table = RegexTable::with_anchoring(self.engine, Anchoring::from_flags(anchor_start, anchor_end));
        for (pattern, value) in self.patterns {
            table.add_pattern(pattern, value);
        }
        table.recompile().map_err(|err| Error::Build(Box::new(err)))?;
        Ok(table)
    }

    /// Like [`build`](Self::build) but panics on error, for tables whose
    /// patterns are fixed at development time.
    ///
    /// # Panics
    ///
    /// If any pattern fails to compile; the message includes the compile error.
    pub fn must_build(self, anchor_start: bool, anchor_end: bool) -> RegexTable<T, E> {
        match self.build(anchor_start, anchor_end) {
            Ok(table) => table,
            Err(err) => panic!("RegexTableBuilder::must_build failed: {err}"),
        }
    }
}

/// Collects alternatives for a single value; see
/// [`RegexTableBuilder::begin_sub_patterns`].
#[derive(Debug, Clone)]
#[must_use = "call `end` to add the alternation to the builder"]
pub struct SubPatternBuilder<T, E = StandardEngine> {
    parent: RegexTableBuilder<T, E>,
    sub_patterns: Vec<String>,
}

impl<T, E: RegexEngine> SubPatternBuilder<T, E> {
    pub fn add(mut self, pattern: impl Into<String>) -> Self {
        self.sub_patterns.push(pattern.into());
        self
    }

    /// Merge the alternation into the parent under `value` and return it.
    /// With no alternatives collected the parent is returned unchanged.
    pub fn end(self, value: T) -> RegexTableBuilder<T, E> {
        self.parent.add_sub_patterns(self.sub_patterns, value)
    }
}
