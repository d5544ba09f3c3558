//! The regex table: registry, compiler and disambiguator.
//!
//! ## How the parts work together
//!
//! ```text
//! add_pattern ──> registry.rs   Entry { __REGEXTABLE_n__, pattern, value }
//!                    │          marks the table dirty
//!                    v
//!                 compiler.rs   (?P<..1..>p1)|(?P<..2..>p2)|...  ── anchor ── compile
//!                    │          on failure: compile each entry alone and blame
//!                    │          on success: map group positions to entries
//!                    v
//! lookup ──────> disambiguate.rs
//!                    - first entry group with non-empty text wins
//!                    - its own groups run up to the next entry group
//!                    - all empty: retry entries one at a time, in order
//! ```
//!
//! ## Invariants
//!
//! - Synthetic names are assigned from a counter that only grows, so the name
//!   of a removed entry is never handed out again.
//! - `compiled`, when present and `needs_recompile` is false, was built from
//!   exactly the current `entries` with the current anchoring.
//! - `Union::slots` is congruent with the compiled regex's group list: every
//!   entry group maps, in order, to its entry index; everything else is `None`.

#[path = "table/compiler.rs"]
mod compiler;
#[path = "table/disambiguate.rs"]
mod disambiguate;
#[path = "table/registry.rs"]
mod registry;
#[path = "table/stats.rs"]
mod stats;
#[cfg(test)]
#[path = "table/tests.rs"]
mod tests;

pub use disambiguate::Classifier;
pub(crate) use registry::alternation;
pub use stats::TableStats;

use crate::Anchoring;
use crate::engine::{RegexEngine, StandardEngine};
use registry::Entry;
use stats::Counters;

/// Combined regex plus the position-to-entry map computed for it.
struct Union<R> {
    regex: R,
    /// One slot per group position reported by the engine (index 0 is the
    /// whole match). `Some(i)` marks the synthetic group of `entries[i]`.
    slots: Vec<Option<usize>>,
}

/// Multi-pattern classifier mapping regexes to values.
///
/// Patterns are compiled lazily: mutations only mark the table dirty and the
/// next lookup (or an explicit [`recompile`](RegexTable::recompile)) rebuilds
/// the combined regex.
pub struct RegexTable<T, E: RegexEngine = StandardEngine> {
    engine: E,
    entries: Vec<Entry<T, E::Regex>>,
    compiled: Option<Union<E::Regex>>,
    next_id: u64,
    needs_recompile: bool,
    anchoring: Anchoring,
    counters: Counters,
}

impl<T: std::fmt::Debug, E: RegexEngine> std::fmt::Debug for RegexTable<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexTable")
            .field("patterns", &self.patterns().map(|(_, p, v)| (p, v)).collect::<Vec<_>>())
            .field("anchoring", &self.anchoring)
            .field("needs_recompile", &self.needs_recompile)
            .field("compiled", &self.compiled.is_some())
            .finish()
    }
}
