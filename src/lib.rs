//! Multi-pattern string classification.
//!
//! A [`RegexTable`] is an associative array whose keys are regular expressions
//! and whose values are arbitrary data. A lookup matches the input against every
//! registered pattern at once and returns the value bound to the pattern that
//! fired, together with that pattern's own capture groups.
//!
//! All patterns are merged into one combined regex, each wrapped in a uniquely
//! named capture group (`__REGEXTABLE_1__`, `__REGEXTABLE_2__`, ...). After a
//! single match the group positions reported by the engine are mapped back to
//! the entry that produced them.
//!
//! ```
//! use regextable::RegexTableBuilder;
//!
//! let mut table = RegexTableBuilder::new()
//!     .add_pattern(r"\d+", "number")
//!     .add_pattern(r"[a-zA-Z]+", "word")
//!     .build(true, false)
//!     .unwrap();
//!
//! let (value, matches) = table.lookup("123").unwrap();
//! assert_eq!(*value, "number");
//! assert_eq!(matches, vec!["123"]);
//! ```
//!
//! The regex backend is pluggable through [`RegexEngine`]; the default is
//! [`StandardEngine`] (the `regex` crate) and [`FancyEngine`] (the
//! `fancy-regex` crate) is provided as an alternative with a different named
//! group syntax.

#[macro_use]
mod macros;
mod builder;
mod engine;
mod error;
mod table;

pub use builder::{RegexTableBuilder, SubPatternBuilder};
pub use engine::{CompiledRegex, FancyEngine, FancyRegex, RegexEngine, StandardEngine, StandardRegex};
pub use error::{BoxError, Error, InvalidPattern};
pub use table::{Classifier, RegexTable, TableStats};

bitflags::bitflags! {
    /// Where the combined pattern is anchored in the input.
    ///
    /// The same anchoring is applied to the combined pattern and to every
    /// per-entry pattern used for validation and disambiguation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Anchoring: u8 {
        /// Prefix `^`: matches must start at the beginning of the input.
        const START = 1 << 0;
        /// Append `$`: matches must end at the end of the input.
        const END   = 1 << 1;
    }
}

impl Default for Anchoring {
    /// No anchors: patterns may match anywhere.
    fn default() -> Self {
        Anchoring::empty()
    }
}

impl Anchoring {
    /// Build from the two independent `(anchor_start, anchor_end)` switches.
    pub fn from_flags(anchor_start: bool, anchor_end: bool) -> Self {
        let mut anchoring = Anchoring::empty();
        anchoring.set(Anchoring::START, anchor_start);
        anchoring.set(Anchoring::END, anchor_end);
        anchoring
    }

    /// Wrap `pattern` as `^(?:pattern)$`, omitting the anchors that are not set.
    pub fn apply(self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 6);
        if self.contains(Anchoring::START) {
            out.push('^');
        }
        out.push_str("(?:");
        out.push_str(pattern);
        out.push(')');
        if self.contains(Anchoring::END) {
            out.push('$');
        }
        out
    }
}

/// Stable handle for a registered pattern.
///
/// Identifiers are assigned in registration order and never reused within a
/// table, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(u64);

impl PatternId {
    pub(crate) fn new(raw: u64) -> Self {
        PatternId(raw)
    }

    /// The sequence number behind this id (starts at 1).
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
