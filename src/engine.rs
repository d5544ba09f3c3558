//! Regex backend abstraction.
//!
//! The table never matches text itself. It builds pattern strings, hands them
//! to a [`RegexEngine`] and reads back positional submatches and group names
//! from the resulting [`CompiledRegex`].
//!
//! ## How the parts work together
//!
//! ```text
//! entries ── format_named_group ──> (?P<__REGEXTABLE_n__>pattern)
//!                                     │  joined with `|`, anchored
//!                                     v
//!                               RegexEngine::compile
//!                                     │
//! input ── find_submatches ───────────┼──> ["whole", "g1", "", ...]
//!          group_names ───────────────┴──> ["", "__REGEXTABLE_1__", "", ...]
//! ```
//!
//! ## Non-participating groups
//!
//! Both vectors are position-aligned and position 0 is the whole match (with
//! name `""`). A group that did not take part in the match is reported as the
//! empty string, the same as a group that matched empty text. Engines must
//! follow this policy even when they can tell the two apart; the table
//! resolves the resulting ambiguity by re-testing entries one at a time.
//!
//! ## Backends
//!
//! - [`StandardEngine`]: the `regex` crate, `(?P<name>...)` groups. Default.
//! - [`FancyEngine`]: the `fancy-regex` crate, `(?<name>...)` groups, adds
//!   backreferences and look-around.
//!
//! Other backends plug in by implementing both traits.

#[path = "engine/fancy.rs"]
mod fancy;
#[path = "engine/standard.rs"]
mod standard;

pub use fancy::{FancyEngine, FancyRegex};
pub use standard::{StandardEngine, StandardRegex};

/// A regex backend: compiles patterns and knows its named-group spelling.
pub trait RegexEngine {
    /// Compiled form produced by [`RegexEngine::compile`].
    type Regex: CompiledRegex;
    /// Backend-specific syntax error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compile `pattern`, or fail with the backend's syntax error.
    fn compile(&self, pattern: &str) -> Result<Self::Regex, Self::Error>;

    /// Spell `pattern` as a capture group called `name`.
    fn format_named_group(&self, name: &str, pattern: &str) -> String;
}

/// A compiled regex as seen by the table.
pub trait CompiledRegex {
    /// Find the leftmost match in `haystack`.
    ///
    /// Returns the whole match at index 0 followed by every capture group in
    /// order, with `""` for groups that did not participate. `None` if there is
    /// no match.
    fn find_submatches<'h>(&self, haystack: &'h str) -> Option<Vec<&'h str>>;

    /// Group names aligned with [`find_submatches`](CompiledRegex::find_submatches);
    /// `""` at index 0 and for unnamed groups.
    fn group_names(&self) -> Vec<&str>;
}

impl<E: RegexEngine + ?Sized> RegexEngine for &E {
    type Regex = E::Regex;
    type Error = E::Error;

    fn compile(&self, pattern: &str) -> Result<Self::Regex, Self::Error> {
        (**self).compile(pattern)
    }

    fn format_named_group(&self, name: &str, pattern: &str) -> String {
        (**self).format_named_group(name, pattern)
    }
}
