//! Error taxonomy for table compilation and lookup.

use std::fmt;

/// Type-erased backend error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A registered pattern that failed to compile on its own.
#[derive(Debug)]
pub struct InvalidPattern {
    /// Synthetic group name of the offending entry, e.g. `__REGEXTABLE_2__`.
    pub group_name: String,
    /// The pattern exactly as the caller registered it.
    pub pattern: String,
    /// The engine's compile error.
    pub source: BoxError,
}

impl fmt::Display for InvalidPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} (pattern: {}): {}", self.group_name, self.pattern, self.source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more registered patterns are invalid on their own.
    #[error("failed to compile union regex due to invalid patterns:\n{}", join_lines(.0))]
    InvalidPatterns(Vec<InvalidPattern>),

    /// The combined pattern failed to compile but every entry compiles alone.
    #[error("failed to compile union regex: {0}")]
    Compile(#[source] BoxError),

    /// Lookup against a table with no registered patterns.
    #[error("no patterns configured")]
    NoPatterns,

    /// The combined regex found nothing in the input.
    #[error("no pattern matched")]
    NoMatch,

    /// Group bookkeeping diverged from the compiled regex. Always a bug.
    #[error("internal error: {0}")]
    Internal(String),

    /// Raised by [`RegexTableBuilder::build`](crate::RegexTableBuilder::build).
    #[error("failed to compile regex table: {0}")]
    Build(#[source] Box<Error>),
}

impl Error {
    /// True for the ordinary "input did not match" outcome.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch)
    }

    /// True when the table had nothing registered.
    pub fn is_no_patterns(&self) -> bool {
        matches!(self, Error::NoPatterns)
    }

    /// True for compile failures, including those wrapped by the builder.
    pub fn is_compile_error(&self) -> bool {
        match self {
            Error::InvalidPatterns(_) | Error::Compile(_) => true,
            Error::Build(inner) => inner.is_compile_error(),
            _ => false,
        }
    }

    /// The entries blamed for a compile failure, if localization succeeded.
    pub fn invalid_patterns(&self) -> &[InvalidPattern] {
        match self {
            Error::InvalidPatterns(list) => list,
            Error::Build(inner) => inner.invalid_patterns(),
            _ => &[],
        }
    }
}

fn join_lines(items: &[InvalidPattern]) -> String {
    items.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("\n")
}
