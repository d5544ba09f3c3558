//! Alternate backend on top of `fancy-regex`.
//!
//! Uses the `(?<name>...)` group spelling and accepts backreferences and
//! look-around. Matching is backtracking, so a pathological pattern can hit
//! the backtrack limit; such a runtime failure is logged and reported as "no
//! match".

use super::{CompiledRegex, RegexEngine};
use fancy_regex::{Regex, RegexBuilder};

/// [`RegexEngine`] backed by [`fancy_regex::Regex`], using `(?<name>...)` groups.
#[derive(Debug, Clone, Default)]
pub struct FancyEngine {
    backtrack_limit: Option<usize>,
}

impl FancyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the backtracking step limit (see [`RegexBuilder::backtrack_limit`]).
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }
}

impl RegexEngine for FancyEngine {
    type Regex = FancyRegex;
    type Error = fancy_regex::Error;

    fn compile(&self, pattern: &str) -> Result<FancyRegex, fancy_regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        builder.build().map(FancyRegex)
    }

    fn format_named_group(&self, name: &str, pattern: &str) -> String {
        format!("(?<{name}>{pattern})")
    }
}

/// A compiled [`fancy_regex::Regex`].
#[derive(Debug, Clone)]
pub struct FancyRegex(Regex);

impl FancyRegex {
    pub fn as_regex(&self) -> &Regex {
        &self.0
    }
}

impl CompiledRegex for FancyRegex {
    fn find_submatches<'h>(&self, haystack: &'h str) -> Option<Vec<&'h str>> {
        let caps = match self.0.captures(haystack) {
            Ok(caps) => caps?,
            Err(err) => {
                tracing::warn!(pattern = self.0.as_str(), error = %err, "fancy-regex match failed; treating as no match");
                return None;
            }
        };
        Some((0..caps.len()).map(|i| caps.get(i).map_or("", |m| m.as_str())).collect())
    }

    fn group_names(&self) -> Vec<&str> {
        self.0.capture_names().map(|n| n.unwrap_or("")).collect()
    }
}
