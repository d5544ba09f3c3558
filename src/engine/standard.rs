//! Default backend on top of the `regex` crate.
//!
//! `regex` guarantees linear-time matching, so this engine is immune to the
//! catastrophic backtracking that [`FancyEngine`](super::FancyEngine) can hit.

use super::{CompiledRegex, RegexEngine};
use regex::{Regex, RegexBuilder};

/// [`RegexEngine`] backed by [`regex::Regex`], using `(?P<name>...)` groups.
#[derive(Debug, Clone, Default)]
pub struct StandardEngine {
    case_insensitive: bool,
    size_limit: Option<usize>,
}

impl StandardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every pattern case-insensitively.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Cap the compiled program size in bytes (see [`RegexBuilder::size_limit`]).
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }
}

impl RegexEngine for StandardEngine {
    type Regex = StandardRegex;
    type Error = regex::Error;

    fn compile(&self, pattern: &str) -> Result<StandardRegex, regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        builder.case_insensitive(self.case_insensitive);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        builder.build().map(StandardRegex)
    }

    fn format_named_group(&self, name: &str, pattern: &str) -> String {
        format!("(?P<{name}>{pattern})")
    }
}

/// A compiled [`regex::Regex`].
#[derive(Debug, Clone)]
pub struct StandardRegex(Regex);

impl StandardRegex {
    pub fn as_regex(&self) -> &Regex {
        &self.0
    }
}

impl CompiledRegex for StandardRegex {
    fn find_submatches<'h>(&self, haystack: &'h str) -> Option<Vec<&'h str>> {
        let caps = self.0.captures(haystack)?;
        Some(caps.iter().map(|m| m.map_or("", |m| m.as_str())).collect())
    }

    fn group_names(&self) -> Vec<&str> {
        self.0.capture_names().map(|n| n.unwrap_or("")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_python_style_named_group() {
        let engine = StandardEngine::new();
        assert_eq!(engine.format_named_group("testgroup", "pattern"), "(?P<testgroup>pattern)");
    }

    #[test]
    fn submatches_align_with_names() {
        let re = StandardEngine::new().compile(r"(?P<year>\d{4})-(\d{2})|(?P<word>[a-z]+)").unwrap();

        assert_eq!(re.group_names(), vec!["", "year", "", "word"]);
        assert_eq!(re.find_submatches("2023-12"), Some(vec!["2023-12", "2023", "12", ""]));
        assert_eq!(re.find_submatches("abc"), Some(vec!["abc", "", "", "abc"]));
        assert_eq!(re.find_submatches("!!"), None);
    }

    #[test]
    fn case_insensitive_option_applies() {
        let re = StandardEngine::new().case_insensitive(true).compile("hello").unwrap();
        assert_eq!(re.find_submatches("HeLLo"), Some(vec!["HeLLo"]));
    }

    #[test]
    fn size_limit_rejects_large_programs() {
        let engine = StandardEngine::new().size_limit(16);
        assert!(engine.compile(r"\w{50}").is_err());
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(StandardEngine::new().compile("[invalid").is_err());
    }
}
