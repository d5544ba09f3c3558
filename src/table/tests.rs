use crate::{CompiledRegex, Error, FancyEngine, RegexEngine, RegexTable, StandardEngine, StandardRegex};
use std::cell::RefCell;

/// `(?<name>...)` syntax on top of `regex`, recording every compiled pattern.
#[derive(Default)]
struct RecordingEngine {
    compiled: RefCell<Vec<String>>,
}

impl RecordingEngine {
    fn compile_count(&self) -> usize {
        self.compiled.borrow().len()
    }
}

impl RegexEngine for RecordingEngine {
    type Regex = StandardRegex;
    type Error = regex::Error;

    fn compile(&self, pattern: &str) -> Result<StandardRegex, regex::Error> {
        self.compiled.borrow_mut().push(pattern.to_string());
        StandardEngine::new().compile(pattern)
    }

    fn format_named_group(&self, name: &str, pattern: &str) -> String {
        format!("(?<{name}>{pattern})")
    }
}

/// Engine returning canned results, for driving the table into states a
/// real backend never produces.
struct ScriptedEngine {
    union_names: Vec<&'static str>,
    union_match: Option<Vec<&'static str>>,
}

struct ScriptedRegex {
    names: Vec<&'static str>,
    result: Option<Vec<&'static str>>,
}

impl CompiledRegex for ScriptedRegex {
    fn find_submatches<'h>(&self, _haystack: &'h str) -> Option<Vec<&'h str>> {
        self.result.clone()
    }

    fn group_names(&self) -> Vec<&str> {
        self.names.clone()
    }
}

impl RegexEngine for ScriptedEngine {
    type Regex = ScriptedRegex;
    type Error = std::convert::Infallible;

    fn compile(&self, pattern: &str) -> Result<ScriptedRegex, Self::Error> {
        if pattern.contains("__REGEXTABLE_") {
            Ok(ScriptedRegex { names: self.union_names.clone(), result: self.union_match.clone() })
        } else {
            Ok(ScriptedRegex { names: vec![""], result: None })
        }
    }

    fn format_named_group(&self, name: &str, pattern: &str) -> String {
        format!("(?P<{name}>{pattern})")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    FormStart,
    FormEnd,
    SimpleLabel,
}

#[test]
fn classifies_keywords_and_labels() {
    let mut table = RegexTable::new(true, false);
    table.add_pattern(r"form\w*", Token::FormStart);
    table.add_pattern(r"end\w*", Token::FormEnd);
    table.add_pattern(r"[a-z]+:", Token::SimpleLabel);

    let cases: Vec<(&str, Option<Token>)> = vec![
        ("form", Some(Token::FormStart)),
        ("formData", Some(Token::FormStart)),
        ("endform", Some(Token::FormEnd)),
        ("endif", Some(Token::FormEnd)),
        ("else:", Some(Token::SimpleLabel)),
        ("nomatch", None),
    ];

    for (input, expected) in cases {
        match (table.lookup(input), expected) {
            (Ok((value, matches)), Some(token)) => {
                assert_eq!(*value, token, "input {input:?}");
                assert_eq!(matches[0], input, "input {input:?}");
            }
            (Err(err), None) => assert!(err.is_no_match(), "input {input:?}: {err}"),
            (got, want) => panic!("input {input:?}: got {got:?}, want {want:?}"),
        }
    }
}

#[test]
fn anchoring_matrix() {
    let cases: Vec<((bool, bool), &str, Vec<&str>, Vec<&str>)> = vec![
        ((true, false), "hello", vec!["hello", "hello world"], vec!["say hello"]),
        ((false, false), "hello", vec!["hello", "hello world", "say hello", "say hello world"], vec!["help"]),
        ((true, true), "hello", vec!["hello"], vec!["hello world", "say hello", "say hello world"]),
        ((false, true), "world", vec!["world", "hello world"], vec!["world peace"]),
    ];

    for ((start, end), pattern, hits, misses) in cases {
        let mut table = RegexTable::new(start, end);
        table.add_pattern(pattern, "value");

        for input in hits {
            let (value, matches) = table.lookup(input).unwrap_or_else(|e| panic!("{start}/{end} {input:?}: {e}"));
            assert_eq!(*value, "value");
            assert_eq!(matches, vec![pattern]);
        }
        for input in misses {
            assert!(table.lookup(input).unwrap_err().is_no_match(), "{start}/{end} {input:?}");
        }
    }
}

#[test]
fn deferred_validation_fails_at_first_compile() {
    let mut lazy = RegexTable::new(true, false);
    lazy.add_pattern("valid", "value1");
    let bad = lazy.add_pattern("[invalid", "value2");

    let err = lazy.lookup("valid").unwrap_err();
    assert!(err.is_compile_error());
    assert_eq!(err.invalid_patterns().len(), 1);
    assert_eq!(err.invalid_patterns()[0].group_name, "__REGEXTABLE_2__");

    // Stays broken until the offending entry goes away.
    assert!(lazy.recompile().is_err());
    assert!(lazy.try_lookup("valid").is_none());
    lazy.remove_pattern(bad);
    assert_eq!(*lazy.lookup("valid").unwrap().0, "value1");

    let mut eager = RegexTable::new(true, false);
    eager.add_and_check_pattern("valid", "value1").unwrap();
    let eager_err = eager.add_and_check_pattern("[invalid", "value2").unwrap_err();
    assert_eq!(eager_err.invalid_patterns()[0].source.to_string(), err.invalid_patterns()[0].source.to_string());
}

#[test]
fn manual_recompile_then_lookup() {
    let mut table = RegexTable::new(true, false);
    table.add_pattern("hello", "greeting");
    table.add_pattern("world", "place");

    table.recompile().unwrap();
    assert!(!table.needs_recompile());
    assert_eq!(*table.lookup("hello").unwrap().0, "greeting");
    assert_eq!(*table.lookup("world").unwrap().0, "place");
    assert_eq!(table.stats().compilations, 1);
}

#[test]
fn repeated_lookups_are_idempotent() {
    let mut table = RegexTable::with_engine(RecordingEngine::default(), true, false);
    table.add_pattern(r"(\d+)\.(\d+)", "decimal");
    table.add_pattern(r"\d+", "integer");

    let first: Vec<_> = {
        let (value, matches) = table.lookup("3.14").unwrap();
        vec![value.to_string()].into_iter().chain(matches.into_iter().map(String::from)).collect()
    };
    let compiles = table.engine().compile_count();

    for _ in 0..5 {
        let (value, matches) = table.lookup("3.14").unwrap();
        let again: Vec<String> = vec![value.to_string()].into_iter().chain(matches.into_iter().map(String::from)).collect();
        assert_eq!(again, first);
    }

    assert_eq!(first, vec!["decimal", "3.14", "3", "14"]);
    assert_eq!(table.engine().compile_count(), compiles);
    assert_eq!(table.stats().compilations, 1);
    assert_eq!(table.stats().lookups, 6);
}

#[test]
fn lookup_or_else_substitutes_default() {
    let mut table = RegexTable::new(true, false);
    table.add_pattern("hello", "greeting");
    table.add_pattern(r"\d+", "number");

    assert_eq!(table.lookup_or_else("nomatch", &"fallback"), (&"fallback", vec![]));
    assert_eq!(table.lookup_or_else("hello", &"fallback"), (&"greeting", vec!["hello"]));
    assert_eq!(table.lookup_or_else("123", &"fallback"), (&"number", vec!["123"]));

    let mut ints = RegexTable::new(true, false);
    ints.add_pattern("one", 1);
    assert_eq!(ints.lookup_or_else("one", &999), (&1, vec!["one"]));
    assert_eq!(ints.lookup_or_else("nomatch", &999), (&999, vec![]));
}

#[test]
fn ambiguous_empty_match_resolves_in_registration_order() {
    let mut table = RegexTable::with_engine(RecordingEngine::default(), true, true);
    table.add_pattern("a*", "a-star");
    table.add_pattern("b*", "b-star");

    let (value, matches) = table.lookup("").unwrap();
    assert_eq!(*value, "a-star");
    assert_eq!(matches, vec![""]);
    assert_eq!(table.stats().fallback_resolutions, 1);

    // Non-empty input is decided by the combined match alone.
    assert_eq!(table.lookup("bbb").unwrap(), (&"b-star", vec!["bbb"]));

    // The stand-alone compile of "a*" is cached after the first fallback.
    let compiles = table.engine().compile_count();
    assert_eq!(*table.lookup("").unwrap().0, "a-star");
    assert_eq!(table.engine().compile_count(), compiles);
    assert_eq!(table.stats().fallback_resolutions, 2);
}

#[test]
fn fallback_skips_entries_that_cannot_match_empty() {
    let mut table = RegexTable::new(true, true);
    table.add_pattern(r"\d+", "number");
    table.add_pattern("(?:x|)", "maybe-x");
    table.add_pattern("y?", "maybe-y");

    assert_eq!(table.lookup("").unwrap(), (&"maybe-x", vec![""]));
}

#[test]
fn entry_groups_do_not_leak_into_neighbours() {
    let mut table = RegexTable::new(true, true);
    table.add_pattern(r"(\w+)@(\w+)\.com", "email");
    table.add_pattern(r"(\d{4})-(\d{2})-(\d{2})", "date");
    table.add_pattern(r"(\d+):(\d+)", "time");

    assert_eq!(table.lookup("2023-12-25").unwrap(), (&"date", vec!["2023-12-25", "2023", "12", "25"]));
    assert_eq!(table.lookup("me@example.com").unwrap(), (&"email", vec!["me@example.com", "me", "example"]));
    assert_eq!(table.lookup("12:30").unwrap(), (&"time", vec!["12:30", "12", "30"]));
}

#[test]
fn optional_inner_group_reports_empty_string() {
    let mut table = RegexTable::new(true, true);
    table.add_pattern(r"(\d+)(?:\.(\d+))?", "number");

    assert_eq!(table.lookup("42").unwrap(), (&"number", vec!["42", "42", ""]));
    assert_eq!(table.lookup("4.2").unwrap(), (&"number", vec!["4.2", "4", "2"]));
}

#[test]
fn scales_to_hundreds_of_patterns() {
    let mut table = RegexTable::new(true, true);
    for i in 0..300 {
        table.add_pattern(format!("item{i}_(\\d+)"), i);
    }

    for i in [0, 1, 150, 299] {
        let input = format!("item{i}_77");
        let (value, matches) = table.lookup(&input).unwrap();
        assert_eq!(*value, i);
        assert_eq!(matches, vec![input.as_str(), "77"]);
    }
    assert!(table.lookup("item300_1").unwrap_err().is_no_match());
}

#[test]
fn empty_table_reports_no_patterns() {
    let mut table: RegexTable<&str> = RegexTable::new(true, false);
    assert!(table.lookup("anything").unwrap_err().is_no_patterns());

    let only = table.add_pattern("hello", "greeting");
    assert_eq!(*table.lookup("hello").unwrap().0, "greeting");

    assert_eq!(table.remove_pattern(only), Some("greeting"));
    let err = table.lookup("hello").unwrap_err();
    assert!(err.is_no_patterns(), "got {err}");
    assert!(!err.is_no_match());
}

#[test]
fn removal_keeps_remaining_entries_aligned() {
    let mut table = RegexTable::new(true, true);
    table.add_pattern(r"(a)(a)", "aa");
    let middle = table.add_pattern(r"(b)", "b");
    table.add_pattern(r"(c)(c)(c)", "ccc");

    assert_eq!(table.lookup("ccc").unwrap(), (&"ccc", vec!["ccc", "c", "c", "c"]));
    table.remove_pattern(middle);
    assert!(table.needs_recompile());

    assert_eq!(table.lookup("ccc").unwrap(), (&"ccc", vec!["ccc", "c", "c", "c"]));
    assert_eq!(table.lookup("aa").unwrap(), (&"aa", vec!["aa", "a", "a"]));
    assert!(table.lookup("b").unwrap_err().is_no_match());
    assert_eq!(table.stats().compilations, 2);
}

#[test]
fn earliest_registered_pattern_wins_on_overlap() {
    let mut table = RegexTable::new(true, true);
    table.add_pattern("if", "keyword");
    table.add_pattern("[a-z]+", "identifier");

    assert_eq!(*table.lookup("if").unwrap().0, "keyword");
    assert_eq!(*table.lookup("iffy").unwrap().0, "identifier");
}

#[test]
fn custom_engine_syntax_is_used() {
    let mut table = RegexTable::with_engine(RecordingEngine::default(), true, false);
    table.add_pattern("hello", "greeting");

    assert_eq!(table.combined_pattern(), "^(?:(?<__REGEXTABLE_1__>hello))");
    assert_eq!(*table.lookup("hello there").unwrap().0, "greeting");
    assert_eq!(table.engine().compiled.borrow().as_slice(), ["^(?:(?<__REGEXTABLE_1__>hello))"]);
}

#[test]
fn fancy_engine_table_supports_backreferences() {
    let mut table = RegexTable::with_engine(FancyEngine::new(), true, true);
    // Numbered backreferences would shift inside the combined pattern; named ones do not.
    table.add_pattern(r"(?<ch>\w)\k<ch>", "double");
    table.add_pattern(r"\w+", "word");

    assert_eq!(table.lookup("zz").unwrap(), (&"double", vec!["zz", "z"]));
    assert_eq!(table.lookup("zy").unwrap(), (&"word", vec!["zy"]));
}

#[test]
fn engines_agree_on_results() {
    let patterns = [("if.*", "form_start"), ("end.*", "form_end"), ("else", "simple_label")];

    let mut standard = RegexTable::new(true, false);
    let mut fancy = RegexTable::with_engine(FancyEngine::new(), true, false);
    let mut recording = RegexTable::with_engine(RecordingEngine::default(), true, false);
    for (pattern, value) in patterns {
        standard.add_pattern(pattern, value);
        fancy.add_pattern(pattern, value);
        recording.add_pattern(pattern, value);
    }

    for input in ["else", "endif", "if x", "nope"] {
        let expected = standard.try_lookup(input);
        assert_eq!(fancy.try_lookup(input), expected, "{input}");
        assert_eq!(recording.try_lookup(input), expected, "{input}");
    }
}

#[test]
fn shared_engine_by_reference() {
    let engine = StandardEngine::new().case_insensitive(true);
    let mut first = RegexTable::with_engine(&engine, true, true);
    let mut second = RegexTable::with_engine(&engine, true, true);
    first.add_pattern("select", "sql");
    second.add_pattern("print", "python");

    assert_eq!(*first.lookup("SELECT").unwrap().0, "sql");
    assert_eq!(*second.lookup("Print").unwrap().0, "python");
}

#[test]
fn unattributable_match_is_an_internal_error() {
    let engine = ScriptedEngine { union_names: vec!["", "__REGEXTABLE_1__"], union_match: Some(vec!["", ""]) };
    let mut table = RegexTable::with_engine(engine, true, false);
    table.add_pattern("anything", 1);

    match table.lookup("input") {
        Err(Error::Internal(message)) => assert!(message.contains("no capture group matched")),
        other => panic!("expected internal error, got {other:?}"),
    }
}

#[test]
fn diverged_group_layout_fails_compilation() {
    let engine = ScriptedEngine { union_names: vec!["", "__REGEXTABLE_2__", "__REGEXTABLE_1__"], union_match: None };
    let mut table = RegexTable::with_engine(engine, true, false);
    table.add_pattern("a", 1);
    table.add_pattern("b", 2);

    let err = table.recompile().unwrap_err();
    assert!(matches!(err, Error::Internal(_)), "got {err:?}");
    assert!(table.needs_recompile());
}
