mod debug_report;

use debug_report::Outcome;
use regextable::{FancyEngine, RegexEngine, RegexTableBuilder, StandardEngine};
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REGEXTABLE_LOG";

/// Used when no `--pattern` is given.
const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("keyword", r"\b(if|else|while|for|return|function)\b"),
    ("identifier", r"\b[a-zA-Z_][a-zA-Z0-9_]*\b"),
    ("number", r"\b\d+(\.\d+)?\b"),
    ("operator", r"[+\-*/=<>!]+"),
    ("string", r#""[^"]*""#),
];

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let code = match config.engine {
        EngineKind::Standard => run(StandardEngine::new(), &config),
        EngineKind::Fancy => run(FancyEngine::new(), &config),
    };
    std::process::exit(code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run<E: RegexEngine>(engine: E, config: &CliConfig) -> i32 {
    let builder = config
        .patterns
        .iter()
        .fold(RegexTableBuilder::with_engine(engine), |b, (name, pattern)| b.add_pattern(pattern.as_str(), name.clone()));

    let mut table = match builder.build(config.anchor_start, config.anchor_end) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let classifier = match table.classifier() {
        Ok(classifier) => classifier,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let outcomes: Vec<Outcome> = config
        .inputs
        .iter()
        .map(|input| Outcome {
            input: input.clone(),
            result: classifier
                .lookup(input)
                .map(|(name, groups)| (name.clone(), groups.into_iter().map(String::from).collect()))
                .map_err(|err| err.to_string()),
        })
        .collect();

    let table = classifier.table();
    let rows: Vec<(String, String)> = table.patterns().map(|(_, pattern, name)| (name.clone(), pattern.to_string())).collect();
    debug_report::print_run(&table.combined_pattern(), &rows, &outcomes, table.stats(), config.color);
    0
}

#[derive(Debug, Clone, Copy)]
enum EngineKind {
    Standard,
    Fancy,
}

struct CliConfig {
    inputs: Vec<String>,
    patterns: Vec<(String, String)>,
    anchor_start: bool,
    anchor_end: bool,
    engine: EngineKind,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut inputs: Vec<String> = Vec::new();
    let mut patterns: Vec<(String, String)> = Vec::new();
    let mut anchor_start = true;
    let mut anchor_end = false;
    let mut engine = EngineKind::Standard;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("regextable {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--anchor-end" => anchor_end = true,
            "--no-anchor-start" => anchor_start = false,
            "--pattern" | "-p" => {
                let value = args.next().ok_or_else(|| "error: --pattern expects NAME=REGEX".to_string())?;
                patterns.push(parse_pattern(&value)?);
            }
            "--engine" => {
                let value = args.next().ok_or_else(|| "error: --engine expects a value".to_string())?;
                engine = parse_engine(&value)?;
            }
            "--" => {
                inputs.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--pattern=") => {
                patterns.push(parse_pattern(arg.trim_start_matches("--pattern="))?);
            }
            _ if arg.starts_with("--engine=") => {
                engine = parse_engine(arg.trim_start_matches("--engine="))?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => inputs.push(arg),
        }
    }

    if patterns.is_empty() {
        patterns = DEFAULT_PATTERNS.iter().map(|(name, pattern)| (name.to_string(), pattern.to_string())).collect();
    }

    if inputs.is_empty() {
        if io::stdin().is_terminal() {
            return Err(format!("error: no input provided\n\n{}", help_text()));
        }
        inputs = read_stdin_lines()?;
    }

    Ok(CliConfig { inputs, patterns, anchor_start, anchor_end, engine, color })
}

fn parse_pattern(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, pattern)) if !name.is_empty() => Ok((name.to_string(), pattern.to_string())),
        _ => Err(format!("error: invalid --pattern '{value}' (expected NAME=REGEX)")),
    }
}

fn parse_engine(value: &str) -> Result<EngineKind, String> {
    match value {
        "standard" => Ok(EngineKind::Standard),
        "fancy" => Ok(EngineKind::Fancy),
        _ => Err(format!("error: unknown engine '{value}' (expected standard or fancy)")),
    }
}

fn read_stdin_lines() -> Result<Vec<String>, String> {
    io::stdin()
        .lock()
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("error: failed to read stdin: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "regextable {version}

Classify strings against a table of regular expressions.

Usage:
  regextable [OPTIONS] [--] <input>...
  <lines> | regextable [OPTIONS]

Each input is looked up separately. Without --pattern a built-in table of
programming tokens (keyword, identifier, number, operator, string) is used.

Options:
  -p, --pattern <NAME=REGEX>  Register REGEX under NAME. Repeatable; earlier
                              patterns win when several match.
  --engine <standard|fancy>   Regex backend. Default: standard.
  --no-anchor-start           Allow matches to start anywhere in the input.
  --anchor-end                Require matches to end at the end of the input.
  --color                     Force ANSI color output.
  --no-color                  Disable ANSI color output.
  -h, --help                  Show this help message.
  -V, --version               Print version information.

Environment:
  {log_env}              Log filter for diagnostics on stderr (e.g. debug).

Exit codes:
  0  Success.
  1  The pattern table failed to compile.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
