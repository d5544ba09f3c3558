use regextable::TableStats;

/// Terminal styling keyed by what is being shown rather than by color.
mod style {
    const RESET: &str = "\x1b[0m";

    #[derive(Clone, Copy)]
    pub enum Role {
        Heading,
        Index,
        PatternName,
        Resolved,
        Failed,
        Submatches,
        Count,
        Faint,
        Input,
    }

    impl Role {
        fn sgr(self) -> &'static str {
            match self {
                Role::Heading | Role::Index => "\x1b[90m",
                Role::PatternName => "\x1b[34m",
                Role::Resolved => "\x1b[1;32m",
                Role::Failed => "\x1b[31m",
                Role::Submatches => "\x1b[33m",
                Role::Count => "\x1b[36m",
                Role::Faint => "\x1b[2m",
                Role::Input => "\x1b[1m",
            }
        }
    }

    pub struct Styler {
        enabled: bool,
    }

    impl Styler {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn render(&self, text: impl AsRef<str>, role: Role) -> String {
            let text = text.as_ref();
            if self.enabled { format!("{}{text}{RESET}", role.sgr()) } else { text.to_string() }
        }
    }

}

use style::{Role, Styler};

/// Result of classifying one input: `(name, submatches)` or the failure text.
pub struct Outcome {
    pub input: String,
    pub result: Result<(String, Vec<String>), String>,
}

pub fn print_run(combined: &str, patterns: &[(String, String)], outcomes: &[Outcome], stats: TableStats, color: bool) {
    let styler = Styler::new(color);

    println!("\n{}", styler.render("━━━ Patterns ━━━", Role::Heading));
    for (idx, (name, pattern)) in patterns.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            styler.render(format!("[{}]", idx + 1), Role::Index),
            styler.render(name, Role::PatternName),
            styler.render("│", Role::Faint),
            pattern
        );
    }
    println!("  {} {}", styler.render("combined:", Role::Faint), styler.render(combined, Role::Faint));

    println!("\n{}", styler.render("━━━ Lookups ━━━", Role::Heading));
    for outcome in outcomes {
        print_outcome(outcome, &styler);
    }

    println!("\n{}", styler.render("━━━ Stats ━━━", Role::Heading));
    println!(
        "  Compilations: {}  │  Lookups: {}  │  Fallback resolutions: {}",
        styler.render(stats.compilations.to_string(), Role::Count),
        styler.render(stats.lookups.to_string(), Role::Count),
        styler.render(stats.fallback_resolutions.to_string(), Role::Count),
    );
    println!();
}

fn print_outcome(outcome: &Outcome, styler: &Styler) {
    let input = styler.render(format!("{:?}", outcome.input), Role::Input);
    let arrow = styler.render("→", Role::Faint);
    match &outcome.result {
        Ok((name, groups)) => {
            println!("  {input} {arrow} {}", styler.render(name, Role::Resolved));
            let rendered: Vec<String> = groups.iter().map(|g| format!("{g:?}")).collect();
            println!("      {} {}", styler.render("groups:", Role::Faint), styler.render(rendered.join(", "), Role::Submatches));
        }
        Err(reason) => {
            println!("  {input} {arrow} {}", styler.render(format!("✗ {reason}"), Role::Failed));
        }
    }
}
