//! Markdown and formatting cleanup for completion text.
//!
//! The cleanup is an ordered list of named passes. Each pass reads the
//! previous pass's output, so order matters: markers are stripped before
//! asterisks, and newlines still exist when lone brackets are removed.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]*(?:[-*#•]+[^\S\n]*)+").expect("valid regex"));
static BOXED_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\boxed\{([^{}]*)\}").expect("valid regex"));
static BOXED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\boxed\{").expect("valid regex"));
static ASTERISKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+").expect("valid regex"));
static BACKTICKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`{1,3}").expect("valid regex"));
static LONE_CLOSER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[}\]]\s*$").expect("valid regex"));
static LONE_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\{\s*$").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A single named normalization step
pub struct CleanPass {
    pub name: &'static str,
    run: fn(&str) -> String,
}

impl CleanPass {
    pub fn apply(&self, text: &str) -> String {
        (self.run)(text)
    }
}

/// Cleanup passes in application order
pub static PASSES: [CleanPass; 9] = [
    CleanPass {
        name: "leading_markers",
        run: strip_leading_markers,
    },
    CleanPass {
        name: "boxed_wrappers",
        run: strip_boxed_wrappers,
    },
    CleanPass {
        name: "asterisks",
        run: strip_asterisks,
    },
    CleanPass {
        name: "backticks",
        run: strip_backticks,
    },
    CleanPass {
        name: "lone_brackets",
        run: strip_lone_brackets,
    },
    CleanPass {
        name: "blank_lines",
        run: collapse_blank_lines,
    },
    CleanPass {
        name: "whitespace",
        run: collapse_whitespace,
    },
    CleanPass {
        name: "trailing_symbols",
        run: strip_trailing_symbols,
    },
    CleanPass {
        name: "trim",
        run: trim,
    },
];

/// Look up a pass by name
pub fn pass(name: &str) -> Option<&'static CleanPass> {
    PASSES.iter().find(|p| p.name == name)
}

/// Clean a line or block of completion text.
///
/// Runs the pass pipeline until the output stops changing, which makes
/// `clean` idempotent. Marker and trailing-symbol runs are consumed whole,
/// whitespace included, so ordinary input settles after one or two runs.
/// A marker hidden behind backticks or a `\boxed{` only surfaces on the
/// next run. Every pass deletes characters or turns a whitespace run into
/// one space, so the loop always ends.
pub fn clean(text: &str) -> String {
    let mut current = run_pipeline(text);
    loop {
        let next = run_pipeline(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn run_pipeline(text: &str) -> String {
    PASSES
        .iter()
        .fold(text.to_string(), |acc, pass| pass.apply(&acc))
}

/// Formatting leftovers that carry no meaning on their own
pub fn is_stray_symbol(c: char) -> bool {
    matches!(c, '`' | '~' | '{' | '}' | '[' | ']' | '\\')
}

/// True when `text` holds nothing but whitespace and stray symbols
pub fn is_noise(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || is_stray_symbol(c))
}

/// Remove a trailing run of stray symbols, along with any whitespace
/// mixed into it
pub fn strip_trailing_noise(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_whitespace() || is_stray_symbol(c))
}

fn strip_leading_markers(text: &str) -> String {
    LEADING_MARKERS.replace_all(text, "").into_owned()
}

fn strip_boxed_wrappers(text: &str) -> String {
    let unwrapped = BOXED_PAIR.replace_all(text, "${1}");
    BOXED_OPEN.replace_all(&unwrapped, "").into_owned()
}

fn strip_asterisks(text: &str) -> String {
    ASTERISKS.replace_all(text, "").into_owned()
}

fn strip_backticks(text: &str) -> String {
    BACKTICKS.replace_all(text, "").into_owned()
}

fn strip_lone_brackets(text: &str) -> String {
    let without_closers = LONE_CLOSER.replace_all(text, "");
    LONE_OPENER.replace_all(&without_closers, "").into_owned()
}

fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n\n").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

fn strip_trailing_symbols(text: &str) -> String {
    strip_trailing_noise(text).to_string()
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::time::{Duration, Instant};

    fn run(name: &str, text: &str) -> String {
        pass(name).expect("known pass").apply(text)
    }

    #[test]
    fn passes_are_in_documented_order() {
        let names: Vec<_> = PASSES.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "leading_markers",
                "boxed_wrappers",
                "asterisks",
                "backticks",
                "lone_brackets",
                "blank_lines",
                "whitespace",
                "trailing_symbols",
                "trim",
            ]
        );
    }

    #[test]
    fn leading_markers_only_at_line_start() {
        assert_eq!(run("leading_markers", "- Redness"), "Redness");
        assert_eq!(run("leading_markers", "## Overview"), "Overview");
        assert_eq!(run("leading_markers", "• Itching"), "Itching");
        assert_eq!(run("leading_markers", "a\n*  b"), "a\nb");
        assert_eq!(run("leading_markers", "well-known"), "well-known");
        assert_eq!(run("leading_markers", "  - - * nested"), "nested");
        assert_eq!(run("leading_markers", "a\n  # b"), "a\nb");
    }

    #[test]
    fn boxed_wrapper_and_its_brace() {
        assert_eq!(run("boxed_wrappers", r"\boxed{Eczema}"), "Eczema");
        assert_eq!(run("boxed_wrappers", r"\boxed{Medical Description:"), "Medical Description:");
        // An orphan closing brace is left for later passes
        assert_eq!(run("boxed_wrappers", "done }"), "done }");
    }

    #[test]
    fn asterisks_and_backticks() {
        assert_eq!(run("asterisks", "**Bold** and *it*"), "Bold and it");
        assert_eq!(run("backticks", "```text```"), "text");
        assert_eq!(run("backticks", "````"), "");
        assert_eq!(run("backticks", "`code`"), "code");
    }

    #[test]
    fn lone_brackets_removed_but_inline_kept() {
        assert_eq!(run("lone_brackets", "a\n}\nb"), "a\n\nb");
        assert_eq!(run("lone_brackets", "  ]  "), "");
        assert_eq!(run("lone_brackets", "{"), "");
        assert_eq!(run("lone_brackets", "f(x) = {1}"), "f(x) = {1}");
    }

    #[test]
    fn whitespace_collapsing() {
        assert_eq!(run("blank_lines", "a\n\n\n\nb"), "a\n\nb");
        assert_eq!(run("whitespace", "a \t\n b"), "a b");
    }

    #[test]
    fn trailing_symbols_only_at_end() {
        assert_eq!(run("trailing_symbols", "text}]`~\\"), "text");
        assert_eq!(run("trailing_symbols", "[a] b"), "[a] b");
        assert_eq!(run("trailing_symbols", "text ~ } ~ "), "text");
    }

    #[test]
    fn clean_markdown_line() {
        assert_eq!(clean("**Symptoms & Signs:**"), "Symptoms & Signs:");
        assert_eq!(clean("  - *Topical*   steroids  "), "Topical steroids");
        assert_eq!(clean("```"), "");
        assert_eq!(clean("***"), "");
        assert_eq!(clean("Wash daily }"), "Wash daily");
    }

    #[test]
    fn clean_is_idempotent_on_known_cases() {
        let samples = [
            "",
            "plain text",
            "- - nested marker",
            "  - indented marker",
            "x ~ ",
            r"\boxed{\boxed{Acne}}",
            "**bold** `code` ~~}",
            "Medical Description:\n\n\n\nAcne is common.\n}",
            "* • # mixed markers\t\ttabs",
            "{\n[item]\n]",
            "Item with trailing backslash \\",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn clean_is_idempotent_on_generated_input() {
        const TOKENS: [&str; 18] = [
            "-", "*", "#", "•", "`", "~", "{", "}", "[", "]", "\\", " ", "\n", "\t", "a", "b",
            "\\boxed{", "Rash",
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..5_000 {
            let len = rng.gen_range(0..40);
            let sample: String = (0..len)
                .map(|_| *TOKENS.choose(&mut rng).expect("non-empty"))
                .collect();
            let once = clean(&sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn repeated_markers_and_symbols_clean_quickly() {
        let markers = format!("{}Itching", "- ".repeat(10_000));
        let symbols = format!("Itching{}", " ~".repeat(10_000));
        let mixed = format!("{}Itching{}", "* ` ".repeat(5_000), " } ]".repeat(5_000));

        let start = Instant::now();
        assert_eq!(clean(&markers), "Itching");
        assert_eq!(clean(&symbols), "Itching");
        assert_eq!(clean(&mixed), "Itching");
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn noise_detection() {
        assert!(is_noise(""));
        assert!(is_noise(" } ] ` ~ \\ {"));
        assert!(!is_noise("} a"));
        assert_eq!(strip_trailing_noise("item`}"), "item");
        assert_eq!(strip_trailing_noise("item } \\ "), "item");
    }
}
