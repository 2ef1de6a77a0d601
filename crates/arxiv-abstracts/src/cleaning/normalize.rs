//! Abstract text normalization.
//!
//! The rewrites are order dependent: each step assumes the previous ones have
//! already run. Every step is total.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static ESCAPED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\n").expect("valid escaped newline regex"));

static BACKSLASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+").expect("valid backslash regex"));

static LATEX_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\$+([a-z])\$+").expect("valid latex letter regex"));

static LATEX_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\$+\\(\w+)\s*\$+").expect("valid latex command regex"));

static LATEX_EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\$+.*?\$+").expect("valid latex equation regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)((https?)://)?[a-zA-Z0-9./?:@\-_=#]+\.([a-zA-Z]){2,6}([a-zA-Z0-9.&/?:@\-_=#])*",
    )
    .expect("valid url regex")
});

/// Substituted for a removed math span, padded so it never fuses with neighbours.
const EQUATION: &str = " equation ";

/// Run every rewrite, in order, and tidy the result.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let text = replace_escaped_newlines(raw);
    let text = collapse_backslashes(&text);
    let text = strip_latex(&text);
    let text = collapse_whitespace(&text);
    let text = remove_urls(&text);

    // URL deletion leaves the surrounding spaces behind.
    collapse_whitespace(&text).trim().to_string()
}

/// Replace literal `\n` escape sequences with a space.
#[must_use]
pub fn replace_escaped_newlines(text: &str) -> String {
    ESCAPED_NEWLINE.replace_all(text, " ").into_owned()
}

/// Collapse runs of backslashes into one.
#[must_use]
pub fn collapse_backslashes(text: &str) -> String {
    BACKSLASH_RUN.replace_all(text, NoExpand(r"\")).into_owned()
}

/// Unwrap single-letter and single-command math, then replace any other math span
/// with the word `equation`.
#[must_use]
pub fn strip_latex(text: &str) -> String {
    let text = LATEX_LETTER.replace_all(text, "${1}");
    let text = LATEX_COMMAND.replace_all(&text, "${1}");
    LATEX_EQUATION.replace_all(&text, NoExpand(EQUATION)).into_owned()
}

/// Collapse whitespace runs into a single ASCII space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Delete anything that looks like a URL or bare host name.
#[must_use]
pub fn remove_urls(text: &str) -> String {
    URL.replace_all(text, "").into_owned()
}
