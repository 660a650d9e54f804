//! Section composer. Turns record sections into LaTeX fragments.
//!
//! Every template variant has its own module with one function per section.
//! A section with no records composes to `""`, header included, so the
//! assembler never leaves an orphaned `\section{...}` behind.
//!
//! Each variant returns its full substitution list from `compose`, keyed by
//! the placeholder tokens of its skeleton.

pub mod classic;
pub mod elegant;
pub mod modern;

use crate::latex::escape::{esc, LINE_BREAK};
use crate::models::Education;

/// A `(placeholder, value)` pair handed to the assembler.
pub type Substitution = (&'static str, String);

/// Leading markers that always denote a bullet.
const BULLET_GLYPHS: &[char] = &['•', '◦', '▪', '‣'];

/// ASCII-ish markers that count only when followed by whitespace,
/// so "-5% cost" survives intact.
const SPACED_MARKERS: &[char] = &['-', '*', '–'];

// ────────────────────────────────────────────────────────────────────────────
// Description bullets
// ────────────────────────────────────────────────────────────────────────────

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix(BULLET_GLYPHS) {
        return rest.trim_start();
    }
    if let Some(rest) = line.strip_prefix(SPACED_MARKERS) {
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    line
}

/// Splits a description into bullet lines: trimmed, marker-stripped,
/// blank lines dropped. Returned lines are raw (not yet escaped).
pub fn raw_bullet_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Same as [`raw_bullet_lines`] but each line escaped for LaTeX.
pub fn bullet_lines(text: &str) -> Vec<String> {
    raw_bullet_lines(text).into_iter().map(esc).collect()
}

/// Description as one inline block, lines joined by the line-break sequence.
/// Empty when the description has no visible lines.
pub fn inline_block(text: &str) -> String {
    bullet_lines(text).join(LINE_BREAK)
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// `"start -- end"`, escaped. A blank side is dropped along with the dash.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => esc(s),
        ("", e) => esc(e),
        (s, e) => format!("{} -- {}", esc(s), esc(e)),
    }
}

fn month_year(month: &str, year: &str) -> String {
    format!("{} {}", month.trim(), year.trim()).trim().to_string()
}

/// Raw start date of an education entry, e.g. `"Sep 2019"`.
pub fn education_start(edu: &Education) -> String {
    month_year(&edu.start_month, &edu.start_year)
}

/// Raw end date of an education entry. Ongoing entries read `"Present"`
/// with no year attached.
pub fn education_end(edu: &Education) -> String {
    if edu.is_ongoing() {
        crate::models::PRESENT_SENTINEL.to_string()
    } else {
        month_year(&edu.end_month, &edu.end_year)
    }
}

/// Escaped education date range.
pub fn education_range(edu: &Education) -> String {
    date_range(&education_start(edu), &education_end(edu))
}

// ────────────────────────────────────────────────────────────────────────────
// Small composition helpers
// ────────────────────────────────────────────────────────────────────────────

/// `prefix + escaped(value)` when `value` is non-blank, otherwise `""`.
pub fn clause(prefix: &str, value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        format!("{prefix}{}", esc(value.trim()))
    }
}

/// Joins the escaped, non-blank values with `sep`.
pub fn join_present(values: &[&str], sep: &str) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(esc)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Wraps composed entries in a section, or returns `""` when there are none.
pub fn section(header: &str, open: &str, entries: Vec<String>, sep: &str, close: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }
    format!("\\section{{{header}}}\n{open}{}{close}", entries.join(sep))
}
