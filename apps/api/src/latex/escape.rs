//! LaTeX escaping for user-supplied text.
//!
//! One pass over the input, which is equivalent to running the classic
//! sequential `replace` chain with the backslash rule first: the escape
//! sequences we emit are never themselves re-scanned.
//!
//! Escaping is NOT idempotent. Call it exactly once per raw field.

/// Line-break control sequence used in place of raw newlines.
pub const LINE_BREAK: &str = "\\\\ ";

/// Escapes `text` for safe embedding in LaTeX source.
///
/// `None` and `Some("")` both yield an empty string.
pub fn escape_latex(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(LINE_BREAK);
            }
            '\n' => out.push_str(LINE_BREAK),
            _ => out.push(c),
        }
    }
    out
}

/// Shorthand for the common case of a plain (possibly empty) field.
pub fn esc(text: &str) -> String {
    escape_latex(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reverses the escape table; used to check the round-trip property.
    fn unescape(s: &str) -> String {
        s.replace("\\textbackslash{}", "\u{0}")
            .replace("\\textasciitilde{}", "~")
            .replace("\\textasciicircum{}", "^")
            .replace(LINE_BREAK, "\n")
            .replace("\\&", "&")
            .replace("\\%", "%")
            .replace("\\$", "$")
            .replace("\\#", "#")
            .replace("\\_", "_")
            .replace("\\{", "{")
            .replace("\\}", "}")
            .replace('\u{0}', "\\")
    }

    /// Every special char in the output must be part of an escape sequence.
    fn has_unescaped_specials(s: &str) -> bool {
        let stripped = s
            .replace("\\textbackslash{}", "")
            .replace("\\textasciitilde{}", "")
            .replace("\\textasciicircum{}", "")
            .replace(LINE_BREAK, "")
            .replace("\\&", "")
            .replace("\\%", "")
            .replace("\\$", "")
            .replace("\\#", "")
            .replace("\\_", "")
            .replace("\\{", "")
            .replace("\\}", "");
        stripped.chars().any(|c| "\\&%$#_{}~^".contains(c))
    }

    #[test]
    fn test_none_and_empty_yield_empty() {
        assert_eq!(escape_latex(None), "");
        assert_eq!(escape_latex(Some("")), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(esc("Jane Doe"), "Jane Doe");
        assert_eq!(esc("jane@x.com"), "jane@x.com");
    }

    #[test]
    fn test_each_special_character() {
        assert_eq!(esc("\\"), "\\textbackslash{}");
        assert_eq!(esc("&"), "\\&");
        assert_eq!(esc("%"), "\\%");
        assert_eq!(esc("$"), "\\$");
        assert_eq!(esc("#"), "\\#");
        assert_eq!(esc("_"), "\\_");
        assert_eq!(esc("{"), "\\{");
        assert_eq!(esc("}"), "\\}");
        assert_eq!(esc("~"), "\\textasciitilde{}");
        assert_eq!(esc("^"), "\\textasciicircum{}");
    }

    #[test]
    fn test_backslash_braces_not_double_escaped() {
        // The braces of \textbackslash{} must not be escaped again.
        assert_eq!(esc("a\\b"), "a\\textbackslash{}b");
        assert_eq!(esc("{\\}"), "\\{\\textbackslash{}\\}");
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        assert_eq!(esc("one\ntwo"), "one\\\\ two");
        assert_eq!(esc("one\r\ntwo"), "one\\\\ two");
        assert!(!esc("a\nb\nc").contains('\n'));
    }

    /// Text weighted toward LaTeX specials and line breaks.
    fn latex_hostile_text() -> impl Strategy<Value = String> {
        let special = prop::sample::select(vec![
            '\\', '&', '%', '$', '#', '_', '{', '}', '~', '^', '\n', '\r',
        ]);
        let other = any::<char>().prop_filter("NUL is reserved by unescape", |c| *c != '\u{0}');
        prop::collection::vec(prop_oneof![3 => special, 2 => other], 0..64)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_unescaped_specials(text in latex_hostile_text()) {
            let escaped = esc(&text);
            prop_assert!(!has_unescaped_specials(&escaped), "unescaped special in {:?}", escaped);
            prop_assert!(!escaped.contains('\n') && !escaped.contains('\r'));
        }

        #[test]
        fn prop_unescape_restores_input(text in latex_hostile_text()) {
            // Every line ending comes back as a bare newline.
            let expected = text.replace("\r\n", "\n").replace('\r', "\n");
            prop_assert_eq!(unescape(&esc(&text)), expected);
        }
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(esc("Zoë — résumé"), "Zoë — résumé");
    }
}
