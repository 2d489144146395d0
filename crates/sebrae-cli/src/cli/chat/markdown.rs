//! Markdown-lite formatting for terminal output.
//!
//! The assistant speaks a three-rule dialect: `**bold**`, `*italic*`, and
//! newlines. This module converts it to ANSI-styled text. Rules apply in
//! fixed order (bold pairs first, then italic pairs); pairing is
//! non-greedy and unbalanced markers pass through literally, so a partial
//! prefix of a message never gets misformatted mid-reveal. Newlines are
//! already line breaks on a terminal and pass through untouched.
//!
//! Source text is not escaped: ANSI sequences cannot grow into markup the
//! way HTML can, so server text is printed as-is.

const BOLD: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";
const ITALIC: &str = "\x1b[3m";
const ITALIC_OFF: &str = "\x1b[23m";

/// Render markdown-lite to ANSI-styled terminal text.
pub fn render(text: &str) -> String {
    let bolded = replace_pairs(text, "**", BOLD, BOLD_OFF);
    replace_pairs(&bolded, "*", ITALIC, ITALIC_OFF)
}

/// Replace non-greedy `delim…delim` pairs with `on…off` styling.
///
/// A pair must enclose at least one character; a delimiter without such a
/// closing partner is emitted literally. Requiring non-empty content keeps
/// a lone `**` (a half-typed bold marker) from collapsing into an empty
/// italic pair during the character-by-character reveal.
fn replace_pairs(input: &str, delim: &str, on: &str, off: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        match after.find(delim) {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str(on);
                out.push_str(&after[..close]);
                out.push_str(off);
                rest = &after[close + delim.len()..];
            }
            _ => {
                out.push_str(&rest[..open + delim.len()]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_pairs_are_styled() {
        assert_eq!(
            render("Hello **world**"),
            format!("Hello {BOLD}world{BOLD_OFF}")
        );
    }

    #[test]
    fn italic_pairs_are_styled() {
        assert_eq!(render("a *b* c"), format!("a {ITALIC}b{ITALIC_OFF} c"));
    }

    #[test]
    fn bold_wins_over_italic() {
        assert_eq!(
            render("**negrito** e *itálico*"),
            format!("{BOLD}negrito{BOLD_OFF} e {ITALIC}itálico{ITALIC_OFF}")
        );
    }

    #[test]
    fn pairing_is_non_greedy() {
        assert_eq!(
            render("**a** x **b**"),
            format!("{BOLD}a{BOLD_OFF} x {BOLD}b{BOLD_OFF}")
        );
    }

    #[test]
    fn unbalanced_markers_pass_through() {
        // A lone opening marker mid-reveal must stay literal.
        assert_eq!(render("Hello **wor"), "Hello **wor");
        assert_eq!(render("a * b"), "a * b");
        assert_eq!(render("a ** b"), "a ** b");
    }

    #[test]
    fn empty_pairs_are_literal() {
        assert_eq!(render("****"), "****");
        assert_eq!(render("**"), "**");
    }

    #[test]
    fn newlines_are_preserved() {
        assert_eq!(render("linha 1\nlinha 2"), "linha 1\nlinha 2");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(render("sem formatação"), "sem formatação");
    }
}
