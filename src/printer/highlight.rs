//! Terminal highlighting of printed values.
//!
//! [`highlight`] is a lexical pass over already printed text, not a parser.
//! It recognizes quoted keys, quoted strings, numbers, booleans and `null`,
//! and wraps each one in a terminal style followed by [`RESET`].
//!
//! Strings are printed without escaping, so where a quoted run ends is decided
//! from what follows the quote. A `\"` only closes the run when it is followed
//! by the end of the text, a closing bracket or a comma and a break. Content
//! like `\"looks like a key\":` inside a string is never styled on its own,
//! and a string ending in a backslash still ends at its closing quote. A
//! string containing a bare `"` can still confuse the pass. Such output is
//! styled oddly but never loses text.
//!
//! [`strip`] removes every terminal style, turning colored output back into
//! its plain form.
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

pub const KEY: &str = "\x1b[36m";
pub const STRING: &str = "\x1b[32m";
pub const NUMBER: &str = "\x1b[33m";
pub const BOOLEAN: &str = "\x1b[35m";
pub const NULL: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

fn tokens() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<escape>\x1b\[[0-9;]*m)",
            r#"|(?P<quote>")"#,
            r"|(?P<number>-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)",
            r"|(?P<word>[A-Za-z_$][A-Za-z0-9_$]*)",
        ))
        .expect("token pattern is valid")
    })
}

fn markers() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("marker pattern is valid"))
}

/// Wraps the tokens of a printed value in terminal styles.
///
/// # Examples
///
/// ```
/// use inklog::printer::highlight::{highlight, KEY, NUMBER, RESET};
///
/// let colored = highlight("{ \"id\": 7 }");
/// assert_eq!(colored, format!("{{ {}\"id\"{}: {}7{} }}", KEY, RESET, NUMBER, RESET));
/// ```
pub fn highlight(text: &str) -> String {
    let mut writer = String::with_capacity(text.len() * 2);
    let mut last = 0;

    while let Some(caps) = tokens().captures_at(text, last) {
        let (start, end) = match caps.get(0) {
            Some(m) if caps.name("quote").is_some() => match closing_quote(text, m.start()) {
                Some(end) => (m.start(), end),
                None => (m.start(), m.end()),
            },
            Some(m) => (m.start(), m.end()),
            None => break,
        };
        let token = &text[start..end];
        writer.push_str(&text[last..start]);
        last = end;

        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let quoted = token.len() > 1 && caps.name("quote").is_some();

        let style = if quoted {
            if after == Some(':') && precedes_key(before) {
                Some(KEY)
            } else if after != Some(':') && precedes_value(before) {
                Some(STRING)
            } else {
                None
            }
        } else if caps.name("number").is_some() {
            let standalone = !after.map_or(false, |c| c.is_alphanumeric() || c == '_');
            if standalone && precedes_value(before) {
                Some(NUMBER)
            } else {
                None
            }
        } else if caps.name("word").is_some() && precedes_value(before) {
            match token {
                "true" | "false" => Some(BOOLEAN),
                "null" => Some(NULL),
                _ => None,
            }
        } else {
            None
        };

        match style {
            Some(style) => {
                writer.push_str(style);
                writer.push_str(token);
                writer.push_str(RESET);
            }
            None => writer.push_str(token),
        }
    }

    writer.push_str(&text[last..]);
    writer
}

/// Returns the end of the quoted run opened at `open`, past its closing
/// quote, or `None` if the run is never closed.
fn closing_quote(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => return Some(i + 1),
            b'\\' if bytes.get(i + 1) == Some(&b'"') => {
                if ends_string(&text[i + 2..]) {
                    return Some(i + 2);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    None
}

/// Whether `rest`, the text right after a quote, is where a printed string
/// ends: the end of the text, a comma followed by a break, or a closing
/// bracket after optional whitespace.
fn ends_string(rest: &str) -> bool {
    if let Some(after_comma) = rest.strip_prefix(',') {
        return after_comma.chars().next().map_or(true, char::is_whitespace);
    }
    match rest.trim_start().chars().next() {
        None | Some(']') | Some('}') => true,
        Some(_) => false,
    }
}

/// Keys follow the start of the text, whitespace, a comma or an opening
/// brace.
fn precedes_key(before: Option<char>) -> bool {
    before.map_or(true, |c| c.is_whitespace() || c == ',' || c == '{')
}

/// Values follow the start of the text, whitespace, a colon, a comma or an
/// opening bracket.
fn precedes_value(before: Option<char>) -> bool {
    before.map_or(true, |c| c.is_whitespace() || c == ':' || c == ',' || c == '[')
}

/// Removes every terminal style from `text`.
///
/// Only complete `ESC [ <digits and semicolons> m` sequences are removed, so
/// all other text is kept byte for byte.
///
/// # Examples
///
/// ```
/// use inklog::printer::highlight::{highlight, strip};
///
/// let plain = "{ \"ok\": true, \"n\": null }";
/// assert_eq!(strip(&highlight(plain)), plain);
/// ```
pub fn strip(text: &str) -> Cow<'_, str> {
    markers().replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(style: &str, token: &str) -> String {
        format!("{}{}{}", style, token, RESET)
    }

    #[test]
    fn keys_and_values() {
        let text = "{\n\t\"name\": \"db\",\n\t\"port\": 5432,\n\t\"tls\": false,\n\t\"peer\": null\n}";
        let colored = highlight(text);

        assert!(colored.contains(&styled(KEY, "\"name\"")));
        assert!(colored.contains(&styled(STRING, "\"db\"")));
        assert!(colored.contains(&styled(NUMBER, "5432")));
        assert!(colored.contains(&styled(BOOLEAN, "false")));
        assert!(colored.contains(&styled(NULL, "null")));
        assert_eq!(strip(&colored), text);
    }

    #[test]
    fn escaped_quote_then_colon_is_not_a_key() {
        let text = r#"{	"text": "Nice String with \"some escaped\": characters"	}"#;
        let colored = highlight(text);

        assert!(colored.contains(&styled(KEY, "\"text\"")));
        assert!(colored.contains(&styled(
            STRING,
            r#""Nice String with \"some escaped\": characters""#
        )));
        assert!(!colored.contains(&format!("{}\\\"some escaped", KEY)));
        assert!(!colored.contains(&format!("{}\\\"some escaped", STRING)));
    }

    #[test]
    fn trailing_backslash_closes_the_string() {
        let text = "{\n\t\"dir\": \"C:\\temp\\\",\n\t\"next\": 1\n}";
        let colored = highlight(text);

        assert!(colored.contains(&styled(STRING, "\"C:\\temp\\\"")));
        assert!(colored.contains(&styled(KEY, "\"next\"")));
        assert!(colored.contains(&styled(NUMBER, "1")));
        assert_eq!(strip(&colored), text);

        let inline = highlight("[ \"a\\\" ]");
        assert_eq!(inline, format!("[ {} ]", styled(STRING, "\"a\\\"")));
    }

    #[test]
    fn unclosed_quote_is_left_alone() {
        let text = "[ \"open ]";
        assert_eq!(strip(&highlight(text)), text);
        assert!(!highlight(text).contains(STRING));
    }

    #[test]
    fn sequence_elements() {
        let colored = highlight("[ 1, -2.5, \"he\", true ]");
        assert!(colored.contains(&styled(NUMBER, "1")));
        assert!(colored.contains(&styled(NUMBER, "-2.5")));
        assert!(colored.contains(&styled(STRING, "\"he\"")));
        assert!(colored.contains(&styled(BOOLEAN, "true")));
    }

    #[test]
    fn identifiers_are_left_alone() {
        for text in &[
            "[ [Function fun2] ]",
            "[ Symbol(true) ]",
            "Point2 { }",
            "[ [circular reference] ]",
            "[ undefined ]",
        ] {
            assert_eq!(highlight(text), *text);
        }
    }

    #[test]
    fn existing_styles_are_kept_verbatim() {
        let text = format!("[ {} ]", styled(NUMBER, "12"));
        let colored = highlight(&text);

        // The digits inside the escape sequences are not numbers.
        assert_eq!(colored.matches("\x1b[").count(), 2 + 2);
        assert_eq!(strip(&colored), "[ 12 ]");
    }

    #[test]
    fn strip_is_lossless() {
        let text = "tab\there | 3 [ \"x\" ] \x1b[2mdim\x1b[0m \x1b[1;5;30;41memer\x1b[0m";
        assert_eq!(strip(text), "tab\there | 3 [ \"x\" ] dim emer");
        assert!(matches!(strip("no styles"), Cow::Borrowed(_)));
    }
}
