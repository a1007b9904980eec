//! Splitting source text into tokens

use std::iter::Peekable;
use std::str::Chars;

/// Characters that end an atom token.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | ',' | ';')
}

/// Split `text` into tokens.
///
/// Whitespace and commas separate tokens; `;` starts a comment that runs
/// to the end of the line. String tokens keep their quotes and escapes; an
/// unterminated string is still returned so the parser can reject it.
///
/// ```
/// use sapling::reader::tokenize;
///
/// assert_eq!(
///     tokenize("(+ 1, ~@xs) ; sum"),
///     vec!["(", "+", "1", "~@", "xs", ")"]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() || c == ',' => {
                chars.next();
            }
            ';' => skip_comment(&mut chars),
            '~' => {
                chars.next();
                if chars.peek() == Some(&'@') {
                    chars.next();
                    tokens.push("~@".to_string());
                } else {
                    tokens.push("~".to_string());
                }
            }
            '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '^' | '@' => {
                chars.next();
                tokens.push(c.to_string());
            }
            '"' => tokens.push(read_string(&mut chars)),
            _ => tokens.push(read_atom(&mut chars)),
        }
    }

    tokens
}

fn skip_comment(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        if c == '\n' {
            break;
        }
        chars.next();
    }
}

fn read_string(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut token = String::new();
    if let Some(quote) = chars.next() {
        token.push(quote);
    }
    while let Some(c) = chars.next() {
        token.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    token.push(escaped);
                }
            }
            '"' => break,
            _ => {}
        }
    }
    token
}

fn read_atom(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut token = String::new();
    while let Some(&c) = chars.peek() {
        if is_delimiter(c) {
            break;
        }
        token.push(c);
        chars.next();
    }
    token
}
