//! Reading source text into values
//!
//! # Pipeline
//!
//! ```text
//! Source → [tokenize] → tokens → [recursive descent] → Value
//! ```
//!
//! Reader macros are rewritten while parsing:
//!
//! | Text   | Form                  |
//! |--------|-----------------------|
//! | `'x`   | `(quote x)`           |
//! | `` `x``| `(quasiquote x)`      |
//! | `~x`   | `(unquote x)`         |
//! | `~@x`  | `(splice-unquote x)`  |
//! | `@x`   | `(deref x)`           |

mod token;

pub use token::tokenize;

use crate::error::{EvalError, Result};
use crate::value::{MapKey, Value, ValueMap};

/// Read the first form in `text`.
///
/// # Errors
///
/// `SyntaxError` when the text holds no form, a collection or string is
/// left open, a closing delimiter has no opener, or a map is malformed.
///
/// ```
/// use sapling::{reader, Value};
///
/// let form = reader::read("(def! x 'y)").unwrap();
/// assert_eq!(format!("{:?}", form), "(def! x (quote y))");
/// assert!(reader::read("(1 2").is_err());
/// ```
pub fn read(text: &str) -> Result<Value> {
    let mut reader = Reader::new(tokenize(text));
    if reader.peek().is_none() {
        return Err(EvalError::Syntax("no input".to_string()));
    }
    reader.read_form()
}

/// Read every form in `text`, in order.
pub fn read_all(text: &str) -> Result<Vec<Value>> {
    let mut reader = Reader::new(tokenize(text));
    let mut forms = Vec::new();
    while reader.peek().is_some() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}

/// Deepest nesting of collections and reader macros accepted.
const MAX_NESTING: usize = 1000;

/// A cursor over a token stream.
struct Reader {
    tokens: Vec<String>,
    position: usize,
    depth: usize,
}

impl Reader {
    fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    fn next(&mut self) -> Option<String> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn read_form(&mut self) -> Result<Value> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::Syntax("nesting too deep".to_string()));
        }
        self.depth += 1;
        let form = stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.read_token_form());
        self.depth -= 1;
        form
    }

    fn read_token_form(&mut self) -> Result<Value> {
        let token = self.next().ok_or_else(unbalanced)?;
        match token.as_str() {
            "(" => Ok(Value::list(self.read_seq(")")?)),
            "[" => Ok(Value::vector(self.read_seq("]")?)),
            "{" => self.read_map(),
            ")" | "]" | "}" => Err(EvalError::Syntax(format!("unexpected '{}'", token))),
            "'" => self.read_wrapped("quote"),
            "`" => self.read_wrapped("quasiquote"),
            "~" => self.read_wrapped("unquote"),
            "~@" => self.read_wrapped("splice-unquote"),
            "@" => self.read_wrapped("deref"),
            _ => read_atom(&token),
        }
    }

    /// Read forms up to `close`, consuming it.
    fn read_seq(&mut self, close: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(unbalanced()),
                Some(token) if token == close => {
                    self.next();
                    return Ok(items);
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }

    fn read_map(&mut self) -> Result<Value> {
        let items = self.read_seq("}")?;
        if items.len() % 2 != 0 {
            return Err(EvalError::Syntax(
                "map literal needs an even number of forms".to_string(),
            ));
        }

        let mut map = ValueMap::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            let key = MapKey::try_from(&key).map_err(|_| {
                EvalError::Syntax(format!(
                    "map key must be a string or keyword, got {:?}",
                    key
                ))
            })?;
            map.insert(key, value);
        }
        Ok(Value::map(map))
    }

    fn read_wrapped(&mut self, symbol: &str) -> Result<Value> {
        let form = self.read_form()?;
        Ok(Value::list(vec![Value::symbol(symbol), form]))
    }
}

fn unbalanced() -> EvalError {
    EvalError::Syntax("unbalanced".to_string())
}

fn read_atom(token: &str) -> Result<Value> {
    if is_integer(token) {
        return token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| EvalError::Syntax(format!("integer out of range: {}", token)));
    }
    if is_decimal(token) {
        if let Ok(number) = token.parse::<f64>() {
            return Ok(Value::Float(number));
        }
    }

    match token {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        "nil" => Ok(Value::Nil),
        _ if token.starts_with(':') => Ok(Value::keyword(&token[1..])),
        _ if token.starts_with('"') => unescape(token)
            .map(Value::string)
            .ok_or_else(unbalanced),
        _ => Ok(Value::symbol(token)),
    }
}

/// `-?[0-9]+`
fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `-?[0-9][0-9.eE+-]*`; tokens of this shape that do not parse as a
/// float read as symbols.
fn is_decimal(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    let mut chars = body.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Resolve escapes in a quoted string token; `None` if it is unterminated.
fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().skip(1);
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                other => out.push(other),
            },
            '"' => return chars.next().is_none().then_some(out),
            c => out.push(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    #[test]
    fn test_read_numbers() {
        assert_eq!(read("42").unwrap(), Value::Int(42));
        assert_eq!(read("-7").unwrap(), Value::Int(-7));
        assert_eq!(read("3.5").unwrap(), Value::Float(3.5));
        assert_eq!(read("-0.25").unwrap(), Value::Float(-0.25));
        assert_eq!(read("1e3").unwrap(), Value::Float(1000.0));
    }

    #[test]
    fn test_minus_alone_is_a_symbol() {
        assert_eq!(read("-").unwrap(), sym("-"));
        assert_eq!(read("-abc").unwrap(), sym("-abc"));
    }

    #[test]
    fn test_number_like_symbols() {
        assert_eq!(read("1+").unwrap(), sym("1+"));
        assert_eq!(read("2-").unwrap(), sym("2-"));
        assert_eq!(read("1.2.3").unwrap(), sym("1.2.3"));
        assert_eq!(read("-1e").unwrap(), sym("-1e"));
    }

    #[test]
    fn test_integer_out_of_range() {
        assert!(matches!(
            read("99999999999999999999"),
            Err(EvalError::Syntax(_))
        ));
    }

    #[test]
    fn test_read_constants_and_keywords() {
        assert_eq!(read("true").unwrap(), Value::Bool(true));
        assert_eq!(read("false").unwrap(), Value::Bool(false));
        assert_eq!(read("nil").unwrap(), Value::Nil);
        assert_eq!(read(":kw").unwrap(), Value::keyword("kw"));
    }

    #[test]
    fn test_read_string_escapes() {
        assert_eq!(read(r#""a\nb""#).unwrap(), Value::string("a\nb"));
        assert_eq!(read(r#""q\"q""#).unwrap(), Value::string("q\"q"));
        assert_eq!(read(r#""back\\slash""#).unwrap(), Value::string("back\\slash"));
        assert_eq!(read(r#""""#).unwrap(), Value::string(""));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(read(r#""abc"#), Err(EvalError::Syntax(m)) if m == "unbalanced"));
        assert!(matches!(read(r#""abc\""#), Err(EvalError::Syntax(m)) if m == "unbalanced"));
    }

    #[test]
    fn test_read_collections() {
        assert_eq!(
            read("(1 [2 3] ())").unwrap(),
            Value::list(vec![
                Value::Int(1),
                Value::vector(vec![Value::Int(2), Value::Int(3)]),
                Value::empty_list(),
            ])
        );
    }

    #[test]
    fn test_read_map() {
        let value = read(r#"{:a 1 "b" [2]}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&MapKey::Keyword("a".into())),
            Some(&Value::Int(1))
        );
    }

    #[test]
    fn test_map_errors() {
        assert!(matches!(read("{:a}"), Err(EvalError::Syntax(_))));
        assert!(matches!(read("{1 2}"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_reader_macros() {
        assert_eq!(read("'x").unwrap(), Value::list(vec![sym("quote"), sym("x")]));
        assert_eq!(
            read("`(a ~b ~@c)").unwrap(),
            Value::list(vec![
                sym("quasiquote"),
                Value::list(vec![
                    sym("a"),
                    Value::list(vec![sym("unquote"), sym("b")]),
                    Value::list(vec![sym("splice-unquote"), sym("c")]),
                ]),
            ])
        );
    }

    #[test]
    fn test_deref_wraps_whole_form() {
        assert_eq!(
            read("@(f a)").unwrap(),
            Value::list(vec![
                sym("deref"),
                Value::list(vec![sym("f"), sym("a")]),
            ])
        );
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(read("(1 2"), Err(EvalError::Syntax(m)) if m == "unbalanced"));
        assert!(matches!(read("[1 (2]"), Err(EvalError::Syntax(_))));
        assert!(matches!(read("'"), Err(EvalError::Syntax(_))));
        assert!(matches!(read(")"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("{}{}", "(".repeat(n), ")".repeat(n));

        let mut value = read(&nested(MAX_NESTING)).unwrap();
        let mut levels = 1;
        while let Some(inner) = value.as_list().and_then(|items| items.first().cloned()) {
            value = inner;
            levels += 1;
        }
        assert_eq!(levels, MAX_NESTING);

        assert!(matches!(
            read(&nested(MAX_NESTING + 1)),
            Err(EvalError::Syntax(m)) if m == "nesting too deep"
        ));
        assert!(matches!(
            read(&format!("{}x", "'".repeat(MAX_NESTING))),
            Err(EvalError::Syntax(m)) if m == "nesting too deep"
        ));
    }

    #[test]
    fn test_deep_nesting_on_small_stack() {
        let message = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| match read(&format!("{}{}", "(".repeat(5000), ")".repeat(5000))) {
                Err(EvalError::Syntax(m)) => m,
                other => panic!("expected a syntax error, got {:?}", other),
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(message, "nesting too deep");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(read("   ; nothing"), Err(EvalError::Syntax(_))));
        assert!(read_all("").unwrap().is_empty());
    }

    #[test]
    fn test_read_all_in_order() {
        let forms = read_all("1 (a) :k").unwrap();
        assert_eq!(
            forms,
            vec![Value::Int(1), Value::list(vec![sym("a")]), Value::keyword("k")]
        );
    }
}
