//! Rendering values back to text
//!
//! Two modes share one writer:
//!
//! - **readable** (`pr-str`, `prn`, the REPL): strings are quoted and
//!   escaped, so the output reads back to an equal value.
//! - **display** (`str`, `println`): strings keep their quotes but their
//!   characters are emitted raw.
//!
//! ```
//! use sapling::{printer, Value};
//!
//! let v = Value::list(vec![Value::Int(1), Value::string("a\nb")]);
//! assert_eq!(printer::print(&v, true), "(1 \"a\\nb\")");
//! assert_eq!(printer::print(&v, false), "(1 \"a\nb\")");
//! ```

use std::fmt::{self, Write};

use crate::value::Value;

/// Render `value` to a new string.
pub fn print(value: &Value, readable: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_value(&mut out, value, readable);
    out
}

/// Render several values joined by `sep` (used by `pr-str` and `prn`).
pub fn print_joined(values: &[Value], readable: bool, sep: &str) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write_value(&mut out, value, readable);
    }
    out
}

/// Concatenate values the way `str` and `println` do: a top-level string
/// contributes its bare characters, anything else its display form.
pub fn print_str(values: &[Value], sep: &str) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        match value {
            Value::String(s) => out.push_str(s),
            other => {
                let _ = write_value(&mut out, other, false);
            }
        }
    }
    out
}

/// Write `value` into any [`fmt::Write`] sink.
pub fn write_value<W: Write + ?Sized>(out: &mut W, value: &Value, readable: bool) -> fmt::Result {
    match value {
        Value::Nil => out.write_str("nil"),
        Value::Bool(b) => write!(out, "{}", b),
        Value::Int(n) => write!(out, "{}", n),
        // Debug keeps a fractional part or exponent, so floats read back as floats
        Value::Float(n) => write!(out, "{:?}", n),
        Value::String(s) if readable => write_escaped(out, s),
        Value::String(s) => write!(out, "\"{}\"", s),
        Value::Keyword(k) => write!(out, ":{}", k),
        Value::Symbol(s) => out.write_str(s),
        Value::List(items) => write_seq(out, items, "(", ")", readable),
        Value::Vector(items) => write_seq(out, items, "[", "]", readable),
        Value::Map(map) => {
            out.write_char('{')?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, &k.to_value(), readable)?;
                out.write_char(' ')?;
                write_value(out, v, readable)?;
            }
            out.write_char('}')
        }
        Value::Function(f) if f.is_macro => out.write_str("#<macro>"),
        Value::Function(_) => out.write_str("#<function>"),
        Value::Builtin(b) => write!(out, "#<builtin {}>", b.name),
        Value::Atom(cell) => {
            out.write_str("(atom ")?;
            write_value(out, &cell.borrow(), readable)?;
            out.write_char(')')
        }
    }
}

fn write_seq<W: Write + ?Sized>(
    out: &mut W,
    items: &[Value],
    open: &str,
    close: &str,
    readable: bool,
) -> fmt::Result {
    out.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write_value(out, item, readable)?;
    }
    out.write_str(close)
}

fn write_escaped<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\n' => out.write_str("\\n")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
