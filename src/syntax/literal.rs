//! Decoding of scalar tokens into values.
//!
//! Errors are plain messages; the caller attaches the token's range.

use smol_str::SmolStr;

use super::value::Value;
use crate::parser::SyntaxKind;

/// Decode a scalar token of the given kind.
pub fn scalar(kind: SyntaxKind, text: &str) -> Result<Value, String> {
    match kind {
        SyntaxKind::BASIC_STRING => basic_string(text).map(Value::String),
        SyntaxKind::ML_BASIC_STRING => ml_basic_string(text).map(Value::String),
        SyntaxKind::LITERAL_STRING => Ok(Value::String(literal_string(text).to_string())),
        SyntaxKind::ML_LITERAL_STRING => Ok(Value::String(ml_literal_string(text).to_string())),
        SyntaxKind::INTEGER => integer(text).map(Value::Integer),
        SyntaxKind::FLOAT => float(text).map(Value::Float),
        SyntaxKind::BOOLEAN => Ok(Value::Boolean(text == "true")),
        SyntaxKind::DATETIME => Ok(Value::Datetime(SmolStr::new(text))),
        _ => Err(format!("`{text}` is not a value")),
    }
}

/// Decode a key segment: bare, basic string or literal string.
pub fn key(kind: SyntaxKind, text: &str) -> Result<SmolStr, String> {
    match kind {
        SyntaxKind::BASIC_STRING => basic_string(text).map(SmolStr::from),
        SyntaxKind::LITERAL_STRING => Ok(SmolStr::new(literal_string(text))),
        _ => Ok(SmolStr::new(text)),
    }
}

pub fn basic_string(text: &str) -> Result<String, String> {
    unescape(strip(text, "\""), false)
}

pub fn literal_string(text: &str) -> &str {
    strip(text, "'")
}

pub fn ml_basic_string(text: &str) -> Result<String, String> {
    unescape(trim_leading_newline(strip(text, "\"\"\"")), true)
}

pub fn ml_literal_string(text: &str) -> &str {
    trim_leading_newline(strip(text, "'''"))
}

pub fn integer(text: &str) -> Result<i64, String> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let parsed = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        digits.parse::<i64>()
    };
    parsed.map_err(|_| format!("integer `{text}` is out of range"))
}

pub fn float(text: &str) -> Result<f64, String> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let unsigned = digits.trim_start_matches(['+', '-']);
    let negative = digits.starts_with('-');
    let value = match unsigned {
        "inf" => f64::INFINITY,
        "nan" => f64::NAN,
        _ => {
            return digits
                .parse::<f64>()
                .map_err(|_| format!("invalid float `{text}`"));
        }
    };
    Ok(if negative { -value } else { value })
}

fn strip<'a>(text: &'a str, quote: &str) -> &'a str {
    let body = text.strip_prefix(quote).unwrap_or(text);
    body.strip_suffix(quote).unwrap_or(body)
}

fn trim_leading_newline(body: &str) -> &str {
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}

fn unescape(body: &str, multiline: bool) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        if multiline {
            // A line-ending backslash swallows the newline and following whitespace
            let rest = chars.as_str();
            let trimmed = rest.trim_start_matches([' ', '\t']);
            if trimmed.starts_with('\n') || trimmed.starts_with("\r\n") {
                chars = trimmed.trim_start_matches([' ', '\t', '\r', '\n']).chars();
                continue;
            }
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('e') => out.push('\u{1b}'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(u @ ('u' | 'U')) => {
                let len = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(len).collect();
                let scalar = (hex.len() == len)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape `\\{u}{hex}`"))?;
                out.push(scalar);
            }
            Some(other) => return Err(format!("invalid escape sequence `\\{other}`")),
            None => return Err("unterminated escape sequence".to_string()),
        }
    }
    Ok(out)
}
