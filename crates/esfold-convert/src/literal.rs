// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Literal cooking: turning token text into values.

use esfold_ast::LiteralValue;

/// Value of a numeric literal token (`Number` or `BigInt`).
pub fn numeric_value(raw: &str) -> Option<LiteralValue> {
    let text: String = raw.chars().filter(|&c| c != '_').collect();

    if let Some(digits) = text.strip_suffix('n') {
        let (digits, radix) = split_radix(digits);
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return Some(LiteralValue::BigInt(to_decimal(digits, radix)));
    }

    let (digits, radix) = split_radix(&text);
    if radix != 10 {
        return radix_value(digits, radix).map(LiteralValue::Number);
    }

    // Legacy octal (`017`); `08` and `09` stay decimal.
    if text.len() > 1 && text.starts_with('0') && text.chars().all(|c| c.is_ascii_digit()) {
        if text.chars().all(|c| c.is_digit(8)) {
            return radix_value(&text[1..], 8).map(LiteralValue::Number);
        }
        return text.parse::<f64>().ok().map(LiteralValue::Number);
    }

    text.parse::<f64>().ok().map(LiteralValue::Number)
}

fn split_radix(text: &str) -> (&str, u32) {
    let prefix = text.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ => (text, 10),
    }
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    if let Ok(exact) = u64::from_str_radix(digits, radix) {
        return Some(exact as f64);
    }
    let mut value = 0f64;
    for c in digits.chars() {
        value = value * radix as f64 + c.to_digit(radix)? as f64;
    }
    Some(value)
}

/// Arbitrary-precision conversion of `digits` in `radix` to decimal.
fn to_decimal(digits: &str, radix: u32) -> String {
    // Little-endian base 10^9 limbs.
    const BASE: u64 = 1_000_000_000;
    let mut limbs: Vec<u64> = vec![0];
    for c in digits.chars() {
        let mut carry = c.to_digit(radix).unwrap_or(0) as u64;
        for limb in limbs.iter_mut() {
            let v = *limb * radix as u64 + carry;
            *limb = v % BASE;
            carry = v / BASE;
        }
        while carry > 0 {
            limbs.push(carry % BASE);
            carry /= BASE;
        }
    }
    let mut out = String::new();
    for (i, limb) in limbs.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&limb.to_string());
        } else {
            out.push_str(&format!("{limb:09}"));
        }
    }
    out
}

/// Cooked value of a string literal token, quotes included in `raw`.
pub fn string_value(raw: &str) -> Option<String> {
    let quote = raw.chars().next()?;
    if raw.len() < 2 || !matches!(quote, '"' | '\'') || !raw.ends_with(quote) {
        return None;
    }
    cook(&raw[1..raw.len() - 1], false)
}

/// Cooked value of a template chunk's inner text.
///
/// `None` when the chunk holds an escape that is invalid in templates;
/// legal only in tagged templates.
pub fn template_cooked(inner: &str) -> Option<String> {
    cook(inner, true)
}

/// Inner text of a template token (`` `a${ `` gives `a`).
pub fn template_inner(raw: &str) -> &str {
    let start = usize::from(raw.starts_with('`') || raw.starts_with('}'));
    let end = if raw.ends_with("${") {
        raw.len() - 2
    } else if raw.ends_with('`') && raw.len() > start {
        raw.len() - 1
    } else {
        raw.len()
    };
    raw.get(start..end.max(start)).unwrap_or("")
}

/// `/pattern/flags` split into its parts.
pub fn regex_parts(raw: &str) -> Option<(String, String)> {
    let body = raw.strip_prefix('/')?;
    let close = body.rfind('/')?;
    Some((body[..close].to_string(), body[close + 1..].to_string()))
}

/// Identifier name with `\uXXXX` / `\u{...}` escapes decoded.
pub fn identifier_name(raw: &str) -> Option<String> {
    if !raw.contains('\\') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        if chars.next() != Some('u') {
            return None;
        }
        let code = unicode_escape(&mut chars)?;
        out.push(char::from_u32(code)?);
    }
    Some(out)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Parse the part of a `\u` escape after the `u`.
fn unicode_escape(chars: &mut Chars<'_>) -> Option<u32> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut hex = String::new();
        loop {
            match chars.next()? {
                '}' => break,
                c if c.is_ascii_hexdigit() => hex.push(c),
                _ => return None,
            }
        }
        let code = u32::from_str_radix(&hex, 16).ok()?;
        return (code <= 0x10FFFF).then_some(code);
    }
    fixed_hex(chars, 4)
}

fn fixed_hex(chars: &mut Chars<'_>, len: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..len {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

/// Decode escapes. Templates reject legacy octal escapes and normalise
/// `\r\n` and `\r` to `\n`.
fn cook(body: &str, template: bool) -> Option<String> {
    let mut units: Vec<u16> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut buf = [0u16; 2];

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next()?;
                match escaped {
                    'n' => units.push(0x0A),
                    't' => units.push(0x09),
                    'r' => units.push(0x0D),
                    'b' => units.push(0x08),
                    'f' => units.push(0x0C),
                    'v' => units.push(0x0B),
                    '0' if !chars.peek().map_or(false, char::is_ascii_digit) => units.push(0),
                    'x' => units.push(fixed_hex(&mut chars, 2)? as u16),
                    'u' => {
                        let code = unicode_escape(&mut chars)?;
                        match char::from_u32(code) {
                            Some(ch) => units.extend_from_slice(ch.encode_utf16(&mut buf)),
                            // Lone surrogate half; may pair with a following escape.
                            None => units.push(code as u16),
                        }
                    }
                    // Line continuations
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                    }
                    '\n' | '\u{2028}' | '\u{2029}' => {}
                    '0'..='7' if template => return None,
                    '8' | '9' if template => return None,
                    '0'..='7' => units.push(legacy_octal(escaped, &mut chars)),
                    other => units.extend_from_slice(other.encode_utf16(&mut buf)),
                }
            }
            '\r' if template => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                units.push(0x0A);
            }
            other => units.extend_from_slice(other.encode_utf16(&mut buf)),
        }
    }

    Some(String::from_utf16_lossy(&units))
}

/// `\NNN` with up to three octal digits, value at most 0o377.
fn legacy_octal(first: char, chars: &mut Chars<'_>) -> u16 {
    let mut value = first.to_digit(8).unwrap_or(0);
    let max_digits = if first <= '3' { 3 } else { 2 };
    for _ in 1..max_digits {
        match chars.peek().and_then(|c| c.to_digit(8)) {
            Some(d) => {
                value = value * 8 + d;
                chars.next();
            }
            None => break,
        }
    }
    value as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> f64 {
        match numeric_value(raw) {
            Some(LiteralValue::Number(n)) => n,
            other => panic!("{raw}: {other:?}"),
        }
    }

    #[test]
    fn decimal_numbers() {
        assert_eq!(number("42"), 42.0);
        assert_eq!(number("1_000"), 1000.0);
        assert_eq!(number("1.5e3"), 1500.0);
        assert_eq!(number(".5"), 0.5);
        assert_eq!(number("5."), 5.0);
    }

    #[test]
    fn radix_numbers() {
        assert_eq!(number("0xff"), 255.0);
        assert_eq!(number("0XFF"), 255.0);
        assert_eq!(number("0o17"), 15.0);
        assert_eq!(number("0b1010"), 10.0);
        assert_eq!(number("017"), 15.0);
        assert_eq!(number("019"), 19.0);
        assert!(numeric_value("0x").is_none());
    }

    #[test]
    fn bigints_are_decimal_digit_strings() {
        assert_eq!(numeric_value("10n"), Some(LiteralValue::BigInt("10".into())));
        assert_eq!(numeric_value("0xffn"), Some(LiteralValue::BigInt("255".into())));
        assert_eq!(
            numeric_value("0xffffffffffffffffffffn"),
            Some(LiteralValue::BigInt("1208925819614629174706175".into()))
        );
        assert_eq!(numeric_value("1_000_000_000_000n"), Some(LiteralValue::BigInt("1000000000000".into())));
    }

    #[test]
    fn string_escapes() {
        assert_eq!(string_value(r#""a\nb""#).as_deref(), Some("a\nb"));
        assert_eq!(string_value(r"'\x41B\u{43}'").as_deref(), Some("ABC"));
        assert_eq!(string_value(r"'😀'").as_deref(), Some("\u{1F600}"));
        assert_eq!(string_value("'a\\\nb'").as_deref(), Some("ab"));
        assert_eq!(string_value(r"'\101'").as_deref(), Some("A"));
        assert_eq!(string_value(r"'\0'").as_deref(), Some("\0"));
        assert_eq!(string_value(r"'\q'").as_deref(), Some("q"));
        assert_eq!(string_value(r"'\x4'"), None);
        assert_eq!(string_value("'unterminated"), None);
    }

    #[test]
    fn template_chunks() {
        assert_eq!(template_inner("`a${"), "a");
        assert_eq!(template_inner("}b`"), "b");
        assert_eq!(template_inner("}mid${"), "mid");
        assert_eq!(template_inner("``"), "");
        assert_eq!(template_cooked(r"a\tb").as_deref(), Some("a\tb"));
        assert_eq!(template_cooked("a\r\nb").as_deref(), Some("a\nb"));
        assert_eq!(template_cooked(r"\unicode"), None);
        assert_eq!(template_cooked(r"\01"), None);
    }

    #[test]
    fn regex_split() {
        assert_eq!(regex_parts("/a\\/b/gi"), Some(("a\\/b".into(), "gi".into())));
        assert_eq!(regex_parts("/x/"), Some(("x".into(), "".into())));
        assert_eq!(regex_parts("x"), None);
    }

    #[test]
    fn identifier_escapes() {
        assert_eq!(identifier_name("plain").as_deref(), Some("plain"));
        assert_eq!(identifier_name(r"ab").as_deref(), Some("ab"));
        assert_eq!(identifier_name(r"\u{62}").as_deref(), Some("b"));
        assert_eq!(identifier_name(r"\x61"), None);
    }
}
