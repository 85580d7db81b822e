//! Object-literal text -> CSS declaration text.

use crate::core::normalize::kebabize;
use crate::core::scanner::{check_balanced, matching_close, Segment};
use crate::domain::error::ConversionError;
use crate::domain::model::{CssLayout, ReverseOutput, StyleMapping};
use cssparser::{Parser, ParserInput, Token};
use std::borrow::Cow;

/// Convert `{ key: value, ... }` text into inline CSS (`a: 1; b: 2;`).
///
/// The parse itself is synchronous; the future resolves on its first poll.
/// On failure no CSS is produced.
pub async fn reverse(object_text: &str) -> Result<ReverseOutput, ConversionError> {
    reverse_with(object_text, CssLayout::Inline).await
}

pub async fn reverse_with(
    object_text: &str,
    layout: CssLayout,
) -> Result<ReverseOutput, ConversionError> {
    let mapping = parse_object(object_text)?;
    let css = render_css(&mapping, layout)?;
    tracing::debug!(declarations = mapping.len(), "reverse conversion finished");
    Ok(ReverseOutput { css })
}

/// Parse object-literal text into a mapping keyed by the (unquoted) keys.
///
/// The enclosing braces are optional. Pairs are split on top-level commas;
/// blank pairs, including a trailing comma, are skipped.
pub fn parse_object(object_text: &str) -> Result<StyleMapping, ConversionError> {
    check_balanced(object_text)?;

    let mut mapping = StyleMapping::new();
    for pair in object_body(object_text).split_all(',') {
        if pair.is_blank() {
            continue;
        }
        let (key, value) = parse_pair(pair.trimmed())?;
        mapping.insert(key, value);
    }

    Ok(mapping)
}

/// Render a mapping as CSS declarations, kebab-casing every name.
///
/// Values are written as-is unless they would swallow or split the
/// declaration terminator.
pub fn render_css(mapping: &StyleMapping, layout: CssLayout) -> Result<String, ConversionError> {
    let declarations = mapping
        .iter()
        .map(|d| Ok(format!("{}: {};", kebabize(&d.name)?, css_value(&d.value))))
        .collect::<Result<Vec<_>, ConversionError>>()?;

    Ok(declarations.join(layout.separator()))
}

/// Make `value` safe to place before a `;`.
///
/// A top-level `;` inside the value is escaped as `\;`. When the value ends
/// in an open string or a lone `\`, the following `;` would be absorbed, so a
/// newline is inserted first; CSS ends both at a newline without keeping it.
fn css_value(value: &str) -> Cow<'_, str> {
    let semicolons = top_level_semicolons(value);
    let mut escaped = Cow::Borrowed(value);

    if !semicolons.is_empty() {
        let mut text = String::with_capacity(value.len() + semicolons.len());
        let mut last = 0;
        for at in semicolons {
            text.push_str(&value[last..at]);
            text.push('\\');
            last = at;
        }
        text.push_str(&value[last..]);
        escaped = Cow::Owned(text);
    }

    let terminated = format!("{};", escaped);
    if !top_level_semicolons(&terminated).contains(&escaped.len()) {
        escaped.to_mut().push('\n');
    }

    escaped
}

/// Byte offsets of the `;` tokens outside strings, escapes and blocks.
fn top_level_semicolons(text: &str) -> Vec<usize> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut offsets = Vec::new();

    loop {
        let at = parser.position().byte_index();
        match parser.next_including_whitespace() {
            Ok(Token::Semicolon) => offsets.push(at),
            Ok(_) => {}
            Err(_) => break,
        }
    }

    offsets
}

fn object_body(object_text: &str) -> Segment<'_> {
    let whole = Segment::new(object_text, 0).trimmed();

    if whole.text.starts_with('{') {
        if let Some(close) = matching_close(whole.text, 0) {
            if close + 1 == whole.text.len() {
                return Segment::new(&whole.text[1..close], whole.offset + 1);
            }
        }
    }

    whole
}

fn parse_pair(pair: Segment<'_>) -> Result<(String, String), ConversionError> {
    let (key, value) =
        pair.split_once(':')
            .ok_or_else(|| ConversionError::MissingSeparator {
                fragment: pair.text.to_string(),
                offset: pair.offset,
            })?;

    let key = key.trimmed();
    if key.text.is_empty() {
        return Err(ConversionError::EmptyPropertyName {
            fragment: pair.text.to_string(),
            offset: pair.offset,
        });
    }

    let name = if starts_with_quote(key.text) {
        unquote(key.text).ok_or_else(|| ConversionError::InvalidIdentifier {
            fragment: key.text.to_string(),
            offset: key.offset,
            reason: "malformed quoted key".to_string(),
        })?
    } else {
        key.text.to_string()
    };
    // `""` 解開後同樣是空名稱
    if name.is_empty() {
        return Err(ConversionError::EmptyPropertyName {
            fragment: pair.text.to_string(),
            offset: pair.offset,
        });
    }
    kebabize(&name).map_err(|e| e.shifted(key.offset))?;

    let value = value.trimmed();
    if value.text.is_empty() {
        return Err(ConversionError::EmptyValue {
            fragment: pair.text.to_string(),
            offset: pair.offset,
        });
    }

    // 完整的字串字面值才去除引號，其餘原樣保留
    let value = if starts_with_quote(value.text) {
        unquote(value.text).unwrap_or_else(|| value.text.to_string())
    } else {
        value.text.to_string()
    };

    Ok((name, value))
}

fn starts_with_quote(text: &str) -> bool {
    matches!(text.chars().next(), Some('"' | '\'' | '`'))
}

/// Decode a string literal spanning all of `text`. `None` if the literal
/// closes before the end of `text` or never closes.
fn unquote(text: &str) -> Option<String> {
    let mut chars = text.chars().peekable();
    let quote = chars.next()?;
    let mut decoded = String::with_capacity(text.len());

    while let Some(ch) = chars.next() {
        if ch == quote {
            return chars.next().is_none().then_some(decoded);
        }
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }

        match chars.next()? {
            'n' => decoded.push('\n'),
            't' => decoded.push('\t'),
            'r' => decoded.push('\r'),
            'b' => decoded.push('\u{8}'),
            'f' => decoded.push('\u{c}'),
            'v' => decoded.push('\u{b}'),
            '0' => decoded.push('\0'),
            // 續行
            '\n' => {}
            'x' => {
                let code = take_hex(&mut chars, 2)?;
                decoded.push(char::from_u32(code)?);
            }
            'u' => decoded.push(decode_unicode_escape(&mut chars)?),
            other => decoded.push(other),
        }
    }

    None
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, len: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..len {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

fn decode_unicode_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<char> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut code = 0u32;
        loop {
            match chars.next()? {
                '}' => break,
                c => code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?,
            }
        }
        return char::from_u32(code);
    }

    let high = take_hex(chars, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return Some(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    // 代理對：\uD83D\uDE00
    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
        if let Some(low) = take_hex(&mut lookahead, 4) {
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined);
            }
        }
    }

    Some(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ConversionErrorKind;

    fn css(text: &str) -> Result<String, ConversionError> {
        tokio_test::block_on(reverse(text)).map(|out| out.css)
    }

    #[test]
    fn test_basic_object() {
        assert_eq!(
            css(r##"{ backgroundColor: "#fff", fontSize: 12 }"##).unwrap(),
            "background-color: #fff; font-size: 12;"
        );
    }

    #[test]
    fn test_json_keys_and_trailing_comma() {
        assert_eq!(
            css(r#"{"zIndex":"2","WebkitTransition":"none",}"#).unwrap(),
            "z-index: 2; -webkit-transition: none;"
        );
    }

    #[test]
    fn test_braces_optional() {
        assert_eq!(
            css("color: 'red', margin: 0").unwrap(),
            "color: red; margin: 0;"
        );
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(css("{}").unwrap(), "");
        assert_eq!(css("   ").unwrap(), "");
    }

    #[test]
    fn test_nested_commas_and_colons() {
        assert_eq!(
            css(r#"{ fontFamily: "a, b", background: url(x:y), transform: translate(1px, 2px) }"#)
                .unwrap(),
            "font-family: a, b; background: url(x:y); transform: translate(1px, 2px);"
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            css(r#"{ content: "\"\\201C\"", quotes: '\'a\'', glyph: "\u00e9\uD83D\uDE00" }"#).unwrap(),
            "content: \"\\201C\"; quotes: 'a'; glyph: \u{e9}\u{1F600};"
        );
    }

    #[test]
    fn test_partial_string_kept_verbatim() {
        assert_eq!(css(r#"{ a: "x" + "y" }"#).unwrap(), r#"a: "x" + "y";"#);
    }

    #[test]
    fn test_quoted_empty_string_value() {
        assert_eq!(css(r#"{ color: "" }"#).unwrap(), "color: ;");
    }

    #[test]
    fn test_multiline_layout() {
        let out = tokio_test::block_on(reverse_with("{ a: 1, b: 2 }", CssLayout::Multiline)).unwrap();
        assert_eq!(out.css, "a: 1;\nb: 2;");
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        assert_eq!(css("{ color: 'red', margin: 0, color: 'blue' }").unwrap(), "color: blue; margin: 0;");
    }

    #[test]
    fn test_errors() {
        let cases = [
            ("{ color: }", ConversionErrorKind::EmptyValue),
            ("{ color 'red' }", ConversionErrorKind::MissingSeparator),
            ("{ : 'red' }", ConversionErrorKind::EmptyPropertyName),
            (r#"{ "": 1 }"#, ConversionErrorKind::EmptyPropertyName),
            ("{ '': 'red' }", ConversionErrorKind::EmptyPropertyName),
            ("{ color: 'red'", ConversionErrorKind::UnbalancedDelimiters),
            ("color: 'red' }", ConversionErrorKind::UnbalancedDelimiters),
            ("{ color: 'red }", ConversionErrorKind::UnbalancedDelimiters),
            ("{ color: fn(1] }", ConversionErrorKind::UnbalancedDelimiters),
            ("{ 'font-size': 1 }", ConversionErrorKind::InvalidIdentifier),
            ("{ 2d: 1 }", ConversionErrorKind::InvalidIdentifier),
            ("{ 'a' 'b': 1 }", ConversionErrorKind::InvalidIdentifier),
            ("{a: 1}, {b: 2}", ConversionErrorKind::MissingSeparator),
        ];

        for (input, kind) in cases {
            assert_eq!(css(input).unwrap_err().kind(), kind, "{}", input);
        }
    }

    #[test]
    fn test_error_offsets() {
        let err = css("{ color: 'red', $bad: 1 }").unwrap_err();
        assert_eq!(err.kind(), ConversionErrorKind::InvalidIdentifier);
        assert_eq!(err.offset(), 16);

        let err = css("{ color: 'red',\n  margin }").unwrap_err();
        assert_eq!(err.fragment(), "margin");
        assert_eq!(err.offset(), 18);
    }

    #[test]
    fn test_empty_quoted_key_offset() {
        let err = css(r#"{ a: 1, "": 2 }"#).unwrap_err();
        assert_eq!(err.kind(), ConversionErrorKind::EmptyPropertyName);
        assert_eq!(err.fragment(), r#""": 2"#);
        assert_eq!(err.offset(), 8);
    }

    #[test]
    fn test_values_that_would_break_the_terminator() {
        assert_eq!(
            css(r#"{"a":"x\\","b":"y"}"#).unwrap(),
            "a: x\\\n; b: y;"
        );
        assert_eq!(css(r#"{ a: "x;y", b: "f(1;2)" }"#).unwrap(), "a: x\\;y; b: f(1;2);");
        assert_eq!(css(r#"{ content: '"abc' }"#).unwrap(), "content: \"abc\n;");
        assert_eq!(css(r#"{ a: "x\\\\" }"#).unwrap(), "a: x\\\\;");
    }

    #[test]
    fn test_escaped_values_read_back() {
        let rendered = css(r#"{"a":"x\\","b":"y;z","content":"'abc"}"#).unwrap();
        let mapping = crate::core::forward::transform(&rendered).unwrap();

        assert_eq!(mapping.get("a"), Some("x\\"));
        assert_eq!(mapping.get("b"), Some("y\\;z"));
        assert_eq!(mapping.get("content"), Some("'abc"));
    }
}
