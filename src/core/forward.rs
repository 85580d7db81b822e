//! CSS declaration text -> [`StyleMapping`], tokenized by `cssparser`.

use crate::core::normalize::camelize;
use crate::domain::error::ConversionError;
use crate::domain::model::StyleMapping;
use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};

/// Parse CSS declaration text into an ordered, name-unique mapping.
///
/// Declarations are split on top-level `;` (a missing final `;` is fine),
/// names are camelized and values are kept as trimmed literal text with
/// comments removed and whitespace collapsed outside of strings. A later
/// declaration of the same property overwrites the value in place.
///
/// The first malformed declaration fails the whole call.
///
/// ```
/// use style_convert::transform;
///
/// let mapping = transform("background-color: #fff; font-size: 12px;").unwrap();
/// assert_eq!(mapping.get("backgroundColor"), Some("#fff"));
/// assert_eq!(mapping.get("fontSize"), Some("12px"));
/// ```
pub fn transform(css: &str) -> Result<StyleMapping, ConversionError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut mapping = StyleMapping::new();

    loop {
        let start = parser.position().byte_index();
        let declaration = parser
            .parse_until_before(cssparser::Delimiter::Semicolon, |p| {
                parse_declaration(p).map_err(|e| p.new_custom_error(e))
            })
            .map_err(|e: CssParseError<'_, ConversionError>| match e.kind {
                ParseErrorKind::Custom(err) => err,
                ParseErrorKind::Basic(kind) => ConversionError::MissingSeparator {
                    fragment: format!("{:?}", kind),
                    offset: start,
                },
            })?;

        if let Some((name, value)) = declaration {
            tracing::trace!(name = %name, value = %value, "parsed declaration");
            mapping.insert(name, value);
        }

        // 吃掉分號；輸入結束時停止
        if parser.next().is_err() {
            break;
        }
    }

    Ok(mapping)
}

/// One `name: value` run between semicolons. `None` for blank or
/// comment-only runs.
fn parse_declaration(p: &mut Parser<'_, '_>) -> Result<Option<(String, String)>, ConversionError> {
    p.skip_whitespace();
    if p.is_exhausted() {
        return Ok(None);
    }
    let offset = p.position().byte_index();

    let mut name = Collapsed::default();
    let found_colon = collect_tokens(p, &mut name, true);
    let mut value = Collapsed::default();
    collect_tokens(p, &mut value, false);
    let (name, value) = (name.finish(), value.finish());

    if !found_colon {
        return Err(ConversionError::MissingSeparator {
            fragment: name,
            offset,
        });
    }
    if name.is_empty() {
        return Err(ConversionError::EmptyPropertyName {
            fragment: format!(": {}", value).trim_end().to_string(),
            offset,
        });
    }

    let camel = camelize(&name).map_err(|e| e.shifted(offset))?;

    // 空值允許，記錄為空字串
    Ok(Some((camel, value)))
}

/// Append the source text of each token until the input runs out, or until
/// a top-level `:` when `stop_at_colon` is set. Returns whether it stopped
/// at a colon. Comments are dropped and whitespace runs become one space.
fn collect_tokens<'i>(p: &mut Parser<'i, '_>, out: &mut Collapsed, stop_at_colon: bool) -> bool {
    loop {
        let start = p.position();
        let token = match p.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => return false,
        };

        match token {
            Token::Colon if stop_at_colon => return true,
            Token::WhiteSpace(_) => out.space(),
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                out.push(p.slice_from(start));
                let inner_end = p.parse_nested_block(|nested| {
                    collect_tokens(nested, out, false);
                    Ok::<_, CssParseError<'i, ()>>(nested.position())
                });
                // 未閉合的區塊在輸入結尾處沒有結束符號
                if let Ok(inner_end) = inner_end {
                    let end = p.position();
                    out.push(p.slice(inner_end..end));
                }
            }
            _ => out.push(p.slice_from(start)),
        }
    }
}

#[derive(Debug, Default)]
struct Collapsed {
    text: String,
    pending_space: bool,
}

impl Collapsed {
    fn space(&mut self) {
        self.pending_space = true;
    }

    fn push(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if self.pending_space && !self.text.is_empty() {
            self.text.push(' ');
        }
        self.pending_space = false;
        self.text.push_str(raw);
    }

    fn finish(self) -> String {
        self.text
    }
}
