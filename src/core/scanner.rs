//! Character scanner for object-literal text.
//!
//! Tracks `"`/`'`/`` ` `` strings, backslash escapes and `(`/`[`/`{` nesting
//! so callers can find the `,` and `:` separators that sit at the top level.

use crate::domain::error::ConversionError;
use std::iter::Peekable;
use std::str::CharIndices;

fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '`')
}

fn is_opener(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

fn opener_for(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    /// Structural text outside strings.
    Code,
    /// A backslash or the character it escapes, outside strings.
    Escaped,
    /// Part of a string literal, quotes included.
    Quoted,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub offset: usize,
    pub ch: char,
    pub class: Class,
    /// Nesting depth after this character was consumed.
    pub depth: usize,
}

impl Token {
    pub fn is_top_level(&self, ch: char) -> bool {
        self.class == Class::Code && self.depth == 0 && self.ch == ch
    }
}

pub(crate) struct Scanner<'a> {
    chars: Peekable<CharIndices<'a>>,
    quote: Option<(char, usize)>,
    escaped: bool,
    nesting: Vec<(char, usize)>,
    mismatch: Option<(char, usize)>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            quote: None,
            escaped: false,
            nesting: Vec::new(),
            mismatch: None,
        }
    }

    fn token(&self, offset: usize, ch: char, class: Class) -> Token {
        Token {
            offset,
            ch,
            class,
            depth: self.nesting.len(),
        }
    }

    fn escape_class(&self) -> Class {
        if self.quote.is_some() {
            Class::Quoted
        } else {
            Class::Escaped
        }
    }

    /// 掃描結束後檢查是否有未閉合的字串、括號或不匹配的關閉符號
    pub fn finish(self) -> Result<(), (String, usize)> {
        if let Some((ch, offset)) = self.mismatch {
            return Err((format!("unexpected closing `{}`", ch), offset));
        }
        if let Some((quote, offset)) = self.quote {
            return Err((format!("unterminated string starting with {}", quote), offset));
        }
        if let Some(&(open, offset)) = self.nesting.last() {
            return Err((format!("unclosed `{}`", open), offset));
        }
        Ok(())
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (offset, ch) = self.chars.next()?;

        if self.escaped {
            self.escaped = false;
            return Some(self.token(offset, ch, self.escape_class()));
        }

        if ch == '\\' {
            self.escaped = true;
            return Some(self.token(offset, ch, self.escape_class()));
        }

        if let Some((quote, _)) = self.quote {
            if ch == quote {
                self.quote = None;
            }
            return Some(self.token(offset, ch, Class::Quoted));
        }

        if is_quote(ch) {
            self.quote = Some((ch, offset));
            return Some(self.token(offset, ch, Class::Quoted));
        }

        if is_opener(ch) {
            self.nesting.push((ch, offset));
        } else if let Some(open) = opener_for(ch) {
            match self.nesting.last() {
                Some(&(top, _)) if top == open => {
                    self.nesting.pop();
                }
                _ => {
                    if self.mismatch.is_none() {
                        self.mismatch = Some((ch, offset));
                    }
                }
            }
        }

        Some(self.token(offset, ch, Class::Code))
    }
}

/// A slice of the scanned input together with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Segment<'a> {
    pub fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    pub fn trimmed(&self) -> Segment<'a> {
        let leading = self.text.len() - self.text.trim_start().len();
        Segment {
            text: self.text.trim(),
            offset: self.offset + leading,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// 在第一個頂層 `separator` 處切成兩段
    pub fn split_once(&self, separator: char) -> Option<(Segment<'a>, Segment<'a>)> {
        let at = Scanner::new(self.text)
            .find(|token| token.is_top_level(separator))?
            .offset;

        let head = Segment::new(&self.text[..at], self.offset);
        let rest_start = at + separator.len_utf8();
        let tail = Segment::new(&self.text[rest_start..], self.offset + rest_start);
        Some((head, tail))
    }

    pub fn split_all(&self, separator: char) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut start = 0;

        for token in Scanner::new(self.text) {
            if token.is_top_level(separator) {
                segments.push(Segment::new(&self.text[start..token.offset], self.offset + start));
                start = token.offset + separator.len_utf8();
            }
        }
        segments.push(Segment::new(&self.text[start..], self.offset + start));

        segments
    }
}

/// Fails with `UnbalancedDelimiters` if quotes or brackets do not pair up.
pub(crate) fn check_balanced(input: &str) -> Result<(), ConversionError> {
    let mut scanner = Scanner::new(input);
    scanner.by_ref().for_each(drop);

    scanner.finish().map_err(|(reason, offset)| ConversionError::UnbalancedDelimiters {
        fragment: excerpt(input, offset),
        offset,
        reason,
    })
}

/// Offset of the bracket closing the opener at `open`, if any.
pub(crate) fn matching_close(input: &str, open: usize) -> Option<usize> {
    let mut outer_depth = None;
    for token in Scanner::new(input) {
        if token.offset == open {
            outer_depth = Some(token.depth.checked_sub(1)?);
            continue;
        }
        if token.class == Class::Code && Some(token.depth) == outer_depth {
            return Some(token.offset);
        }
    }
    None
}

fn excerpt(input: &str, offset: usize) -> String {
    input[offset..].chars().take(24).collect()
}
