//! Property-name normalization between kebab-case and camelCase.
//!
//! `camelize` and `kebabize` are exact inverses over their grammars:
//!
//! * kebab-case: `-?[a-z][a-z0-9_]*(-[a-z][a-z0-9_]*)*` (an unprefixed name may
//!   also start with `_`)
//! * camelCase:  `[A-Za-z_][A-Za-z0-9_]*`
//!
//! A leading hyphen (vendor prefix) maps to a leading capital:
//! `-webkit-transition` <-> `WebkitTransition`. Custom properties (`--x`)
//! are outside both grammars and pass through untouched.

use crate::domain::error::ConversionError;

pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

/// `background-color` -> `backgroundColor`. Input is lower-cased first.
pub fn camelize(name: &str) -> Result<String, ConversionError> {
    if is_custom_property(name) {
        return Ok(name.to_string());
    }

    let lowered = name.to_lowercase();
    let (vendor, body) = match lowered.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lowered.as_str()),
    };

    let mut camel = String::with_capacity(body.len());
    for (index, part) in body.split('-').enumerate() {
        let mut chars = part.chars();
        let first = chars
            .next()
            .ok_or_else(|| ConversionError::invalid_identifier(name, "empty name segment"))?;

        let leading_underscore = first == '_' && index == 0 && !vendor;
        if !(first.is_ascii_lowercase() || leading_underscore) {
            return Err(ConversionError::invalid_identifier(
                name,
                format!("segment `{}` must start with a letter", part),
            ));
        }
        if let Some(bad) = chars
            .clone()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(ConversionError::invalid_identifier(
                name,
                format!("unexpected character `{}`", bad),
            ));
        }

        if index > 0 || vendor {
            camel.push(first.to_ascii_uppercase());
        } else {
            camel.push(first);
        }
        camel.push_str(chars.as_str());
    }

    Ok(camel)
}

/// `backgroundColor` -> `background-color`, `WebkitFoo` -> `-webkit-foo`.
pub fn kebabize(name: &str) -> Result<String, ConversionError> {
    if is_custom_property(name) {
        return Ok(name.to_string());
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        Some(_) => {
            return Err(ConversionError::invalid_identifier(
                name,
                "identifier must start with a letter",
            ))
        }
        None => return Err(ConversionError::invalid_identifier(name, "empty identifier")),
    }

    let mut kebab = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(c.to_ascii_lowercase());
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            kebab.push(c);
        } else {
            return Err(ConversionError::invalid_identifier(
                name,
                format!("unexpected character `{}`", c),
            ));
        }
    }

    Ok(kebab)
}
