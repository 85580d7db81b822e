use thiserror::Error;

/// Failure of either conversion direction.
///
/// Every variant carries the offending fragment and the byte offset where it
/// starts in the caller's text. Nothing is partially converted on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Missing ':' separator in `{fragment}` at offset {offset}")]
    MissingSeparator { fragment: String, offset: usize },

    #[error("Empty property name in `{fragment}` at offset {offset}")]
    EmptyPropertyName { fragment: String, offset: usize },

    #[error("Missing value in `{fragment}` at offset {offset}")]
    EmptyValue { fragment: String, offset: usize },

    #[error("Unbalanced delimiters: {reason} (`{fragment}` at offset {offset})")]
    UnbalancedDelimiters {
        fragment: String,
        offset: usize,
        reason: String,
    },

    #[error("Invalid identifier `{fragment}` at offset {offset}: {reason}")]
    InvalidIdentifier {
        fragment: String,
        offset: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    MissingSeparator,
    EmptyPropertyName,
    EmptyValue,
    UnbalancedDelimiters,
    InvalidIdentifier,
}

impl ConversionError {
    pub(crate) fn invalid_identifier(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            fragment: name.to_string(),
            offset: 0,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::MissingSeparator { .. } => ConversionErrorKind::MissingSeparator,
            Self::EmptyPropertyName { .. } => ConversionErrorKind::EmptyPropertyName,
            Self::EmptyValue { .. } => ConversionErrorKind::EmptyValue,
            Self::UnbalancedDelimiters { .. } => ConversionErrorKind::UnbalancedDelimiters,
            Self::InvalidIdentifier { .. } => ConversionErrorKind::InvalidIdentifier,
        }
    }

    pub fn fragment(&self) -> &str {
        match self {
            Self::MissingSeparator { fragment, .. }
            | Self::EmptyPropertyName { fragment, .. }
            | Self::EmptyValue { fragment, .. }
            | Self::UnbalancedDelimiters { fragment, .. }
            | Self::InvalidIdentifier { fragment, .. } => fragment,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Self::MissingSeparator { offset, .. }
            | Self::EmptyPropertyName { offset, .. }
            | Self::EmptyValue { offset, .. }
            | Self::UnbalancedDelimiters { offset, .. }
            | Self::InvalidIdentifier { offset, .. } => *offset,
        }
    }

    /// 將偏移量平移 `base`，用於把片段內的位置換算回原始輸入
    pub(crate) fn shifted(mut self, base: usize) -> Self {
        match &mut self {
            Self::MissingSeparator { offset, .. }
            | Self::EmptyPropertyName { offset, .. }
            | Self::EmptyValue { offset, .. }
            | Self::UnbalancedDelimiters { offset, .. }
            | Self::InvalidIdentifier { offset, .. } => *offset += base,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_moves_offset() {
        let err = ConversionError::invalid_identifier("a--b", "empty segment").shifted(12);
        assert_eq!(err.offset(), 12);
        assert_eq!(err.fragment(), "a--b");
        assert_eq!(err.kind(), ConversionErrorKind::InvalidIdentifier);
    }

    #[test]
    fn test_display_names_fragment() {
        let err = ConversionError::MissingSeparator {
            fragment: "color red".to_string(),
            offset: 0,
        };
        assert_eq!(
            err.to_string(),
            "Missing ':' separator in `color red` at offset 0"
        );
    }
}
