use thiserror::Error;

use crate::cell::BrailleField;

/// Errors raised by cell, row, page and table operations.
///
/// Row-level callers wrap cell errors in [`BrailleError::InPosition`], page-level
/// callers wrap row errors in [`BrailleError::InLine`]. Indices are stored
/// 0-based and displayed 1-based.
///
/// # Example
/// ```
/// use br_core::error::BrailleError;
/// let err = BrailleError::InvalidEncoding.at_position(2).at_line(0);
/// assert_eq!(err.to_string(), "in line 1 in position 3 invalid braille encoding");
/// assert_eq!(err.line(), Some(0));
/// assert_eq!(err.position(), Some(2));
/// assert_eq!(err.root(), &BrailleError::InvalidEncoding);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrailleError {
    /// Malformed dot string, code point outside the braille block, or unknown BRF character.
    #[error("invalid braille encoding")]
    InvalidEncoding,

    /// Forward translation found no rule for a character.
    #[error("mapping for character {0} is missing in the table")]
    UnmappableCharacter(char),

    /// Backward translation found no rule for a dot pattern.
    #[error("mapping for dots {0} is missing in the table")]
    UnmappableDots(BrailleField),

    /// A rule line with fewer than three space-separated fields.
    #[error("invalid rule format")]
    MalformedRuleLine,

    /// The BRF alphabet in use has no character for this six-dot pattern.
    #[error("no braille ascii character for dots {0}")]
    MissingBrfMapping(BrailleField),

    /// Character or cell index inside a row.
    #[error("in position {pos} {source}", pos = .position + 1)]
    InPosition {
        /// 0-based index within the row.
        position: usize,
        /// Wrapped error.
        source: Box<BrailleError>,
    },

    /// Line index inside a page or rule file.
    #[error("in line {num} {source}", num = .line + 1)]
    InLine {
        /// 0-based line index.
        line: usize,
        /// Wrapped error.
        source: Box<BrailleError>,
    },
}

impl BrailleError {
    /// Wrap this error with a 0-based position inside a row.
    #[must_use]
    pub fn at_position(self, position: usize) -> Self {
        Self::InPosition {
            position,
            source: Box::new(self),
        }
    }

    /// Wrap this error with a 0-based line index.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        Self::InLine {
            line,
            source: Box::new(self),
        }
    }

    /// The innermost error, with every positional layer peeled off.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::InPosition { source, .. } | Self::InLine { source, .. } => source.root(),
            other => other,
        }
    }

    /// Outermost line index carried by this error, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InLine { line, .. } => Some(*line),
            Self::InPosition { source, .. } => source.line(),
            _ => None,
        }
    }

    /// Outermost in-row position carried by this error, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InPosition { position, .. } => Some(*position),
            Self::InLine { source, .. } => source.position(),
            _ => None,
        }
    }
}

/// Fatal errors while building a BRF alphabet from its reference bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrfTableError {
    /// Rune byte outside 7-bit ASCII, i.e. the start of a multi-byte rune.
    #[error("invalid brf table format: multi-byte rune at offset {offset}")]
    MultiByteRune {
        /// Byte offset of the offending rune.
        offset: usize,
    },

    /// Rune byte without its dots byte at the end of the data.
    #[error("invalid brf table format: truncated entry at offset {offset}")]
    TruncatedEntry {
        /// Byte offset of the incomplete entry.
        offset: usize,
    },

    /// Entry raising dot 7 or 8, which braille ASCII cannot represent.
    #[error("invalid brf table format: '{rune}' at offset {offset} uses dots 7 or 8")]
    EightDotEntry {
        /// Character of the entry.
        rune: char,
        /// Byte offset of the entry.
        offset: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_peels_all_layers() {
        let err = BrailleError::UnmappableCharacter('x')
            .at_position(4)
            .at_line(7);
        assert_eq!(err.root(), &BrailleError::UnmappableCharacter('x'));
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.position(), Some(4));
    }

    #[test]
    fn display_is_one_based() {
        let err = BrailleError::MalformedRuleLine.at_line(0);
        assert_eq!(err.to_string(), "in line 1 invalid rule format");
    }

    #[test]
    fn source_chain_unwraps_outer_to_inner() {
        use std::error::Error;

        let err = BrailleError::InvalidEncoding.at_position(1).at_line(2);
        let inner = err.source().map(ToString::to_string);
        assert_eq!(inner.as_deref(), Some("in position 2 invalid braille encoding"));
        let innermost = err
            .source()
            .and_then(Error::source)
            .map(ToString::to_string);
        assert_eq!(innermost.as_deref(), Some("invalid braille encoding"));
        assert!(err.source().and_then(Error::source).and_then(Error::source).is_none());
    }

    #[test]
    fn unpositioned_error_has_no_location() {
        let err = BrailleError::InvalidEncoding;
        assert_eq!(err.line(), None);
        assert_eq!(err.position(), None);
    }
}
