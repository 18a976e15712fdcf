//! Braille ASCII (BRF) alphabet.
//!
//! Six-dot cells only: dots 7 and 8 are stripped before encoding.

use std::collections::HashMap;

use crate::cell::{BrailleField, SIX_DOT_MASK};
use crate::error::{BrailleError, BrfTableError};

/// Embedded North American braille ASCII reference: `(rune, dots)` byte pairs.
///
/// Canonical characters 0x21..=0x5F come first, then lowercase letters and
/// `` ` { | } ~ `` as input aliases.
const BUILTIN_REFERENCE: &[u8] = include_bytes!("../data/brf.dat");

/// Bidirectional mapping between BRF characters and six-dot cells.
///
/// Built once at start-up and shared by reference; immutable afterwards.
///
/// # Example
/// ```
/// use br_core::brf::BrfAlphabet;
/// use br_core::cell::BrailleField;
///
/// let brf = BrfAlphabet::builtin().unwrap();
/// let a = BrailleField::from_brf('A', &brf).unwrap();
/// assert_eq!(a.to_string(), "1");
/// assert_eq!(a.to_brf(&brf), Ok('A'));
/// assert_eq!(BrailleField::from_brf('a', &brf), Ok(a));
/// ```
#[derive(Clone, Debug)]
pub struct BrfAlphabet {
    to_field: HashMap<char, BrailleField>,
    to_char: [Option<char>; 64],
}

impl BrfAlphabet {
    /// Parse the embedded reference table.
    pub fn builtin() -> Result<Self, BrfTableError> {
        Self::from_reference(BUILTIN_REFERENCE)
    }

    /// Parse a reference table of `(rune, dots)` byte pairs.
    ///
    /// Space is always the blank cell whatever the data says. When several
    /// characters share a cell, the first one in the data is the one emitted
    /// by [`BrfAlphabet::char_for`]; all of them are accepted as input.
    ///
    /// # Example
    /// ```
    /// use br_core::brf::BrfAlphabet;
    /// use br_core::cell::BrailleField;
    ///
    /// let brf = BrfAlphabet::from_reference(&[b'A', 0x01, b'a', 0x01]).unwrap();
    /// assert_eq!(brf.char_for(BrailleField::from_bits(1)), Some('A'));
    /// assert_eq!(brf.field_for('a'), Some(BrailleField::from_bits(1)));
    /// assert_eq!(brf.field_for(' '), Some(BrailleField::EMPTY));
    /// assert!(!brf.is_complete());
    /// ```
    pub fn from_reference(data: &[u8]) -> Result<Self, BrfTableError> {
        let mut to_field = HashMap::with_capacity(data.len() / 2 + 1);
        let mut to_char = [None; 64];
        to_field.insert(' ', BrailleField::EMPTY);
        to_char[0] = Some(' ');

        for (i, entry) in data.chunks(2).enumerate() {
            let offset = i * 2;
            let &[rune, dots] = entry else {
                return Err(BrfTableError::TruncatedEntry { offset });
            };
            if !rune.is_ascii() {
                return Err(BrfTableError::MultiByteRune { offset });
            }
            let rune = char::from(rune);
            if dots & !SIX_DOT_MASK != 0 {
                return Err(BrfTableError::EightDotEntry { rune, offset });
            }
            if rune == ' ' {
                continue;
            }
            to_field.insert(rune, BrailleField::from_bits(dots));
            to_char[usize::from(dots)].get_or_insert(rune);
        }

        log::debug!(
            "BRF alphabet: {} characters, {}/64 cells encodable",
            to_field.len(),
            to_char.iter().filter(|c| c.is_some()).count()
        );
        Ok(Self { to_field, to_char })
    }

    /// Cell for a BRF character, `None` when the character is not in the alphabet.
    #[inline]
    #[must_use]
    pub fn field_for(&self, c: char) -> Option<BrailleField> {
        self.to_field.get(&c).copied()
    }

    /// BRF character for a cell, ignoring dots 7 and 8.
    #[inline]
    #[must_use]
    pub fn char_for(&self, field: BrailleField) -> Option<char> {
        self.to_char[usize::from(field.without_dots_78().bits())]
    }

    /// Whether every six-dot cell has a character.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.to_char.iter().all(Option::is_some)
    }
}

impl BrailleField {
    /// Braille ASCII character for this cell. Dots 7 and 8 are stripped.
    pub fn to_brf(self, alphabet: &BrfAlphabet) -> Result<char, BrailleError> {
        alphabet
            .char_for(self)
            .ok_or(BrailleError::MissingBrfMapping(self.without_dots_78()))
    }

    /// Cell for a braille ASCII character.
    pub fn from_brf(c: char, alphabet: &BrfAlphabet) -> Result<Self, BrailleError> {
        alphabet.field_for(c).ok_or(BrailleError::InvalidEncoding)
    }
}
