//! Cellule braille huit points.
//!
//! Bits activés (même ordre que le bloc Unicode U+2800) :
//! ```text
//!  1 4      bit0 bit3
//!  2 5  ->  bit1 bit4
//!  3 6      bit2 bit5
//!  7 8      bit6 bit7
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::BrailleError;

pub const DOT1: u8 = 0b0000_0001;
pub const DOT2: u8 = 0b0000_0010;
pub const DOT3: u8 = 0b0000_0100;
pub const DOT4: u8 = 0b0000_1000;
pub const DOT5: u8 = 0b0001_0000;
pub const DOT6: u8 = 0b0010_0000;
pub const DOT7: u8 = 0b0100_0000;
pub const DOT8: u8 = 0b1000_0000;

/// Dots 1 to 6, the part of a cell braille ASCII can carry.
pub const SIX_DOT_MASK: u8 = 0b0011_1111;

/// First code point of the Unicode braille block (U+2800, blank cell).
pub const UNICODE_BRAILLE_BASE: u32 = 0x2800;

/// Last code point of the Unicode braille block (U+28FF, all eight dots).
pub const UNICODE_BRAILLE_LAST: u32 = 0x28FF;

/// Whether `c` lies in the Unicode braille block.
///
/// # Example
/// ```
/// use br_core::cell::is_braille_unicode;
/// assert!(is_braille_unicode('⠁'));
/// assert!(!is_braille_unicode('a'));
/// ```
#[inline]
#[must_use]
pub fn is_braille_unicode(c: char) -> bool {
    (UNICODE_BRAILLE_BASE..=UNICODE_BRAILLE_LAST).contains(&u32::from(c))
}

/// One eight-dot braille cell. Bit `i` set means dot `i + 1` is raised.
///
/// Every `u8` is a valid cell.
///
/// # Example
/// ```
/// use br_core::cell::BrailleField;
/// let f: BrailleField = "41".parse().unwrap();
/// assert!(f.dot1() && f.dot4());
/// assert_eq!(f.to_string(), "14");
/// assert_eq!(f.to_unicode(), '⠉');
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrailleField(u8);

impl BrailleField {
    /// The blank cell, no dot raised.
    pub const EMPTY: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether dot `n` (1..=8) is raised. Out-of-range dot numbers are never raised.
    ///
    /// # Example
    /// ```
    /// use br_core::cell::BrailleField;
    /// let f = BrailleField::from_bits(0b1000_0001);
    /// assert!(f.dot(1) && f.dot(8));
    /// assert!(!f.dot(2));
    /// assert!(!f.dot(9));
    /// ```
    #[inline]
    #[must_use]
    pub const fn dot(self, n: u8) -> bool {
        if n == 0 || n > 8 {
            return false;
        }
        self.0 & (1 << (n - 1)) != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot1(self) -> bool {
        self.0 & DOT1 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot2(self) -> bool {
        self.0 & DOT2 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot3(self) -> bool {
        self.0 & DOT3 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot4(self) -> bool {
        self.0 & DOT4 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot5(self) -> bool {
        self.0 & DOT5 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot6(self) -> bool {
        self.0 & DOT6 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot7(self) -> bool {
        self.0 & DOT7 != 0
    }

    #[inline]
    #[must_use]
    pub const fn dot8(self) -> bool {
        self.0 & DOT8 != 0
    }

    /// Raised dot numbers, ascending.
    pub fn raised_dots(self) -> impl Iterator<Item = u8> {
        (1..=8u8).filter(move |&n| self.dot(n))
    }

    /// Same cell with dots 7 and 8 lowered.
    #[inline]
    #[must_use]
    pub const fn without_dots_78(self) -> Self {
        Self(self.0 & SIX_DOT_MASK)
    }

    /// Parse a dot string such as `"1245"`.
    ///
    /// Digits may come in any order and may repeat. Any character other than
    /// `'1'..='8'` is rejected. The empty string is the blank cell.
    ///
    /// # Example
    /// ```
    /// use br_core::cell::BrailleField;
    /// assert_eq!(BrailleField::from_dot_string("211"), Ok(BrailleField::from_bits(0b11)));
    /// assert!(BrailleField::from_dot_string("19").is_err());
    /// ```
    pub fn from_dot_string(s: &str) -> Result<Self, BrailleError> {
        let mut bits = 0u8;
        for c in s.chars() {
            match c {
                '1'..='8' => bits |= 1 << (c as u8 - b'1'),
                _ => return Err(BrailleError::InvalidEncoding),
            }
        }
        Ok(Self(bits))
    }

    /// Code point `U+2800 + bits`. Total over all 256 cells.
    #[inline]
    #[must_use]
    pub const fn to_unicode(self) -> char {
        match char::from_u32(UNICODE_BRAILLE_BASE + self.0 as u32) {
            Some(c) => c,
            None => ' ',
        }
    }

    /// Cell of a character from the braille block.
    ///
    /// # Example
    /// ```
    /// use br_core::cell::BrailleField;
    /// assert_eq!(BrailleField::from_unicode('⠃').map(|f| f.bits()), Ok(0b11));
    /// assert!(BrailleField::from_unicode('b').is_err());
    /// ```
    pub fn from_unicode(c: char) -> Result<Self, BrailleError> {
        if !is_braille_unicode(c) {
            return Err(BrailleError::InvalidEncoding);
        }
        Ok(Self((u32::from(c) - UNICODE_BRAILLE_BASE) as u8))
    }
}

impl From<u8> for BrailleField {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<BrailleField> for u8 {
    fn from(field: BrailleField) -> Self {
        field.0
    }
}

impl From<BrailleField> for char {
    fn from(field: BrailleField) -> Self {
        field.to_unicode()
    }
}

impl TryFrom<char> for BrailleField {
    type Error = BrailleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_unicode(c)
    }
}

/// Dot string, e.g. `"14"`. Empty for the blank cell.
impl fmt::Display for BrailleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in self.raised_dots() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl FromStr for BrailleField {
    type Err = BrailleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dot_string(s)
    }
}
