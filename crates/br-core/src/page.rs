use std::ops::Deref;

use crate::brf::BrfAlphabet;
use crate::cell::BrailleField;
use crate::error::BrailleError;

/// One line of braille cells.
///
/// # Example
/// ```
/// use br_core::page::BrailleRow;
/// let row = BrailleRow::from_unicode("⠁⠃").unwrap();
/// assert_eq!(row.len(), 2);
/// assert_eq!(row[1].to_string(), "12");
/// assert_eq!(row.to_unicode(), "⠁⠃");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BrailleRow(Vec<BrailleField>);

impl BrailleRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a line of Unicode braille. Fails at the first character outside the block.
    pub fn from_unicode(s: &str) -> Result<Self, BrailleError> {
        s.chars()
            .enumerate()
            .map(|(i, c)| BrailleField::from_unicode(c).map_err(|e| e.at_position(i)))
            .collect()
    }

    /// Parse a line of braille ASCII bytes.
    pub fn from_brf(bytes: &[u8], alphabet: &BrfAlphabet) -> Result<Self, BrailleError> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, &b)| {
                BrailleField::from_brf(char::from(b), alphabet).map_err(|e| e.at_position(i))
            })
            .collect()
    }

    /// Row from raw cell bytes, one byte per cell.
    #[must_use]
    pub fn from_bits(bits: &[u8]) -> Self {
        bits.iter().copied().map(BrailleField::from_bits).collect()
    }

    #[must_use]
    pub fn to_bits(&self) -> Vec<u8> {
        self.0.iter().map(|f| f.bits()).collect()
    }

    #[must_use]
    pub fn to_unicode(&self) -> String {
        self.0.iter().map(|f| f.to_unicode()).collect()
    }

    /// Braille ASCII bytes for this row, without line terminator.
    pub fn to_brf(&self, alphabet: &BrfAlphabet) -> Result<Vec<u8>, BrailleError> {
        let mut out = Vec::with_capacity(self.0.len());
        self.write_brf(alphabet, &mut out)?;
        Ok(out)
    }

    fn write_brf(&self, alphabet: &BrfAlphabet, out: &mut Vec<u8>) -> Result<(), BrailleError> {
        for (i, field) in self.0.iter().enumerate() {
            let c = field.to_brf(alphabet).map_err(|e| e.at_position(i))?;
            // Alphabet characters are 7-bit ASCII by construction.
            out.push(c as u8);
        }
        Ok(())
    }

    #[must_use]
    pub fn cells(&self) -> &[BrailleField] {
        &self.0
    }

    #[must_use]
    pub fn into_cells(self) -> Vec<BrailleField> {
        self.0
    }
}

impl Deref for BrailleRow {
    type Target = [BrailleField];

    fn deref(&self) -> &[BrailleField] {
        &self.0
    }
}

impl From<Vec<BrailleField>> for BrailleRow {
    fn from(cells: Vec<BrailleField>) -> Self {
        Self(cells)
    }
}

impl FromIterator<BrailleField> for BrailleRow {
    fn from_iter<I: IntoIterator<Item = BrailleField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BrailleRow {
    type Item = &'a BrailleField;
    type IntoIter = std::slice::Iter<'a, BrailleField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ordered collection of braille lines.
///
/// Splitting on `'\n'` is exact: a trailing newline yields a trailing empty row.
///
/// # Example
/// ```
/// use br_core::page::BraillePage;
/// let page = BraillePage::from_unicode("⠁\n⠃").unwrap();
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.to_unicode(), "⠁\n⠃");
///
/// let err = BraillePage::from_unicode("⠁\n⠃x").unwrap_err();
/// assert_eq!(err.to_string(), "in line 2 in position 2 invalid braille encoding");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BraillePage(Vec<BrailleRow>);

impl BraillePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_unicode(s: &str) -> Result<Self, BrailleError> {
        s.split('\n')
            .enumerate()
            .map(|(i, line)| BrailleRow::from_unicode(line).map_err(|e| e.at_line(i)))
            .collect()
    }

    pub fn from_brf(bytes: &[u8], alphabet: &BrfAlphabet) -> Result<Self, BrailleError> {
        bytes
            .split(|&b| b == b'\n')
            .enumerate()
            .map(|(i, line)| BrailleRow::from_brf(line, alphabet).map_err(|e| e.at_line(i)))
            .collect()
    }

    /// Rows joined with `'\n'`, no separator after the last row.
    #[must_use]
    pub fn to_unicode(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|f| f.to_unicode()));
        }
        out
    }

    /// Braille ASCII bytes. Every row, the last included, ends with `'\n'`.
    ///
    /// # Example
    /// ```
    /// use br_core::brf::BrfAlphabet;
    /// use br_core::page::BraillePage;
    ///
    /// let brf = BrfAlphabet::builtin().unwrap();
    /// let page = BraillePage::from_unicode("⠁⠃\n⠉").unwrap();
    /// assert_eq!(page.to_brf(&brf).unwrap(), b"AB\nC\n");
    /// ```
    pub fn to_brf(&self, alphabet: &BrfAlphabet) -> Result<Vec<u8>, BrailleError> {
        let mut out = Vec::new();
        for (i, row) in self.0.iter().enumerate() {
            row.write_brf(alphabet, &mut out)
                .map_err(|e| e.at_line(i))?;
            out.push(b'\n');
        }
        Ok(out)
    }

    #[must_use]
    pub fn rows(&self) -> &[BrailleRow] {
        &self.0
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<BrailleRow> {
        self.0
    }
}

impl Deref for BraillePage {
    type Target = [BrailleRow];

    fn deref(&self) -> &[BrailleRow] {
        &self.0
    }
}

impl From<Vec<BrailleRow>> for BraillePage {
    fn from(rows: Vec<BrailleRow>) -> Self {
        Self(rows)
    }
}

impl FromIterator<BrailleRow> for BraillePage {
    fn from_iter<I: IntoIterator<Item = BrailleRow>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BraillePage {
    type Item = &'a BrailleRow;
    type IntoIter = std::slice::Iter<'a, BrailleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
