use std::collections::HashMap;

use br_core::cell::{BrailleField, is_braille_unicode};
use br_core::error::BrailleError;
use br_core::page::{BraillePage, BrailleRow};

/// Character → cell table, built by [`RuleList::to_forward_table`](crate::rules::RuleList::to_forward_table).
///
/// # Example
/// ```
/// use br_translate::rules::RuleList;
///
/// let table = RuleList::parse(["1 a 1", "2 b 12"]).unwrap().to_forward_table();
/// let row = table.translate("a b⠿").unwrap();
/// assert_eq!(row.to_unicode(), "⠁⠀⠃⠿");
///
/// let err = table.translate("abc").unwrap_err();
/// assert_eq!(err.to_string(), "in position 3 mapping for character c is missing in the table");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardTable(HashMap<char, BrailleField>);

impl ForwardTable {
    /// Insert unless `ch` is already mapped. Returns whether the rule was kept.
    pub(crate) fn insert_first(&mut self, ch: char, dots: BrailleField) -> bool {
        if self.0.contains_key(&ch) {
            return false;
        }
        self.0.insert(ch, dots);
        true
    }

    #[inline]
    #[must_use]
    pub fn get(&self, ch: char) -> Option<BrailleField> {
        self.0.get(&ch).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Translate one line of text.
    ///
    /// Space is always the blank cell, never looked up. Characters already in
    /// the Unicode braille block pass through unchanged.
    pub fn translate(&self, line: &str) -> Result<BrailleRow, BrailleError> {
        line.chars()
            .enumerate()
            .map(|(i, ch)| self.translate_char(ch).map_err(|e| e.at_position(i)))
            .collect()
    }

    fn translate_char(&self, ch: char) -> Result<BrailleField, BrailleError> {
        if ch == ' ' {
            return Ok(BrailleField::EMPTY);
        }
        if is_braille_unicode(ch) {
            return BrailleField::from_unicode(ch);
        }
        self.get(ch).ok_or(BrailleError::UnmappableCharacter(ch))
    }

    /// Translate a document, one row per `'\n'`-separated line.
    ///
    /// # Example
    /// ```
    /// use br_translate::rules::RuleList;
    ///
    /// let table = RuleList::parse(["1 a 1"]).unwrap().to_forward_table();
    /// let err = table.translate_text("a\naa?").unwrap_err();
    /// assert_eq!(err.line(), Some(1));
    /// assert_eq!(err.position(), Some(2));
    /// ```
    pub fn translate_text(&self, text: &str) -> Result<BraillePage, BrailleError> {
        text.split('\n')
            .enumerate()
            .map(|(i, line)| self.translate(line).map_err(|e| e.at_line(i)))
            .collect()
    }
}

/// Cell → character table, indexed by the cell byte.
///
/// # Example
/// ```
/// use br_core::page::BrailleRow;
/// use br_translate::rules::RuleList;
///
/// let table = RuleList::parse(["1 a 1", "2 b 12"]).unwrap().to_back_table();
/// let row = BrailleRow::from_unicode("⠁⠀⠃").unwrap();
/// assert_eq!(table.translate(&row).unwrap(), "a b");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackTable([Option<char>; 256]);

impl Default for BackTable {
    fn default() -> Self {
        Self([None; 256])
    }
}

impl BackTable {
    /// Insert unless `dots` is already mapped. Returns whether the rule was kept.
    pub(crate) fn insert_first(&mut self, dots: BrailleField, ch: char) -> bool {
        let slot = &mut self.0[usize::from(dots.bits())];
        if slot.is_some() {
            return false;
        }
        *slot = Some(ch);
        true
    }

    #[inline]
    #[must_use]
    pub fn get(&self, dots: BrailleField) -> Option<char> {
        self.0[usize::from(dots.bits())]
    }

    /// Number of mapped cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Translate one row back to text. The blank cell is always a space.
    pub fn translate(&self, row: &BrailleRow) -> Result<String, BrailleError> {
        let mut out = String::with_capacity(row.len());
        for (i, &dots) in row.iter().enumerate() {
            out.push(self.translate_cell(dots).map_err(|e| e.at_position(i))?);
        }
        Ok(out)
    }

    fn translate_cell(&self, dots: BrailleField) -> Result<char, BrailleError> {
        if dots.is_empty() {
            return Ok(' ');
        }
        self.get(dots).ok_or(BrailleError::UnmappableDots(dots))
    }

    /// Translate a page back to text, rows joined with `'\n'`, no trailing separator.
    pub fn translate_text(&self, page: &BraillePage) -> Result<String, BrailleError> {
        let mut out = String::new();
        for (i, row) in page.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.translate(row).map_err(|e| e.at_line(i))?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleList;

    fn sample_rules() -> RuleList {
        RuleList::parse(["1 a 1", "2 b 12", "# comment", "3 a 2"]).unwrap()
    }

    #[test]
    fn space_maps_to_blank_without_lookup() {
        let table = sample_rules().to_forward_table();
        let row = table.translate("a b").unwrap();
        assert_eq!(
            row.cells(),
            &[
                BrailleField::from_bits(0b01),
                BrailleField::EMPTY,
                BrailleField::from_bits(0b11),
            ]
        );
    }

    #[test]
    fn space_rule_is_never_used() {
        // The rule format cannot express a space, but a table may still hold one.
        let mut forward = sample_rules().to_forward_table();
        assert!(forward.insert_first(' ', BrailleField::from_bits(0x3F)));
        assert_eq!(forward.translate(" ").unwrap().cells(), &[BrailleField::EMPTY]);
    }

    #[test]
    fn braille_passes_through_forward() {
        let table = sample_rules().to_forward_table();
        let row = table.translate("⠿a⣿").unwrap();
        assert_eq!(row.to_bits(), vec![0x3F, 0x01, 0xFF]);
    }

    #[test]
    fn unmappable_character_is_positioned() {
        let table = sample_rules().to_forward_table();
        let err = table.translate("ab c").unwrap_err();
        assert_eq!(err, BrailleError::UnmappableCharacter('c').at_position(3));
    }

    #[test]
    fn translate_text_keeps_empty_lines() {
        let table = sample_rules().to_forward_table();
        let page = table.translate_text("ab\n\nba\n").unwrap();
        assert_eq!(page.len(), 4);
        assert_eq!(page.to_unicode(), "⠁⠃\n\n⠃⠁\n");
    }

    #[test]
    fn translate_text_wraps_line_and_position() {
        let table = sample_rules().to_forward_table();
        let err = table.translate_text("a\nb\nabz").unwrap_err();
        assert_eq!(
            err,
            BrailleError::UnmappableCharacter('z').at_position(2).at_line(2)
        );
        assert_eq!(
            err.to_string(),
            "in line 3 in position 3 mapping for character z is missing in the table"
        );
    }

    #[test]
    fn blank_cell_always_decodes_to_space() {
        let rules = RuleList::parse(["1 a 1", "2 z 1"]).unwrap();
        let mut back = rules.to_back_table();
        back.insert_first(BrailleField::EMPTY, '_');
        let row = BrailleRow::from_unicode("⠁⠀⠁").unwrap();
        assert_eq!(back.translate(&row).unwrap(), "a a");
    }

    #[test]
    fn unmappable_dots_are_positioned() {
        let back = sample_rules().to_back_table();
        let row = BrailleRow::from_unicode("⠁⠇").unwrap();
        let err = back.translate(&row).unwrap_err();
        assert_eq!(
            err,
            BrailleError::UnmappableDots(BrailleField::from_bits(0b111)).at_position(1)
        );
        assert_eq!(
            err.to_string(),
            "in position 2 mapping for dots 123 is missing in the table"
        );
    }

    #[test]
    fn back_translate_text_round_trip() {
        let rules = sample_rules();
        let forward = rules.to_forward_table();
        let back = rules.to_back_table();
        let text = "ab ba\n\na";
        let page = forward.translate_text(text).unwrap();
        assert_eq!(back.translate_text(&page).unwrap(), text);
    }

    #[test]
    fn back_translate_text_wraps_line() {
        let back = sample_rules().to_back_table();
        let page = BraillePage::from_unicode("⠁\n⠁⠿").unwrap();
        let err = back.translate_text(&page).unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert_eq!(err.position(), Some(1));
        assert_eq!(
            err.root(),
            &BrailleError::UnmappableDots(BrailleField::from_bits(0x3F))
        );
    }

    #[test]
    fn tables_are_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ForwardTable>();
        assert_sync::<BackTable>();
    }
}
