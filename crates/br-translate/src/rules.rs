//! Rule tables: one rule per line, `<id> <characters> <dots> [extra...]`.
//!
//! Close to the liblouis table layout but much simpler: no escapes, no
//! multi-character rules, no opcodes. Not compatible with liblouis.

use br_core::cell::BrailleField;
use br_core::error::BrailleError;

use crate::table::{BackTable, ForwardTable};

/// A single character-to-cell mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationRule {
    pub ch: char,
    pub dots: BrailleField,
}

/// Rules in file order. Order decides which rule wins on duplicates.
///
/// # Example
/// ```
/// use br_translate::rules::RuleList;
///
/// let rules = RuleList::parse(["1 a 1", "2 b 12", "# comment", "3 a 2"]).unwrap();
/// assert_eq!(rules.len(), 3);
/// let forward = rules.to_forward_table();
/// assert_eq!(forward.get('a').map(|f| f.to_string()), Some("1".into()));
/// assert_eq!(forward.get('b').map(|f| f.to_string()), Some("12".into()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleList(Vec<TranslationRule>);

impl RuleList {
    /// Parse rule lines.
    ///
    /// Blank lines and lines starting with `#` are skipped. Fields are split on
    /// single spaces; the second field lists characters that all share the
    /// dots of the third field. Fields after the third are ignored.
    ///
    /// Errors carry the 0-based line index.
    pub fn parse<'a, I>(lines: I) -> Result<Self, BrailleError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(' ');
            let (Some(_id), Some(chars), Some(dots)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(BrailleError::MalformedRuleLine.at_line(i));
            };
            let dots = BrailleField::from_dot_string(dots).map_err(|e| e.at_line(i))?;
            rules.extend(chars.chars().map(|ch| TranslationRule { ch, dots }));
        }
        log::debug!("{} règles de traduction chargées", rules.len());
        Ok(Self(rules))
    }

    /// Parse a whole rule file: carriage returns are stripped, lines split on `'\n'`.
    ///
    /// # Example
    /// ```
    /// use br_translate::rules::RuleList;
    /// let rules = RuleList::from_text("1 a 1\r\n2 b 12\r\n").unwrap();
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn from_text(text: &str) -> Result<Self, BrailleError> {
        let text = text.replace('\r', "");
        Self::parse(text.split('\n'))
    }

    #[must_use]
    pub fn rules(&self) -> &[TranslationRule] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character → cell table. The first rule for a character wins,
    /// later ones are dropped silently.
    #[must_use]
    pub fn to_forward_table(&self) -> ForwardTable {
        let mut table = ForwardTable::default();
        let mut shadowed = 0usize;
        for rule in &self.0 {
            if !table.insert_first(rule.ch, rule.dots) {
                shadowed += 1;
            }
        }
        log::debug!(
            "Table directe : {} caractères, {shadowed} règles ignorées",
            table.len()
        );
        table
    }

    /// Cell → character table. The first rule for a dot pattern wins,
    /// independently of which rule won in the forward table.
    #[must_use]
    pub fn to_back_table(&self) -> BackTable {
        let mut table = BackTable::default();
        let mut shadowed = 0usize;
        for rule in &self.0 {
            if !table.insert_first(rule.dots, rule.ch) {
                shadowed += 1;
            }
        }
        log::debug!(
            "Table inverse : {} cellules, {shadowed} règles ignorées",
            table.len()
        );
        table
    }
}

impl From<Vec<TranslationRule>> for RuleList {
    fn from(rules: Vec<TranslationRule>) -> Self {
        Self(rules)
    }
}

impl FromIterator<TranslationRule> for RuleList {
    fn from_iter<I: IntoIterator<Item = TranslationRule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(dots: &str) -> BrailleField {
        dots.parse().unwrap()
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let rules = RuleList::parse(["# header", "", "1 a 1"]).unwrap();
        assert_eq!(
            rules.rules(),
            &[TranslationRule { ch: 'a', dots: field("1") }]
        );
    }

    #[test]
    fn character_list_shares_dots() {
        let rules = RuleList::parse(["1 aA 1"]).unwrap();
        assert_eq!(
            rules.rules(),
            &[
                TranslationRule { ch: 'a', dots: field("1") },
                TranslationRule { ch: 'A', dots: field("1") },
            ]
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let rules = RuleList::parse(["1 a 1 whatever else 9x"]).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn short_line_is_malformed_at_its_index() {
        let err = RuleList::parse(["# c", "1 a 1", "1 a"]).unwrap_err();
        assert_eq!(err, BrailleError::MalformedRuleLine.at_line(2));
        assert_eq!(err.to_string(), "in line 3 invalid rule format");
    }

    #[test]
    fn bad_dots_are_reported_with_line() {
        let err = RuleList::parse(["1 a 19"]).unwrap_err();
        assert_eq!(err.line(), Some(0));
        assert_eq!(err.root(), &BrailleError::InvalidEncoding);
    }

    #[test]
    fn double_space_shifts_fields() {
        // Split on single spaces: the character list becomes empty here.
        let err = RuleList::parse(["1  a 1"]).unwrap_err();
        assert_eq!(err.line(), Some(0));
        assert_eq!(err.root(), &BrailleError::InvalidEncoding);
    }

    #[test]
    fn forward_table_first_rule_wins() {
        let rules = RuleList::parse(["1 a 1", "2 b 12", "# comment", "3 a 2"]).unwrap();
        let table = rules.to_forward_table();
        assert_eq!(table.get('a'), Some(field("1")));
        assert_eq!(table.get('b'), Some(field("12")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn back_table_is_independent_of_forward_table() {
        let rules = RuleList::parse(["1 x 1", "2 y 1", "3 y 2"]).unwrap();
        let forward = rules.to_forward_table();
        let back = rules.to_back_table();
        assert_eq!(forward.get('y'), Some(field("1")));
        assert_eq!(back.get(field("1")), Some('x'));
        assert_eq!(back.get(field("2")), Some('y'));
    }
}
