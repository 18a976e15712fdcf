//! Table-driven translation between plain text and braille cells.
//!
//! Single character to single cell only: no contractions, no context rules.

pub mod rules;
pub mod table;

pub use rules::{RuleList, TranslationRule};
pub use table::{BackTable, ForwardTable};
