//! Braille cells, lines and pages for brailleplate.
//!
//! This crate holds the eight-dot cell model, its Unicode and braille ASCII
//! (BRF) codecs, the shared error type and the tool configuration.

pub mod brf;
pub mod cell;
pub mod config;
pub mod error;
pub mod page;

pub use brf::BrfAlphabet;
pub use cell::BrailleField;
pub use config::BrailleConfig;
pub use error::{BrailleError, BrfTableError};
pub use page::{BraillePage, BrailleRow};
