use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Encodage des pages braille en sortie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// UTF-8, bloc U+2800..U+28FF.
    #[default]
    Unicode,
    /// Braille ASCII, one byte per cell, every line terminated by `\n`.
    Brf,
}

/// Configuration des outils, chargée depuis un fichier TOML.
///
/// Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use br_core::config::{BrailleConfig, OutputFormat};
/// let config = BrailleConfig::default();
/// assert!(config.strip_carriage_returns);
/// assert_eq!(config.output_format, OutputFormat::Unicode);
/// assert!(config.table.is_none());
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct BrailleConfig {
    // === Entrée ===
    /// Remove `\r` from every input file before parsing (CRLF files).
    pub strip_carriage_returns: bool,

    // === Traduction ===
    /// Rule table used when no `--table` is given.
    pub table: Option<PathBuf>,

    // === Sortie ===
    pub output_format: OutputFormat,
}

impl Default for BrailleConfig {
    fn default() -> Self {
        Self {
            strip_carriage_returns: true,
            table: None,
            output_format: OutputFormat::Unicode,
        }
    }
}

impl BrailleConfig {
    /// Apply the carriage-return policy to freshly read text.
    ///
    /// # Example
    /// ```
    /// use br_core::config::BrailleConfig;
    /// let config = BrailleConfig::default();
    /// assert_eq!(config.normalize("a\r\nb"), "a\nb");
    /// ```
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        if self.strip_carriage_returns {
            text.replace('\r', "")
        } else {
            text.to_owned()
        }
    }

    /// Byte variant of [`BrailleConfig::normalize`], for BRF input.
    #[must_use]
    pub fn normalize_bytes(&self, data: &[u8]) -> Vec<u8> {
        if self.strip_carriage_returns {
            data.iter().copied().filter(|&b| b != b'\r').collect()
        } else {
            data.to_vec()
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input: Option<InputSection>,
    translation: Option<TranslationSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSection {
    strip_carriage_returns: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationSection {
    table: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    format: Option<OutputFormat>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// A relative `table` path is resolved against the directory of the config file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use br_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<BrailleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = BrailleConfig::default();

    if let Some(v) = file.input.and_then(|s| s.strip_carriage_returns) {
        config.strip_carriage_returns = v;
    }
    if let Some(v) = file.translation.and_then(|s| s.table) {
        config.table = Some(match path.parent() {
            Some(dir) if v.is_relative() => dir.join(v),
            _ => v,
        });
    }
    if let Some(v) = file.output.and_then(|s| s.format) {
        config.output_format = v;
    }

    Ok(config)
}
