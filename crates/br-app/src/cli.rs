use std::path::PathBuf;

use br_core::config::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// brailleplate — braille cell codecs and table-driven transliteration.
#[derive(Parser, Debug)]
#[command(name = "brailleplate", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Fichier de configuration TOML. Absent : valeurs par défaut.
    #[arg(short, long, default_value = "brailleplate.toml", global = true)]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate plain text into braille with a rule table.
    Translate {
        /// Rule table. Defaults to `[translation] table` from the config.
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Plain text input file.
        input: PathBuf,
        /// Braille output file.
        output: PathBuf,
        /// Output encoding. Defaults to `[output] format` from the config.
        #[arg(long, value_enum)]
        format: Option<Encoding>,
    },

    /// Translate braille back into plain text with a rule table.
    BackTranslate {
        /// Rule table. Defaults to `[translation] table` from the config.
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Braille input file.
        input: PathBuf,
        /// Plain text output file.
        output: PathBuf,
        /// Input encoding.
        #[arg(long, value_enum, default_value = "unicode")]
        from: Encoding,
    },

    /// Convert a Unicode braille file to braille ASCII.
    Uni2brf {
        input: PathBuf,
        output: PathBuf,
    },

    /// Convert a braille ASCII file to Unicode braille.
    Brf2uni {
        input: PathBuf,
        output: PathBuf,
    },

    /// List the dots of every braille character, one cell per line.
    Dots {
        input: PathBuf,
        output: PathBuf,
    },

    /// Translate every `.txt` file of a folder, in parallel.
    Batch {
        /// Rule table. Defaults to `[translation] table` from the config.
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Folder scanned for `.txt` files (not recursive).
        input_dir: PathBuf,
        /// Destination folder, created if needed. Must differ from the input folder.
        output_dir: PathBuf,
        /// Output encoding. Defaults to `[output] format` from the config.
        #[arg(long, value_enum)]
        format: Option<Encoding>,
    },
}

/// Braille file encoding on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Unicode,
    Brf,
}

impl From<Encoding> for OutputFormat {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Unicode => Self::Unicode,
            Encoding::Brf => Self::Brf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_translate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "brailleplate",
            "translate",
            "-t",
            "en.tbl",
            "in.txt",
            "out.brf",
            "--format",
            "brf",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Command::Translate { table, format, .. } => {
                assert_eq!(table, Some(PathBuf::from("en.tbl")));
                assert_eq!(format, Some(Encoding::Brf));
            }
            other => panic!("commande inattendue : {other:?}"),
        }
    }

    #[test]
    fn back_translate_defaults_to_unicode_input() {
        let cli =
            Cli::try_parse_from(["brailleplate", "back-translate", "in.txt", "out.txt"]).unwrap();
        match cli.command {
            Command::BackTranslate { from, table, .. } => {
                assert_eq!(from, Encoding::Unicode);
                assert!(table.is_none());
            }
            other => panic!("commande inattendue : {other:?}"),
        }
    }
}
