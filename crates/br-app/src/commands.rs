use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use br_core::brf::BrfAlphabet;
use br_core::cell::BrailleField;
use br_core::config::{BrailleConfig, OutputFormat};
use br_core::page::BraillePage;
use br_translate::rules::RuleList;

use crate::batch;
use crate::cli::{Command, Encoding};

/// Exécute une sous-commande.
///
/// # Errors
/// Returns an error on unreadable files, invalid tables or untranslatable input.
pub fn run(command: &Command, config: &BrailleConfig, brf: &BrfAlphabet) -> Result<()> {
    match command {
        Command::Translate {
            table,
            input,
            output,
            format,
        } => {
            let table = resolve_table(table.as_deref(), config)?;
            let format = format.map_or(config.output_format, OutputFormat::from);
            translate(config, brf, &table, input, output, format)
        }
        Command::BackTranslate {
            table,
            input,
            output,
            from,
        } => {
            let table = resolve_table(table.as_deref(), config)?;
            back_translate(config, brf, &table, input, output, *from)
        }
        Command::Uni2brf { input, output } => uni_to_brf(config, brf, input, output),
        Command::Brf2uni { input, output } => brf_to_uni(config, brf, input, output),
        Command::Dots { input, output } => list_dots(config, input, output),
        Command::Batch {
            table,
            input_dir,
            output_dir,
            format,
        } => {
            let table = resolve_table(table.as_deref(), config)?;
            let format = format.map_or(config.output_format, OutputFormat::from);
            let rules = load_rules(&table)?;
            let report =
                batch::run_batch(config, brf, &rules, input_dir, output_dir, format)?;
            log::info!(
                "Lot terminé : {} fichier(s) traduit(s) dans {}",
                report.translated,
                output_dir.display()
            );
            Ok(())
        }
    }
}

/// `--table` wins over the config file.
fn resolve_table(table: Option<&Path>, config: &BrailleConfig) -> Result<PathBuf> {
    match (table, config.table.as_deref()) {
        (Some(path), _) | (None, Some(path)) => Ok(path.to_path_buf()),
        (None, None) => anyhow::bail!(
            "Aucune table de traduction. Utilisez --table ou [translation] table dans la config."
        ),
    }
}

/// Lit et compile une table de règles.
///
/// # Errors
/// Returns an error if the file cannot be read or a rule line is invalid.
pub fn load_rules(path: &Path) -> Result<RuleList> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire la table {}", path.display()))?;
    let rules = RuleList::from_text(&text)
        .with_context(|| format!("Table invalide {}", path.display()))?;
    log::info!("{} règles chargées depuis {}", rules.len(), path.display());
    Ok(rules)
}

fn read_text(path: &Path, config: &BrailleConfig) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    Ok(config.normalize(&text))
}

fn read_bytes(path: &Path, config: &BrailleConfig) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Impossible de lire {}", path.display()))?;
    Ok(config.normalize_bytes(&data))
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("{} octets écrits dans {}", data.len(), path.display());
    Ok(())
}

/// Serialize a page in the requested encoding.
pub fn encode_page(page: &BraillePage, format: OutputFormat, brf: &BrfAlphabet) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Unicode => Ok(page.to_unicode().into_bytes()),
        OutputFormat::Brf => Ok(page.to_brf(brf)?),
    }
}

fn translate(
    config: &BrailleConfig,
    brf: &BrfAlphabet,
    table: &Path,
    input: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<()> {
    let forward = load_rules(table)?.to_forward_table();
    let text = read_text(input, config)?;
    let page = forward
        .translate_text(&text)
        .with_context(|| format!("Traduction impossible de {}", input.display()))?;
    write_output(output, &encode_page(&page, format, brf)?)
}

fn back_translate(
    config: &BrailleConfig,
    brf: &BrfAlphabet,
    table: &Path,
    input: &Path,
    output: &Path,
    from: Encoding,
) -> Result<()> {
    let back = load_rules(table)?.to_back_table();
    let page = match from {
        Encoding::Unicode => BraillePage::from_unicode(&read_text(input, config)?),
        Encoding::Brf => BraillePage::from_brf(&read_bytes(input, config)?, brf),
    }
    .with_context(|| format!("Braille invalide dans {}", input.display()))?;
    let text = back
        .translate_text(&page)
        .with_context(|| format!("Rétro-traduction impossible de {}", input.display()))?;
    write_output(output, text.as_bytes())
}

fn uni_to_brf(config: &BrailleConfig, brf: &BrfAlphabet, input: &Path, output: &Path) -> Result<()> {
    let page = BraillePage::from_unicode(&read_text(input, config)?)
        .with_context(|| format!("Braille invalide dans {}", input.display()))?;
    write_output(output, &page.to_brf(brf)?)
}

fn brf_to_uni(config: &BrailleConfig, brf: &BrfAlphabet, input: &Path, output: &Path) -> Result<()> {
    let page = BraillePage::from_brf(&read_bytes(input, config)?, brf)
        .with_context(|| format!("BRF invalide dans {}", input.display()))?;
    write_output(output, page.to_unicode().as_bytes())
}

/// One dot string per braille character. Anything else is skipped.
fn list_dots(config: &BrailleConfig, input: &Path, output: &Path) -> Result<()> {
    let text = read_text(input, config)?;
    let mut out = String::new();
    for field in text.chars().filter_map(|c| BrailleField::from_unicode(c).ok()) {
        out.push_str(&field.to_string());
        out.push('\n');
    }
    write_output(output, out.as_bytes())
}
