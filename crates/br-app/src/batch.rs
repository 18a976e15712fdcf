use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use br_core::brf::BrfAlphabet;
use br_core::config::{BrailleConfig, OutputFormat};
use br_translate::rules::RuleList;
use br_translate::table::ForwardTable;
use rayon::prelude::*;

use crate::commands::encode_page;

/// Extensions texte reconnues.
const TEXT_EXTS: &[&str] = &["txt"];

/// Résultat d'un traitement par lots.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written successfully.
    pub translated: usize,
}

/// Traduit tous les fichiers texte d'un dossier en parallèle.
///
/// The compiled table and the BRF alphabet are shared read-only by every
/// worker. Each file fails on its own; the batch fails if any file did.
///
/// # Errors
/// Retourne une erreur si le dossier est illisible ou si un fichier échoue.
pub fn run_batch(
    config: &BrailleConfig,
    brf: &BrfAlphabet,
    rules: &RuleList,
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<BatchReport> {
    if same_dir(input_dir, output_dir) {
        anyhow::bail!(
            "Le dossier de sortie doit différer du dossier d'entrée ({})",
            input_dir.display()
        );
    }
    let files = scan_dir(input_dir)?;
    if files.is_empty() {
        log::warn!("Aucun fichier .txt dans {}", input_dir.display());
        return Ok(BatchReport::default());
    }
    check_collisions(&files, output_dir, format)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Impossible de créer {}", output_dir.display()))?;

    let forward = rules.to_forward_table();
    let results: Vec<(PathBuf, Result<PathBuf>)> = files
        .par_iter()
        .map(|path| {
            let result = translate_file(config, brf, &forward, path, output_dir, format);
            (path.clone(), result)
        })
        .collect();

    let mut report = BatchReport::default();
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(out) => {
                log::debug!("{} -> {}", path.display(), out.display());
                report.translated += 1;
            }
            Err(e) => {
                log::error!("{e:#}");
                failures.push(path);
            }
        }
    }

    if !failures.is_empty() {
        let list = failures
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::bail!(
            "{} fichier(s) sur {} en échec : {list}",
            failures.len(),
            files.len()
        );
    }
    Ok(report)
}

fn translate_file(
    config: &BrailleConfig,
    brf: &BrfAlphabet,
    forward: &ForwardTable,
    input: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Impossible de lire {}", input.display()))?;
    let page = forward
        .translate_text(&config.normalize(&text))
        .with_context(|| format!("Traduction impossible de {}", input.display()))?;
    let output = output_path(input, output_dir, format);
    fs::write(&output, encode_page(&page, format, brf)?)
        .with_context(|| format!("Impossible d'écrire {}", output.display()))?;
    Ok(output)
}

/// `notes.txt` → `<out>/notes.txt` (Unicode) or `<out>/notes.brf` (BRF).
fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let ext = match format {
        OutputFormat::Unicode => "txt",
        OutputFormat::Brf => "brf",
    };
    output_dir.join(format!("{}.{ext}", stem.to_string_lossy()))
}

/// Two inputs must never write the same output file (`a.txt` and `a.TXT`).
fn check_collisions(files: &[PathBuf], output_dir: &Path, format: OutputFormat) -> Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
    for input in files {
        let output = output_path(input, output_dir, format);
        if let Some(previous) = seen.insert(output.clone(), input) {
            anyhow::bail!(
                "{} et {} produiraient le même fichier {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
    }
    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Fichiers `.txt` du dossier, triés, sans récursion.
fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension().and_then(|s| s.to_str())
            && TEXT_EXTS.contains(&ext.to_lowercase().as_str())
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
