//! Dictionary persistence: one JSON file per word under the dictionary
//! directory. The engine itself never touches this store; it exists for
//! the CLI and the corpus review loop.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::WordEntry;

const DICT_DIR_ENV: &str = "LUSOFONEMA_DICT_DIR";
const DEFAULT_DICT_DIR: &str = "palavras";

/// Directory holding the per-word JSON files.
pub fn dict_dir() -> PathBuf {
    std::env::var(DICT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICT_DIR))
}

fn entry_path(dir: &Path, word: &str) -> PathBuf {
    dir.join(format!("{}.json", word.trim().to_lowercase()))
}

/// Write an entry, creating the directory if needed. The file is written
/// to a temporary name and renamed into place so readers never observe a
/// partial entry.
pub fn save_in(dir: &Path, entry: &WordEntry) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating dictionary directory {}", dir.display()))?;

    let path = entry_path(dir, &entry.word);
    let tmp = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(entry)?;
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("renaming into {}", path.display()))?;

    log::info!("saved \"{}\" to {}", entry.word, path.display());
    Ok(path)
}

pub fn save(entry: &WordEntry) -> Result<PathBuf> {
    save_in(&dict_dir(), entry)
}

/// Read an entry, or `None` when the word has no file yet.
pub fn load_in(dir: &Path, word: &str) -> Result<Option<WordEntry>> {
    let path = entry_path(dir, word);
    if !path.exists() {
        log::debug!("\"{word}\" not in dictionary");
        return Ok(None);
    }
    let json =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let entry = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(entry))
}

pub fn load(word: &str) -> Result<Option<WordEntry>> {
    load_in(&dict_dir(), word)
}

pub fn exists_in(dir: &Path, word: &str) -> bool {
    entry_path(dir, word).exists()
}

pub fn exists(word: &str) -> bool {
    exists_in(&dict_dir(), word)
}

/// Remove a word's file. Missing entries are not an error.
pub fn delete_in(dir: &Path, word: &str) -> Result<bool> {
    let path = entry_path(dir, word);
    if !path.exists() {
        log::warn!("\"{word}\" does not exist");
        return Ok(false);
    }
    fs::remove_file(&path).with_context(|| format!("deleting {}", path.display()))?;
    log::info!("deleted \"{word}\"");
    Ok(true)
}

pub fn delete(word: &str) -> Result<bool> {
    delete_in(&dict_dir(), word)
}
