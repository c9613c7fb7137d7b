//! Corpus sampling: random words and text excerpts from the TEI XML
//! works under the corpus directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use regex::Regex;

const CORPUS_DIR_ENV: &str = "LUSOFONEMA_CORPUS_DIR";
const DEFAULT_CORPUS_DIR: &str = "corpus";

const MIN_WORD_LEN: usize = 3;
const MAX_DRAWS: usize = 200;

lazy_static! {
    static ref RE_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref RE_NON_LETTER: Regex = Regex::new(r"[^\p{L}\s]").unwrap();
    // words (hyphens allowed), punctuation runs, whitespace runs
    static ref RE_TOKEN: Regex =
        Regex::new(r#"[\p{L}-]+|[.,!?;:()"'«»…—–-]+|\s+"#).unwrap();
    static ref ARCHAIC: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\bll\b").unwrap(), "l"),
        (Regex::new(r"\bnn\b").unwrap(), "n"),
        (Regex::new(r"\bph").unwrap(), "f"),
        (Regex::new(r"\bth").unwrap(), "t"),
        (Regex::new(r"\bgy").unwrap(), "gi"),
        (Regex::new(r"\bly").unwrap(), "li"),
        (Regex::new(r"\bcy").unwrap(), "ci"),
        (Regex::new(r"\bsy").unwrap(), "si"),
    ];
}

/// Directory holding the corpus works.
pub fn corpus_dir() -> PathBuf {
    std::env::var(CORPUS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CORPUS_DIR))
}

fn xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading corpus directory {}", dir.display()))?;
    let files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "xml"))
        .collect();
    if files.is_empty() {
        bail!("no XML works in {}", dir.display());
    }
    Ok(files)
}

fn read_text(path: &Path) -> Result<String> {
    let xml = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(RE_TAG.replace_all(&xml, " ").into_owned())
}

/// Replace pre-reform spellings with their modern equivalents
/// ("pharmacia" reads as "farmácia" to the synthesizer).
pub fn modernize(word: &str) -> String {
    let mut out = word.to_string();
    for (re, modern) in ARCHAIC.iter() {
        out = re.replace_all(&out, *modern).into_owned();
    }
    out
}

/// Split text into word, punctuation and whitespace tokens so a passage
/// can be rebuilt with each word replaced.
pub fn tokenize(text: &str) -> Vec<String> {
    RE_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True for tokens that should count as words of a passage.
pub fn is_word(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_alphabetic())
}

/// Draw a random word from a random work, skipping words for which
/// `known` returns true. Returns `None` when every draw came back known.
pub fn random_word_in<F>(dir: &Path, known: F) -> Result<Option<String>>
where
    F: Fn(&str) -> bool,
{
    let files = xml_files(dir)?;
    let mut rng = rand::thread_rng();
    let path = files.choose(&mut rng).expect("files is non-empty");
    log::debug!("sampling from {}", path.display());

    let text = read_text(path)?;
    let clean = RE_NON_LETTER.replace_all(&text, " ").to_lowercase();
    let words: Vec<&str> = clean
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .collect();
    if words.is_empty() {
        bail!("no usable words in {}", path.display());
    }

    for _ in 0..MAX_DRAWS {
        let candidate = words.choose(&mut rng).expect("words is non-empty");
        if !known(candidate) {
            return Ok(Some(modernize(candidate)));
        }
    }
    Ok(None)
}

pub fn random_word() -> Result<Option<String>> {
    random_word_in(&corpus_dir(), crate::store::exists)
}

/// Take the opening of a random work: tokens up to `words` counted words,
/// punctuation and spacing preserved.
pub fn excerpt_in(dir: &Path, words: usize) -> Result<Vec<String>> {
    let files = xml_files(dir)?;
    let mut rng = rand::thread_rng();
    let path = files.choose(&mut rng).expect("files is non-empty");
    log::info!("chosen work: {}", path.display());

    let text = read_text(path)?;
    let mut count = 0;
    let mut out = Vec::new();
    for token in tokenize(&text) {
        if count >= words {
            break;
        }
        if is_word(&token) {
            count += 1;
        }
        out.push(token);
    }
    Ok(out)
}

pub fn excerpt(words: usize) -> Result<Vec<String>> {
    excerpt_in(&corpus_dir(), words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const WORK: &str = r#"<?xml version="1.0"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <text><body>
    <p>A pharmacia abriu cedo, disse elle; «um theatro inteiro!»</p>
  </body></text>
</TEI>"#;

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("obra.xml"), WORK).unwrap();
        dir
    }

    #[test]
    fn test_modernize_archaic_spellings() {
        assert_eq!(modernize("pharmacia"), "farmacia");
        assert_eq!(modernize("theatro"), "teatro");
        assert_eq!(modernize("gymnasio"), "gimnasio");
        assert_eq!(modernize("casa"), "casa");
    }

    #[test]
    fn test_random_word_skips_known() {
        let dir = corpus();
        let word = random_word_in(dir.path(), |w| w != "cedo").unwrap();
        assert_eq!(word.as_deref(), Some("cedo"));
    }

    #[test]
    fn test_random_word_exhausted() {
        let dir = corpus();
        assert_eq!(random_word_in(dir.path(), |_| true).unwrap(), None);
    }

    #[test]
    fn test_random_word_has_min_length() {
        let dir = corpus();
        for _ in 0..20 {
            let word = random_word_in(dir.path(), |_| false).unwrap().unwrap();
            assert!(word.chars().count() >= MIN_WORD_LEN, "short word {word:?}");
        }
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(random_word_in(dir.path(), |_| false).is_err());
    }

    #[test]
    fn test_excerpt_counts_words_not_tokens() {
        let dir = corpus();
        let tokens = excerpt_in(dir.path(), 3).unwrap();
        let words: Vec<&String> = tokens.iter().filter(|t| is_word(t)).collect();
        assert_eq!(words.len(), 3);
        // punctuation and spacing survive
        assert!(tokens.iter().any(|t| !is_word(t)));
    }

    #[test]
    fn test_tokenize_rebuilds_passage() {
        let text = "Olá, mundo! «bem-vindo»";
        assert_eq!(tokenize(text).concat(), text);
    }
}
