//! espeak-ng adapter: obtains a raw IPA transcription for a word and
//! normalizes it into the house form.

use std::process::Command;

use thiserror::Error;

use crate::language::{add_slash, normalize_ipa, restore_marks};

const ESPEAK_BIN: &str = "espeak-ng";

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("failed to run {ESPEAK_BIN}: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("{ESPEAK_BIN} exited with status {0}")]
    Failed(std::process::ExitStatus),
    #[error("{ESPEAK_BIN} produced no output for {0:?}")]
    Empty(String),
}

/// True when the synthesizer binary is on PATH and answers `--version`.
pub fn espeak_available() -> bool {
    Command::new(ESPEAK_BIN)
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Synthesize the IPA for a word and return it normalized and
/// slash-wrapped.
///
/// The word may carry the stress marker and syllable dots; they are
/// stripped before invoking the synthesizer and carried back over onto
/// the transcription afterwards.
pub fn generate_ipa(word: &str) -> Result<String, SynthError> {
    let clean: String = word
        .trim()
        .chars()
        .filter(|&c| c != 'ˈ' && c != '.')
        .collect();

    let output = Command::new(ESPEAK_BIN)
        .args(["-v", "pt", "--ipa=3", "-q", &clean])
        .output()?;

    if !output.status.success() {
        return Err(SynthError::Failed(output.status));
    }

    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    log::debug!("raw IPA for {clean:?}: {raw:?}");
    if raw.is_empty() {
        return Err(SynthError::Empty(clean));
    }

    let normalized = normalize_ipa(&raw);
    let inner = normalized.trim_matches('/');

    let marked = if clean != word.trim() {
        restore_marks(word.trim(), inner)
    } else {
        inner.to_string()
    };

    Ok(add_slash(&marked))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exercised only where espeak-ng is installed; the normalization it
    // feeds is covered by the language tests.
    #[test]
    fn test_generate_ipa_when_available() {
        if !espeak_available() {
            return;
        }
        let ipa = generate_ipa("casa").unwrap();
        assert!(ipa.starts_with('/') && ipa.ends_with('/'));
        assert!(ipa.len() > 2);
    }

    #[test]
    fn test_marks_survive_when_available() {
        if !espeak_available() {
            return;
        }
        let ipa = generate_ipa("ˈca.sa").unwrap();
        let inner = ipa.trim_matches('/');
        assert!(inner.contains('ˈ'));
        assert!(inner.contains('.'));
    }
}
