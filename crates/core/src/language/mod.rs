//! Orthography and phonology: rewrite rules, alignment, syllable
//! segmentation, IPA normalization and stress resolution.

pub mod align;
pub mod ipa;
pub mod rules;
pub mod stress;
pub mod syllabify;

pub use align::{align_linear, transliterate_syllable};
pub use ipa::{add_slash, normalize_ipa, restore_marks};
pub use stress::{assign_stress, place_marker};
pub use syllabify::{mark_hiatuses, syllabify};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose to NFD so combining marks can be handled uniformly.
pub(crate) fn nfd(s: &str) -> String {
    s.nfd().collect()
}

/// Split into grapheme-like units: each base character together with the
/// combining marks that follow it.
pub(crate) fn graphemes(s: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.push(c);
                continue;
            }
        }
        out.push(c.to_string());
    }
    out
}

/// Convert a word and its IPA transcription into the respelled form.
///
/// When both the word and the transcription are dot-syllabified with the
/// same number of syllables, each pair is transliterated on its own, which
/// keeps rule context tight. Otherwise the whole word is aligned linearly
/// against the transcription and re-syllabified afterwards.
pub fn transliterate(word: &str, ipa: &str) -> String {
    let ipa = normalize_ipa(ipa);
    let inner = ipa.trim_matches('/');

    let dotted = word.contains('.') || inner.contains('.');
    let word_syls: Vec<&str> = word.split('.').collect();
    let ipa_syls: Vec<&str> = inner.split('.').collect();

    let syllables = if dotted && word_syls.len() == ipa_syls.len() {
        let n = word_syls.len();
        word_syls
            .iter()
            .zip(ipa_syls.iter())
            .enumerate()
            .map(|(k, (letters, phonemes))| {
                transliterate_syllable(letters, phonemes, k + 1 == n)
            })
            .collect()
    } else {
        if dotted {
            log::warn!(
                "syllable counts differ for {word:?} ({} letters vs {} sounds), aligning whole word",
                word_syls.len(),
                ipa_syls.len()
            );
        }
        let flat_word: String = word.chars().filter(|&c| c != '.').collect();
        let flat_ipa: String = inner.chars().filter(|&c| c != '.').collect();
        syllabify(&align_linear(&flat_word, &flat_ipa))
    };

    let syllables = mark_hiatuses(syllables);
    assign_stress(&syllables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_syllable_aligned() {
        assert_eq!(transliterate("ˈcan.tam", "/ˈkɐ\u{303}.tɐ\u{303}w/"), "càntão");
    }

    #[test]
    fn test_transliterate_linear_fallback() {
        // dotted word, undotted transcription: falls back to whole-word alignment
        assert_eq!(transliterate("ca.sa", "/kazɐ/"), "cáza");
    }

    #[test]
    fn test_transliterate_linear_with_stress() {
        assert_eq!(transliterate("casa", "kˈazɐ"), "cáza");
    }

    #[test]
    fn test_transliterate_never_leaks_stress_marker() {
        for (word, ipa) in [
            ("ˈcan.tam", "/ˈkɐ\u{303}.tɐ\u{303}w/"),
            ("casa", "kˈazɐ"),
            ("pé", "ˈpɛ"),
            ("", ""),
        ] {
            let out = transliterate(word, ipa);
            assert!(!out.contains('ˈ'), "marker left in {out:?}");
        }
    }

    #[test]
    fn test_graphemes_keep_combining_marks() {
        assert_eq!(graphemes("pɐ\u{303}w"), vec!["p", "ɐ\u{303}", "w"]);
        assert_eq!(graphemes("cão"), vec!["c", "a\u{303}", "o"]);
    }

    #[test]
    fn test_nfd_decomposes() {
        assert_eq!(nfd("ã"), "a\u{303}");
    }
}
