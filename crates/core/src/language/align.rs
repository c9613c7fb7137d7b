//! Grapheme–phoneme alignment: the per-syllable backoff-window routine and
//! the whole-word linear fallback.
//!
//! Both routines walk the orthography and the phoneme sequence with
//! independent cursors and consult the rule table at every step. Neither
//! ever fails: an unmatched position degrades to an identity copy of the
//! current letter.

use unicode_normalization::UnicodeNormalization;

use super::graphemes;
use super::nfd;
use super::rules::{RULES, STRESS};

/// Rewrite one syllable given its spelling and its IPA transcription.
///
/// Tries progressively shorter context windows at each cursor position
/// (greedy longest-context match), emits the first applicable rule's
/// output, and otherwise copies the current letter unchanged. Once either
/// side is exhausted the syllable is considered fully resolved; leftover
/// letters are dropped on purpose, for parity with dictionaries built by
/// earlier versions of the engine.
pub fn transliterate_syllable(letters: &str, phonemes: &str, is_last: bool) -> String {
    let letters: Vec<char> = letters.nfc().collect();
    let sounds = graphemes(phonemes);
    let last_letter = letters.last().copied();

    log::debug!(
        "syllable {:?} ({} letters) vs {:?} ({} sounds){}",
        letters.iter().collect::<String>(),
        letters.len(),
        sounds.concat(),
        sounds.len(),
        if is_last { " (last)" } else { "" }
    );

    let idx_max = letters.len().max(sounds.len());
    let mut w = 0;
    let mut i = 0;
    let mut out = String::new();

    while w < letters.len() && i < sounds.len() {
        let mut size = idx_max - w.min(i);
        let mut applied = false;

        while size > 0 {
            let w_ctx = &letters[w..(w + size).min(letters.len())];
            let i_ctx = sounds[i..(i + size).min(sounds.len())].concat();

            for rule in RULES {
                if !rule.pattern.matches(w_ctx) {
                    continue;
                }
                if !rule.ipa_matches(&i_ctx) {
                    continue;
                }
                if rule.last_syllable {
                    let hits_last = last_letter.is_some_and(|l| w_ctx.contains(&l));
                    if !is_last || !hits_last {
                        continue;
                    }
                }
                log::debug!(
                    "rule {:?} → {:?} at window size {}",
                    rule.pattern.body,
                    rule.output,
                    size
                );
                out.push_str(rule.output);
                w += rule.advance;
                applied = true;
                break;
            }

            if applied {
                break;
            }
            size -= 1;
        }

        if !applied {
            out.push(letters[w]);
        }
        w += 1;
        i += 1;
    }

    out
}

/// Whole-word fallback: walk the full word against the full transcription
/// using fixed ±2 context windows around each cursor.
pub fn align_linear(word: &str, ipa: &str) -> String {
    let letters: Vec<char> = word.nfc().collect();
    let inner = nfd(ipa.trim().trim_matches('/'));
    let sounds = graphemes(&inner);

    log::debug!("linear alignment of {:?} against {:?}", word, inner);

    let mut w = 0;
    let mut i = 0;
    let mut out = String::new();

    while w < letters.len() && i < sounds.len() {
        let letter = letters[w];
        let sound = sounds[i].as_str();

        // The stress mark is copied through verbatim, consuming no letter.
        if sound == "ˈ" {
            out.push(STRESS);
            i += 1;
            continue;
        }

        // Combining marks and rare symbols sort above the stress mark;
        // they consume only their own cursor.
        if letter > STRESS {
            w += 1;
            continue;
        }
        if sound.chars().next().is_some_and(|c| c > STRESS) {
            i += 1;
            continue;
        }

        let w_ctx = &letters[w.saturating_sub(2)..(w + 3).min(letters.len())];
        let i_ctx = sounds[i.saturating_sub(2)..(i + 3).min(sounds.len())].concat();

        let mut applied = false;
        for rule in RULES {
            if !rule.pattern.matches(w_ctx) {
                continue;
            }
            // The phonemic pattern must not only occur in the window but
            // cover the current phoneme, otherwise a rule could fire off a
            // neighboring sound.
            if let Some(lit) = rule.ipa {
                let lit = nfd(lit);
                if !i_ctx.contains(&lit) || !lit.contains(sound) {
                    continue;
                }
            }
            out.push_str(rule.output);
            w += rule.advance + 1;
            i += 1;
            applied = true;
            break;
        }

        if !applied {
            out.push(letter);
            w += 1;
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_nasal_vowel() {
        // c maps via /k/, then "am" folds to "an" on the nasal-vowel rule
        assert_eq!(transliterate_syllable("cam", "kɐ̃", false), "can");
    }

    #[test]
    fn test_syllable_sem() {
        assert_eq!(transliterate_syllable("sem", "sẽ", false), "sen");
    }

    #[test]
    fn test_syllable_final_nasal_diphthong() {
        // "am" with /ɐ̃w/ becomes "ão", but only in the last syllable
        assert_eq!(transliterate_syllable("tam", "tɐ̃w", true), "tão");
        assert_eq!(transliterate_syllable("tam", "tɐ̃w", false), "tan");
    }

    #[test]
    fn test_syllable_qu_digraph() {
        assert_eq!(transliterate_syllable("quei", "kɐj", false), "cei");
    }

    #[test]
    fn test_syllable_stress_marker_passthrough() {
        assert_eq!(transliterate_syllable("ˈcan", "ˈkɐ̃", false), "ˈcan");
    }

    #[test]
    fn test_syllable_empty_inputs() {
        assert_eq!(transliterate_syllable("", "kɐ", false), "");
        assert_eq!(transliterate_syllable("ca", "", false), "");
    }

    #[test]
    fn test_syllable_unknown_sound_copies_letter() {
        // an unrecognized phoneme falls through every rule
        assert_eq!(transliterate_syllable("q", "ʘ", false), "q");
    }

    #[test]
    fn test_linear_basic_word() {
        assert_eq!(align_linear("casa", "/ˈkazɐ/"), "ˈcáza");
    }

    #[test]
    fn test_linear_intervocalic_s() {
        // "s" between vowels pronounced /z/ is rewritten to "z"
        assert_eq!(align_linear("casa", "/kazɐ/"), "cáza");
    }

    #[test]
    fn test_linear_empty() {
        assert_eq!(align_linear("", "/kazɐ/"), "");
        assert_eq!(align_linear("casa", "//"), "");
    }
}
