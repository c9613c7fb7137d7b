//! Normalization of synthesizer IPA into the house transcription.
//!
//! espeak-ng output for European Portuguese carries symbols and stress
//! placements we do not use; this module folds them into the vocabulary
//! the rewrite rules understand. All matching happens on NFD text so
//! nasal vowels compare as base letter plus combining tilde.

use lazy_static::lazy_static;
use regex::Regex;

use super::nfd;

/// Symbol folds applied in order. Nasal targets are written decomposed.
const FOLDS: &[(&str, &str)] = &[
    ("ɾə", "ɾ"),
    ("ɑ", "a"),
    ("ɨ", "ə"),
    ("ɪ", "j"),
    ("ʊ", "w"),
    ("ɹ", "ɾ"),
    ("ɡ", "g"),
    // nasal codas
    ("aŋ", "ɐ\u{303}"),
    ("eiŋ", "e\u{303}"),
    ("iŋ", "i\u{303}"),
    ("oŋ", "o\u{303}"),
    ("uŋ", "u\u{303}"),
    ("ŋ", ""),
    ("ɐ\u{303}w\u{303}", "ɐ\u{303}w"),
    ("ɐ\u{303}m", "ɐ\u{303}"),
    ("en", "e\u{303}"),
    // diphthongs
    ("au", "aw"),
];

lazy_static! {
    // obstruent + liquid + stress + vowel: stress moves before the cluster
    static ref RE_CLUSTER_STRESS: Regex =
        Regex::new(r"([fptcgbdv])([lɾ])ˈ([aeiouɐɛəɔw\u{0303}])").unwrap();
    // consonant + stress + vowel: stress moves before the onset
    static ref RE_ONSET_STRESS: Regex =
        Regex::new(r"([^aeiouɐɛəɔw\u{0303}ˈˌ\s/])ˈ([aeiouɐɛəɔw\u{0303}])").unwrap();
    // w flanked by consonants is vocalic
    static ref RE_CONSONANT_W: Regex =
        Regex::new(r"([^aeiouɐɛəɔ\u{0303}ˈ])w([^aeiouɐɛəɔ\u{0303}ˈ])").unwrap();
}

fn normalize_inner(ipa: &str) -> String {
    let mut out = nfd(ipa).replace('\u{200d}', "");

    for (from, to) in FOLDS {
        out = out.replace(from, to);
    }

    out.retain(|c| !c.is_whitespace() && c != 'ˌ');

    let out = RE_CLUSTER_STRESS.replace_all(&out, "ˈ$1$2$3");
    let out = RE_ONSET_STRESS.replace_all(&out, "ˈ$1$2");
    let out = RE_CONSONANT_W.replace_all(&out, "${1}u$2");

    out.into_owned()
}

/// Wrap a transcription in slashes unless it already is.
pub fn add_slash(ipa: &str) -> String {
    if ipa.starts_with('/') {
        ipa.to_string()
    } else {
        format!("/{ipa}/")
    }
}

/// Normalize an IPA transcription and return it slash-wrapped.
///
/// Idempotent: feeding the result back in returns it unchanged.
pub fn normalize_ipa(ipa: &str) -> String {
    let inner = ipa.trim().trim_matches('/');
    add_slash(&normalize_inner(inner))
}

/// Carry the stress marker and syllable dots of the source word over to a
/// bare IPA transcription.
///
/// The marker is inserted at the same character offset it holds in the
/// word; dots are re-inserted position by position. A word without marks
/// leaves the IPA untouched.
pub fn restore_marks(word: &str, ipa: &str) -> String {
    if !word.contains('ˈ') && !word.contains('.') {
        return ipa.to_string();
    }

    let mut res: Vec<char> = ipa.chars().collect();

    if word.contains('ˈ') && !ipa.contains('ˈ') {
        let pos = word.chars().position(|c| c == 'ˈ').unwrap_or(0);
        let pos = pos.min(res.len());
        res.insert(pos, 'ˈ');
    }

    if !word.contains('.') {
        return res.into_iter().collect();
    }

    let mut restored = String::new();
    let mut res_iter = res.iter();
    for wc in word.chars() {
        if wc == '.' {
            restored.push('.');
        } else if let Some(&rc) = res_iter.next() {
            restored.push(rc);
        } else {
            break;
        }
    }
    restored.extend(res_iter);
    restored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nasal_diphthong_is_preserved() {
        assert_eq!(normalize_ipa("kɐ\u{303}w"), "/kɐ\u{303}w/");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_ipa("kˈazɐ");
        assert_eq!(normalize_ipa(&once), once);
    }

    #[test]
    fn test_velar_nasal_folds_to_nasal_vowel() {
        assert_eq!(normalize_ipa("kaŋtu"), "/kɐ\u{303}tu/");
        assert_eq!(normalize_ipa("fiŋ"), "/fi\u{303}/");
    }

    #[test]
    fn test_stress_moves_before_onset() {
        assert_eq!(normalize_ipa("kˈazɐ"), "/ˈkazɐ/");
    }

    #[test]
    fn test_stress_moves_before_cluster() {
        assert_eq!(normalize_ipa("pɾˈatu"), "/ˈpɾatu/");
    }

    #[test]
    fn test_w_between_consonants_is_vocalic() {
        assert_eq!(normalize_ipa("kwku"), "/kuku/");
    }

    #[test]
    fn test_whitespace_and_secondary_stress_stripped() {
        assert_eq!(normalize_ipa("ˌka zɐ"), "/kazɐ/");
    }

    #[test]
    fn test_already_wrapped_input() {
        assert_eq!(normalize_ipa("/ˈkazɐ/"), "/ˈkazɐ/");
    }

    #[test]
    fn test_restore_marks() {
        // the dot lands after as many transcription chars as precede it
        // in the word, combining marks counted like any other char
        assert_eq!(
            restore_marks("ˈcan.tam", "kɐ\u{303}tɐ\u{303}w"),
            "ˈkɐ\u{303}.tɐ\u{303}w"
        );
    }

    #[test]
    fn test_restore_marks_without_marks() {
        assert_eq!(restore_marks("caza", "kazɐ"), "kazɐ");
    }

    #[test]
    fn test_restore_marks_stress_only() {
        assert_eq!(restore_marks("ˈpão", "pɐ\u{303}w"), "ˈpɐ\u{303}w");
    }
}
