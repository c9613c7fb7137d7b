//! Tonic stress resolution: pick the most prominent vowel of the marked
//! syllable and make the stress visible with a diacritic.

use crate::types::StressClass;

use super::rules::STRESS;

const VOWELS: &str = "aeiouáéíóúàèìòùâêôãõǎěǐǒǔ";
const ACUTE: &str = "áéíóú";
const CARON: &str = "ǎěǐǒǔ";
const TILDE: &str = "ãõ";
const CIRCUMFLEX: &str = "âêô";
const NASAL_CONSONANTS: &str = "mn";

/// Grave marks for plain vowels, carons for already-acute ones.
const MARK_TABLE: &[(char, char)] = &[
    ('a', 'à'),
    ('e', 'è'),
    ('i', 'ì'),
    ('o', 'ò'),
    ('u', 'ù'),
    ('á', 'ǎ'),
    ('é', 'ě'),
    ('í', 'ǐ'),
    ('ó', 'ǒ'),
    ('ú', 'ǔ'),
];

fn is_vowel(c: char) -> bool {
    c.to_lowercase().next().map_or(false, |l| VOWELS.contains(l))
}

fn substitute(c: char) -> char {
    MARK_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Phonological prominence of the vowel at `idx` within the syllable.
///
/// Higher scores win; ties are broken by first occurrence. Already-marked
/// vowels outrank everything so an existing diacritic is never displaced.
fn priority(chars: &[char], idx: usize) -> u32 {
    let c = chars[idx];
    if CARON.contains(c) {
        return 110;
    }
    if CIRCUMFLEX.contains(c) || TILDE.contains(c) {
        return 100;
    }
    if ACUTE.contains(c) {
        return 90;
    }

    let next = chars.get(idx + 1).copied();
    let next2 = chars.get(idx + 2).copied();

    if next.is_some_and(is_vowel) {
        return match next2 {
            Some(n) if NASAL_CONSONANTS.contains(n) => 80,
            Some('r') => 70,
            Some('l') => 60,
            _ => 50,
        };
    }
    match next {
        Some('r') => 40,
        Some(n) if NASAL_CONSONANTS.contains(n) => 30,
        Some('l') => 20,
        _ => 10,
    }
}

/// Resolve the stress marker of a syllable sequence into a diacritic and
/// return the finished word.
///
/// The output never contains the raw stress marker. A word with no marker
/// is returned unchanged; a marked syllable with no vowel merely loses the
/// marker.
pub fn assign_stress(syllables: &[String]) -> String {
    let Some(tonic_idx) = syllables.iter().position(|s| s.contains(STRESS)) else {
        return syllables.concat();
    };

    let chars: Vec<char> = syllables[tonic_idx].chars().collect();
    let after_marker = chars.iter().position(|&c| c == STRESS).map_or(0, |p| p + 1);

    let mut best: Option<(usize, u32)> = None;
    for idx in after_marker..chars.len() {
        if is_vowel(chars[idx]) {
            let p = priority(&chars, idx);
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((idx, p));
            }
        }
    }

    let mut tonic_syllable: String = chars.iter().filter(|&&c| c != STRESS).collect();

    if let Some((idx, p)) = best {
        let tonic = chars[idx];
        log::debug!("tonic vowel {:?} with priority {}", tonic, p);

        let acute_count = syllables
            .iter()
            .flat_map(|s| s.chars())
            .filter(|&c| ACUTE.contains(c))
            .count();

        let keep = TILDE.contains(tonic)
            || CIRCUMFLEX.contains(tonic)
            || CARON.contains(tonic)
            || (ACUTE.contains(tonic) && acute_count <= 1);

        if !keep {
            tonic_syllable = chars
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c != STRESS)
                .map(|(k, &c)| if k == idx { substitute(c) } else { c })
                .collect();
        }
    }

    let mut out = String::new();
    for (k, syllable) in syllables.iter().enumerate() {
        if k == tonic_idx {
            out.push_str(&tonic_syllable);
        } else {
            out.extend(syllable.chars().filter(|&c| c != STRESS));
        }
    }
    out
}

/// Insert the stress marker into a dot-syllabified word according to its
/// dictionary stress class.
pub fn place_marker(word: &str, class: StressClass) -> String {
    if word.contains(STRESS) {
        return word.to_string();
    }

    let syllables: Vec<&str> = word.split('.').collect();
    let n = syllables.len();
    let target = match class {
        StressClass::Aguda => n - 1,
        StressClass::Grave => n.saturating_sub(2),
        StressClass::Esdruxula => n.saturating_sub(3),
    };

    syllables
        .iter()
        .enumerate()
        .map(|(k, s)| {
            if k == target {
                format!("{STRESS}{s}")
            } else {
                (*s).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syls(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_marker_is_identity() {
        assert_eq!(assign_stress(&syls(&["ca", "za"])), "caza");
    }

    #[test]
    fn test_plain_vowel_gets_grave() {
        assert_eq!(assign_stress(&syls(&["ˈcan", "tão"])), "càntão");
    }

    #[test]
    fn test_sole_acute_is_kept() {
        assert_eq!(assign_stress(&syls(&["ˈcá", "za"])), "cáza");
    }

    #[test]
    fn test_second_acute_becomes_caron() {
        // two acutes in the word: the tonic one is disambiguated
        assert_eq!(assign_stress(&syls(&["ˈcá", "fé"])), "cǎfé");
    }

    #[test]
    fn test_tilde_is_kept() {
        assert_eq!(assign_stress(&syls(&["ˈpão"])), "pão");
    }

    #[test]
    fn test_marker_without_vowels_is_dropped() {
        assert_eq!(assign_stress(&syls(&["ˈpst"])), "pst");
    }

    #[test]
    fn test_output_never_contains_marker() {
        for word in [&["ˈcan", "tão"][..], &["ˈpst"], &["ca", "za"], &["ˈá"]] {
            let out = assign_stress(&syls(word));
            assert!(!out.contains(STRESS), "marker left in {out:?}");
        }
    }

    #[test]
    fn test_priority_ladder() {
        let chars: Vec<char> = "aõa".chars().collect();
        assert_eq!(priority(&chars, 1), 100); // tilde outranks context
        let chars: Vec<char> = "aum".chars().collect();
        assert_eq!(priority(&chars, 0), 80); // V+V+nasal
        let chars: Vec<char> = "aur".chars().collect();
        assert_eq!(priority(&chars, 0), 70); // V+V+r
        let chars: Vec<char> = "aul".chars().collect();
        assert_eq!(priority(&chars, 0), 60); // V+V+l
        let chars: Vec<char> = "au".chars().collect();
        assert_eq!(priority(&chars, 0), 50); // diphthong
        let chars: Vec<char> = "ar".chars().collect();
        assert_eq!(priority(&chars, 0), 40);
        let chars: Vec<char> = "an".chars().collect();
        assert_eq!(priority(&chars, 0), 30);
        let chars: Vec<char> = "al".chars().collect();
        assert_eq!(priority(&chars, 0), 20);
        let chars: Vec<char> = "a".chars().collect();
        assert_eq!(priority(&chars, 0), 10);
    }

    #[test]
    fn test_diphthong_beats_plain_vowel() {
        // in "ˈcau.za"-like syllables the diphthong head wins
        assert_eq!(assign_stress(&syls(&["ˈcau", "za"])), "càuza");
    }

    #[test]
    fn test_place_marker_classes() {
        assert_eq!(place_marker("sa.pa.to", StressClass::Aguda), "sa.pa.ˈto");
        assert_eq!(place_marker("sa.pa.to", StressClass::Grave), "sa.ˈpa.to");
        assert_eq!(place_marker("sa.pa.to", StressClass::Esdruxula), "ˈsa.pa.to");
    }

    #[test]
    fn test_place_marker_short_words() {
        assert_eq!(place_marker("pé", StressClass::Grave), "ˈpé");
        assert_eq!(place_marker("ca.za", StressClass::Esdruxula), "ˈca.za");
    }

    #[test]
    fn test_place_marker_idempotent() {
        assert_eq!(place_marker("ˈca.za", StressClass::Grave), "ˈca.za");
    }
}
