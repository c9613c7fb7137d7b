//! Heuristic syllabifier and hiatus marker for rewritten words.
//!
//! The syllabifier is a cursor scan with a small ordered set of boundary
//! rules; it prefers CV/CVC shapes and is tuned for European Portuguese.
//! It is deliberately not an exact phonological syllabifier.

use super::rules::STRESS;

const VOWELS: &str = "aeiouáéíóúâêôãõà";
const SEMIVOWELS: &str = "iu";

fn is_vowel(c: char) -> bool {
    c.to_lowercase().next().map_or(false, |l| VOWELS.contains(l))
}

fn is_semivowel(c: char) -> bool {
    c.to_lowercase().next().map_or(false, |l| SEMIVOWELS.contains(l))
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

/// Split a word into syllables.
///
/// Boundary rules, first match wins at each position:
/// 1. the stress marker always opens a new syllable;
/// 2. hiatus — two adjacent strong vowels split;
/// 3. "rr" between vowels starts the next syllable;
/// 4. a single intervocalic "r" starts the next syllable;
/// 5. a post-vocalic "r" at word end or before a consonant closes its
///    syllable;
/// 6. vowel–consonant–vowel closes after the first vowel;
/// 7. vowel–"n"–consonant (not "nh") closes after the "n".
pub fn syllabify(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut syllables = Vec::new();
    let mut current = String::new();

    for i in 0..chars.len() {
        let c = chars[i];

        if c == STRESS {
            if !current.is_empty() {
                syllables.push(std::mem::take(&mut current));
            }
            current.push(c);
            continue;
        }

        // previous character of the open syllable, not of the whole word
        let prev = current.chars().last().filter(|&p| p != STRESS);
        current.push(c);

        let next = chars.get(i + 1).copied();
        let next2 = chars.get(i + 2).copied();
        let next3 = chars.get(i + 3).copied();

        let close = if is_vowel(c)
            && next.is_some_and(is_vowel)
            && !is_semivowel(c)
            && !next.is_some_and(is_semivowel)
        {
            true // hiatus
        } else if is_vowel(c)
            && next == Some('r')
            && next2 == Some('r')
            && next3.is_some_and(is_vowel)
        {
            true // "rr" onsets the next syllable
        } else if is_vowel(c) && next == Some('r') && next2.is_some_and(is_vowel) {
            true // intervocalic "r"
        } else if c == 'r' && prev.is_some_and(is_vowel) && next.map_or(true, is_consonant) {
            true // coda "r"
        } else if is_vowel(c) && next.is_some_and(is_consonant) && next2.is_some_and(is_vowel) {
            true // V.CV
        } else if c == 'n'
            && prev.is_some_and(is_vowel)
            && next.is_some_and(|n| is_consonant(n) && n != 'h')
        {
            true // nasal coda
        } else {
            false
        };

        if close {
            syllables.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        syllables.push(current);
    }
    syllables
}

/// Insert a silent "h" between adjacent syllables that both touch the
/// boundary with a vowel, so the pair is not misread as a diphthong once
/// the syllable boundaries are gone.
pub fn mark_hiatuses(syllables: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(syllables.len());

    for syllable in syllables {
        let hiatus = match out.last() {
            Some(prev) => {
                let last = prev.chars().last();
                let first = syllable.chars().find(|&c| c != STRESS);
                last.is_some_and(is_vowel) && first.is_some_and(is_vowel)
            }
            None => false,
        };

        if hiatus {
            if let Some(rest) = syllable.strip_prefix(STRESS) {
                out.push(format!("{STRESS}h{rest}"));
            } else {
                out.push(format!("h{syllable}"));
            }
        } else {
            out.push(syllable);
        }
    }

    out
}
