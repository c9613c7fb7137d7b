//! The Lusofonema rewrite rule table.
//!
//! Each rule pairs an orthographic context pattern with an optional IPA
//! context literal and the spelling to emit. Rules are tried strictly in
//! table order and the first one whose patterns both match wins, so the
//! order below is load-bearing: more specific contexts come first within
//! each phonological class ("ss" before "s", "ce"/"ci" before the general
//! /s/ rule, the /ks/ rule before the general "x" rules).

use super::nfd;

/// Primary stress marker, also used to flag the tonic syllable in spelling.
pub const STRESS: char = 'ˈ';

/// A set of characters that may occupy one position of a pattern.
pub type Class = &'static str;

/// Requirement on the characters adjacent to a pattern body.
#[derive(Debug, Clone, Copy)]
pub enum Ctx {
    /// No requirement.
    Any,
    /// The adjacent characters must match this class sequence.
    In(&'static [Class]),
    /// The adjacent character, if any, must fall outside this class.
    NotIn(Class),
}

/// An orthographic context pattern: a body of character classes with
/// optional context requirements on either side, matched anywhere inside
/// a sliding window (the equivalent of an unanchored regex with
/// lookbehind/lookahead).
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub behind: Ctx,
    pub body: &'static [Class],
    pub ahead: Ctx,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn in_class(class: Class, c: char) -> bool {
    class.chars().any(|k| k == fold(c))
}

impl Pattern {
    /// Find the first offset inside `window` where the pattern matches.
    pub fn find(&self, window: &[char]) -> Option<usize> {
        (0..window.len()).find(|&at| self.matches_at(window, at))
    }

    /// Whether the pattern matches anywhere inside `window`.
    pub fn matches(&self, window: &[char]) -> bool {
        self.find(window).is_some()
    }

    fn matches_at(&self, window: &[char], at: usize) -> bool {
        let end = at + self.body.len();
        if end > window.len() {
            return false;
        }
        for (k, class) in self.body.iter().enumerate() {
            if !in_class(class, window[at + k]) {
                return false;
            }
        }
        match self.behind {
            Ctx::Any => {}
            Ctx::In(seq) => {
                if at < seq.len() {
                    return false;
                }
                for (k, class) in seq.iter().enumerate() {
                    if !in_class(class, window[at - seq.len() + k]) {
                        return false;
                    }
                }
            }
            // A missing neighbor satisfies a negated context, like a
            // negative lookbehind at the start of a string.
            Ctx::NotIn(class) => {
                if at > 0 && in_class(class, window[at - 1]) {
                    return false;
                }
            }
        }
        match self.ahead {
            Ctx::Any => {}
            Ctx::In(seq) => {
                if end + seq.len() > window.len() {
                    return false;
                }
                for (k, class) in seq.iter().enumerate() {
                    if !in_class(class, window[end + k]) {
                        return false;
                    }
                }
            }
            Ctx::NotIn(class) => {
                if end < window.len() && in_class(class, window[end]) {
                    return false;
                }
            }
        }
        true
    }
}

/// One rewrite rule of the table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: Pattern,
    /// IPA literal that must occur in the phonemic context window.
    /// `None` means the rule applies regardless of pronunciation.
    pub ipa: Option<&'static str>,
    /// Replacement spelling.
    pub output: &'static str,
    /// Extra orthographic positions to skip beyond the one consumed.
    pub advance: usize,
    /// Only fires in the final syllable, and only when the matched window
    /// includes the syllable's last letter.
    pub last_syllable: bool,
}

impl Rule {
    /// Whether the phonemic side of the rule matches the given window
    /// (already NFD-normalized).
    pub fn ipa_matches(&self, window: &str) -> bool {
        match self.ipa {
            None => true,
            Some(lit) => window.contains(&nfd(lit)),
        }
    }

    const fn adv(mut self, n: usize) -> Self {
        self.advance = n;
        self
    }

    const fn last(mut self) -> Self {
        self.last_syllable = true;
        self
    }
}

const fn seq(body: &'static [Class]) -> Pattern {
    Pattern { behind: Ctx::Any, body, ahead: Ctx::Any }
}

const fn pat(behind: Ctx, body: &'static [Class], ahead: Ctx) -> Pattern {
    Pattern { behind, body, ahead }
}

const fn rule(pattern: Pattern, ipa: Option<&'static str>, output: &'static str) -> Rule {
    Rule { pattern, ipa, output, advance: 0, last_syllable: false }
}

const VOWELS_ACUTE: Class = "aeiouáéíóú";
const VOWELS_NASAL: Class = "aeiouáéíóúãõ";

/// The rule table, in priority order.
pub static RULES: &[Rule] = &[
    // ─── Stress marker ───────────────────────────────────────────
    rule(seq(&["ˈ"]), Some("ˈ"), "ˈ"),

    // ─── Plosives ────────────────────────────────────────────────
    rule(seq(&["p"]), Some("p"), "p"), // pato
    rule(seq(&["b"]), Some("b"), "b"), // bola
    rule(seq(&["t"]), Some("t"), "t"), // teto
    rule(seq(&["d"]), Some("d"), "d"), // dado
    rule(seq(&["g"]), Some("g"), "g"), // gato
    rule(seq(&["c"]), Some("k"), "c"), // casa
    rule(seq(&["k"]), Some("k"), "c"), // kilo → cilo
    rule(pat(Ctx::Any, &["q", "u"], Ctx::In(&["ei"])), Some("k"), "c").adv(1), // queijo → ceijo
    rule(pat(Ctx::Any, &["q"], Ctx::In(&["u", "ao"])), Some("k"), "c"), // quanto → cuanto

    // ─── Fricatives and sibilants ────────────────────────────────
    rule(seq(&["f"]), Some("f"), "f"), // faca
    rule(seq(&["v"]), Some("v"), "v"), // vaca
    rule(seq(&["s", "s"]), Some("s"), "s"), // massa → masa
    rule(seq(&["c", "e"]), Some("s"), "se"), // cedo → sedo
    rule(seq(&["c", "i"]), Some("s"), "si"), // cinema → sinema
    rule(seq(&["ç"]), Some("s"), "s"), // lição → lisão
    rule(seq(&["z"]), Some("ʃ"), "s"), // fiz → fis
    rule(seq(&["s"]), Some("s"), "s"), // sapo
    rule(pat(Ctx::In(&[VOWELS_ACUTE]), &["x"], Ctx::In(&[VOWELS_NASAL])), Some("s"), "s"), // máximo → másimo
    rule(seq(&["z"]), Some("z"), "z"), // zero
    rule(pat(Ctx::In(&[VOWELS_NASAL]), &["s"], Ctx::In(&[VOWELS_NASAL])), Some("z"), "z"), // casa → caza
    rule(pat(Ctx::Any, &["s"], Ctx::In(&[VOWELS_NASAL])), Some("z"), "z"),
    rule(pat(Ctx::In(&[VOWELS_ACUTE]), &["x"], Ctx::In(&[VOWELS_ACUTE])), Some("z"), "z"), // exame → ezame
    rule(pat(Ctx::Any, &["x"], Ctx::In(&[VOWELS_NASAL])), Some("z"), "z"),
    rule(seq(&["x"]), Some("ʃ"), "x"), // bruxa
    rule(seq(&["c", "h"]), Some("ʃ"), "x"), // chave → xave
    rule(seq(&["s"]), Some("ʃ"), "s"), // cesta
    rule(seq(&["e", "x"]), Some("ɐjʃ"), "eis"), // texto → teisto
    rule(seq(&["j"]), Some("ʒ"), "j"), // jogo
    rule(pat(Ctx::Any, &["g"], Ctx::In(&["eiyéíèìêîĩẽ"])), Some("ʒ"), "j"), // girafa → jirafa

    // ─── Plosive-fricative pair /ks/ ─────────────────────────────
    rule(seq(&["x"]), Some("ks"), "ç"), // fluxo → fluço

    // ─── Nasals ──────────────────────────────────────────────────
    rule(seq(&["m"]), Some("m"), "m"), // mão
    rule(seq(&["n"]), Some("n"), "n"), // nuvem
    rule(seq(&["n", "h"]), Some("ɲ"), "nh").adv(1), // manhã

    // ─── Laterals ────────────────────────────────────────────────
    rule(seq(&["l"]), Some("l"), "l"), // lata
    rule(seq(&["l", "h"]), Some("ʎ"), "lh").adv(1), // milho

    // ─── Rhotics ─────────────────────────────────────────────────
    rule(seq(&["r"]), Some("ɾ"), "r"), // faro
    rule(seq(&["r"]), Some("ʁ"), "r"), // rato
    rule(seq(&["r", "r"]), Some("ʁ"), "rr").adv(1), // carro

    // ─── Silent letters ──────────────────────────────────────────
    rule(pat(Ctx::In(&["g"]), &["u"], Ctx::In(&["ei"])), None, ""), // guerra → gerra
    rule(pat(Ctx::NotIn("ln"), &["h"], Ctx::Any), None, ""), // hiena → iena

    // ─── Oral diphthongs ─────────────────────────────────────────
    rule(seq(&["a", "i"]), Some("aj"), "ai").adv(1), // pai
    rule(seq(&["a", "u"]), Some("aw"), "au").adv(1), // pau
    rule(seq(&["e", "i"]), Some("ɐj"), "ei").adv(1), // sei
    rule(seq(&["ée", "u"]), Some("ɛw"), "éu").adv(1), // céu
    rule(seq(&["e", "u"]), Some("ew"), "eu").adv(1), // meu
    rule(seq(&["i", "u"]), Some("iw"), "iu").adv(1), // piu
    rule(seq(&["óo", "i"]), Some("ɔj"), "ói").adv(1), // dói
    rule(seq(&["o", "i"]), Some("oj"), "oi").adv(1), // foi
    rule(seq(&["o", "u"]), Some("ow"), "ou").adv(1), // sou
    rule(seq(&["u", "i"]), Some("uj"), "ui").adv(1), // fui

    // ─── Stable rising diphthongs ────────────────────────────────
    rule(seq(&["u", "a"]), Some("wɐ"), "ua").adv(1), // quadro
    rule(seq(&["u", "e"]), Some("we"), "ue").adv(1), // aguentar
    rule(seq(&["u", "i"]), Some("wi"), "ui").adv(1), // arguido
    rule(seq(&["u", "o"]), Some("wɔ"), "uo").adv(1), // quota

    // ─── Nasal diphthongs ────────────────────────────────────────
    rule(seq(&["ã", "o"]), Some("ɐ̃w"), "ão").adv(1), // pão
    rule(seq(&["ã", "e"]), Some("ɐ̃j"), "ãe").adv(1), // mãe
    rule(seq(&["õ", "e"]), Some("õj"), "õe").adv(1), // visões
    rule(seq(&["a", "m"]), Some("ɐ̃w"), "ão").adv(1).last(), // cantam → càntão

    // ─── Semivowels ──────────────────────────────────────────────
    rule(seq(&["i"]), Some("j"), "i"), // pai
    rule(seq(&["u"]), Some("w"), "u"), // quadro

    // ─── Nasal vowels ────────────────────────────────────────────
    rule(seq(&["a", "n"]), Some("ɐ̃"), "an").adv(1), // manta
    rule(seq(&["a", "m"]), Some("ɐ̃"), "an").adv(1), // campo → canpo
    rule(seq(&["e", "n"]), Some("ẽ"), "en").adv(1), // quente
    rule(seq(&["e", "m"]), Some("ẽ"), "en").adv(1), // bem → ben
    rule(seq(&["i", "n"]), Some("ĩ"), "in").adv(1), // finta
    rule(seq(&["i", "m"]), Some("ĩ"), "in").adv(1), // fim → fin
    rule(seq(&["o", "n"]), Some("õ"), "on").adv(1), // contar
    rule(seq(&["o", "m"]), Some("õ"), "on").adv(1), // bom → bon
    rule(seq(&["u", "n"]), Some("ũ"), "un").adv(1), // fundo
    rule(seq(&["u", "m"]), Some("ũ"), "un").adv(1), // um → un

    // ─── Oral vowels ─────────────────────────────────────────────
    rule(pat(Ctx::Any, &["aá"], Ctx::NotIn("iu")), Some("a"), "á"), // pá
    rule(seq(&["aâ"]), Some("ɐ"), "a"), // cama
    rule(seq(&["eé"]), Some("ɛ"), "é"), // pé
    rule(seq(&["eê"]), Some("e"), "e"), // mesa
    rule(seq(&["e"]), Some("ə"), "e"), // sede
    rule(seq(&["ií"]), Some("i"), "i"), // vida
    rule(seq(&["oó"]), Some("ɔ"), "ó"), // pó
    rule(seq(&["o"]), Some("o"), "o"), // ovo
    rule(seq(&["o"]), Some("u"), "u"), // conto
    rule(seq(&["uú"]), Some("u"), "u"), // luz
];

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_literal_pattern() {
        let p = seq(&["p"]);
        assert_eq!(p.find(&chars("pato")), Some(0));
        assert_eq!(p.find(&chars("copa")), Some(2));
        assert_eq!(p.find(&chars("gato")), None);
    }

    #[test]
    fn test_pattern_case_insensitive() {
        let p = seq(&["c", "h"]);
        assert!(p.matches(&chars("CHave")));
    }

    #[test]
    fn test_lookahead_sequence() {
        // "qu" only before e/i
        let p = pat(Ctx::Any, &["q", "u"], Ctx::In(&["ei"]));
        assert!(p.matches(&chars("quei")));
        assert!(!p.matches(&chars("quad")));
        // lookahead past the window end fails
        assert!(!p.matches(&chars("qu")));
    }

    #[test]
    fn test_lookbehind() {
        let p = pat(Ctx::In(&["aeiou"]), &["s"], Ctx::In(&["aeiou"]));
        assert_eq!(p.find(&chars("asa")), Some(1));
        // nothing before the window start to satisfy the context
        assert!(!p.matches(&chars("sa")));
    }

    #[test]
    fn test_negated_lookbehind() {
        let p = pat(Ctx::NotIn("ln"), &["h"], Ctx::Any);
        assert!(p.matches(&chars("hora")));
        assert!(p.matches(&chars("ahi")));
        assert!(!p.matches(&chars("nho")));
    }

    #[test]
    fn test_negated_lookahead() {
        let p = pat(Ctx::Any, &["aá"], Ctx::NotIn("iu"));
        assert!(p.matches(&chars("pa")));
        // absent neighbor passes a negated context
        assert!(p.matches(&chars("a")));
        assert!(!p.matches(&chars("ai")));
    }

    #[test]
    fn test_table_order_disambiguates_x() {
        // window "x" with IPA /ks/: the ʃ rule is skipped because its
        // phoneme is absent, so the first applicable rule is the ç one
        let w = chars("x");
        let hit = RULES
            .iter()
            .find(|r| r.pattern.matches(&w) && r.ipa_matches("ks"))
            .unwrap();
        assert_eq!(hit.output, "ç");
    }

    #[test]
    fn test_ss_before_s() {
        let w = chars("ss");
        let hit = RULES
            .iter()
            .find(|r| r.pattern.matches(&w) && r.ipa_matches("s"))
            .unwrap();
        assert_eq!(hit.pattern.body.len(), 2);
        assert_eq!(hit.output, "s");
    }

    #[test]
    fn test_ipa_match_is_nfd_aware() {
        // "õj" may be written precomposed in the table but must match a
        // decomposed phoneme window
        let r = RULES.iter().find(|r| r.output == "õe").unwrap();
        assert!(r.ipa_matches(&nfd("õj")));
    }
}
