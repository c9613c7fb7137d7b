//! Lusofonema engine: turns a Portuguese word's spelling and IPA
//! transcription into a phonetically-motivated respelling.
//!
//! The heart of the crate is [`language`], a set of pure functions over
//! strings. Around it sit the pieces a working dictionary needs: the
//! espeak-ng adapter ([`synth`]), the per-word JSON store ([`store`]),
//! the corpus sampler ([`corpus`]) and, behind the `wiktionary` feature,
//! a pt.wiktionary.org client ([`wiktionary`]).

pub mod corpus;
pub mod language;
pub mod store;
pub mod synth;
pub mod types;
#[cfg(feature = "wiktionary")]
pub mod wiktionary;

pub use language::{normalize_ipa, transliterate, transliterate_syllable};
pub use types::{StressClass, WordEntry};
