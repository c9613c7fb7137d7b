use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of the tonic syllable, using the traditional Portuguese
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressClass {
    /// Stress on the last syllable (oxítona).
    #[serde(rename = "aguda")]
    Aguda,
    /// Stress on the second-to-last syllable (paroxítona).
    #[serde(rename = "grave")]
    Grave,
    /// Stress on the third-to-last syllable (proparoxítona).
    #[serde(rename = "esdrúxula")]
    Esdruxula,
}

impl fmt::Display for StressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StressClass::Aguda => "aguda",
            StressClass::Grave => "grave",
            StressClass::Esdruxula => "esdrúxula",
        };
        f.write_str(s)
    }
}

impl FromStr for StressClass {
    type Err = String;

    /// Accepts both the house names and the Wiktionary template names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aguda" | "oxítona" | "oxitona" => Ok(StressClass::Aguda),
            "grave" | "paroxítona" | "paroxitona" => Ok(StressClass::Grave),
            "esdrúxula" | "esdruxula" | "proparoxítona" | "proparoxitona" => {
                Ok(StressClass::Esdruxula)
            }
            other => Err(format!("unknown stress class: {other:?}")),
        }
    }
}

/// One dictionary entry, stored as a JSON file per word.
///
/// Field names follow the on-disk dictionary format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Plain spelling, lowercase, no markers.
    #[serde(rename = "palavra")]
    pub word: String,
    /// Dot-syllabified spelling with the stress marker in place.
    #[serde(rename = "sílabas", default, skip_serializing_if = "Option::is_none")]
    pub syllables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    /// The respelled form computed by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lusofonema: Option<String>,
    /// Word class, possibly with gender ("substantivo feminino").
    #[serde(rename = "classe", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(rename = "acentuação", default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<StressClass>,
    #[serde(rename = "definição", default, skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<String>,
    #[serde(rename = "etimologia", default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
}

impl WordEntry {
    pub fn new(word: &str) -> Self {
        WordEntry {
            word: word.trim().to_lowercase(),
            ..Default::default()
        }
    }

    /// Human-readable listing of the populated fields.
    pub fn format(&self, show_word: bool) -> String {
        let mut lines = Vec::new();

        if show_word && !self.word.is_empty() {
            lines.push(format!("• Palavra: {}", self.word));
        }
        if let Some(ipa) = &self.ipa {
            lines.push(format!("• IPA: {ipa}"));
        }
        if let Some(lusofonema) = &self.lusofonema {
            lines.push(format!("• Lusofonema: {lusofonema}"));
        }
        if let Some(class) = &self.class {
            lines.push(format!("• Classe: {class}"));
        }
        if let Some(stress) = &self.stress {
            lines.push(format!("• Acentuação: {stress}"));
        }
        if let Some(plural) = &self.plural {
            lines.push(format!("• Plural: \"{plural}\""));
        }
        if !self.definitions.is_empty() {
            lines.push("• Definições:".to_string());
            for (i, def) in self.definitions.iter().enumerate() {
                lines.push(format!("   {}. {def}", i + 1));
            }
        }
        if let Some(etymology) = &self.etymology {
            lines.push(format!("• Etimologia: {etymology}"));
        }

        lines.join("\n")
    }
}
