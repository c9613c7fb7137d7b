//! Wiktionary lookup: fetches a word's page from pt.wiktionary.org and
//! extracts the fields we store (IPA, word class, plural, stress class,
//! syllables, definitions).

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

use crate::language::place_marker;
use crate::types::{StressClass, WordEntry};

const API_URL: &str = "https://pt.wiktionary.org/w/api.php";

/// Section titles dropped as single lines.
const DROP_TITLES: &[&str] = &["={{-pt-}}=", "===Portugal==="];

/// Section titles that open a block to drop until a heading of the same
/// or higher level.
const DROP_BLOCKS: &[&str] = &[
    "==Ver também==",
    "={{-es-}}=",
    "={{-gl-}}=",
    "={{-lad-}}=",
    "===Tradução===",
];

lazy_static! {
    static ref RE_HEADING: Regex = Regex::new(r"^(=+)\s*(.*?)\s*(=+)$").unwrap();
    static ref RE_NOUN: Regex = Regex::new(r"(?i)^==\s*Substantivo\s*==$").unwrap();
    static ref RE_VERB: Regex = Regex::new(r"(?i)^==\s*Verbo\s*==$").unwrap();
    static ref RE_STRESS: Regex =
        Regex::new(r"\{\{(proparoxítona|paroxítona|oxítona)\|([^}]+)\}\}").unwrap();
    static ref RE_PLURAL: Regex = Regex::new(r"(?:fp|mp)=([^|}]+)").unwrap();
    static ref RE_SINGULAR: Regex = Regex::new(r"(?:fs|ms)=([^|}]+)").unwrap();
    static ref RE_IPA: Regex = Regex::new(r"\{\{AFI\|(/.+?/)\}\}").unwrap();
    static ref RE_FLEX: Regex = Regex::new(r"\{\{flex\.pt\|[^}]*\}\}").unwrap();
    static ref RE_LINK_LABELED: Regex = Regex::new(r"\[\[[^|\]]+\|([^\]]+)\]\]").unwrap();
    static ref RE_LINK: Regex = Regex::new(r"\[\[(.*?)\]\]").unwrap();
    static ref RE_TEMPLATE: Regex = Regex::new(r"\{\{[^}]+\}\}").unwrap();
    static ref RE_SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Fetch a word's entry. `Ok(None)` means the page does not exist or has
/// no revisions; network and decoding failures are errors.
pub fn fetch_entry(word: &str) -> Result<Option<WordEntry>> {
    let word = word.trim().to_lowercase();

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("lusofonema/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client
        .get(API_URL)
        .query(&[
            ("action", "query"),
            ("titles", word.as_str()),
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("format", "json"),
            ("formatversion", "2"),
        ])
        .send()
        .context("querying pt.wiktionary.org")?
        .error_for_status()?;

    let json: serde_json::Value = response.json()?;
    let pages = json["query"]["pages"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    let content = pages.iter().find_map(|page| {
        page["revisions"]
            .as_array()
            .and_then(|revs| revs.first())
            .and_then(|rev| rev["content"].as_str())
            .map(str::to_string)
    });

    let Some(content) = content else {
        log::warn!("no Wiktionary page for {word:?}");
        return Ok(None);
    };

    Ok(Some(parse_wikitext(&word, &content)))
}

/// Heading level: number of `=` signs on the shorter side, 0 for
/// non-headings.
fn heading_level(line: &str) -> usize {
    RE_HEADING
        .captures(line)
        .map(|c| c[1].len().min(c[3].len()))
        .unwrap_or(0)
}

/// Drop tables, foreign-language blocks and example lines, keeping only
/// the lines the field extraction looks at.
fn clean_wikitext(raw: &str) -> Vec<String> {
    let mut kept = Vec::new();
    let mut in_table = false;
    let mut block_level: Option<usize> = None;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if in_table {
            if trimmed.contains("|}") {
                in_table = false;
            }
            continue;
        }
        if trimmed.starts_with("{|") {
            in_table = true;
            continue;
        }

        if let Some(level) = block_level {
            if trimmed.starts_with('=') && heading_level(trimmed) <= level {
                block_level = None;
                // fall through: this heading is processed normally
            } else {
                continue;
            }
        }

        if DROP_TITLES.contains(&trimmed) {
            continue;
        }
        if DROP_BLOCKS.contains(&trimmed) {
            block_level = Some(heading_level(trimmed));
            continue;
        }
        if trimmed.starts_with("#*") {
            continue;
        }

        kept.push(trimmed.to_string());
    }
    kept
}

/// Strip list markers, links and templates from a definition line.
fn clean_definition(line: &str) -> String {
    let line = line.trim_start_matches('#').trim_start();
    let line = RE_LINK_LABELED.replace_all(line, "$1");
    let line = RE_LINK.replace_all(&line, "$1");
    let line = RE_TEMPLATE.replace_all(&line, "");
    RE_SPACES.replace_all(&line, " ").trim().to_string()
}

/// Extract the stored fields out of a page's wikitext.
pub fn parse_wikitext(word: &str, raw: &str) -> WordEntry {
    let mut entry = WordEntry::new(word);
    let mut in_section = false;

    for line in clean_wikitext(raw) {
        if RE_NOUN.is_match(&line) {
            entry.class = Some("substantivo".into());
            in_section = true;
            continue;
        }
        if RE_VERB.is_match(&line) {
            entry.class = Some("verbo".into());
            in_section = true;
            continue;
        }
        if heading_level(&line) > 0 {
            in_section = false;
            continue;
        }

        if line.contains("{{gramática|f}}") {
            if let Some(class) = &mut entry.class {
                class.push_str(" feminino");
            }
        }
        if line.contains("{{gramática|m}}") {
            if let Some(class) = &mut entry.class {
                class.push_str(" masculino");
            }
        }

        if let Some(caps) = RE_STRESS.captures(&line) {
            if let Ok(class) = caps[1].parse::<StressClass>() {
                let syllables = caps[2]
                    .split('|')
                    .filter(|part| !part.contains('='))
                    .collect::<Vec<_>>()
                    .join(".");
                entry.stress = Some(class);
                entry.syllables = Some(place_marker(&syllables, class));
            }
            continue;
        }

        if RE_FLEX.is_match(&line) {
            if let Some(m) = RE_PLURAL.captures(&line) {
                entry.plural = Some(m[1].trim().to_string());
            }
            if let Some(m) = RE_SINGULAR.captures(&line) {
                entry.word = m[1].trim().to_string();
            }
        }

        if let Some(m) = RE_IPA.captures(&line) {
            entry.ipa = Some(m[1].trim().to_string());
        }

        if in_section && line.starts_with('#') {
            entry.definitions.push(clean_definition(&line));
        }
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"={{-pt-}}=
==Substantivo==
{{paroxítona|ca|sa}}
{{gramática|f}}
{{flex.pt|fs=casa|fp=casas}}
{{AFI|/ˈka.zɐ/}}
# [[edifício]] destinado à [[habitação]]
#* ''exemplo a ignorar''
# {{escopo|pt|figurado}} [[família]]
==Ver também==
* [[lar]]
={{-es-}}=
==Substantivo==
# significado castelhano
"#;

    #[test]
    fn test_parse_fields() {
        let entry = parse_wikitext("casa", PAGE);
        assert_eq!(entry.word, "casa");
        assert_eq!(entry.class.as_deref(), Some("substantivo feminino"));
        assert_eq!(entry.stress, Some(StressClass::Grave));
        assert_eq!(entry.syllables.as_deref(), Some("ˈca.sa"));
        assert_eq!(entry.plural.as_deref(), Some("casas"));
        assert_eq!(entry.ipa.as_deref(), Some("/ˈka.zɐ/"));
    }

    #[test]
    fn test_definitions_are_cleaned() {
        let entry = parse_wikitext("casa", PAGE);
        assert_eq!(
            entry.definitions,
            vec!["edifício destinado à habitação", "família"]
        );
    }

    #[test]
    fn test_foreign_block_is_dropped() {
        let entry = parse_wikitext("casa", PAGE);
        assert!(entry
            .definitions
            .iter()
            .all(|d| !d.contains("castelhano")));
    }

    #[test]
    fn test_table_block_is_dropped() {
        let raw = "==Substantivo==\n{|\n| célula |\n|}\n# definição";
        let entry = parse_wikitext("x", raw);
        assert_eq!(entry.definitions, vec!["definição"]);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("==Substantivo=="), 2);
        assert_eq!(heading_level("=== Tradução ==="), 3);
        assert_eq!(heading_level("# definição"), 0);
    }

    #[test]
    fn test_stress_template_with_named_args() {
        let raw = "==Substantivo==\n{{oxítona|a|vó|fp=avós}}";
        let entry = parse_wikitext("avó", raw);
        assert_eq!(entry.stress, Some(StressClass::Aguda));
        assert_eq!(entry.syllables.as_deref(), Some("a.ˈvó"));
    }
}
