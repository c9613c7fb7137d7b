use std::process::exit;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use lusofonema_core::language::{normalize_ipa, transliterate};
use lusofonema_core::{corpus, store, synth, WordEntry};

#[derive(Parser)]
#[command(name = "lusofonema", version, about = "Phonetic respelling of Portuguese")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized IPA transcription of a word
    Ipa {
        word: String,
    },
    /// Look a word up, compute its respelling and show the entry
    Word {
        word: String,
        /// Write the entry to the dictionary
        #[arg(long)]
        save: bool,
    },
    /// Respell a word (random from the corpus when omitted)
    Check {
        word: Option<String>,
        /// Write the result to the dictionary
        #[arg(long)]
        save: bool,
    },
    /// Respell a passage sampled from the corpus
    Text {
        /// Also print the IPA line
        #[arg(long)]
        ipa: bool,
        /// Number of words to sample
        #[arg(long, default_value_t = 50)]
        words: usize,
    },
    /// Print the Lusofonema alphabet
    Alphabet {
        /// Print the phoneme inventory instead
        #[arg(long)]
        sounds: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli.command) {
        log::error!("{err:#}");
        exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Ipa { word } => {
            let ipa = synth::generate_ipa(&word)?;
            println!("{ipa}");
            Ok(())
        }
        Command::Word { word, save } => {
            let entry = build_entry(&word)?;
            println!("{}", entry.format(true));
            if save {
                store::save(&entry)?;
            }
            Ok(())
        }
        Command::Check { word, save } => check(word, save),
        Command::Text { ipa, words } => text(ipa, words),
        Command::Alphabet { sounds } => {
            if sounds {
                print_sounds();
            } else {
                print_alphabet();
            }
            Ok(())
        }
    }
}

/// Assemble an entry from the dictionary, Wiktionary or the synthesizer,
/// whichever answers first, and compute the respelling.
fn build_entry(word: &str) -> Result<WordEntry> {
    let mut entry = match store::load(word)? {
        Some(entry) => entry,
        None => lookup(word)?,
    };

    let marked = entry.syllables.clone().unwrap_or_else(|| entry.word.clone());
    let ipa = match &entry.ipa {
        Some(ipa) => normalize_ipa(ipa),
        None => synth::generate_ipa(&marked).context("no IPA available")?,
    };

    entry.lusofonema = Some(transliterate(&marked, &ipa));
    entry.ipa = Some(ipa);
    Ok(entry)
}

#[cfg(feature = "wiktionary")]
fn lookup(word: &str) -> Result<WordEntry> {
    use lusofonema_core::wiktionary;
    Ok(wiktionary::fetch_entry(word)?.unwrap_or_else(|| WordEntry::new(word)))
}

#[cfg(not(feature = "wiktionary"))]
fn lookup(word: &str) -> Result<WordEntry> {
    Ok(WordEntry::new(word))
}

fn check(word: Option<String>, save: bool) -> Result<()> {
    let word = match word {
        Some(word) => word.trim().to_lowercase(),
        None => {
            let word = corpus::random_word()?
                .ok_or_else(|| anyhow!("every sampled word is already in the dictionary"))?;
            log::info!("random word: {word}");
            word
        }
    };

    let ipa = synth::generate_ipa(&word)?;
    let lusofonema = transliterate(&word, &ipa);
    println!("{word} → {ipa} → {lusofonema}");

    if save {
        let mut entry = WordEntry::new(&word);
        entry.ipa = Some(ipa);
        entry.lusofonema = Some(lusofonema);
        store::save(&entry)?;
    }
    Ok(())
}

fn text(show_ipa: bool, words: usize) -> Result<()> {
    let tokens = corpus::excerpt(words)?;

    let mut ipa_line = String::new();
    let mut luso_line = String::new();
    for token in &tokens {
        if !corpus::is_word(token) {
            ipa_line.push_str(token);
            luso_line.push_str(token);
            continue;
        }
        let (ipa, luso) = transcribe_token(token);
        ipa_line.push_str(&ipa);
        luso_line.push_str(&luso);
    }

    println!("Texto original:\n\n{}\n", tokens.concat());
    if show_ipa {
        println!("Transcrição fonética:\n\n{ipa_line}\n");
    }
    println!("Versão em Lusofonema:\n\n{luso_line}");
    Ok(())
}

/// Respell one word of a passage. Dictionary entries win over the
/// synthesizer and are flagged with `*`; a word the synthesizer cannot
/// transcribe degrades to `?`.
fn transcribe_token(token: &str) -> (String, String) {
    let lower = token.to_lowercase();

    let ipa = match synth::generate_ipa(&lower) {
        Ok(ipa) => ipa,
        Err(err) => {
            log::debug!("no IPA for {lower:?}: {err}");
            return ("?".to_string(), "?".to_string());
        }
    };

    let luso = match store::load(&lower) {
        Ok(Some(entry)) if entry.lusofonema.is_some() => {
            format!("*{}", entry.lusofonema.unwrap_or_default())
        }
        _ => transliterate(&lower, &ipa),
    };

    (ipa, capitalize_like(token, &luso))
}

/// Carry the original token's initial capitalization over to the
/// respelled form.
fn capitalize_like(original: &str, out: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = out.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        out.to_string()
    }
}

const ALPHABET: &[(&str, &str, &str)] = &[
    ("A", "á", "/a/ ou /ɐ/"),
    ("B", "bê", "/b/"),
    ("C", "cê", "/k/"),
    ("D", "dê", "/d/"),
    ("E", "é", "/ɛ/, /e/ ou /ə/"),
    ("F", "éfe", "/f/"),
    ("G", "gê", "/g/"),
    ("H", "agá", "(mudo)"),
    ("I", "i", "/i/ ou /j/"),
    ("J", "jota", "/ʒ/"),
    ("L", "éle", "/l/ ou /ɫ/"),
    ("M", "ême", "/m/"),
    ("N", "êne", "/n/"),
    ("O", "ó", "/ɔ/ ou /o/"),
    ("P", "pê", "/p/"),
    ("R", "érre", "/ʁ/ ou /ɾ/"),
    ("S", "ésse", "/s/"),
    ("T", "tê", "/t/"),
    ("U", "u", "/u/ ou /w/"),
    ("V", "vê", "/v/"),
    ("X", "xis", "/ʃ/"),
    ("Ç", "csi", "/ks/"),
    ("Z", "zê", "/z/"),
];

const SOUNDS: &[(&str, &str, &str)] = &[
    ("/p/", "C-O", "Pato"),
    ("/b/", "C-O", "Bola"),
    ("/t/", "C-O", "Teto"),
    ("/d/", "C-O", "Dado"),
    ("/k/", "C-O", "Casa"),
    ("/g/", "C-O", "Gato"),
    ("/f/", "C-F", "Faca"),
    ("/v/", "C-F", "Vaca"),
    ("/s/", "C-F", "Sapo"),
    ("/z/", "C-F", "Zero"),
    ("/ʃ/", "C-F", "Chave"),
    ("/ʒ/", "C-F", "Jogo"),
    ("/m/", "C-N", "Mão"),
    ("/n/", "C-N", "Nuvem"),
    ("/ɲ/", "C-N", "Manhã"),
    ("/l/", "C-L", "Lata"),
    ("/ʎ/", "C-L", "Milho"),
    ("/ɾ/", "C-V", "Raro"),
    ("/ʁ/", "C-V", "Raro"),
    ("/j/", "SV", "Pai"),
    ("/w/", "SV", "Quadro"),
    ("/a/", "V-O", "Pá"),
    ("/ɐ/", "V-O", "Cama"),
    ("/ɛ/", "V-O", "Pé"),
    ("/e/", "V-O", "Mesa"),
    ("/ə/", "V-O", "Sede"),
    ("/i/", "V-O", "Vida"),
    ("/ɔ/", "V-O", "Pó"),
    ("/o/", "V-O", "Ovo"),
    ("/u/", "V-O", "Luz"),
    ("/ɐ̃/", "V-N", "Mãe"),
    ("/ẽ/", "V-N", "Bem"),
    ("/ĩ/", "V-N", "Fim"),
    ("/õ/", "V-N", "Bom"),
    ("/ũ/", "V-N", "Um"),
];

fn print_alphabet() {
    println!("Alfabeto Lusofonema:\n");
    println!("Letra | Nome  | Som");
    println!("-------------------------------");
    for (letter, name, sound) in ALPHABET {
        println!(" {letter:<5}| {name:<5} | {sound}");
    }
}

fn print_sounds() {
    println!("Sons do alfabeto fonético:\n");
    println!("Legenda: C-O oclusiva, C-F fricativa, C-N nasal, C-L lateral,");
    println!("         C-V vibrante, SV semivogal, V-O vogal oral, V-N vogal nasal\n");
    println!("Som  | Tipo | Palavra exemplo");
    println!("----------------------------");
    for (sound, kind, example) in SOUNDS {
        println!("{sound:<5}| {kind:<5}| {example}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_like() {
        assert_eq!(capitalize_like("Casa", "cáza"), "Cáza");
        assert_eq!(capitalize_like("casa", "cáza"), "cáza");
        assert_eq!(capitalize_like("Casa", ""), "");
    }
}
