use ahash::AHashSet;
use lazy_static::lazy_static;
use regex::Regex;

/// Characters that are not allowed in file names on common filesystems.
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub const DEFAULT_BOILERPLATE_PHRASES: &[&str] = &["premium ebooks"];

pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "by",
    "the",
    "a",
    "an",
    "booksfree4u",
    "freebooks",
    "ebooks",
    "book",
    "variabletribe",
    "iamvariable",
    "selfhelpbooks",
    "selfhelpbooks4u",
    "pdf",
    "pdfdrive",
];

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[_\-]").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref CHANNEL_TAG: Regex = Regex::new(r"^@\S+[\s_]+").unwrap();
}

/// Split `name` into stem and extension, the extension keeping its dot.
///
/// Only the last path segment is considered, and dots at the start of that
/// segment never begin an extension (`.bashrc` has none).
pub fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name
        .rfind(|c: char| c == '/' || c == '\\')
        .map_or(0, |i| i + 1);
    let base = &name[base_start..];

    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => {
            let at = base_start + dot;
            (&name[..at], &name[at..])
        }
        _ => (name, ""),
    }
}

/// Turns noisy file names into a canonical form used only for comparison.
#[derive(Debug, Clone)]
pub struct Normalizer {
    boilerplate_phrases: Vec<String>,
    stop_words: AHashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_BOILERPLATE_PHRASES, DEFAULT_STOP_WORDS)
    }
}

impl Normalizer {
    pub fn new<P, W>(boilerplate_phrases: P, stop_words: W) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let boilerplate_phrases = boilerplate_phrases
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        let stop_words = stop_words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();

        Self {
            boilerplate_phrases,
            stop_words,
        }
    }

    /// Normalize a raw file name: drop the extension, then clean the stem.
    pub fn normalize(&self, raw_name: &str) -> String {
        let (stem, _) = split_extension(raw_name);
        self.clean_stem(stem)
    }

    /// Clean a name whose extension has already been removed.
    pub fn clean_stem(&self, stem: &str) -> String {
        let replaced: String = stem
            .chars()
            .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
            .collect();
        let lowered = replaced.to_lowercase();
        let spaced = SEPARATORS.replace_all(&lowered, " ");
        let stripped = NON_WORD.replace_all(&spaced, "");
        let collapsed = WHITESPACE.replace_all(&stripped, " ");
        let untagged = CHANNEL_TAG.replace(collapsed.trim(), "");

        let mut name = untagged.into_owned();
        for phrase in &self.boilerplate_phrases {
            name = name.replace(phrase.as_str(), "");
        }

        name.split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
