//! Skill Extractor: dictionary-driven whole-word matching of keys and aliases.
//!
//! Every key and alias of every item is a literal match term. A term hits when
//! it occurs case-insensitively in the text and each of its edges that is an
//! ASCII word character is not glued to another ASCII word character. CJK text
//! and punctuation around a term therefore count as boundaries, which is what
//! lets `熟练掌握React和TS开发` yield both skills.
//!
//! A hit resolves back to the FIRST item owning the normalized term. Shared
//! aliases are ambiguous and the earlier item wins.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::{debug, warn};

use crate::dictionary::DictionaryItem;
use crate::extract::normalize::normalize_tag;

struct MatchTerm {
    pattern: Regex,
    guard_start: bool,
    guard_end: bool,
    normalized: String,
}

/// Compiled match terms for one dictionary selection.
pub struct SkillMatcher {
    terms: Vec<MatchTerm>,
    /// normalized term → canonical key of the first owning item
    owners: HashMap<String, String>,
}

impl SkillMatcher {
    pub fn new(dictionaries: &[DictionaryItem]) -> Self {
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut terms = Vec::new();

        for item in dictionaries {
            let canonical = normalize_tag(&item.key);
            let surface_forms = std::iter::once(&item.key).chain(item.aliases.iter());

            for surface in surface_forms {
                let normalized = normalize_tag(surface);
                if normalized.is_empty() {
                    continue;
                }
                owners
                    .entry(normalized.clone())
                    .or_insert_with(|| canonical.clone());

                match compile_term(surface) {
                    Ok(pattern) => terms.push(MatchTerm {
                        pattern,
                        guard_start: surface.chars().next().is_some_and(is_word_char),
                        guard_end: surface.chars().next_back().is_some_and(is_word_char),
                        normalized,
                    }),
                    Err(e) => warn!("Skipping dictionary term '{surface}': {e}"),
                }
            }
        }

        Self { terms, owners }
    }

    /// Returns canonical keys found in `text`, deduplicated, in dictionary order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for term in &self.terms {
            if !term_occurs(term, text) {
                continue;
            }
            if let Some(key) = self.owners.get(&term.normalized) {
                if seen.insert(key.clone()) {
                    skills.push(key.clone());
                }
            }
        }

        debug!("Extracted {} skills from {} chars", skills.len(), text.len());
        skills
    }
}

/// Extracts canonical skill keys from free text.
pub fn extract_skills(text: &str, dictionaries: &[DictionaryItem]) -> Vec<String> {
    SkillMatcher::new(dictionaries).extract(text)
}

fn compile_term(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", regex::escape(term)))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn term_occurs(term: &MatchTerm, text: &str) -> bool {
    term.pattern.find_iter(text).any(|m| {
        let start_ok = !term.guard_start
            || !text[..m.start()].chars().next_back().is_some_and(is_word_char);
        let end_ok =
            !term.guard_end || !text[m.end()..].chars().next().is_some_and(is_word_char);
        start_ok && end_ok
    })
}
