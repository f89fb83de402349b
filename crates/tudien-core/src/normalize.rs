//! Grouping of raw lookup entries into the shape the UI renders.
//!
//! Meanings are grouped by definition language, then by part of speech.
//! Both levels keep the order in which a key first appears in the source,
//! since the service already returns senses by relevance.

use indexmap::IndexMap;
use tudien_types::{RawMeaning, RawPronunciation, RawResultEntry};
use unicode_normalization::UnicodeNormalization;

/// Category used for a missing part of speech or definition language
pub const OTHER_LABEL: &str = "Khác";

/// Regions preferred for the headline pronunciation, highest priority first
const PRIMARY_REGIONS: [&str; 2] = ["Hà-Nội", "UK"];

pub type PosGroups = IndexMap<String, Vec<RawMeaning>>;
pub type LanguageGroups = IndexMap<String, PosGroups>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedEntry {
    /// Source entry; its meanings are stored in display order
    pub entry: RawResultEntry,
    pub meanings_by_language: LanguageGroups,
    pub primary_pronunciation: Option<RawPronunciation>,
    pub secondary_pronunciations: Vec<RawPronunciation>,
}

impl GroupedEntry {
    /// Meanings in display order: language group, then pos group, then source order
    pub fn flatten_meanings(&self) -> Vec<RawMeaning> {
        self.meanings_by_language
            .values()
            .flat_map(|by_pos| by_pos.values().flatten().cloned())
            .collect()
    }

    pub fn meaning_count(&self) -> usize {
        self.meanings_by_language
            .values()
            .flat_map(|by_pos| by_pos.values())
            .map(Vec::len)
            .sum()
    }

    pub fn has_meanings(&self) -> bool {
        self.meaning_count() > 0
    }

    /// Tab title for this entry
    pub fn title(&self) -> &str {
        if self.entry.lang_name.is_empty() {
            &self.entry.lang_code
        } else {
            &self.entry.lang_name
        }
    }
}

/// Display label for a definition language code
pub fn language_label(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some("vi") => "Tiếng Việt".to_string(),
        Some("en") => "Tiếng Anh".to_string(),
        Some(code) if !code.is_empty() => code.to_string(),
        _ => OTHER_LABEL.to_string(),
    }
}

pub fn pos_label(pos: Option<&str>) -> String {
    match pos.map(str::trim) {
        Some(pos) if !pos.is_empty() => pos.to_string(),
        _ => OTHER_LABEL.to_string(),
    }
}

/// Group one raw entry. Pure and deterministic.
pub fn normalize(entry: &RawResultEntry) -> GroupedEntry {
    let meanings_by_language = group_meanings(&entry.meanings);
    let (primary_pronunciation, secondary_pronunciations) =
        split_pronunciations(&entry.pronunciations);

    let mut grouped = GroupedEntry {
        entry: entry.clone(),
        meanings_by_language,
        primary_pronunciation,
        secondary_pronunciations,
    };
    grouped.entry.meanings = grouped.flatten_meanings();
    grouped
}

/// Flatten an already grouped entry and group it again
pub fn regroup(grouped: &GroupedEntry) -> GroupedEntry {
    let mut entry = grouped.entry.clone();
    entry.meanings = grouped.flatten_meanings();
    normalize(&entry)
}

fn group_meanings(meanings: &[RawMeaning]) -> LanguageGroups {
    let mut groups = LanguageGroups::new();

    for meaning in meanings {
        let language = language_label(meaning.definition_lang.as_deref());
        let pos = pos_label(meaning.pos.as_deref());

        groups
            .entry(language)
            .or_default()
            .entry(pos)
            .or_default()
            .push(meaning.clone());
    }

    groups
}

/// Index of the headline pronunciation, if any
pub fn primary_pronunciation_index(pronunciations: &[RawPronunciation]) -> Option<usize> {
    if pronunciations.is_empty() {
        return None;
    }

    PRIMARY_REGIONS
        .iter()
        .find_map(|needle| {
            pronunciations.iter().position(|p| {
                p.region
                    .as_deref()
                    .is_some_and(|region| region.nfc().collect::<String>().contains(needle))
            })
        })
        .or(Some(0))
}

fn split_pronunciations(
    pronunciations: &[RawPronunciation],
) -> (Option<RawPronunciation>, Vec<RawPronunciation>) {
    let Some(primary) = primary_pronunciation_index(pronunciations) else {
        return (None, Vec::new());
    };

    // Excluded by position: identical IPA from another region is still a secondary
    let secondary = pronunciations
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != primary)
        .map(|(_, p)| p.clone())
        .collect();

    (Some(pronunciations[primary].clone()), secondary)
}
