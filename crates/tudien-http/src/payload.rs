use indexmap::IndexMap;
use serde::Deserialize;
use tudien_types::{
    LookupOutcome, RawMeaning, RawPronunciation, RawRelation, RawResultEntry, RawTranslation,
    null_as_default,
};
use url::Url;

/// Language assumed for the legacy single-language response shape
const LEGACY_LANG_CODE: &str = "vi";
const LEGACY_LANG_NAME: &str = "Tiếng Việt";

/// Meanings as the service may send them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireMeanings {
    Flat(Vec<RawMeaning>),
    ByPos(IndexMap<String, Vec<RawMeaning>>),
    ByLanguage(IndexMap<String, IndexMap<String, Vec<RawMeaning>>>),
}

impl WireMeanings {
    /// Flatten grouped shapes, filling in the keys they were grouped by
    fn flatten(self) -> Vec<RawMeaning> {
        match self {
            WireMeanings::Flat(meanings) => meanings,
            WireMeanings::ByPos(by_pos) => by_pos
                .into_iter()
                .flat_map(|(pos, meanings)| with_pos(pos, meanings))
                .collect(),
            WireMeanings::ByLanguage(by_language) => by_language
                .into_iter()
                .flat_map(|(lang, by_pos)| {
                    by_pos
                        .into_iter()
                        .flat_map(|(pos, meanings)| with_pos(pos, meanings))
                        .map(move |mut meaning| {
                            if is_blank(&meaning.definition_lang) {
                                meaning.definition_lang = Some(lang.clone());
                            }
                            meaning
                        })
                        .collect::<Vec<_>>()
                })
                .collect(),
        }
    }
}

fn with_pos(pos: String, meanings: Vec<RawMeaning>) -> impl Iterator<Item = RawMeaning> {
    meanings.into_iter().map(move |mut meaning| {
        if is_blank(&meaning.pos) {
            meaning.pos = Some(pos.clone());
        }
        meaning
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct WireResultEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    lang_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    lang_name: String,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    meanings: Option<WireMeanings>,
    #[serde(default)]
    pronunciations: Option<Vec<RawPronunciation>>,
    #[serde(default)]
    translations: Option<Vec<RawTranslation>>,
    #[serde(default)]
    relations: Option<Vec<RawRelation>>,
}

impl WireResultEntry {
    fn into_entry(self, origin: &Url) -> RawResultEntry {
        RawResultEntry {
            lang_code: self.lang_code,
            lang_name: self.lang_name,
            audio: self.audio.and_then(|audio| absolute_audio_url(&audio, origin)),
            meanings: self.meanings.map(WireMeanings::flatten).unwrap_or_default(),
            pronunciations: self.pronunciations.unwrap_or_default(),
            translations: self.translations.unwrap_or_default(),
            relations: self.relations.unwrap_or_default(),
        }
    }
}

/// Body of the lookup endpoint, either the multi-language `results`
/// shape or the legacy flat `meanings` shape
#[derive(Debug, Deserialize)]
pub struct LookupPayload {
    #[serde(default)]
    exists: Option<bool>,
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    results: Option<Vec<WireResultEntry>>,
    #[serde(default)]
    meanings: Option<WireMeanings>,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    pronunciations: Option<Vec<RawPronunciation>>,
}

impl LookupPayload {
    /// Fold the payload into one canonical outcome.
    ///
    /// `origin` resolves relative audio paths; `queried` names the result
    /// when the service omits `word`.
    pub fn into_outcome(self, origin: &Url, queried: &str) -> LookupOutcome {
        if self.exists == Some(false) {
            return LookupOutcome::NotFound;
        }

        let entries: Vec<RawResultEntry> = match (self.results, self.meanings) {
            (Some(results), _) => results
                .into_iter()
                .map(|entry| entry.into_entry(origin))
                .collect(),
            (None, Some(meanings)) => vec![
                WireResultEntry {
                    lang_code: LEGACY_LANG_CODE.to_string(),
                    lang_name: LEGACY_LANG_NAME.to_string(),
                    audio: self.audio,
                    meanings: Some(meanings),
                    pronunciations: self.pronunciations,
                    translations: None,
                    relations: None,
                }
                .into_entry(origin),
            ],
            (None, None) => Vec::new(),
        };

        if entries.is_empty() {
            return LookupOutcome::NotFound;
        }

        let word = self
            .word
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| queried.to_string());

        LookupOutcome::Found { word, entries }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

/// Resolve a service-relative audio path against the service origin
pub(crate) fn absolute_audio_url(audio: &str, origin: &Url) -> Option<String> {
    let audio = audio.trim();
    if audio.is_empty() {
        return None;
    }

    if Url::parse(audio).is_ok() {
        return Some(audio.to_string());
    }

    match origin.join(audio) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            tracing::warn!("Dropping unresolvable audio path '{}': {}", audio, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn origin() -> Url {
        Url::parse("https://dict.example.com/").unwrap()
    }

    fn parse(json: &str) -> LookupOutcome {
        serde_json::from_str::<LookupPayload>(json)
            .unwrap()
            .into_outcome(&origin(), "queried")
    }

    #[test]
    fn test_exists_false_is_not_found() {
        assert_eq!(parse(r#"{"exists": false}"#), LookupOutcome::NotFound);
    }

    #[test]
    fn test_legacy_flat_meanings_become_one_entry() {
        let outcome = parse(
            r#"{
                "exists": true,
                "word": "học sinh",
                "meanings": [{
                    "definition": "người học ở bậc phổ thông",
                    "example": "học sinh tiểu học ~ thời học sinh",
                    "pos": "Danh từ",
                    "sub_pos": "Danh từ chỉ vật, hiện tượng"
                }]
            }"#,
        );

        let LookupOutcome::Found { word, entries } = outcome else {
            panic!("expected a found outcome");
        };
        assert_eq!(word, "học sinh");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].lang_code, "vi");
        assert_eq!(entries[0].meanings.len(), 1);
        assert_eq!(entries[0].meanings[0].pos.as_deref(), Some("Danh từ"));
    }

    #[test]
    fn test_results_shape_rewrites_relative_audio() {
        let outcome = parse(
            r#"{
                "exists": true,
                "word": "tau",
                "results": [
                    {"lang_code": "vi", "lang_name": "Tiếng Việt", "audio": "/audio/tau.mp3", "meanings": []},
                    {"lang_code": "en", "lang_name": "Tiếng Anh", "audio": "https://cdn.example.com/tau.mp3", "meanings": null},
                    {"lang_code": "zh", "lang_name": "Tiếng Trung", "audio": "media/tau.ogg"}
                ]
            }"#,
        );

        let LookupOutcome::Found { entries, .. } = outcome else {
            panic!("expected a found outcome");
        };
        let audio: Vec<_> = entries.iter().map(|e| e.audio.clone()).collect();
        assert_eq!(
            audio,
            vec![
                Some("https://dict.example.com/audio/tau.mp3".to_string()),
                Some("https://cdn.example.com/tau.mp3".to_string()),
                Some("https://dict.example.com/media/tau.ogg".to_string()),
            ]
        );
    }

    #[test]
    fn test_grouped_meanings_are_flattened() {
        let outcome = parse(
            r#"{
                "exists": true,
                "word": "tau",
                "results": [{
                    "lang_code": "vi",
                    "lang_name": "Tiếng Việt",
                    "meanings": {
                        "vi": {
                            "Đại từ": [{"definition": "tôi"}],
                            "Danh từ": [{"definition": "tàu", "pos": "Danh từ"}]
                        }
                    }
                }]
            }"#,
        );

        let LookupOutcome::Found { entries, .. } = outcome else {
            panic!("expected a found outcome");
        };
        let meanings = &entries[0].meanings;
        assert_eq!(meanings.len(), 2);
        assert_eq!(meanings[0].pos.as_deref(), Some("Đại từ"));
        assert_eq!(meanings[0].definition_lang.as_deref(), Some("vi"));
        assert_eq!(meanings[1].definition, "tàu");
    }

    #[test]
    fn test_missing_word_falls_back_to_query() {
        let outcome = parse(r#"{"exists": true, "meanings": [{"definition": "x"}]}"#);
        assert!(matches!(outcome, LookupOutcome::Found { ref word, .. } if word == "queried"));
    }

    fn found_entries(json: &str) -> Vec<RawResultEntry> {
        match parse(json) {
            LookupOutcome::Found { entries, .. } => entries,
            other => panic!("expected a found outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_null_lang_name_is_tolerated() {
        let entries = found_entries(
            r#"{"exists": true, "word": "tau", "results": [
                {"lang_code": "vi", "lang_name": null, "meanings": [{"definition": "tàu"}]}
            ]}"#,
        );
        assert_eq!(entries[0].lang_code, "vi");
        assert_eq!(entries[0].lang_name, "");
        assert_eq!(entries[0].meanings[0].definition, "tàu");
    }

    #[test]
    fn test_null_ipa_is_tolerated() {
        let entries = found_entries(
            r#"{"exists": true, "word": "tau", "results": [
                {"lang_code": "vi", "lang_name": "Tiếng Việt",
                 "pronunciations": [{"ipa": null, "region": "Hà-Nội"}, {"ipa": "taw˧˧"}]}
            ]}"#,
        );
        let ipas: Vec<_> = entries[0].pronunciations.iter().map(|p| p.ipa.as_str()).collect();
        assert_eq!(ipas, vec!["", "taw˧˧"]);
    }

    #[test]
    fn test_null_relation_type_is_tolerated() {
        let entries = found_entries(
            r#"{"exists": true, "word": "tau", "results": [
                {"lang_code": "vi", "lang_name": "Tiếng Việt",
                 "relations": [{"related_word": "tàu thuỷ", "relation_type": null}]}
            ]}"#,
        );
        assert_eq!(entries[0].relations[0].related_word, "tàu thuỷ");
        assert_eq!(entries[0].relations[0].relation_type, "");
    }

    #[test]
    fn test_null_inside_grouped_meaning_is_tolerated() {
        let entries = found_entries(
            r#"{"exists": true, "word": "tau", "results": [{
                "lang_code": "vi", "lang_name": "Tiếng Việt",
                "meanings": {"Danh từ": [{"definition": null, "example": null}]}
            }]}"#,
        );
        assert_eq!(entries[0].meanings[0].definition, "");
        assert_eq!(entries[0].meanings[0].pos.as_deref(), Some("Danh từ"));
    }

    #[test]
    fn test_null_suggestions_are_empty() {
        let payload: SuggestPayload = serde_json::from_str(r#"{"suggestions": null}"#).unwrap();
        assert!(payload.suggestions.is_empty());
    }

    #[test]
    fn test_no_entries_is_not_found() {
        assert_eq!(parse(r#"{"exists": true, "results": []}"#), LookupOutcome::NotFound);
        assert_eq!(parse(r#"{}"#), LookupOutcome::NotFound);
    }
}
