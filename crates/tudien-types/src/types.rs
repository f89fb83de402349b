use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
///
/// The service omits and nulls fields interchangeably.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single sense of a word as returned by the dictionary service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawMeaning {
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawPronunciation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipa: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawTranslation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRelation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relation_type: String,
}

/// One matched language variant of a looked-up word.
///
/// Meanings are always flat here: the gateway folds every payload shape
/// into this form before anything else sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawResultEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meanings: Vec<RawMeaning>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pronunciations: Vec<RawPronunciation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translations: Vec<RawTranslation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<RawRelation>,
}

/// Why a lookup could not produce an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    Timeout,
    NetworkError,
    ServerError,
}

impl FailureReason {
    /// HTTP-style status reported to callers of the proxy and controller
    pub fn status_code(&self) -> u16 {
        match self {
            FailureReason::Timeout => 408,
            FailureReason::NetworkError | FailureReason::ServerError => 500,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => write!(f, "request timeout"),
            FailureReason::NetworkError => write!(f, "network error"),
            FailureReason::ServerError => write!(f, "server error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    NotFound,
    Found {
        word: String,
        entries: Vec<RawResultEntry>,
    },
    Failed {
        reason: FailureReason,
    },
}

impl LookupOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            LookupOutcome::NotFound | LookupOutcome::Found { .. } => 200,
            LookupOutcome::Failed { reason } => reason.status_code(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found { .. })
    }
}

/// User intents fed into the search session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Submit(String),
    SelectRelated(String),
    SelectSuggestion(usize),
    Clear,
    SelectTab(usize),
    TogglePronunciation(usize),
    PlayAudio,
    ShowUrl,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaning_without_pos_or_language() {
        let meaning: RawMeaning = serde_json::from_str(
            r#"{"definition": "người học ở bậc phổ thông", "pos": "Danh từ"}"#,
        )
        .unwrap();

        assert_eq!(meaning.pos.as_deref(), Some("Danh từ"));
        assert_eq!(meaning.definition_lang, None);
        assert_eq!(meaning.example, None);
    }

    #[test]
    fn test_entry_optional_lists_default_to_empty() {
        let entry: RawResultEntry =
            serde_json::from_str(r#"{"lang_code": "vi", "lang_name": "Tiếng Việt", "meanings": []}"#)
                .unwrap();

        assert!(entry.pronunciations.is_empty());
        assert!(entry.translations.is_empty());
        assert!(entry.relations.is_empty());
        assert_eq!(entry.audio, None);
    }

    #[test]
    fn test_null_fields_default() {
        let entry: RawResultEntry = serde_json::from_str(
            r#"{
                "lang_code": "vi",
                "lang_name": null,
                "meanings": [{"definition": null, "pos": null}],
                "pronunciations": [{"ipa": null, "region": "Hà-Nội"}],
                "translations": null,
                "relations": [{"related_word": "học trò", "relation_type": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(entry.lang_name, "");
        assert_eq!(entry.meanings[0].definition, "");
        assert_eq!(entry.meanings[0].pos, None);
        assert_eq!(entry.pronunciations[0].ipa, "");
        assert!(entry.translations.is_empty());
        assert_eq!(entry.relations[0].relation_type, "");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LookupOutcome::NotFound.status_code(), 200);
        assert_eq!(
            LookupOutcome::Failed {
                reason: FailureReason::Timeout
            }
            .status_code(),
            408
        );
        assert_eq!(
            LookupOutcome::Failed {
                reason: FailureReason::NetworkError
            }
            .status_code(),
            500
        );
        assert_eq!(FailureReason::ServerError.status_code(), 500);
    }
}
