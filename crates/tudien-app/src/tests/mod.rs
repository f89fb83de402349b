//! Session and event loop tests against a scripted dictionary

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tudien_core::{DictionaryService, LookupQuery, MemoryLocation, ServiceMetadata};
use tudien_types::{FailureReason, LookupOutcome, RawMeaning, RawPronunciation, RawResultEntry};

use crate::session::SearchSession;


/// Same ceiling the HTTP gateway applies by default
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(20);

/// Dictionary with canned answers and per-word latency.
///
/// Every call is bounded by [`GATEWAY_TIMEOUT`], like the real gateway.
#[derive(Default)]
pub struct FakeDictionary {
    lookups: Mutex<HashMap<String, (Duration, LookupOutcome)>>,
    suggestions: Mutex<HashMap<String, Result<Vec<String>, FailureReason>>>,
    lookup_calls: Mutex<Vec<String>>,
    suggest_calls: Mutex<Vec<String>>,
}

impl FakeDictionary {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_lookup(&self, word: &str, delay: Duration, outcome: LookupOutcome) {
        self.lookups
            .lock()
            .unwrap()
            .insert(word.to_string(), (delay, outcome));
    }

    pub fn on_suggest(&self, word: &str, result: Result<Vec<String>, FailureReason>) {
        self.suggestions
            .lock()
            .unwrap()
            .insert(word.to_string(), result);
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.lookup_calls.lock().unwrap().clone()
    }

    pub fn suggest_calls(&self) -> Vec<String> {
        self.suggest_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DictionaryService for FakeDictionary {
    async fn lookup(&self, query: &LookupQuery) -> LookupOutcome {
        self.lookup_calls
            .lock()
            .unwrap()
            .push(query.as_str().to_string());

        let scripted = self.lookups.lock().unwrap().get(query.as_str()).cloned();
        let (delay, outcome) = scripted.unwrap_or((Duration::ZERO, LookupOutcome::NotFound));

        match tokio::time::timeout(GATEWAY_TIMEOUT, tokio::time::sleep(delay)).await {
            Ok(()) => outcome,
            Err(_) => LookupOutcome::Failed {
                reason: FailureReason::Timeout,
            },
        }
    }

    async fn suggest(&self, query: &LookupQuery) -> Result<Vec<String>, FailureReason> {
        self.suggest_calls
            .lock()
            .unwrap()
            .push(query.as_str().to_string());

        self.suggestions
            .lock()
            .unwrap()
            .get(query.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata {
            name: "fake".to_string(),
            base_url: "http://fake/".to_string(),
        }
    }
}

pub fn session(fake: &Arc<FakeDictionary>, href: &str) -> SearchSession<MemoryLocation> {
    let service: Arc<dyn DictionaryService> = fake.clone();
    SearchSession::new(service, MemoryLocation::parse(href))
}

pub fn meaning(definition: &str, pos: Option<&str>, lang: Option<&str>) -> RawMeaning {
    RawMeaning {
        definition: definition.to_string(),
        pos: pos.map(str::to_string),
        definition_lang: lang.map(str::to_string),
        ..Default::default()
    }
}

pub fn pronunciation(ipa: &str, region: Option<&str>) -> RawPronunciation {
    RawPronunciation {
        ipa: ipa.to_string(),
        region: region.map(str::to_string),
    }
}

pub fn entry(lang_code: &str, lang_name: &str, meanings: Vec<RawMeaning>) -> RawResultEntry {
    RawResultEntry {
        lang_code: lang_code.to_string(),
        lang_name: lang_name.to_string(),
        meanings,
        ..Default::default()
    }
}

pub fn found(word: &str, entries: Vec<RawResultEntry>) -> LookupOutcome {
    LookupOutcome::Found {
        word: word.to_string(),
        entries,
    }
}

/// One Vietnamese entry with a single noun sense
pub fn simple_found(word: &str) -> LookupOutcome {
    found(
        word,
        vec![entry(
            "vi",
            "Tiếng Việt",
            vec![meaning(&format!("nghĩa của {word}"), Some("Danh từ"), Some("vi"))],
        )],
    )
}
