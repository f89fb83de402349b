use tudien_types::{FailureReason, LookupOutcome};

use crate::query::LookupQuery;

/// Remote dictionary interface
#[async_trait::async_trait]
pub trait DictionaryService: Send + Sync {
    /// Look up a single word
    async fn lookup(&self, query: &LookupQuery) -> LookupOutcome;

    /// Related words for a query, at most one page
    async fn suggest(&self, query: &LookupQuery) -> Result<Vec<String>, FailureReason>;

    /// Suggestions as a best-effort enhancement: failures become an empty list
    async fn suggest_or_empty(&self, query: &LookupQuery) -> Vec<String> {
        match self.suggest(query).await {
            Ok(suggestions) => suggestions,
            Err(reason) => {
                tracing::warn!("Suggestions for '{}' unavailable: {}", query, reason);
                Vec::new()
            }
        }
    }

    /// Provider metadata
    fn metadata(&self) -> ServiceMetadata;
}

#[derive(Debug, Clone)]
pub struct ServiceMetadata {
    pub name: String,
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    #[async_trait::async_trait]
    impl DictionaryService for Unreachable {
        async fn lookup(&self, _query: &LookupQuery) -> LookupOutcome {
            LookupOutcome::Failed {
                reason: FailureReason::NetworkError,
            }
        }

        async fn suggest(&self, _query: &LookupQuery) -> Result<Vec<String>, FailureReason> {
            Err(FailureReason::Timeout)
        }

        fn metadata(&self) -> ServiceMetadata {
            ServiceMetadata {
                name: "unreachable".to_string(),
                base_url: String::new(),
            }
        }
    }

    #[tokio::test]
    async fn test_suggest_failure_is_swallowed() {
        let query = LookupQuery::parse("tau").unwrap();
        assert!(Unreachable.suggest_or_empty(&query).await.is_empty());
    }
}
