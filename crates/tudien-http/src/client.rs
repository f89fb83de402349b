use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use tudien_config::service::ServiceConfig;
use tudien_core::{DictionaryService, LookupQuery, ServiceMetadata};
use tudien_types::{FailureReason, LookupOutcome};
use url::Url;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::payload::{LookupPayload, SuggestPayload};

/// Lookup and suggestion gateways backed by the remote dictionary API
#[derive(Clone)]
pub struct HttpDictionary {
    client: reqwest::Client,
    lookup_url: Url,
    suggest_url: Url,
    /// Service origin, used to absolutize audio paths
    origin: Url,
    timeout: Duration,
    suggestion_limit: usize,
}

impl HttpDictionary {
    pub fn new(config: &ServiceConfig) -> Result<Self, GatewayError> {
        let base = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))?;

        Ok(Self {
            client: reqwest::Client::new(),
            lookup_url: base.join("lookup")?,
            suggest_url: base.join("suggest")?,
            origin: base.join("/")?,
            timeout: config.timeout(),
            suggestion_limit: config.suggestion_limit(),
        })
    }

    /// Override the per-request time bound
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Fetch the raw lookup payload
    pub async fn fetch_lookup(&self, query: &LookupQuery) -> Result<LookupPayload, GatewayError> {
        self.get_json(self.lookup_url.clone(), &[("word", query.as_str().to_string())])
            .await
    }

    /// Fetch one page of suggestions, without filtering
    pub async fn fetch_suggestions(&self, query: &LookupQuery) -> Result<Vec<String>, GatewayError> {
        let params = [
            ("q", query.as_str().to_string()),
            ("limit", self.suggestion_limit.to_string()),
        ];
        let payload: SuggestPayload = self.get_json(self.suggest_url.clone(), &params).await?;

        let mut suggestions = payload.suggestions;
        suggestions.truncate(self.suggestion_limit);
        Ok(suggestions)
    }

    /// GET a JSON document. The whole exchange is bounded by `self.timeout`;
    /// on expiry the request future is dropped, which aborts the connection.
    async fn get_json<T>(&self, url: Url, params: &[(&str, String)]) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let request = async {
            let response = self
                .client
                .get(url)
                .query(params)
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::Status(status));
            }

            response.json::<T>().await.map_err(GatewayError::Decode)
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl DictionaryService for HttpDictionary {
    async fn lookup(&self, query: &LookupQuery) -> LookupOutcome {
        let span = tracing::info_span!("lookup", request_id = %Uuid::new_v4(), word = %query);

        async {
            match self.fetch_lookup(query).await {
                Ok(payload) => {
                    let outcome = payload.into_outcome(&self.origin, query.as_str());
                    tracing::debug!("Lookup finished, found: {}", outcome.is_found());
                    outcome
                }
                Err(e) => {
                    tracing::warn!("Lookup failed: {}", e);
                    LookupOutcome::Failed { reason: e.reason() }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn suggest(&self, query: &LookupQuery) -> Result<Vec<String>, FailureReason> {
        let span = tracing::info_span!("suggest", request_id = %Uuid::new_v4(), q = %query);

        async {
            self.fetch_suggestions(query).await.map_err(|e| {
                tracing::warn!("Suggest failed: {}", e);
                e.reason()
            })
        }
        .instrument(span)
        .await
    }

    fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata {
            name: "minhqnd dictionary".to_string(),
            base_url: self.origin.to_string(),
        }
    }
}
