use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    domain::{
        common::{EnrichmentConfig, MAX_EXTERNAL_TIMEOUT, entities::app_errors::CoreError},
        enrichment::{entities::LookupPage, ports::IngredientLookup},
        ingredient::entities::IngredientKey,
    },
    infrastructure::enrichment::html::parse_page,
};

const USER_AGENT: &str = concat!("inciscope/", env!("CARGO_PKG_VERSION"));

/// Fetches ingredient pages from a public reference site.
#[derive(Debug, Clone)]
pub struct HttpIngredientLookup {
    base_url: Option<String>,
    client: Client,
}

impl HttpIngredientLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let client = Client::builder()
            .timeout(timeout.min(MAX_EXTERNAL_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CoreError::ExternalServiceError(e.to_string()))?;

        Ok(Self {
            base_url: Some(base_url),
            client,
        })
    }

    /// A lookup that never leaves the process and always answers `Ok(None)`.
    pub fn disabled() -> Self {
        Self {
            base_url: None,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &EnrichmentConfig) -> Result<Self, CoreError> {
        if config.enabled {
            Self::new(config.base_url.clone(), config.effective_timeout())
        } else {
            Ok(Self::disabled())
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    fn page_url(&self, key: &IngredientKey) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base_url| format!("{base_url}{}", slug(key)))
    }
}

/// `SODIUM_LAURETH_SULFATE` -> `sodium-laureth-sulfate`.
pub fn slug(key: &IngredientKey) -> String {
    key.as_str().to_lowercase().replace('_', "-")
}

impl IngredientLookup for HttpIngredientLookup {
    async fn lookup(&self, key: &IngredientKey) -> Result<Option<LookupPage>, CoreError> {
        let Some(url) = self.page_url(key) else {
            return Ok(None);
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::EnrichmentFailure(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "reference page not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CoreError::EnrichmentFailure(format!(
                "reference site answered {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::EnrichmentFailure(e.to_string()))?;

        Ok(parse_page(&body))
    }
}
