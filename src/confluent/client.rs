//! Confluent Cloud Client
//!
//! One [`ClientFactory`] owns the endpoint, the retrying transport and the
//! credentials. Per-service clients are cheap views over it, parameterized by
//! an [`ApiService`] descriptor.

use super::auth::Credentials;
use super::http::{sanitize_for_log, RetryPolicy, RetryingClient};
use super::pagination::{ListPage, PAGE_SIZE_QUERY_PARAMETER, PAGE_TOKEN_QUERY_PARAMETER};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use url::Url;

/// Public Confluent Cloud API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.confluent.cloud";

/// A versioned REST API mounted under the shared endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiService {
    pub name: &'static str,
    pub base_path: &'static str,
}

/// IAM v2: service accounts, API keys
pub const IAM_V2: ApiService = ApiService {
    name: "iam/v2",
    base_path: "/iam/v2",
};

/// Org v2: environments
pub const ORG_V2: ApiService = ApiService {
    name: "org/v2",
    base_path: "/org/v2",
};

/// Builds per-service API clients sharing one transport
#[derive(Clone)]
pub struct ClientFactory {
    base_url: Url,
    http: RetryingClient,
    credentials: Credentials,
}

impl ClientFactory {
    /// Create a factory for `endpoint`
    pub fn new(endpoint: &str, policy: RetryPolicy, credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;

        if !credentials.is_complete() {
            tracing::warn!("Could not find Confluent Cloud API Key");
        }

        let http = RetryingClient::new(policy)?;
        tracing::debug!(
            "Client factory for {} (max retries: {})",
            base_url,
            policy.max_retries
        );

        Ok(Self {
            base_url,
            http,
            credentials,
        })
    }

    /// Client for one backing API
    pub fn client<'a>(&'a self, service: &'static ApiService) -> ApiClient<'a> {
        ApiClient {
            service,
            factory: self,
        }
    }
}

/// Typed client for a single [`ApiService`]
#[derive(Clone, Copy)]
pub struct ApiClient<'a> {
    service: &'static ApiService,
    factory: &'a ClientFactory,
}

impl ApiClient<'_> {
    /// Build the URL of a collection, e.g. `{endpoint}/iam/v2/service-accounts`
    pub fn collection_url(&self, collection: &str) -> Result<Url> {
        let raw = format!(
            "{}{}/{}",
            self.factory.base_url.as_str().trim_end_matches('/'),
            self.service.base_path,
            collection.trim_start_matches('/')
        );
        Url::parse(&raw).with_context(|| format!("Invalid collection URL: {}", raw))
    }

    /// Fetch a single page of `collection`
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        collection: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListPage<T>> {
        let mut url = self.collection_url(collection)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(PAGE_SIZE_QUERY_PARAMETER, &page_size.to_string());
            if let Some(token) = page_token {
                query.append_pair(PAGE_TOKEN_QUERY_PARAMETER, token);
            }
        }

        tracing::debug!("GET {} [{}]", url, self.service.name);

        let mut request = self.factory.http.inner().get(url);
        if let Some((user, password)) = self.factory.credentials.basic_auth() {
            request = request.basic_auth(user, Some(password));
        }
        let request = request.build().context("Failed to build request")?;

        let response = self
            .factory
            .http
            .execute(request)
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::debug!("API error: {} - {}", status, sanitize_for_log(&body));
            bail!("API request failed: {}", status);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}
