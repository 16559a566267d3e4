//! Schema client builder and HTTP client implementation.

use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::source::SchemaSource;
use pocketgen_schema::{CollectionsResponse, RawCollection};
use serde::Deserialize;
use std::time::Duration;

/// Path of the superuser password authentication endpoint.
pub const AUTH_PATH: &str = "/api/collections/_superusers/auth-with-password";
/// Path of the collections list endpoint.
pub const COLLECTIONS_PATH: &str = "/api/collections";

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: String,
}

/// Builder for configuring and creating a schema client.
#[derive(Debug, Clone)]
pub struct SchemaClientBuilder {
    host: String,
    timeout: Duration,
    retry: RetryPolicy,
    per_page: u32,
}

impl SchemaClientBuilder {
    /// Creates a new builder for the PocketBase instance at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            per_page: 500,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables retrying transient failures.
    #[must_use]
    pub fn retry(mut self, enabled: bool) -> Self {
        self.retry.max_attempts = if enabled {
            RetryPolicy::default().max_attempts
        } else {
            1
        };
        self
    }

    /// Sets the delay after the first failed attempt.
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry.initial_delay = delay;
        self
    }

    /// Sets the number of attempts per request, including the first.
    #[must_use]
    pub fn max_attempts(mut self, max: u32) -> Self {
        self.retry.max_attempts = max.max(1);
        self
    }

    /// Replaces the whole retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            max_attempts: policy.max_attempts.max(1),
            ..policy
        };
        self
    }

    /// Sets the page size used when listing collections.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Builds the client.
    #[must_use]
    pub fn build(self) -> SchemaClient {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        SchemaClient {
            agent,
            host: normalize_host(&self.host),
            retry: self.retry,
            per_page: self.per_page,
            token: None,
        }
    }
}

/// Blocking client for the PocketBase collections API.
#[derive(Debug)]
pub struct SchemaClient {
    agent: ureq::Agent,
    host: String,
    retry: RetryPolicy,
    per_page: u32,
    token: Option<String>,
}

impl SchemaClient {
    /// Returns the normalized host URL.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true once a token has been obtained.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Authenticates as a superuser and keeps the returned token.
    ///
    /// # Errors
    /// Returns `ClientError` if the request fails, the credentials are
    /// rejected or the response carries no token.
    pub fn authenticate(&mut self, credentials: &Credentials) -> Result<(), ClientError> {
        let url = format!("{}{}", self.host, AUTH_PATH);
        let body = serde_json::json!({
            "identity": credentials.email,
            "password": credentials.password,
        });

        tracing::debug!("Authenticating {} against {}", credentials.email, self.host);

        let response: AuthResponse = self.with_retry(|agent| {
            Ok(agent.post(&url).send_json(body.clone())?.into_json()?)
        })?;

        if response.token.is_empty() {
            return Err(ClientError::MissingToken);
        }

        tracing::info!("Authenticated as {}", credentials.email);
        self.token = Some(response.token);
        Ok(())
    }

    /// Lists every collection, following pagination.
    ///
    /// # Errors
    /// Returns `ClientError` if not authenticated or a request fails.
    pub fn fetch_collections(&self) -> Result<Vec<RawCollection>, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        let url = format!("{}{}", self.host, COLLECTIONS_PATH);
        let per_page = self.per_page.to_string();

        let mut collections = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let response: CollectionsResponse = self.with_retry(|agent| {
                Ok(agent
                    .get(&url)
                    .set("Authorization", token)
                    .query("page", &page_param)
                    .query("perPage", &per_page)
                    .call()?
                    .into_json()?)
            })?;

            let received = response.items.len();
            collections.extend(response.items);

            tracing::debug!(
                "Fetched page {}/{} ({} collections)",
                page,
                response.total_pages,
                received
            );

            if received == 0 || page >= response.total_pages {
                break;
            }
            page += 1;
        }

        tracing::info!("Fetched {} collections from {}", collections.len(), self.host);
        Ok(collections)
    }

    fn with_retry<T, F>(&self, mut request: F) -> Result<T, ClientError>
    where
        F: FnMut(&ureq::Agent) -> Result<T, ClientError>,
    {
        let mut attempt = 1;

        loop {
            let e = match request(&self.agent) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            match self.retry.delay_after(attempt) {
                Some(delay) => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt,
                        self.retry.max_attempts,
                        e,
                        delay
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                None if attempt > 1 => {
                    return Err(ClientError::RetriesExhausted {
                        attempts: attempt,
                        last: e.to_string(),
                    });
                }
                None => return Err(e),
            }
        }
    }
}

impl SchemaSource for SchemaClient {
    fn collections(&mut self) -> Result<Vec<RawCollection>, ClientError> {
        self.fetch_collections()
    }
}

/// Adds a scheme when missing and strips trailing slashes.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
