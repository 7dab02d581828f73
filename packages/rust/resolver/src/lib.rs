//! oEmbed lookups.
//!
//! A lookup is one HTTP GET against a provider's oEmbed endpoint whose JSON
//! body is decoded into a [`ResolvedEmbed`]. Transient transport failures
//! (refused connection, DNS failure, timeout) are retried up to
//! [`MAX_RETRIES`] more times; everything else fails on the spot. Failures
//! are returned as values and never panic.

mod error;
mod retry;

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use linkembed_shared::{HttpConfig, LinkEmbedError, ResolvedEmbed, Result};

pub use error::{FailureClass, ResolveError, classify};
pub use retry::MAX_RETRIES;

/// User-Agent string for lookup requests.
const USER_AGENT: &str = concat!("LinkEmbed/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

/// Turns an oEmbed lookup URL into an embed.
pub trait Resolve {
    fn resolve(
        &self,
        lookup_url: &str,
    ) -> impl Future<Output = std::result::Result<ResolvedEmbed, ResolveError>> + Send;
}

// ---------------------------------------------------------------------------
// HttpResolver
// ---------------------------------------------------------------------------

/// [`Resolve`] implementation backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
}

impl HttpResolver {
    /// Create a resolver with the given transport settings.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// One GET attempt; returns the raw body.
    async fn fetch(&self, url: &Url) -> std::result::Result<String, ResolveError> {
        debug!(%url, "oEmbed lookup");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ResolveError::from_transport(url.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ResolveError::from_transport(url.as_str(), &e))
    }
}

impl Resolve for HttpResolver {
    #[instrument(skip(self))]
    async fn resolve(
        &self,
        lookup_url: &str,
    ) -> std::result::Result<ResolvedEmbed, ResolveError> {
        let url = Url::parse(lookup_url).map_err(|e| ResolveError::Permanent {
            url: lookup_url.to_string(),
            message: format!("invalid lookup URL: {e}"),
        })?;

        let body = retry::with_retries(lookup_url, || self.fetch(&url)).await?;
        parse_embed(lookup_url, &body)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with the configured connect timeout and TLS policy.
fn build_client(config: &HttpConfig) -> Result<Client> {
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled for oEmbed lookups");
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|e| LinkEmbedError::Network(format!("failed to build HTTP client: {e}")))
}

/// Decode an oEmbed JSON body.
fn parse_embed(url: &str, body: &str) -> std::result::Result<ResolvedEmbed, ResolveError> {
    serde_json::from_str(body).map_err(|e| ResolveError::Malformed {
        url: url.to_string(),
        message: e.to_string(),
    })
}
