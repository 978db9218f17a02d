use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, instrument};

use super::{build_client, ResolverConfig, UrlShortener};

/// Shortens URLs through a TinyURL-style `api-create` endpoint
///
/// The endpoint receives the long URL as the `url` query parameter and
/// answers with the short URL as plain text.
#[derive(Debug, Clone)]
pub struct TinyUrlShortener {
    client: Client,
    endpoint: String,
}

impl TinyUrlShortener {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = build_client(config, reqwest::redirect::Policy::default())?;
        Ok(Self {
            client,
            endpoint: config.shortener_endpoint.clone(),
        })
    }

    fn request_url(&self, url: &str) -> String {
        format!("{}?url={}", self.endpoint, urlencoding::encode(url))
    }
}

impl UrlShortener for TinyUrlShortener {
    #[instrument(level = "debug", skip(self))]
    fn shorten(&self, url: &str) -> Result<String> {
        let request_url = self.request_url(url);
        debug!("Requesting short URL from {}", request_url);

        let resp = self
            .client
            .get(&request_url)
            .send()
            .with_context(|| format!("Failed to reach shortening service at {}", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Shortening service answered with status {}", status);
        }

        let body = resp.text().context("Failed to read shortening service response")?;
        let short = body.trim();
        if short.is_empty() {
            bail!("Shortening service returned an empty response");
        }

        debug!("Shortened {} to {}", url, short);
        Ok(short.to_string())
    }
}
