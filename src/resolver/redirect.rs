use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, trace, warn};
use url::Url;

use super::{build_client, RedirectResolver, ResolverConfig};

/// Resolves redirects by following `Location` headers by hand
///
/// Redirects are not auto-followed by the client; each hop is one blocking
/// GET so the chain can be capped and loops detected.
#[derive(Debug, Clone)]
pub struct HttpRedirectResolver {
    client: Client,
    max_hops: usize,
}

impl HttpRedirectResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = build_client(config, reqwest::redirect::Policy::none())?;
        Ok(Self {
            client,
            max_hops: config.max_hops,
        })
    }

    /// Location of the redirect response for `url`, if it is one
    fn next_location(&self, url: &str) -> Result<Option<String>> {
        debug!("Sending request to {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = resp.status();
        debug!("Response status: {}", status);
        trace!("Response headers: {:?}", resp.headers());

        if !status.is_redirection() || status == reqwest::StatusCode::NOT_MODIFIED {
            return Ok(None);
        }

        // With repeated headers the last one belongs to this response
        let location = match resp.headers().get_all(LOCATION).iter().last() {
            Some(value) => value
                .to_str()
                .context("Failed to parse redirect location header")?
                .to_string(),
            None => {
                warn!("Redirect status {} without Location header at {}", status, url);
                return Ok(None);
            }
        };

        // Relative redirects are resolved against the current URL
        let base = Url::parse(url).context("Failed to parse current URL for relative redirect")?;
        let next = base
            .join(&location)
            .with_context(|| format!("Failed to resolve redirect location '{}'", location))?;

        Ok(Some(next.to_string()))
    }
}

impl RedirectResolver for HttpRedirectResolver {
    #[instrument(level = "debug", skip(self))]
    fn resolve(&self, url: &str) -> Result<String> {
        if url.is_empty() {
            error!("Empty URL provided");
            bail!("URL cannot be empty");
        }

        let mut visited = HashSet::with_capacity(self.max_hops + 1);
        let mut current = url.to_string();
        let mut hops = 0;

        loop {
            if !visited.insert(current.clone()) {
                warn!("Redirect loop detected at {}", current);
                break;
            }
            if hops >= self.max_hops {
                warn!("Max redirect hops ({}) reached at {}", self.max_hops, current);
                break;
            }

            match self.next_location(&current) {
                Ok(Some(next)) => {
                    info!("Redirected to: {} (hop {}/{})", next, hops + 1, self.max_hops);
                    current = next;
                    hops += 1;
                }
                Ok(None) => break,
                // Nothing resolved yet: report the failure
                Err(e) if hops == 0 => return Err(e),
                Err(e) => {
                    warn!("Stopping at {} after {} hops: {:#}", current, hops, e);
                    break;
                }
            }
        }

        debug!("Resolved {} to {} in {} hops", url, current, hops);
        Ok(current)
    }
}
