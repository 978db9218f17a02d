use anyhow::Result;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::classifier;
use crate::resolver::{
    HttpImageProbe, HttpRedirectResolver, ImageInfo, ImageProbe, RedirectResolver, ResolverConfig,
    TinyUrlShortener, UrlShortener,
};
use crate::scanner;
use crate::transform;
use crate::url_parser;

/// Every URL operation behind one value
///
/// The pure operations only look at the strings they are given. Operations
/// that need the network go through the three collaborators and never fail:
/// on error they log and fall back (original URL, normalized URL, `false` or
/// `None`).
#[derive(Debug, Clone)]
pub struct UrlHelper<R = HttpRedirectResolver, S = TinyUrlShortener, P = HttpImageProbe> {
    resolver: R,
    shortener: S,
    probe: P,
}

impl UrlHelper {
    /// Creates a helper backed by the blocking HTTP collaborators
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        info!(
            "Creating URL helper: timeout={:?}, max_hops={}, shortener={}",
            config.request_timeout, config.max_hops, config.shortener_endpoint
        );
        Ok(Self {
            resolver: HttpRedirectResolver::new(config)?,
            shortener: TinyUrlShortener::new(config)?,
            probe: HttpImageProbe::new(config)?,
        })
    }
}

impl<R, S, P> UrlHelper<R, S, P>
where
    R: RedirectResolver,
    S: UrlShortener,
    P: ImageProbe,
{
    /// Creates a helper from any set of collaborators
    pub fn with_collaborators(resolver: R, shortener: S, probe: P) -> Self {
        Self {
            resolver,
            shortener,
            probe,
        }
    }

    /// Obtains the real URL behind a shortened one, or the URL itself
    pub fn resolve_url(&self, url: &str) -> String {
        match self.resolver.resolve(url) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Could not resolve {}: {:#}", url, e);
                url.to_string()
            }
        }
    }

    /// Short form of `url`, or the normalized URL if the service fails
    pub fn shorten_url(&self, url: &str) -> String {
        transform::shorten_url(url, &self.shortener)
    }

    /// Image metadata for `url`, `None` if it is not an image or cannot be fetched
    pub fn image_info(&self, url: &str) -> Option<ImageInfo> {
        match self.probe.probe(url) {
            Ok(info) => info,
            Err(e) => {
                warn!("Image probe failed for {}: {:#}", url, e);
                None
            }
        }
    }

    pub fn is_image(&self, url: &str) -> bool {
        classifier::is_image(url, &self.probe)
    }

    pub fn is_youtube_video(&self, url: &str) -> bool {
        classifier::is_youtube_video(url, &self.resolver)
    }

    pub fn is_secure(&self, url: &str) -> bool {
        classifier::is_secure(url)
    }

    pub fn find_urls(&self, text: &str) -> Vec<String> {
        scanner::find_urls(text)
    }

    pub fn find_first_url(&self, text: &str) -> Option<String> {
        scanner::find_first_url(text)
    }

    pub fn erase_urls(&self, text: &str) -> String {
        transform::erase_urls(text)
    }

    pub fn shorten_urls_in_text(&self, text: &str) -> String {
        transform::shorten_urls_in_text(text, &self.shortener)
    }

    pub fn get_domain(&self, url: &str) -> String {
        url_parser::get_domain(url)
    }

    pub fn get_protocol(&self, url: &str) -> Option<String> {
        url_parser::get_protocol(url)
    }

    pub fn get_port(&self, url: &str) -> Option<u16> {
        url_parser::get_port(url)
    }

    pub fn get_extension(&self, url: &str) -> Option<String> {
        url_parser::get_extension(url)
    }

    pub fn get_param(&self, url: &str, name: &str) -> Option<String> {
        url_parser::get_param(url, name)
    }

    pub fn get_params<'a, I>(&self, url: &str, names: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        url_parser::get_params(url, names)
    }

    pub fn get_param_count(&self, url: &str) -> usize {
        url_parser::get_param_count(url)
    }
}
