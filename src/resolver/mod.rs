//! External collaborators: redirect resolution, URL shortening and image probing.
//!
//! The core only talks to the traits below. The HTTP implementations issue one
//! blocking request per call (one per hop when following redirects) and report
//! failures as errors; deciding on a fallback value is the caller's job.

pub mod config;
pub mod image;
pub mod redirect;
pub mod shortener;

use anyhow::Result;

pub use self::config::ResolverConfig;
pub use self::image::{sniff_image, HttpImageProbe, ImageFormat, ImageInfo};
pub use self::redirect::HttpRedirectResolver;
pub use self::shortener::TinyUrlShortener;

/// Finds where a (possibly shortened) URL finally points to
pub trait RedirectResolver {
    /// Returns the final location, or `url` itself when it does not redirect
    fn resolve(&self, url: &str) -> Result<String>;
}

/// Third-party shortening service
pub trait UrlShortener {
    /// Returns the short form of an already normalized URL
    fn shorten(&self, url: &str) -> Result<String>;
}

/// Checks whether a URL serves an image
pub trait ImageProbe {
    /// `Ok(None)` when the content was fetched but is not a recognized image
    fn probe(&self, url: &str) -> Result<Option<ImageInfo>>;
}

impl<T: RedirectResolver + ?Sized> RedirectResolver for &T {
    fn resolve(&self, url: &str) -> Result<String> {
        (**self).resolve(url)
    }
}

impl<T: UrlShortener + ?Sized> UrlShortener for &T {
    fn shorten(&self, url: &str) -> Result<String> {
        (**self).shorten(url)
    }
}

impl<T: ImageProbe + ?Sized> ImageProbe for &T {
    fn probe(&self, url: &str) -> Result<Option<ImageInfo>> {
        (**self).probe(url)
    }
}

/// Builds the blocking client used by every HTTP collaborator
pub(crate) fn build_client(
    config: &ResolverConfig,
    redirect: reqwest::redirect::Policy,
) -> Result<reqwest::blocking::Client> {
    use anyhow::Context;

    reqwest::blocking::Client::builder()
        .redirect(redirect)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to build HTTP client")
}
