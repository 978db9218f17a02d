//! Semantic verdicts about a URL: image, YouTube video, secure.
//!
//! Collaborator failures never escape from here; they are logged and turned
//! into a negative verdict.

use tracing::{debug, warn};

use crate::resolver::{ImageProbe, RedirectResolver};
use crate::url_parser::{get_domain, get_param, get_protocol};

pub const YOUTUBE_DOMAIN: &str = "youtube.com";
pub const YOUTUBE_VIDEO_PARAM: &str = "v";
pub const SECURE_PROTOCOL: &str = "https";

/// True iff the probe recognizes image data at `url`
pub fn is_image<P: ImageProbe + ?Sized>(url: &str, probe: &P) -> bool {
    match probe.probe(url) {
        Ok(Some(info)) => {
            debug!("{} is a {} image", url, info.format);
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!("Image probe failed for {}: {:#}", url, e);
            false
        }
    }
}

/// Determines whether the URL is a YouTube video
///
/// The URL is resolved first so that shortened links (`youtu.be`, `bit.ly`...)
/// are judged by their destination. If resolution fails the URL is judged as
/// given.
///
/// # Arguments
/// * `url` - URL to classify
/// * `resolver` - Redirect resolver used to find the destination
///
/// # Returns
/// * `bool` - True when the destination is on `youtube.com` and has a non-empty `v` parameter
pub fn is_youtube_video<R: RedirectResolver + ?Sized>(url: &str, resolver: &R) -> bool {
    let resolved = match resolver.resolve(url) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!("Could not resolve {}, classifying it unresolved: {:#}", url, e);
            url.to_string()
        }
    };

    is_youtube_video_url(&resolved)
}

/// The string-only part of [`is_youtube_video`], for already resolved URLs
pub fn is_youtube_video_url(url: &str) -> bool {
    if get_domain(url) != YOUTUBE_DOMAIN {
        return false;
    }
    get_param(url, YOUTUBE_VIDEO_PARAM).map_or(false, |video| !video.is_empty())
}

/// Determines whether the URL starts with the https protocol
pub fn is_secure(url: &str) -> bool {
    get_protocol(url).as_deref() == Some(SECURE_PROTOCOL)
}
