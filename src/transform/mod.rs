//! Text rewriting on top of the scanner: erasing or shortening every URL.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::resolver::UrlShortener;
use crate::scanner::find_urls;
use crate::url_parser::normalize_scheme;

/// Removes URLs from a given text
///
/// Each match is removed literally, everywhere it occurs, and the whitespace
/// around it is left alone: `"a http://x.com b"` becomes `"a  b"`.
pub fn erase_urls(text: &str) -> String {
    let mut erased = text.to_string();
    for url in find_urls(text) {
        erased = erased.replace(&url, "");
    }
    erased
}

/// Short form of one URL, falling back to the normalized URL
pub fn shorten_url<S: UrlShortener + ?Sized>(url: &str, shortener: &S) -> String {
    let normalized = normalize_scheme(url);
    match shortener.shorten(&normalized) {
        Ok(short) => short,
        Err(e) => {
            warn!("Could not shorten {}, keeping it: {:#}", normalized, e);
            normalized
        }
    }
}

/// Shortens all the URLs found in the given text
///
/// For each distinct match, in order of appearance, every literal occurrence
/// of the matched text is replaced with its short form. The shortener is
/// called once per distinct URL.
///
/// # Arguments
/// * `text` - Text to rewrite
/// * `shortener` - Shortening service; failures keep the (normalized) URL
///
/// # Returns
/// * `String` - The rewritten text
pub fn shorten_urls_in_text<S: UrlShortener + ?Sized>(text: &str, shortener: &S) -> String {
    let urls = find_urls(text);
    debug!("Shortening {} URLs", urls.len());

    let mut seen = HashSet::new();
    let mut shortened = text.to_string();
    for url in urls {
        if !seen.insert(url.clone()) {
            continue;
        }
        let short = shorten_url(&url, shortener);
        shortened = shortened.replace(&url, &short);
    }
    shortened
}
