use std::collections::HashMap;
use tracing::{debug, trace};

use super::components::UrlComponents;
use super::patterns::SCHEME_PREFIX_REGEX;
use super::query::QueryParams;

const DEFAULT_SCHEME_PREFIX: &str = "http://";
const WWW_PREFIX: &str = "www.";

/// Prefixes `http://` unless the URL already starts with `http`, `https`,
/// `ftp` or `ftps` followed by `://` (case-insensitive)
///
/// Only host-based lookups normalize; protocol and port lookups must see the
/// raw input so that a missing scheme stays missing.
pub fn normalize_scheme(url: &str) -> String {
    if SCHEME_PREFIX_REGEX.is_match(url) {
        url.to_string()
    } else {
        trace!("Adding default scheme to {}", url);
        format!("{}{}", DEFAULT_SCHEME_PREFIX, url)
    }
}

/// Splits a URL into components; `None` for empty input
pub fn parse_components(url: &str) -> Option<UrlComponents> {
    UrlComponents::parse(url)
}

/// Obtains the domain of the URL, e.g. `google.com` or `youtube.com`
///
/// The URL is normalized first, so `www.google.com/x` works as well as
/// `http://www.google.com/x`. A leading `www.` is removed and the port is
/// never part of the result.
///
/// # Arguments
/// * `url` - URL with or without scheme
///
/// # Returns
/// * `String` - The host without `www.`, or an empty string when no host exists
pub fn get_domain(url: &str) -> String {
    let host = match UrlComponents::parse(&normalize_scheme(url)).and_then(|c| c.host) {
        Some(host) => host,
        None => {
            debug!("No host found in {}", url);
            return String::new();
        }
    };

    match host.get(..WWW_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(WWW_PREFIX) => host[WWW_PREFIX.len()..].to_string(),
        _ => host,
    }
}

/// Scheme exactly as written (`http`, `https`, `ssl`...), `None` without one
pub fn get_protocol(url: &str) -> Option<String> {
    UrlComponents::parse(url).and_then(|c| c.scheme)
}

/// Explicit port of the URL; `None` when absent or not a valid port number
pub fn get_port(url: &str) -> Option<u16> {
    UrlComponents::parse(url).and_then(|c| c.port)
}

/// Obtains the extension of the URL's path
///
/// Only the path is considered: `www.test.com/test.php?a=1&b=2` gives `php`,
/// and query or fragment text can never end up in the result.
pub fn get_extension(url: &str) -> Option<String> {
    let components = UrlComponents::parse(url)?;
    components.extension().map(str::to_string)
}

/// Decoded query parameters of the URL (empty when there is no query)
pub fn parse_query(url: &str) -> QueryParams {
    UrlComponents::parse(url)
        .and_then(|c| c.query)
        .map(|query| QueryParams::parse(&query))
        .unwrap_or_default()
}

/// Value of one query parameter
///
/// # Arguments
/// * `url` - URL to inspect
/// * `name` - Parameter name, e.g. `v` for a YouTube video id
///
/// # Returns
/// * `Option<String>` - The value; `None` if the parameter is missing or was
///   written without `=`
pub fn get_param(url: &str, name: &str) -> Option<String> {
    parse_query(url).get(name).map(str::to_string)
}

/// Values of several query parameters
///
/// Names that are missing are left out of the map. A name written without `=`
/// is present with an empty value, so asking for every name gives as many
/// entries as [`get_param_count`].
pub fn get_params<'a, I>(url: &str, names: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    parse_query(url).select(names)
}

/// Number of distinct query parameter names
pub fn get_param_count(url: &str) -> usize {
    parse_query(url).len()
}
