use tracing::trace;

use super::patterns::{BARE_PORT_REGEX, URI_COMPONENTS_REGEX};

/// Components of a single URL string
///
/// Built fresh on every call to [`UrlComponents::parse`]; nothing is cached.
/// Values are kept exactly as written in the input (no case folding, no
/// percent-decoding) so callers see the raw tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlComponents {
    pub scheme: Option<String>,   // Scheme token as given, e.g. "http" or "ssl"
    pub user: Option<String>,     // User part of the userinfo
    pub password: Option<String>, // Password part of the userinfo
    pub host: Option<String>,     // Host without port or brackets stripped
    pub port: Option<u16>,        // Explicit port, 1-65535
    pub path: String,             // Path, possibly empty
    pub query: Option<String>,    // Raw query string without the leading '?'
    pub fragment: Option<String>, // Raw fragment without the leading '#'
}

impl UrlComponents {
    /// Splits a URL into its components
    ///
    /// Returns `None` only for an empty (or whitespace-only) input. Anything
    /// else yields a best-effort split; a string without scheme or authority
    /// ends up entirely in `path`.
    pub fn parse(url: &str) -> Option<Self> {
        if url.trim().is_empty() {
            return None;
        }

        let caps = URI_COMPONENTS_REGEX.captures(url)?;
        let mut components = UrlComponents {
            scheme: caps.get(1).map(|m| m.as_str().to_string()),
            path: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
            query: caps.get(4).map(|m| m.as_str().to_string()),
            fragment: caps.get(5).map(|m| m.as_str().to_string()),
            ..Default::default()
        };

        match caps.get(2) {
            Some(authority) => components.apply_authority(authority.as_str()),
            None => components.reinterpret_bare_port(),
        }

        trace!("Parsed URL components for {}: {:?}", url, components);
        Some(components)
    }

    /// Last segment of the path (after the final '/')
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    /// File extension of the last path segment, if any
    pub fn extension(&self) -> Option<&str> {
        let segment = self.last_segment();
        let dot = segment.rfind('.')?;
        let extension = &segment[dot + 1..];
        if extension.is_empty() {
            None
        } else {
            Some(extension)
        }
    }

    fn apply_authority(&mut self, authority: &str) {
        let host_port = match authority.rsplit_once('@') {
            Some((userinfo, rest)) => {
                match userinfo.split_once(':') {
                    Some((user, password)) => {
                        self.user = Some(user.to_string());
                        self.password = Some(password.to_string());
                    }
                    None => self.user = Some(userinfo.to_string()),
                }
                rest
            }
            None => authority,
        };

        let (host, port) = split_host_port(host_port);
        self.host = if host.is_empty() { None } else { Some(host.to_string()) };
        self.port = port.and_then(parse_port);
    }

    // "localhost:8888/x" reads as scheme "localhost" with a numeric path;
    // treat that shape as host and port instead.
    fn reinterpret_bare_port(&mut self) {
        if self.scheme.is_none() {
            return;
        }
        let Some(caps) = BARE_PORT_REGEX.captures(&self.path) else {
            return;
        };
        let Some(port) = caps.get(1).and_then(|m| parse_port(m.as_str())) else {
            return;
        };
        let path = caps.get(2).map_or(String::new(), |m| m.as_str().to_string());

        self.host = self.scheme.take();
        self.port = Some(port);
        self.path = path;
    }
}

fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    if host_port.starts_with('[') {
        // IPv6 literal
        return match host_port.find(']') {
            Some(end) => {
                let port = host_port[end + 1..].strip_prefix(':');
                (&host_port[..=end], port)
            }
            None => (host_port, None),
        };
    }

    match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u16>().ok().filter(|port| *port != 0)
}
