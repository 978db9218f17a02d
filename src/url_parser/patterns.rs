use once_cell::sync::Lazy;
use regex::Regex;

/// URL-shaped substrings inside free text.
///
/// A match starts at an ASCII word boundary on `http://`, `https://` or `www`
/// (with an optional dot); non-ASCII letters are not word characters, so
/// `añohttp://x.com` matches from the `h`. It runs through anything that is
/// not whitespace or `()<>`, and must end on either a `(word)` group, a non-punctuation character or `/`.
/// Trailing punctuation such as `.` or `,` is therefore left out of the match.
pub static URL_IN_TEXT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:(?i:https?://)|www[.]?)[^\s()<>]+(?:\((?-u:[\w\d])+\)|[^[:punct:]\s]|/)")
        .unwrap()
});

/// Scheme prefixes that count as already normalized (`http`, `https`, `ftp`, `ftps`)
pub static SCHEME_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:f|ht)tps?://").unwrap()
});

/// Generic URI split: scheme, authority, path, query, fragment
pub static URI_COMPONENTS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .unwrap()
});

/// `host:port` written without a scheme, e.g. `localhost:8888/path`
pub static BARE_PORT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(/.*)?$").unwrap()
});
