use std::collections::HashMap;
use tracing::trace;
use url::form_urlencoded;

/// Decoded query string parameters
///
/// Names are unique; when a name repeats, the last occurrence wins. A name
/// written without `=` (e.g. `&flag`) is present but carries no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, Option<String>>,
}

impl QueryParams {
    /// Parses a raw query string (without the leading '?')
    pub fn parse(query: &str) -> Self {
        let mut params = HashMap::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (decode_component(name), Some(decode_component(value))),
                None => (decode_component(pair), None),
            };

            if name.is_empty() {
                trace!("Skipping query pair without a name: {}", pair);
                continue;
            }
            params.insert(name, value);
        }

        QueryParams { params }
    }

    /// Value of `name`, or `None` when the name is missing or has no value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|value| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of distinct names, value-less ones included
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Values for the requested names that are present
    ///
    /// A name written without `=` maps to an empty string, so the result has
    /// one entry per present name and selecting every name yields `len()`
    /// entries. Missing names are omitted.
    pub fn select<'a, I>(&self, names: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                self.params
                    .get(name)
                    .map(|value| (name.to_string(), value.clone().unwrap_or_default()))
            })
            .collect()
    }
}

// Form decoding of a single name or value: '+' is a space, invalid UTF-8 is
// replaced rather than rejected. '=' is escaped so the parser keeps it literal.
fn decode_component(raw: &str) -> String {
    let escaped = raw.replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(decoded, _)| decoded.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_occurrence_wins() {
        let params = QueryParams::parse("a=1&b=2&a=3");
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_valueless_name() {
        let params = QueryParams::parse("a=param1&b=param2&param3");
        assert_eq!(params.len(), 3);
        assert!(params.contains("param3"));
        assert_eq!(params.get("param3"), None);
    }

    #[test]
    fn test_empty_value_is_still_a_value() {
        let params = QueryParams::parse("a=");
        assert_eq!(params.get("a"), Some(""));
    }

    #[test]
    fn test_decoding() {
        let params = QueryParams::parse("q=hello+world&city=S%C3%A3o%20Paulo&bad=%FF&eq=a=b%3Dc");
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get("eq"), Some("a=b=c"));
        assert_eq!(params.get("city"), Some("São Paulo"));
        assert_eq!(params.get("bad"), Some("\u{FFFD}"));
    }

    #[test]
    fn test_empty_segments_and_names_are_skipped() {
        let params = QueryParams::parse("&&=x&a=1&");
        assert_eq!(params.len(), 1);
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn test_select() {
        let params = QueryParams::parse("a=1&b=2&c");
        let selected = params.select(["a", "c", "z"]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get("a").map(String::as_str), Some("1"));
        assert_eq!(selected.get("c").map(String::as_str), Some(""));
        assert_eq!(params.get("c"), None);
    }
}
