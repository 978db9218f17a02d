//! Detection of URL-shaped substrings inside free text.

use tracing::debug;

use crate::url_parser::patterns::URL_IN_TEXT_REGEX;

/// Gets the URLs contained in a text, in order of appearance
///
/// See [`URL_IN_TEXT_REGEX`] for the boundary rules. A text without any
/// URL-shaped substring yields an empty vector.
///
/// # Arguments
/// * `text` - Arbitrary text, e.g. a comment or a feed entry
///
/// # Returns
/// * `Vec<String>` - Every match, duplicates included
pub fn find_urls(text: &str) -> Vec<String> {
    let urls: Vec<String> = URL_IN_TEXT_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    debug!("Found {} URLs in text of {} bytes", urls.len(), text.len());
    urls
}

/// First URL of the text, if any
pub fn find_first_url(text: &str) -> Option<String> {
    URL_IN_TEXT_REGEX.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url() {
        assert_eq!(
            find_urls("hola pepe http://www.google.es adios pepe"),
            vec!["http://www.google.es"]
        );
    }

    #[test]
    fn test_multiple_urls_keep_order() {
        let text = "hola pepe http://www.google.es adios pepe www.apple.com y otra más http://youtube.com";
        assert_eq!(
            find_urls(text),
            vec!["http://www.google.es", "www.apple.com", "http://youtube.com"]
        );
    }

    #[test]
    fn test_no_url() {
        assert!(find_urls("no hay URL").is_empty());
        assert!(find_urls("").is_empty());
        assert_eq!(find_first_url("no hay URL"), None);
    }

    #[test]
    fn test_first_url() {
        let text = "see www.apple.com and http://youtube.com";
        assert_eq!(find_first_url(text).as_deref(), Some("www.apple.com"));
        assert_eq!(find_first_url(text), find_urls(text).into_iter().next());
    }

    #[test]
    fn test_trailing_punctuation_is_excluded() {
        assert_eq!(find_urls("Visit http://example.com, then leave."), vec!["http://example.com"]);
        assert_eq!(find_urls("Go to https://example.com/page."), vec!["https://example.com/page"]);
        assert_eq!(find_urls("Really? http://example.com/?!"), vec!["http://example.com/"]);
    }

    #[test]
    fn test_trailing_slash_is_kept() {
        assert_eq!(find_urls("at http://example.com/dir/ today"), vec!["http://example.com/dir/"]);
    }

    #[test]
    fn test_parenthesized_group() {
        assert_eq!(
            find_urls("read http://en.wikipedia.org/wiki/Rust_(programming) now"),
            vec!["http://en.wikipedia.org/wiki/Rust_(programming)"]
        );
        // Surrounding parentheses are not part of the URL
        assert_eq!(find_urls("(see http://example.com/a)"), vec!["http://example.com/a"]);
    }

    #[test]
    fn test_angle_brackets_delimit() {
        assert_eq!(find_urls("<http://example.com/x>"), vec!["http://example.com/x"]);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(find_urls("HTTPS://Example.com/A here"), vec!["HTTPS://Example.com/A"]);
    }

    #[test]
    fn test_query_strings_are_kept() {
        assert_eq!(
            find_urls("watch http://www.youtube.com/watch?v=nGeKSiCQkPw&feature=relmfu please"),
            vec!["http://www.youtube.com/watch?v=nGeKSiCQkPw&feature=relmfu"]
        );
    }

    #[test]
    fn test_prefix_must_start_at_word_boundary() {
        assert!(find_urls("xhttp://example.com").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_are_not_word_characters() {
        assert_eq!(
            find_urls("añohttp://x.com y www.ejemplo.es"),
            vec!["http://x.com", "www.ejemplo.es"]
        );
        assert_eq!(find_urls("ver http://x.com/a(ñ) ya"), vec!["http://x.com/a"]);
    }
}
