#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use std::cell::Cell;
    use std::collections::HashMap;
    use url_helper::{
        ImageFormat, ImageInfo, ImageProbe, RedirectResolver, UrlHelper, UrlShortener,
    };

    /// Redirects taken from a fixed table, like a shortened-link service
    struct TableResolver(HashMap<&'static str, &'static str>);

    impl RedirectResolver for TableResolver {
        fn resolve(&self, url: &str) -> Result<String> {
            Ok(self.0.get(url).copied().unwrap_or(url).to_string())
        }
    }

    /// Counts calls and fails every one of them
    #[derive(Default)]
    struct Offline {
        calls: Cell<usize>,
    }

    impl RedirectResolver for Offline {
        fn resolve(&self, _url: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Err(anyhow!("offline"))
        }
    }

    impl UrlShortener for Offline {
        fn shorten(&self, _url: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Err(anyhow!("offline"))
        }
    }

    impl ImageProbe for Offline {
        fn probe(&self, _url: &str) -> Result<Option<ImageInfo>> {
            self.calls.set(self.calls.get() + 1);
            Err(anyhow!("offline"))
        }
    }

    struct PrefixShortener;

    impl UrlShortener for PrefixShortener {
        fn shorten(&self, url: &str) -> Result<String> {
            Ok(format!("http://tiny.test/{}", url.len()))
        }
    }

    /// Anything ending in .jpg is a JPEG
    struct ExtensionProbe;

    impl ImageProbe for ExtensionProbe {
        fn probe(&self, url: &str) -> Result<Option<ImageInfo>> {
            Ok(url.ends_with(".jpg").then_some(ImageInfo {
                format: ImageFormat::Jpeg,
                dimensions: Some((120, 90)),
            }))
        }
    }

    fn online_helper() -> UrlHelper<TableResolver, PrefixShortener, ExtensionProbe> {
        let resolver = TableResolver(HashMap::from([
            ("http://bit.ly/I9WKJ4", "http://tustitulares.com/img/shareTwitter.jpg"),
            ("http://youtu.be/nGeKSiCQkPw", "http://www.youtube.com/watch?v=nGeKSiCQkPw&feature=youtu.be"),
        ]));
        UrlHelper::with_collaborators(resolver, PrefixShortener, ExtensionProbe)
    }

    #[test]
    fn test_resolve_url() {
        let helper = online_helper();
        assert_eq!(helper.resolve_url("http://www.google.es"), "http://www.google.es");
        assert_eq!(
            helper.resolve_url("http://bit.ly/I9WKJ4"),
            "http://tustitulares.com/img/shareTwitter.jpg"
        );
    }

    #[test]
    fn test_text_operations() {
        let helper = online_helper();
        let text = "hola pepe http://www.google.es adios pepe www.apple.com y otra más http://youtube.com";

        assert_eq!(
            helper.find_urls(text),
            vec!["http://www.google.es", "www.apple.com", "http://youtube.com"]
        );
        assert_eq!(helper.find_first_url(text).as_deref(), Some("http://www.google.es"));
        assert_eq!(helper.erase_urls(text), "hola pepe  adios pepe  y otra más ");
    }

    #[test]
    fn test_shortened_text_is_shorter() {
        let helper = online_helper();
        let text = "esto es un texto muy largo http://tustitulares.com/img/shareTwitter.jpg \n\
                    con URL http://tustitulares.com/img/shareYoutube.jpg";

        let shortened = helper.shorten_urls_in_text(text);
        assert!(shortened.len() < text.len());
        assert!(!shortened.contains("tustitulares.com"));
        assert_eq!(helper.find_urls(&shortened).len(), 2);
    }

    #[test]
    fn test_classification() {
        let helper = online_helper();

        assert!(helper.is_youtube_video("http://youtu.be/nGeKSiCQkPw"));
        assert!(helper.is_youtube_video("http://www.youtube.com/watch?v=nGeKSiCQkPw&feature=relmfu"));
        assert!(!helper.is_youtube_video("http://www.youtube.com/videos?feature=mh"));
        assert!(!helper.is_youtube_video("http://www.google.com/justTesting.html"));

        assert!(helper.is_image("http://i4.ytimg.com/vi/_AMpugNjTKk/default.jpg"));
        assert!(!helper.is_image("http://google.com"));
        assert_eq!(
            helper.image_info("http://x/a.jpg").map(|info| info.dimensions),
            Some(Some((120, 90)))
        );

        assert!(helper.is_secure("https://localhost:8888/&a=1?b=2"));
        assert!(!helper.is_secure("http://localhost:8888/&a=1?b=2"));
    }

    #[test]
    fn test_component_lookups() {
        let helper = online_helper();
        let url = "http://localhost:8888/justTesting.php?a=param1&b=param2&param3";

        assert_eq!(helper.get_domain(url), "localhost");
        assert_eq!(helper.get_protocol(url).as_deref(), Some("http"));
        assert_eq!(helper.get_port(url), Some(8888));
        assert_eq!(helper.get_extension(url).as_deref(), Some("php"));
        assert_eq!(helper.get_param(url, "b").as_deref(), Some("param2"));
        assert_eq!(helper.get_param_count(url), 3);

        let params = helper.get_params(url, ["a", "param3", "missing"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a").map(String::as_str), Some("param1"));
        assert_eq!(params.get("param3").map(String::as_str), Some(""));
        assert_eq!(helper.get_param(url, "param3"), None);
    }

    #[test]
    fn test_offline_collaborators_fall_back() {
        let resolver = Offline::default();
        let shortener = Offline::default();
        let probe = Offline::default();
        let helper = UrlHelper::with_collaborators(&resolver, &shortener, &probe);

        assert_eq!(helper.resolve_url("http://bit.ly/I9WKJ4"), "http://bit.ly/I9WKJ4");
        assert_eq!(helper.shorten_url("www.apple.com"), "http://www.apple.com");
        assert_eq!(
            helper.shorten_urls_in_text("see www.apple.com"),
            "see http://www.apple.com"
        );
        assert!(!helper.is_image("http://x/a.jpg"));
        assert_eq!(helper.image_info("http://x/a.jpg"), None);
        assert!(!helper.is_youtube_video("http://youtu.be/nGeKSiCQkPw"));
        assert!(helper.is_youtube_video("http://www.youtube.com/watch?v=abc"));

        // One attempt per call, no retries
        assert_eq!(resolver.calls.get(), 3);
        assert_eq!(shortener.calls.get(), 2);
        assert_eq!(probe.calls.get(), 2);
    }

    #[test]
    fn test_text_without_urls_round_trips() {
        let offline = Offline::default();
        let helper = UrlHelper::with_collaborators(&offline, &offline, &offline);

        for text in ["", "no hay URL", "plain words, punctuation. and (parens)"] {
            assert_eq!(helper.erase_urls(text), text);
            assert_eq!(helper.shorten_urls_in_text(text), text);
        }
        assert_eq!(offline.calls.get(), 0);
    }
}
