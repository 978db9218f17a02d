//! URL helpers for text-rendering pipelines.
//!
//! Finds URLs in free text, erases or shortens them, and answers questions
//! about single URLs: domain, protocol, port, extension, query parameters,
//! and whether the URL points to an image or a YouTube video.
//!
//! ```
//! use url_helper::{erase_urls, find_urls, get_domain};
//!
//! let text = "hola pepe http://www.google.es adios pepe";
//! assert_eq!(find_urls(text), vec!["http://www.google.es"]);
//! assert_eq!(erase_urls(text), "hola pepe  adios pepe");
//! assert_eq!(get_domain("http://www.google.es/x"), "google.es");
//! ```

pub mod classifier;
pub mod helper;
pub mod resolver;
pub mod scanner;
pub mod transform;
pub mod url_parser;
pub mod utils;

pub use classifier::{is_image, is_secure, is_youtube_video, is_youtube_video_url};
pub use helper::UrlHelper;
pub use resolver::{
    sniff_image, HttpImageProbe, HttpRedirectResolver, ImageFormat, ImageInfo, ImageProbe,
    RedirectResolver, ResolverConfig, TinyUrlShortener, UrlShortener,
};
pub use scanner::{find_first_url, find_urls};
pub use transform::{erase_urls, shorten_url, shorten_urls_in_text};
pub use url_parser::{
    get_domain, get_extension, get_param, get_param_count, get_params, get_port, get_protocol,
    normalize_scheme, parse_components, parse_query, QueryParams, UrlComponents,
};
