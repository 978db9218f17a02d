//! URL component parsing: scheme, host, port, path and query lookups.
//!
//! Every function here is pure. Malformed or empty input produces absent or
//! empty results instead of errors.

pub mod components;
pub mod parser;
pub mod patterns;
pub mod query;


pub use components::UrlComponents;
pub use parser::{
    get_domain, get_extension, get_param, get_param_count, get_params, get_port, get_protocol,
    normalize_scheme, parse_components, parse_query,
};
pub use query::QueryParams;
