use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use url_helper::utils::logger::init_logger;
use url_helper::{ResolverConfig, UrlHelper};

/// Find, erase, shorten and classify URLs
#[derive(Debug, Parser)]
#[command(name = "url-helper", version, about)]
struct Cli {
    /// Configuration file (any format the extension implies, e.g. TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the URLs found in a text (stdin when omitted)
    Find {
        text: Option<String>,
        /// Only print the first URL
        #[arg(long)]
        first: bool,
    },
    /// Remove every URL from a text
    Erase { text: Option<String> },
    /// Replace every URL in a text with its short form
    Shorten { text: Option<String> },
    /// Domain of a URL, without www.
    Domain { url: String },
    /// Scheme of a URL as written
    Protocol { url: String },
    /// Explicit port of a URL
    Port { url: String },
    /// File extension of a URL's path
    Extension { url: String },
    /// Value of one query parameter
    Param { url: String, name: String },
    /// Values of several query parameters
    Params {
        url: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Number of distinct query parameters
    Count { url: String },
    /// Whether the URL uses https
    Secure { url: String },
    /// Whether the URL (after redirects) is a YouTube video
    Youtube { url: String },
    /// Whether the URL serves an image
    Image { url: String },
    /// Final destination of a URL after redirects
    Resolve { url: String },
    /// Short form of a single URL
    Short { url: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_dir.as_deref())?;

    let config = ResolverConfig::load(cli.config.as_deref())?;
    debug!("Using configuration: {:?}", config);
    let helper = UrlHelper::new(&config)?;

    let output = run(&helper, cli.command)?;
    print_output(&output, cli.json)?;
    Ok(())
}

fn run(helper: &UrlHelper, command: Command) -> Result<Value> {
    let value = match command {
        Command::Find { text, first } => {
            let text = text_or_stdin(text)?;
            if first {
                json!(helper.find_first_url(&text))
            } else {
                json!(helper.find_urls(&text))
            }
        }
        Command::Erase { text } => json!(helper.erase_urls(&text_or_stdin(text)?)),
        Command::Shorten { text } => json!(helper.shorten_urls_in_text(&text_or_stdin(text)?)),
        Command::Domain { url } => json!(helper.get_domain(&url)),
        Command::Protocol { url } => json!(helper.get_protocol(&url)),
        Command::Port { url } => json!(helper.get_port(&url)),
        Command::Extension { url } => json!(helper.get_extension(&url)),
        Command::Param { url, name } => json!(helper.get_param(&url, &name)),
        Command::Params { url, names } => {
            json!(helper.get_params(&url, names.iter().map(String::as_str)))
        }
        Command::Count { url } => json!(helper.get_param_count(&url)),
        Command::Secure { url } => json!(helper.is_secure(&url)),
        Command::Youtube { url } => json!(helper.is_youtube_video(&url)),
        Command::Image { url } => json!(helper.image_info(&url)),
        Command::Resolve { url } => json!(helper.resolve_url(&url)),
        Command::Short { url } => json!(helper.shorten_url(&url)),
    };
    Ok(value)
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

fn print_output(value: &Value, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    match value {
        Value::Null => {}
        Value::String(s) => println!("{}", s),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => println!("{}", s),
                    other => println!("{}", other),
                }
            }
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, item) in entries {
                match item {
                    Value::String(s) => println!("{}={}", key, s),
                    other => println!("{}={}", key, other),
                }
            }
        }
        other => println!("{}", other),
    }
    Ok(())
}
