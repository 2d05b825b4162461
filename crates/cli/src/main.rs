use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use readlater_core::{
    DomainTable, ExtractionPath, MetadataConfig, MetadataResult, MetadataService, ProxyStrategy, extract_fields,
    extract_platform_fields, fetch_file, fetch_stdin, suggest_tags,
};
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for previews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Preview links the way a read-it-later list would: title, description, thumbnail
#[derive(Parser, Debug)]
#[command(name = "readlater")]
#[command(version)]
#[command(about = "Link previews for your reading list", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a URL through the relay list and print its preview
    Fetch {
        /// Page to preview
        #[arg(value_name = "URL")]
        url: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,

        /// Per-relay timeout in milliseconds
        #[arg(long, default_value = "2500", value_name = "MS")]
        timeout_ms: u64,

        /// Relay URL template containing {url}; repeat to try several in order.
        /// Replaces the built-in relay list.
        #[arg(long = "proxy", value_name = "TEMPLATE")]
        proxies: Vec<String>,

        /// JSON file of extra domain hints
        #[arg(long, value_name = "FILE")]
        hints: Option<PathBuf>,
    },

    /// Extract a preview from local HTML without touching the network
    Inspect {
        /// Local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// URL the HTML was served from; used for relative thumbnails and hints
        #[arg(long, value_name = "PAGE_URL")]
        url: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,

        /// JSON file of extra domain hints
        #[arg(long, value_name = "FILE")]
        hints: Option<PathBuf>,
    },

    /// Suggest tags for a URL
    Tags {
        #[arg(value_name = "URL")]
        url: String,

        /// Tag the list already has; repeat for several
        #[arg(long = "existing", value_name = "TAG")]
        existing: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "readlater_core=debug,readlater=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Built-in hints, extended by `explicit` or else by the user's default hint
/// file when it exists.
fn load_domains(explicit: Option<&Path>) -> anyhow::Result<DomainTable> {
    let builtin = DomainTable::builtin();

    if let Some(path) = explicit {
        let extra =
            DomainTable::load_file(path).with_context(|| format!("Failed to load hints: {}", path.display()))?;
        return Ok(builtin.merge(extra));
    }

    match DomainTable::default_hints_path() {
        Some(path) if path.exists() => {
            let extra =
                DomainTable::load_file(&path).with_context(|| format!("Failed to load hints: {}", path.display()))?;
            Ok(builtin.merge(extra))
        }
        _ => Ok(builtin),
    }
}

fn render(preview: &MetadataResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(preview).context("Failed to serialize preview"),
        OutputFormat::Text => {
            let mut out = format!("Title:       {}\n", preview.title);
            if !preview.description.is_empty() {
                out.push_str(&format!("Description: {}\n", preview.description));
            }
            out.push_str(&format!("Thumbnail:   {}\n", preview.thumbnail));
            Ok(out)
        }
    }
}

async fn run_fetch(
    url: &str, format: OutputFormat, timeout_ms: u64, proxies: &[String], hints: Option<&Path>, verbose: bool,
) -> anyhow::Result<()> {
    let mut builder = MetadataConfig::builder().fetch_timeout(Duration::from_millis(timeout_ms));
    if !proxies.is_empty() {
        let strategies = proxies
            .iter()
            .map(|template| ProxyStrategy::from_template(template))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --proxy template")?;
        builder = builder.proxies(strategies);
    }
    let config = builder.build();
    let placeholder = config.placeholder_thumbnail.clone();

    if verbose {
        echo::print_step(1, 2, &format!("Fetching {}", url.bright_white().underline()));
        eprintln!(
            "  {} {}\n",
            "Relays:".dimmed(),
            config.proxies.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ").bright_white()
        );
    }

    let service = MetadataService::builder()
        .config(config)
        .domains(load_domains(hints)?)
        .build()
        .context("Failed to build metadata service")?;

    let started = Instant::now();
    let preview = service.extract_metadata(url).await;

    if verbose {
        echo::print_step(2, 2, "Rendering preview");
        echo::print_timing("Extraction", started.elapsed());
        echo::print_preview_details(&preview, &placeholder);
    }

    print!("{}", render(&preview, format)?);
    Ok(())
}

fn run_inspect(
    input: &str, page_url: &str, format: OutputFormat, hints: Option<&Path>, verbose: bool,
) -> anyhow::Result<()> {
    let parsed = Url::parse(page_url).with_context(|| format!("Invalid --url: {}", page_url))?;

    let html = if input == "-" {
        if verbose {
            echo::print_step(1, 2, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        if verbose {
            echo::print_step(1, 2, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
    };

    if verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 2, "Extracting fields");
    }

    let domains = load_domains(hints)?;
    let hint = parsed.host_str().and_then(|host| domains.lookup(host));
    let config = MetadataConfig::default();

    let preview = match ExtractionPath::for_url(&parsed) {
        ExtractionPath::Platform { username } => {
            extract_platform_fields(&html, parsed.as_str(), hint, username.as_deref(), &config)
        }
        ExtractionPath::Generic => extract_fields(&html, parsed.as_str(), hint, &config),
    };

    if verbose {
        echo::print_preview_details(&preview, &config.placeholder_thumbnail);
    }

    print!("{}", render(&preview, format)?);
    Ok(())
}

fn run_tags(url: &str, existing: &[String], verbose: bool) -> anyhow::Result<()> {
    let tags = suggest_tags(url, existing);

    if tags.is_empty() {
        if verbose {
            echo::print_warning("No suggestions");
        }
        return Ok(());
    }

    if verbose {
        echo::print_success(&format!("{} suggestion(s)", tags.len()));
    }
    println!("{}", tags.join("\n"));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match args.command {
        Command::Fetch { url, format, timeout_ms, proxies, hints } => {
            run_fetch(&url, format, timeout_ms, &proxies, hints.as_deref(), args.verbose).await
        }
        Command::Inspect { input, url, format, hints } => {
            run_inspect(&input, &url, format, hints.as_deref(), args.verbose)
        }
        Command::Tags { url, existing } => run_tags(&url, &existing, args.verbose),
    }
}
