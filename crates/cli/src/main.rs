use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use vitis_core::{
    Catalog, ExtractionResult, FetchConfig, Outcome, Vitis, VitisConfig, catalog, fetch_file, fetch_stdin, fetch_url,
};

mod echo;

use echo::*;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Pull viticulture statistics tables from Vitibrasil
#[derive(Parser, Debug)]
#[command(name = "vitis")]
#[command(version)]
#[command(about = "Pull viticulture statistics tables from Vitibrasil", long_about = None)]
struct Args {
    /// Category: production, processing, commercialization, import, export
    #[arg(value_name = "CATEGORY", required_unless_present_any = ["list", "input"])]
    category: Option<String>,

    /// Year of the data (default: most recent available)
    #[arg(short, long, value_name = "YEAR")]
    year: Option<String>,

    /// Subcategory (processing, import and export only)
    #[arg(short, long, value_name = "NAME")]
    subcategory: Option<String>,

    /// Extract from a saved HTML file, or "-" for stdin, instead of fetching
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// List categories and their subcategories
    #[arg(short, long)]
    list: bool,

    /// Data source endpoint
    #[arg(long, default_value = vitis_core::DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn render_catalog(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(catalog).context("Failed to serialize catalog"),
        OutputFormat::Text => {
            let mut out = String::new();
            for category in &catalog.categories {
                match catalog.subcategories.get(category) {
                    Some(subs) => out.push_str(&format!("{}: {}\n", category, subs.join(", "))),
                    None => out.push_str(&format!("{}\n", category)),
                }
            }
            Ok(out)
        }
    }
}

fn render_outcome(outcome: &Outcome, format: OutputFormat) -> anyhow::Result<String> {
    match (format, outcome) {
        (OutputFormat::Json, _) => {
            let mut json = serde_json::to_string_pretty(outcome).context("Failed to serialize output")?;
            json.push('\n');
            Ok(json)
        }
        (OutputFormat::Text, Outcome::Extracted(result)) => Ok(result.to_text()),
        (OutputFormat::Text, Outcome::Failed(_, payload)) => Ok(format!("{}\n", payload.error)),
    }
}

/// Reads a saved page and extracts it, using the input path as source URL.
fn extract_local(vitis: &Vitis, input: &str, verbose: bool) -> vitis_core::Result<ExtractionResult> {
    if verbose {
        print_step(1, 3, if input == "-" { "Reading from stdin" } else { "Reading from file" });
    }

    let html = if input == "-" { fetch_stdin()? } else { fetch_file(input)? };

    if verbose {
        print_detail("Size", &format_size(html.len()));
        print_step(2, 3, "Extracting table");
    }

    Ok(vitis.extractor().extract(&html, input))
}

/// Builds the URL, fetches the page and extracts it.
async fn extract_remote(
    vitis: &Vitis, fetch_config: &FetchConfig, args: &Args, category: &str,
) -> vitis_core::Result<ExtractionResult> {
    let url = vitis
        .url_builder()
        .build(category, args.year.as_deref(), args.subcategory.as_deref())?;

    if args.verbose {
        print_step(1, 3, "Fetching");
        print_detail("URL", url.as_str());
    }

    let started = Instant::now();
    let html = fetch_url(&url, fetch_config).await?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        print_timing("Fetch", started.elapsed());
        print_step(2, 3, "Extracting table");
    }

    Ok(vitis.extractor().extract(&html, url.as_str()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    if args.list {
        let output = render_catalog(&catalog(), args.format)?;
        print!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let config = VitisConfig { base_url: args.base_url.clone(), fetch: fetch_config.clone(), ..Default::default() };
    let vitis = Vitis::new(config).context("Invalid configuration")?;

    let result = match (&args.input, &args.category) {
        (Some(input), _) => extract_local(&vitis, input, args.verbose),
        (None, Some(category)) => extract_remote(&vitis, &fetch_config, &args, category).await,
        (None, None) => anyhow::bail!("A category is required unless --input or --list is given"),
    };

    let outcome = Outcome::from(result);

    if args.verbose {
        match &outcome {
            Outcome::Extracted(result) => print_extraction_details(result),
            Outcome::Failed(_, payload) => print_error(&payload.error),
        }
        print_step(3, 3, "Writing output");
    }

    let output = render_outcome(&outcome, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            if outcome.is_success() {
                print_success(&format!("Output written to {}", path.display()));
            }
        }
        None => print!("{}", output),
    }

    Ok(if outcome.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
