//! pagescrape - scrape links, paragraphs, and images from one web page

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagescrape::{DEFAULT_OUTPUT_FILE, FetchOptions, ScrapeData, save_report, scrape_url, write_report};

#[derive(Parser)]
#[command(name = "pagescrape")]
#[command(version, about = "Scrape links, paragraph text, and images from a web page", long_about = None)]
#[command(after_help = "EXAMPLES:
    pagescrape --url https://example.com             Print results, ask before saving
    pagescrape -u https://example.com --save         Print and save to output.txt
    pagescrape -u https://example.com --json         Print results as JSON")]
struct Cli {
    /// URL to scrape (e.g., https://example.com)
    #[arg(short, long, value_name = "URL")]
    url: String,

    /// File the report is saved to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: String,

    /// Save the report without asking
    #[arg(long, conflicts_with = "no_save")]
    save: bool,

    /// Never save the report and don't ask
    #[arg(long)]
    no_save: bool,

    /// Print results as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// User-Agent header sent with the request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Ignore HTTP_PROXY/HTTPS_PROXY from the environment
    #[arg(long)]
    no_proxy: bool,

    /// Suppress informational messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let mut options = FetchOptions::default().with_timeout(Duration::from_secs(cli.timeout));
    if let Some(ref ua) = cli.user_agent {
        options = options.with_user_agent(ua.as_str());
    }
    if cli.no_proxy {
        options = options.without_system_proxy();
    }

    let data = match scrape_url(&cli.url, &options) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: Failed to scrape: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = print_results(&data, cli.json) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let save = match cli.save_mode() {
        SaveMode::Always => true,
        SaveMode::Never => false,
        SaveMode::Ask => prompt_save(),
    };
    if save {
        // A failed save leaves the printed results valid
        match save_outcome(&data, &cli.output) {
            Ok(message) => {
                if !cli.quiet && !cli.json {
                    println!("{message}");
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    ExitCode::SUCCESS
}

fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "warn,pagescrape=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_results(data: &ScrapeData, json: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, data)?;
        writeln!(out)?;
        out.flush()
    } else {
        write_report(data, out)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SaveMode {
    Always,
    Never,
    Ask,
}

impl Cli {
    /// `--json` keeps stdout machine-readable, so it never prompts.
    fn save_mode(&self) -> SaveMode {
        if self.save {
            SaveMode::Always
        } else if self.no_save || self.json {
            SaveMode::Never
        } else {
            SaveMode::Ask
        }
    }
}

fn prompt_save() -> bool {
    print!("\nWould you like to save the scraped data to a file? (y/n): ");
    let _ = io::stdout().flush();
    let stdin = io::stdin();
    wants_save(stdin.lock())
}

/// Save the report. `Ok` holds the confirmation, `Err` the line for stderr.
fn save_outcome(data: &ScrapeData, path: &str) -> Result<String, String> {
    match save_report(data, path) {
        Ok(()) => Ok(format!("Data saved to {path}")),
        Err(e) => Err(format!("error: Error saving to file: {e}")),
    }
}

/// Only an explicit `y` saves; unreadable input counts as no.
fn wants_save<R: BufRead>(mut input: R) -> bool {
    let mut response = String::new();
    if input.read_line(&mut response).is_err() {
        return false;
    }
    response.trim().to_lowercase() == "y"
}
