//! # Lead Enrich CLI
//!
//! Command-line adapter over `lead_enrich_core`. Parses arguments, builds the
//! configuration, runs one of the four flows on a single item or an input
//! CSV, and writes the result table to a file or standard output.

use lead_enrich_core::{
    convert_companies, convert_single, enrich_contacts, guess_bulk, guess_from_profiles,
    guess_single, guess_single_profile, initialize_enricher, read_rows_from_path, write_rows,
    Config, ConfigBuilder, DomainInput, DomainRow, EnrichmentInput, LeadEnricher, PatternInput,
    PatternRow, ProfileInput, ProfileRow, ResolverEndpoint, TableFormat, TableRow,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for TableFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => TableFormat::Csv,
            OutputFormat::Json => TableFormat::Json,
        }
    }
}

/// Clearbit lookup used for domain resolution.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum EndpointArg {
    /// Keyless suggestions with logo and social links
    Autocomplete,
    /// Keyed name-to-domain lookup
    Domain,
    /// Keyed company record lookup
    Company,
}

impl From<EndpointArg> for ResolverEndpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::Autocomplete => ResolverEndpoint::Autocomplete,
            EndpointArg::Domain => ResolverEndpoint::Domain,
            EndpointArg::Company => ResolverEndpoint::Company,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resolves company domains and guesses professional email addresses.",
    long_about = "Lead Enrich resolves company names to domains, generates email address candidates from names, and verifies them, for single contacts or whole CSV files."
)]
struct AppArgs {
    #[command(subcommand)]
    command: Command,

    /// Write results to this file instead of standard output.
    #[arg(short, long, global = true, env = "LEAD_ENRICH_OUTPUT")]
    output: Option<PathBuf>,

    /// Encoding of the result table.
    #[arg(long, value_enum, global = true, default_value = "csv")]
    format: OutputFormat,

    /// Path to a configuration file (TOML format). CLI args override file settings.
    #[arg(long, global = true, env = "LEAD_ENRICH_CONFIG")]
    config_file: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, global = true, env = "LEAD_ENRICH_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// User agent for API requests.
    #[arg(long, global = true, env = "LEAD_ENRICH_USER_AGENT")]
    user_agent: Option<String>,

    /// Pause between lookups in bulk domain conversion, in milliseconds.
    #[arg(long, global = true, env = "LEAD_ENRICH_COURTESY_DELAY_MS")]
    courtesy_delay_ms: Option<u64>,

    /// Clearbit endpoint used for domain resolution.
    #[arg(long, value_enum, global = true, env = "LEAD_ENRICH_RESOLVER_ENDPOINT")]
    resolver_endpoint: Option<EndpointArg>,

    /// API key for the domain resolver.
    #[arg(long, global = true, env = "LEAD_ENRICH_RESOLVER_KEY", hide_env_values = true)]
    resolver_key: Option<String>,

    /// API key for the email verifier.
    #[arg(long, global = true, env = "LEAD_ENRICH_VERIFIER_KEY", hide_env_values = true)]
    verifier_key: Option<String>,

    /// User-Agent header sent when fetching profile pages.
    #[arg(long, global = true, env = "LEAD_ENRICH_SCRAPER_USER_AGENT")]
    scraper_user_agent: Option<String>,

    /// Cookie header sent when fetching profile pages.
    #[arg(long, global = true, env = "LEAD_ENRICH_SCRAPER_COOKIE", hide_env_values = true)]
    scraper_cookie: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add domain, guessed email and verification status to a contact CSV
    /// (columns: Company, First Name, Last Name).
    Enrich {
        /// Input CSV file.
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Convert company names to domains with a confidence score.
    Domain {
        /// Single company name.
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        company: Option<String>,
        /// Input CSV file with a Company column.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Generate email address candidates from a domain and name.
    Guess(GuessArgs),
    /// Guess and verify email addresses from LinkedIn profile URLs.
    Linkedin {
        /// Single profile URL.
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        url: Option<String>,
        /// Input CSV file with a "LinkedIn URL" column.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct GuessArgs {
    /// Input CSV file (columns: Domain, First Name, Last Name).
    #[arg(short, long, conflicts_with_all = ["domain", "first_name", "last_name"])]
    input: Option<PathBuf>,
    #[arg(long)]
    domain: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")?;

    tracing::info!("Lead Enrich CLI v{} starting...", env!("CARGO_PKG_VERSION"));

    let args = AppArgs::parse();
    let config = build_config(&args)?;
    tracing::debug!("Effective configuration loaded: {:?}", config);

    let start_time = Instant::now();
    match &args.command {
        Command::Enrich { input } => run_enrich(&config, &args, input).await?,
        Command::Domain { company, input } => {
            run_domain(&config, &args, company.as_deref(), input.as_deref()).await?
        }
        Command::Guess(guess) => run_guess(&args, guess)?,
        Command::Linkedin { url, input } => {
            run_linkedin(&config, &args, url.as_deref(), input.as_deref()).await?
        }
    }

    tracing::info!("Finished. Total duration: {:.2?}", start_time.elapsed());
    Ok(())
}

fn build_config(args: &AppArgs) -> Result<Config> {
    let mut config_builder = ConfigBuilder::new();

    if let Some(ref path) = args.config_file {
        config_builder = config_builder.config_file(path);
    }
    if let Some(t) = args.request_timeout {
        config_builder = config_builder.request_timeout(Duration::from_secs(t));
    }
    if let Some(ref ua) = args.user_agent {
        config_builder = config_builder.user_agent(ua);
    }
    if let Some(ms) = args.courtesy_delay_ms {
        config_builder = config_builder.courtesy_delay(Duration::from_millis(ms));
    }
    if let Some(endpoint) = args.resolver_endpoint {
        config_builder = config_builder.resolver_endpoint(endpoint.into());
    }
    if let Some(ref key) = args.resolver_key {
        config_builder = config_builder.domain_resolver_key(key);
    }
    if let Some(ref key) = args.verifier_key {
        config_builder = config_builder.verifier_key(key);
    }
    if let Some(ref ua) = args.scraper_user_agent {
        config_builder = config_builder.scraper_user_agent(ua);
    }
    if let Some(ref cookie) = args.scraper_cookie {
        config_builder = config_builder.scraper_cookie(cookie);
    }

    config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build configuration: {}", e))
}

fn initialize(config: &Config) -> Result<LeadEnricher> {
    initialize_enricher(config).map_err(|e| anyhow::anyhow!("Failed to initialize enricher: {}", e))
}

fn load_rows<T: serde::de::DeserializeOwned>(path: &Path, required: Option<&str>) -> Result<Vec<T>> {
    tracing::info!("Loading rows from '{}'...", path.display());
    let rows = read_rows_from_path(path, required)
        .with_context(|| format!("Failed to read input CSV '{}'", path.display()))?;
    tracing::info!("Loaded {} rows.", rows.len());
    Ok(rows)
}

/// Writes the result table to `--output` or standard output.
fn emit<T: TableRow>(rows: &[T], args: &AppArgs) -> Result<()> {
    let format = TableFormat::from(args.format);
    match args.output {
        Some(ref path) => {
            if let Some(parent_dir) = path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    std::fs::create_dir_all(parent_dir).with_context(|| {
                        format!("Failed to create output directory '{}'", parent_dir.display())
                    })?;
                }
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
            write_rows(rows, BufWriter::new(file), format)
                .with_context(|| format!("Failed to write results to '{}'", path.display()))?;
            tracing::info!("Saved {} rows to '{}'.", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_rows(rows, stdout.lock(), format).context("Failed to write results to stdout")?;
        }
    }
    Ok(())
}

fn progress_bar(len: usize, message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::default_bar()
         .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | ETA: {eta} | {msg}")
         .context("Failed to set progress bar template")?
         .progress_chars("=> "));
    pb.set_message(message);
    Ok(pb)
}

async fn run_enrich(config: &Config, args: &AppArgs, input: &Path) -> Result<()> {
    let enricher = initialize(config)?;
    let rows: Vec<EnrichmentInput> = load_rows(input, None)?;
    let start_time = Instant::now();

    let pb = progress_bar(rows.len(), "Enriching contacts...")?;
    let results = enrich_contacts(&enricher, &rows, |done| pb.set_position(done as u64)).await;
    pb.finish_with_message(format!("Enriched {} rows", results.len()));

    let misses = results.iter().filter(|r| r.guessed_email.is_empty()).count();
    log_summary(rows.len(), results.len(), misses, start_time.elapsed());
    emit(&results, args)
}

async fn run_domain(
    config: &Config,
    args: &AppArgs,
    company: Option<&str>,
    input: Option<&Path>,
) -> Result<()> {
    let enricher = initialize(config)?;

    if let Some(path) = input {
        let rows: Vec<DomainInput> = load_rows(path, Some("Company"))?;
        let start_time = Instant::now();
        tracing::info!(
            "Converting {} companies (courtesy delay {:?})...",
            rows.len(),
            enricher.courtesy_delay()
        );
        let pb = progress_bar(rows.len(), "Resolving domains...")?;
        let results = convert_companies(&enricher, &rows, |done| pb.set_position(done as u64)).await;
        pb.finish_with_message(format!("Resolved {} rows", results.len()));

        let misses = results.iter().filter(|r| r.domain == lead_enrich_core::NOT_FOUND).count();
        log_summary(rows.len(), results.len(), misses, start_time.elapsed());
        return emit(&results, args);
    }

    let company = company.unwrap_or_default();
    let candidate = convert_single(&enricher, company).await?;
    eprintln!(
        "Domain for '{}': {} (Confidence: {}%)",
        candidate.display_name(company),
        candidate.domain,
        candidate.confidence
    );
    if let Some(ref logo) = candidate.logo_url {
        eprintln!("Logo:     {}", logo);
    }
    emit(&[DomainRow::from_candidate(&candidate, company)], args)
}

fn run_guess(args: &AppArgs, guess: &GuessArgs) -> Result<()> {
    if let Some(ref path) = guess.input {
        let rows: Vec<PatternInput> = load_rows(path, None)?;
        let results = guess_bulk(&rows);
        tracing::info!(
            "Generated {} candidates from {} input rows.",
            results.len(),
            rows.len()
        );
        return emit(&results, args);
    }

    let domain = guess.domain.as_deref().unwrap_or_default();
    let first_name = guess.first_name.as_deref().unwrap_or_default();
    let last_name = guess.last_name.as_deref().unwrap_or_default();
    let candidates = guess_single(domain, first_name, last_name)?;

    let rows: Vec<PatternRow> = candidates
        .into_iter()
        .map(|email| PatternRow {
            domain: domain.trim().to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            guessed_email: email,
        })
        .collect();
    emit(&rows, args)
}

async fn run_linkedin(
    config: &Config,
    args: &AppArgs,
    url: Option<&str>,
    input: Option<&Path>,
) -> Result<()> {
    let enricher = initialize(config)?;

    if let Some(path) = input {
        let rows: Vec<ProfileInput> = load_rows(path, None)?;
        let start_time = Instant::now();
        let pb = progress_bar(rows.len(), "Guessing from profiles...")?;
        let results = guess_from_profiles(&enricher, &rows, |done| pb.set_position(done as u64)).await;
        pb.finish_with_message(format!("Produced {} rows", results.len()));

        let resolved: std::collections::HashSet<&str> =
            results.iter().map(|r| r.linkedin_url.as_str()).collect();
        log_summary(
            rows.len(),
            results.len(),
            rows.len().saturating_sub(resolved.len()),
            start_time.elapsed(),
        );
        return emit(&results, args);
    }

    let url = url.unwrap_or_default();
    let guess = guess_single_profile(&enricher, url).await?;
    eprintln!(
        "{} {} at {} ({})",
        guess.name.first, guess.name.last, guess.company, guess.domain
    );
    let rows: Vec<ProfileRow> = guess.into_rows(url);
    emit(&rows, args)
}

/// Logs a summary of a bulk run using `tracing::info`.
fn log_summary(rows_in: usize, rows_out: usize, misses: usize, duration: Duration) {
    tracing::info!("-------------------- Processing Summary --------------------");
    tracing::info!("Input Rows                  : {}", rows_in);
    tracing::info!("Output Rows                 : {}", rows_out);
    tracing::info!("Unresolved Inputs           : {}", misses);
    tracing::info!("Total Time Taken            : {:.2?}", duration);
    if duration.as_secs_f64() > 0.01 && rows_in > 0 {
        let rate = (rows_in as f64) / duration.as_secs_f64();
        tracing::info!("Processing Rate             : {:.2} rows/sec", rate);
    }
    tracing::info!("----------------------------------------------------------");
}
