//! Word Hunter - find unregistered five-letter dictionary domains
//!
//! Loads a word list, skips every word whose domain already resolves, and
//! asks an availability API about the remainder with a fixed delay between calls.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use word_hunter::{
    config::{parse_seconds, ApiBackend, JsonApiConfig},
    logging::init_cli_logger,
    progress::{BarProgress, NoProgress, ProgressSink},
    report::save_json,
    HuntConfig, Hunter, HunterError, Report, Result,
};

/// Exit status after Ctrl-C, following the shell convention for SIGINT
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "word-hunter",
    version,
    about = "Find unregistered five-letter dictionary domains",
    after_help = "Every flag can also be set through the environment or a .env file:\n  \
                  WORD_LIST_PATH, DELAY_SECONDS, TLD, DNS_TIMEOUT_SECONDS, API_TIMEOUT_SECONDS,\n  \
                  RDAP_BASE_URL, AVAILABILITY_API_URL, AVAILABILITY_API_FIELD,\n  \
                  AVAILABILITY_API_KEY, AVAILABILITY_API_KEY_HEADER"
)]
struct Cli {
    /// Dictionary file, one word per line or whitespace-separated
    #[arg(short, long, value_name = "PATH")]
    words: Option<PathBuf>,

    /// Seconds to wait between availability API calls (fractions allowed)
    #[arg(short, long, value_name = "SECONDS")]
    delay: Option<String>,

    /// Domain suffix to check, without the dot
    #[arg(short, long)]
    tld: Option<String>,

    /// JSON availability API URL containing {domain}; RDAP is used otherwise
    #[arg(long, value_name = "TEMPLATE")]
    api_url: Option<String>,

    /// Dotted path of the availability field in the JSON response
    #[arg(long, value_name = "FIELD")]
    api_field: Option<String>,

    /// Check at most this many candidates
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Also write the results as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not draw progress bars
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = word_hunter::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    init_cli_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = apply_overrides(&cli, HuntConfig::from_env()?)?.validate()?;

    print_header(&config);

    let hunter = Hunter::from_config(config)?;
    let progress: Box<dyn ProgressSink> = if cli.no_progress {
        Box::new(NoProgress)
    } else {
        Box::new(BarProgress::new())
    };

    let outcome = tokio::select! {
        outcome = hunter.run(progress.as_ref()) => outcome?,
        _ = tokio::signal::ctrl_c() => {
            progress.finish();
            println!();
            println!("🛑 Interrupted, nothing was saved.");
            process::exit(EXIT_INTERRUPTED);
        }
    };

    Report::from_outcome(&outcome).print().map_err(HunterError::from)?;

    if let Some(path) = &cli.output {
        save_json(&outcome, path)?;
        println!();
        println!("💾 Results saved to {}", path.display());
    }

    Ok(())
}

/// Layer command line flags over the environment-derived configuration
fn apply_overrides(cli: &Cli, mut config: HuntConfig) -> Result<HuntConfig> {
    if let Some(path) = &cli.words {
        config.word_list_path = path.clone();
    }
    if let Some(delay) = &cli.delay {
        config.delay = parse_seconds("--delay", delay)?;
    }
    if let Some(tld) = &cli.tld {
        config.tld = tld.clone();
    }
    if cli.limit.is_some() {
        config.limit = cli.limit;
    }

    if let Some(url_template) = &cli.api_url {
        config.api = match config.api {
            ApiBackend::Json(json) => ApiBackend::Json(JsonApiConfig {
                url_template: url_template.clone(),
                ..json
            }),
            ApiBackend::Rdap { .. } => ApiBackend::Json(JsonApiConfig::new(url_template.clone())),
        };
    }

    if let Some(field) = &cli.api_field {
        match &mut config.api {
            ApiBackend::Json(json) => json.field = field.clone(),
            ApiBackend::Rdap { .. } => {
                return Err(HunterError::config("--api-field requires --api-url"));
            }
        }
    }

    Ok(config)
}

fn print_header(config: &HuntConfig) {
    let backend = match &config.api {
        ApiBackend::Rdap { base_url: Some(url) } => format!("RDAP ({})", url),
        ApiBackend::Rdap { base_url: None } => "RDAP".to_string(),
        ApiBackend::Json(json) => format!("JSON API ({})", json.url_template),
    };

    println!("🔎 Word Hunter - five-letter .{} domains", config.tld);
    println!("═══════════════════════════════════════");
    println!("   📚 Word list: {}", config.word_list_path.display());
    println!("   🌐 Availability: {}", backend);
    println!("   ⏳ Delay between checks: {:.2}s", config.delay.as_secs_f64());
    println!();
}
