use anyhow::Result;
use clap::{Parser, Subcommand};
use proxy_sieve::{
    logging::init_logging,
    proxy::{format_file, validate_file, CheckerConfig, FormatStyle, ProxyType, DEFAULT_TARGETS},
    Config,
};
use std::path::PathBuf;
use std::time::Duration;

/// Validates proxy lists by probing reachability targets through every proxy
#[derive(Parser)]
#[command(name = "proxy-sieve")]
#[command(about = "Validates proxy lists by probing reachability targets through every proxy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check proxies and save the good ones
    Check {
        /// Input file containing proxies
        #[arg(short, long, default_value = "proxy.txt")]
        input: PathBuf,
        /// Output file for good proxies
        #[arg(short, long, default_value = "good_proxy.txt")]
        output: PathBuf,
        /// Proxy type (http, https, socks5)
        #[arg(short = 't', long, default_value = "http")]
        proxy_type: String,
        /// Timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
        /// URL to probe through every proxy (can specify multiple)
        #[arg(long = "target")]
        targets: Vec<String>,
    },
    /// Rewrite HOST:PORT:USER:PASS lines into proxy URLs
    Format {
        /// Output style (socks5, http, plain)
        #[arg(short, long)]
        style: String,
        /// Input file containing proxies
        #[arg(short, long, default_value = "proxy.txt")]
        input: PathBuf,
        /// Output file for formatted proxies
        #[arg(short, long, default_value = "formatted.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Check {
            input,
            output,
            proxy_type,
            timeout,
            targets,
        }) => {
            let targets = if targets.is_empty() {
                DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect()
            } else {
                targets
            };
            let checker = CheckerConfig::new()
                .with_timeout(Duration::from_secs(timeout))
                .with_proxy_type(proxy_type.parse::<ProxyType>()?)
                .with_targets(targets);

            run_check(&Config { input, output }, &checker).await?;
        }
        None => {
            run_check(&Config::default(), &CheckerConfig::default()).await?;
        }
        Some(Commands::Format {
            style,
            input,
            output,
        }) => {
            let style: FormatStyle = style.parse()?;
            let written = format_file(&input, &output, style)?;
            println!("Formatted {} lines from {:?} into {:?}", written, input, output);
        }
    }

    Ok(())
}

async fn run_check(config: &Config, checker: &CheckerConfig) -> Result<()> {
    let summary = validate_file(config, checker).await?;
    println!(
        "Results: {} good of {} proxies ({} malformed lines skipped)",
        summary.good_proxies, summary.proxies, summary.malformed_lines
    );
    println!("Saved good proxies to {:?}", config.output);
    Ok(())
}
