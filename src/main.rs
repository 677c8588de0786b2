use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use wiki_versions::{
    config::Config,
    output::{format_result_to_string, print_result, OutputFormat},
    report::generate,
};

/// Exit codes
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "wiki-versions")]
#[command(
    author,
    version,
    about = "Print the installed versions of wiki components, security packages, and plugins"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to start from instead of the current directory
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,

    /// Output format (json, table)
    #[arg(short, long)]
    format: Option<String>,

    /// Write output to file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Per-package lookup timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { init, path }) => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
        None => {
            let mut config = Config::load()?;
            if let Some(secs) = cli.timeout {
                config.lookup_timeout_secs = secs;
            }

            let format = cli.format.unwrap_or_else(|| config.default_format.clone());
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            let start = match cli.dir {
                Some(dir) => cwd.join(dir),
                None => cwd,
            };

            run_report(start, &format, cli.output, &config).await
        }
    }
}

async fn run_report(start: PathBuf, format: &str, output_file: Option<PathBuf>, config: &Config) -> Result<u8> {
    let format = OutputFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))?;

    let report = generate(&start, config).await?;

    if let Some(path) = output_file {
        let content = format_result_to_string(&report, format, config.indent)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
    } else {
        print_result(&report, format, config.indent)?;
    }

    Ok(exit_codes::SUCCESS)
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'wiki-versions config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
