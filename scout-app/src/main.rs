use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scout_common::observability::{init_logging, LogConfig};
use scout_common::{OutputFormat, ScoutConfig, ScoutError};
use scout_config::ScoutConfigLoader;
use scout_drivers::browser::ScoutDriver;
use scout_extract::{LoginProbe, PageExtractor, WebDriverSessionFactory};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "scout",
    about = "Drive a browser and extract normalized results from live pages"
)]
struct Cli {
    /// Path to a YAML configuration file; missing files fall back to
    /// defaults plus SCOUT_ environment overrides.
    #[arg(long, default_value = "scout.yaml")]
    config: PathBuf,

    /// Run the browser headless regardless of configuration.
    #[arg(long)]
    headless: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first heading on the page, trying each preferred tag in order.
    Heading { url: String },
    /// Print every anchor with non-blank text.
    Links { url: String },
    /// Print the page title and current address.
    Info { url: String },
    /// Drive the demo login flow and report the outcome.
    Login {
        /// Username to submit; defaults to the configured demo account.
        #[arg(long)]
        username: Option<String>,
        /// Password to submit; defaults to the configured demo account.
        #[arg(long)]
        password: Option<String>,
    },
    /// Save a PNG screenshot of the page.
    Screenshot {
        url: String,
        /// Where to write the PNG.
        #[arg(long, default_value = "screenshot.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first (env wins), then logging.
    let mut config: ScoutConfig = ScoutConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()
        .map_err(|e| ScoutError::Config(e.to_string()))?;
    if cli.headless {
        config.headless = true;
    }

    init_logging(LogConfig::default())?;

    match cli.command {
        Command::Heading { url } => {
            let extractor =
                PageExtractor::from_config(WebDriverSessionFactory::new(&config), &config);
            let heading = extractor.heading(&url).await?;
            match config.output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&heading)?),
                OutputFormat::Text => {
                    println!("{}", heading.as_deref().unwrap_or("(no heading)"))
                }
            }
        }
        Command::Links { url } => {
            let extractor =
                PageExtractor::from_config(WebDriverSessionFactory::new(&config), &config);
            let links = extractor.links(&url).await?;
            match config.output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
                OutputFormat::Text => {
                    for link in &links {
                        println!("{} -> {}", link.text, link.href);
                    }
                    info!(count = links.len(), "links extracted");
                }
            }
        }
        Command::Info { url } => {
            let extractor =
                PageExtractor::from_config(WebDriverSessionFactory::new(&config), &config);
            let page_info = extractor.page_info(&url).await?;
            match config.output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page_info)?),
                OutputFormat::Text => {
                    println!("title: {}", page_info.title);
                    println!("url:   {}", page_info.url);
                }
            }
        }
        Command::Login { username, password } => {
            let username = username.unwrap_or_else(|| config.demo.username.clone());
            let password = password.unwrap_or_else(|| config.demo.password.clone());
            let probe = LoginProbe::from_config(WebDriverSessionFactory::new(&config), &config);
            let report = probe.run(&username, &password).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.succeeded {
                std::process::exit(1);
            }
        }
        Command::Screenshot { url, out } => {
            let driver = ScoutDriver::from_config(&config)
                .await
                .map_err(ScoutError::Driver)?;
            let shot = capture(&driver, &url, &config).await;
            // Release the session before surfacing the outcome.
            let _ = driver.close().await;
            let bytes = shot?;
            std::fs::write(&out, &bytes)?;
            println!("{} ({} bytes)", out.display(), bytes.len());
        }
    }

    Ok(())
}

async fn capture(driver: &ScoutDriver, url: &str, config: &ScoutConfig) -> Result<Vec<u8>> {
    let page = driver.goto(url).await?;
    page.wait_for_css("body", Duration::from_secs(config.wait_timeout_secs))
        .await?;
    page.screenshot().await
}
