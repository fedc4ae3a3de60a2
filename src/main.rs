mod config;
mod error;
mod llm;
mod models;
mod scraper;
mod tools;
mod translate;
mod web;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::{AuthType, CodeGenRequest, EndpointRequest, HttpMethod, Language, QueryParams};

#[derive(Parser)]
#[command(name = "api-whisperer")]
#[command(about = "API Whisperer: simulated API documentation assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// "Scrape" a documentation URL into the sample endpoint list
    Scrape {
        url: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a code snippet calling an endpoint
    Codegen {
        #[arg(short, long)]
        language: Language,
        #[arg(short, long, default_value = "GET")]
        method: HttpMethod,
        #[arg(short, long)]
        endpoint: String,
        #[arg(short, long)]
        base_url: String,
        #[arg(short, long, default_value = "none")]
        auth_type: AuthType,
        /// Query parameter as key=value, repeatable
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
        /// JSON object sent as the request body
        #[arg(long)]
        body: Option<String>,
    },
    /// Translate a short phrase
    Translate {
        text: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        from: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            info!(
                version = env!("CARGO_PKG_VERSION"),
                host = %config.host,
                port = config.port,
                simulated_latency_ms = config.simulated_latency_ms,
                "Starting API Whisperer"
            );
            web::run_server(config).await?;
        }
        Commands::Scrape { url, output } => {
            let scraper = scraper::DocScraper::new(config.simulated_delay());
            let documentation = scraper.scrape(&url).await?;

            let output_path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "data/scraped/{}.json",
                    scraper::workspace_slug(&documentation.title)
                ))
            });
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, serde_json::to_string_pretty(&documentation)?)?;
            info!(path = %output_path.display(), "Documentation saved");
        }
        Commands::Codegen {
            language,
            method,
            endpoint,
            base_url,
            auth_type,
            params,
            body,
        } => {
            let body = body
                .map(|raw| serde_json::from_str::<Map<String, Value>>(&raw))
                .transpose()
                .context("--body must be a JSON object")?;
            let parameters = (!params.is_empty()).then(|| params.into_iter().collect::<QueryParams>());

            if !tools::has_template(language) {
                warn!(%language, "No template for this language yet");
            }

            let result = tools::generate_code(&CodeGenRequest {
                language,
                auth_type,
                request: EndpointRequest {
                    method,
                    endpoint,
                    base_url,
                    headers: BTreeMap::new(),
                    body,
                    parameters,
                },
            });
            println!("{}", result.code);
        }
        Commands::Translate { text, to, from } => {
            let response = translate::translate(
                translate::TranslationRequest {
                    text: Some(text),
                    target_language: Some(to),
                    source_language: from,
                },
                config.simulated_delay(),
            )
            .await?;
            println!("{}", response.translated_text);
        }
    }

    Ok(())
}
