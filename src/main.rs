//! Marketplace Shell - command-line front end.
//!
//! Drives the analysis screen and the description generator from the
//! terminal, or serves them over HTTP with `serve`.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use marketplace_shell::adapters::{terminal, web};
use marketplace_shell::describe::{DescriptionGenerator, GeminiClient};
use marketplace_shell::{
    AnalysisScreen, AppConfig, HttpAnalysisClient, InputType, ScreenState, SelectedFile,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marketplace-shell", version, about = "Book marketplace shell with medical document analysis")]
struct Cli {
    /// JSON config file, overlaid by environment variables.
    #[arg(long, global = true, env = "MARKETPLACE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one document for analysis.
    #[command(group(ArgGroup::new("source").required(true).args(["text", "pdf", "image"])))]
    Analyze {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        pdf: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print the screen view-model as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate a short synopsis for a book.
    Describe {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        keywords: String,
    },
    /// Check that the analysis backend is reachable.
    Health,
    /// Serve the web adapter.
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "marketplace_shell=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze { text, pdf, image, json } => {
            let mut screen = AnalysisScreen::new();
            if let Some(text) = text {
                screen.set_text(text)?;
            } else if let Some(path) = pdf {
                screen.set_mode(InputType::Pdf);
                screen.select_file(SelectedFile::from_path(&path)?)?;
            } else if let Some(path) = image {
                screen.set_mode(InputType::Image);
                screen.select_file(SelectedFile::from_path(&path)?)?;
            }

            let client = HttpAnalysisClient::from_config(&config);
            let state = screen.submit(&client).await;
            let view = screen.view();

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", terminal::render(&view));
            }

            if state != ScreenState::Success {
                std::process::exit(1);
            }
        }
        Command::Describe { title, author, keywords } => {
            let generator = GeminiClient::from_config(&config);
            println!("{}", generator.describe(&title, &author, &keywords).await);
        }
        Command::Health => {
            HttpAnalysisClient::from_config(&config)
                .health()
                .await
                .with_context(|| format!("Analysis service at {} is not healthy", config.api_base_url))?;
            println!("ok");
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            info!("Analysis backend: {}", config.api_base_url);
            let state = web::WebState {
                transport: Arc::new(HttpAnalysisClient::from_config(&config)),
                describer: Arc::new(GeminiClient::from_config(&config)),
            };
            web::serve(state, &config).await?;
        }
    }

    Ok(())
}
