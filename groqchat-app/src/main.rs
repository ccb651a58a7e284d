//! groqchat CLI - multimodal chatbot on Groq.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use groqchat::llms::Groq;
use groqchat::media::{AudioInput, ImageInput};
use groqchat::processor::{MultimodalInput, MultimodalProcessor};
use groqchat_app::config::{
    AppConfig, ConfigError, IssueLevel, init_config_at, load_config_from, resolve_config_path,
};
use groqchat_app::error::Result;
use groqchat_app::{respond, server};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// groqchat - ask Groq-hosted models about text, images and audio
#[derive(Parser)]
#[command(name = "groqchat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "GROQCHAT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI
    Serve(ServeArgs),

    /// Ask a single question from the command line
    Ask(AskArgs),

    /// Show configuration and environment status
    Status,

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the serve command
#[derive(Args)]
struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Arguments for the ask command
#[derive(Args)]
struct AskArgs {
    /// Question or content
    #[arg(short, long)]
    text: Option<String>,

    /// Image to describe
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Audio clip to transcribe
    #[arg(short, long)]
    audio: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Create a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration
    Validate,
}

fn main() -> ExitCode {
    // A missing .env file is fine.
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "groqchat_app={level},groqchat={level},tower_http={},{}",
            if verbosity >= 1 { "debug" } else { "warn" },
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config_file = resolve_config_path(cli.config);
    match cli.command {
        Commands::Serve(args) => cmd_serve(args, &config_file).await,
        Commands::Ask(args) => cmd_ask(args, &config_file).await,
        Commands::Status => cmd_status(&config_file).await,
        Commands::Config(args) => cmd_config(args, &config_file).await,
    }
}

/// Load the config file and merge the environment.
async fn load(config_file: &Path) -> Result<AppConfig> {
    Ok(load_config_from(config_file).await?.with_env())
}

/// Start the web UI.
async fn cmd_serve(args: ServeArgs, config_file: &Path) -> Result<()> {
    let mut config = load(config_file).await?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.api_key().is_none() {
        println!("Error: GROQ_API_KEY not found");
        println!("Create a .env file containing GROQ_API_KEY=<key>, export the variable,");
        println!("or set groq.api_key in {}", config_file.display());
        return Err(ConfigError::MissingField("groq.api_key (or GROQ_API_KEY)".to_owned()).into());
    }

    for issue in config.validate() {
        match issue.level {
            IssueLevel::Error => tracing::error!("{issue}"),
            IssueLevel::Warning => tracing::warn!("{issue}"),
        }
    }

    println!("Multimodal AI Chatbot running on http://{}", config.server.bind_addr());
    println!("Press Ctrl+C to stop.\n");

    server::serve(&config).await
}

/// One-shot request from the command line.
async fn cmd_ask(args: AskArgs, config_file: &Path) -> Result<()> {
    let config = load(config_file).await?;
    let groq = Groq::new(config.groq_config()?)?;
    let processor = MultimodalProcessor::new(groq, config.processor_options());

    let mut input = MultimodalInput::new();
    input.text = args.text;
    if let Some(path) = args.image {
        input.image = Some(ImageInput::load(path).await?);
    }
    if let Some(path) = args.audio {
        input.audio = Some(AudioInput::load(path).await?);
    }

    let reply = respond(&processor, &input).await;
    println!("{}", reply.response);
    println!();
    println!("Status: {}", reply.status);

    Ok(())
}

/// Show status.
async fn cmd_status(config_file: &Path) -> Result<()> {
    println!("groqchat status\n");

    println!("Configuration:");
    println!("  Path:   {}", config_file.display());
    println!(
        "  Exists: {}",
        if config_file.exists() { "yes" } else { "no" }
    );

    match load(config_file).await {
        Ok(config) => {
            println!(
                "  Valid:  {}",
                if config.is_valid() { "yes" } else { "no" }
            );
            for issue in config.validate() {
                println!("          {issue}");
            }
            println!();
            println!("Models:");
            println!("  Chat:          {}", config.groq.chat_model);
            println!("  Vision:        {}", config.groq.vision_model);
            println!("  Transcription: {}", config.groq.transcription_model);
            println!();
            println!("Server:");
            println!("  Address:     http://{}", config.server.bind_addr());
            println!("  Upload max:  {} bytes", config.server.max_upload_bytes);
        }
        Err(e) => {
            println!("  Valid:  no ({e})");
        }
    }

    println!();
    println!("Environment:");
    print_env_status("GROQ_API_KEY");
    print_env_status("GROQ_BASE_URL");
    print_env_status("GROQ_CHAT_MODEL");
    print_env_status("GROQ_VISION_MODEL");
    print_env_status("GROQ_TRANSCRIPTION_MODEL");

    Ok(())
}

/// Configuration management.
async fn cmd_config(args: ConfigArgs, config_file: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }
        ConfigCommands::Show => {
            if config_file.exists() {
                let content = tokio::fs::read_to_string(config_file).await?;
                println!("{content}");
            } else {
                println!("Configuration file does not exist.");
                println!("Run 'groqchat config init' to create one.");
            }
        }
        ConfigCommands::Init { force } => {
            if config_file.exists() && !force {
                println!("Configuration already exists at: {}", config_file.display());
                println!("Use --force to overwrite.");
                return Ok(());
            }
            if force && config_file.exists() {
                tokio::fs::remove_file(config_file).await?;
            }

            init_config_at(config_file).await?;

            println!("Configuration created: {}", config_file.display());
            println!();
            println!("Next steps:");
            println!("  1. echo GROQ_API_KEY=<key> > .env");
            println!("  2. groqchat serve");
        }
        ConfigCommands::Validate => {
            if !config_file.exists() {
                println!("note: {} does not exist, checking defaults", config_file.display());
            }

            let config = load(config_file).await?;
            let issues = config.validate();
            if issues.is_empty() {
                println!("Configuration is valid");
            }
            for issue in &issues {
                println!("{issue}");
            }
        }
    }

    Ok(())
}

/// Print environment variable status.
fn print_env_status(name: &str) {
    let status = if std::env::var(name).is_ok() {
        "set"
    } else {
        "-"
    };
    println!("  {name}: {status}");
}
