use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notebookcast::language::available_languages;
use notebookcast::prompts::LENGTH_MODIFIERS;
use notebookcast::{NotebookcastConfig, PipelineBuilder, PodcastRequest};
use std::path::PathBuf;

#[cfg(feature = "http-serve")]
mod server;

#[derive(Parser)]
#[command(name = "notebookcast")]
#[command(about = "notebookcast - Turn PDFs and web pages into podcasts", long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one podcast and print its transcript
    Generate {
        /// PDF file to use as a source (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Web page to use as a source
        #[arg(short, long)]
        url: Option<String>,

        /// Question the dialogue should answer
        #[arg(short, long)]
        question: Option<String>,

        /// Tone of the dialogue, e.g. "Fun"
        #[arg(short, long)]
        tone: Option<String>,

        /// Length label, e.g. "Short (1-2 min)"
        #[arg(short, long)]
        length: Option<String>,

        /// Output language label, e.g. "English" or "中文"
        #[arg(long, default_value = "English")]
        language: String,

        /// Use the in-process TTS backend
        #[arg(long)]
        advanced: bool,

        /// Pin the voice pair of the advanced backend (0-8)
        #[arg(long)]
        seed: Option<u32>,

        /// Also write the transcript to this file
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// List the accepted language and length labels
    Options,
    /// Serve the pipeline over an HTTP REST API
    #[cfg(feature = "http-serve")]
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Generate {
            files,
            url,
            question,
            tone,
            length,
            language,
            advanced,
            seed,
            transcript,
        } => {
            let request = PodcastRequest {
                files,
                url,
                question,
                tone,
                length,
                language,
                use_advanced_audio: advanced,
                voice_seed: seed,
            };
            generate(config, request, transcript).await?;
        }
        Commands::Options => print_options(),
        #[cfg(feature = "http-serve")]
        Commands::Serve { host, port } => {
            let pipeline = PipelineBuilder::new(config).build()?;
            server::serve(server::ServerConfig { host, port }, pipeline).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<NotebookcastConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            notebookcast::config::parse_yaml_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(NotebookcastConfig::default()),
    }
}

async fn generate(
    config: NotebookcastConfig,
    request: PodcastRequest,
    transcript_path: Option<PathBuf>,
) -> Result<()> {
    let pipeline = PipelineBuilder::new(config).build()?;

    log::info!(
        "Generating podcast from {} file(s){}",
        request.files.len(),
        request
            .url
            .as_deref()
            .map(|url| format!(" and {url}"))
            .unwrap_or_default()
    );
    let output = pipeline.run(request).await?;

    if let Some(path) = transcript_path {
        tokio::fs::write(&path, &output.transcript)
            .await
            .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    }

    println!("\n========== Transcript ==========\n");
    println!("{}", output.transcript.trim_end());
    println!("\n================================");
    println!("Audio: {}", output.audio_path.display());

    Ok(())
}

fn print_options() {
    println!("Languages:");
    for label in available_languages() {
        println!("  {label}");
    }
    println!("Lengths:");
    for (label, _) in LENGTH_MODIFIERS {
        println!("  {label}");
    }
}
