mod producer;
mod watcher;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gijiroku_core::{AppConfig, StorageEvent};
use gijiroku_engine::{
    OpenAiSpeechEngine, OpenAiSummarizer, SpeechEngine, StaticSpeechEngine, StaticSummarizer,
    Summarizer,
};
use gijiroku_pipeline::{
    notifier, EnvSecretSource, FileSecretSource, SecretSource, SpeechEngineFactory, StageResponse,
    SummarizeStage, SummarizerFactory, TranscribeStage,
};
use gijiroku_store::{FsObjectStore, ObjectStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gijiroku", about = "Meeting minutes pipeline: audio → transcript → summary")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the storage namespace and run stages on newly created objects
    Watch,
    /// Run the transcription stage once for an event JSON file
    Transcribe {
        /// Path to a storage event JSON file
        #[arg(long)]
        event: PathBuf,
    },
    /// Run the summarization stage once for an event JSON file
    Summarize {
        /// Path to a storage event JSON file
        #[arg(long)]
        event: PathBuf,
    },
    /// Upload a local audio file into the storage namespace
    Upload {
        /// Path to the audio file
        file: PathBuf,
        /// Destination bucket
        #[arg(long)]
        bucket: String,
        /// Key prefix for the uploaded object
        #[arg(long, default_value = "raw-audio/")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("gijiroku starting");

    let store: Arc<dyn ObjectStore> = match config.storage.backend.as_str() {
        "fs" => Arc::new(FsObjectStore::new(config.storage.root.clone())),
        other => bail!("unknown storage backend: {other}"),
    };
    let secrets: Arc<dyn SecretSource> = match config.pipeline.secret_source.as_str() {
        "env" => Arc::new(EnvSecretSource),
        "file" => Arc::new(FileSecretSource),
        other => bail!("unknown secret source: {other}"),
    };
    let notifier = notifier::from_config(config.notify.as_ref())
        .context("failed to initialize notifier")?;

    let speech_factory: SpeechEngineFactory = match config.engine.name.as_str() {
        "openai" => {
            let engine_config = config.engine.clone();
            Box::new(move |api_key| {
                let engine = OpenAiSpeechEngine::new(&engine_config, api_key)?;
                Ok(Box::new(engine) as Box<dyn SpeechEngine>)
            })
        }
        "static" => {
            Box::new(|_api_key| Ok(Box::new(StaticSpeechEngine::default()) as Box<dyn SpeechEngine>))
        }
        other => bail!("unknown engine: {other}"),
    };
    let summarizer_factory: SummarizerFactory = match config.engine.name.as_str() {
        "openai" => {
            let engine_config = config.engine.clone();
            Box::new(move |api_key| {
                let summarizer = OpenAiSummarizer::new(&engine_config, api_key)?;
                Ok(Box::new(summarizer) as Box<dyn Summarizer>)
            })
        }
        "static" => {
            Box::new(|_api_key| Ok(Box::new(StaticSummarizer::default()) as Box<dyn Summarizer>))
        }
        other => bail!("unknown engine: {other}"),
    };

    let transcribe = TranscribeStage::new(
        Arc::clone(&store),
        Arc::clone(&secrets),
        speech_factory,
        config.pipeline.clone(),
    );
    let summarize = SummarizeStage::new(
        Arc::clone(&store),
        Arc::clone(&secrets),
        summarizer_factory,
        notifier,
        config.pipeline.clone(),
    );

    match cli.command {
        Command::Watch => {
            watcher::run(
                watcher::WatchConfig {
                    root: config.storage.root.clone(),
                    audio_prefix: config.pipeline.audio_prefix.clone(),
                    transcript_prefix: config.pipeline.transcript_prefix.clone(),
                },
                transcribe,
                summarize,
            )
            .await
        }
        Command::Transcribe { event } => {
            let event = load_event(&event)?;
            let response = transcribe.handle(&event).await;
            report_response(&response)
        }
        Command::Summarize { event } => {
            let event = load_event(&event)?;
            let response = summarize.handle(&event).await;
            report_response(&response)
        }
        Command::Upload {
            file,
            bucket,
            prefix,
        } => {
            producer::upload(store.as_ref(), &file, &bucket, &prefix).await?;
            Ok(())
        }
    }
}

fn load_event(path: &Path) -> Result<StorageEvent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event file {path:?}"))?;
    serde_json::from_str(&raw).context("failed to parse event JSON")
}

fn report_response(response: &StageResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
