//! Local event substrate: turns object creation in the filesystem store
//! into storage events and dispatches them to the pipeline stages.

use anyhow::{Context, Result};
use gijiroku_core::StorageEvent;
use gijiroku_pipeline::{SummarizeStage, TranscribeStage};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct WatchConfig {
    pub root: PathBuf,
    pub audio_prefix: String,
    pub transcript_prefix: String,
}

pub async fn run(
    config: WatchConfig,
    transcribe: TranscribeStage,
    summarize: SummarizeStage,
) -> Result<()> {
    std::fs::create_dir_all(&config.root)
        .with_context(|| format!("failed to create storage root {:?}", config.root))?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        if let Ok(event) = result {
            let _ = tx.send(event);
        }
    })
    .context("failed to create storage watcher")?;
    watcher
        .watch(&config.root, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {:?}", config.root))?;

    tracing::info!(root = %config.root.display(), "watching storage namespace");

    while let Some(event) = rx.recv().await {
        if !matches!(event.kind, EventKind::Create(_)) {
            continue;
        }
        for path in &event.paths {
            if !path.is_file() {
                continue;
            }
            let Some((bucket, key)) = split_object_path(&config.root, path) else {
                continue;
            };

            // the create event can fire while the writer still holds the file
            tokio::time::sleep(Duration::from_millis(200)).await;

            let storage_event = StorageEvent::for_object(&bucket, &key);
            if key.starts_with(&config.audio_prefix) {
                tracing::info!(%bucket, %key, "audio object created, invoking transcription");
                let response = transcribe.handle(&storage_event).await;
                if !response.is_success() {
                    tracing::error!(%bucket, %key, body = %response.body, "transcription invocation failed");
                }
            } else if key.starts_with(&config.transcript_prefix) {
                tracing::info!(%bucket, %key, "transcript object created, invoking summarization");
                let response = summarize.handle(&storage_event).await;
                if !response.is_success() {
                    tracing::error!(%bucket, %key, body = %response.body, "summarization invocation failed");
                }
            } else {
                tracing::debug!(%bucket, %key, "object outside pipeline prefixes, ignoring");
            }
        }
    }

    Ok(())
}

/// Split an absolute path under the storage root into (bucket, key).
/// Paths directly under the root (no bucket directory) are not objects.
fn split_object_path(root: &Path, path: &Path) -> Option<(String, String)> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let bucket = components
        .next()?
        .as_os_str()
        .to_string_lossy()
        .into_owned();
    let key = components
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if key.is_empty() {
        return None;
    }
    Some((bucket, key))
}
