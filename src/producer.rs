//! Ingestion producer: one-shot upload of a local audio file into the
//! storage namespace under a collision-resistant key.

use anyhow::{bail, Context, Result};
use gijiroku_core::keys;
use gijiroku_store::ObjectStore;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::io::AsyncReadExt;

pub async fn upload(
    store: &dyn ObjectStore,
    file: &Path,
    bucket: &str,
    prefix: &str,
) -> Result<String> {
    if !file.exists() {
        bail!("file not found: {}", file.display());
    }
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("path has no file name: {}", file.display()))?;

    let key = keys::timestamped_key(prefix, &file_name, chrono::Local::now().naive_local());
    let size = std::fs::metadata(file)
        .with_context(|| format!("failed to stat {}", file.display()))?
        .len();

    tracing::info!(
        file = %file.display(),
        size_mb = size as f64 / 1024.0 / 1024.0,
        %bucket,
        %key,
        "uploading audio file"
    );

    let pb = ProgressBar::new(size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("hardcoded progress bar template")
            .progress_chars("#>-"),
    );

    let mut reader = tokio::fs::File::open(file)
        .await
        .with_context(|| format!("failed to open {}", file.display()))?;
    let mut body = Vec::with_capacity(size as usize);
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
        pb.inc(n as u64);
    }
    pb.finish();

    store
        .put(bucket, &key, &body, "application/octet-stream")
        .await
        .context("upload failed")?;

    let uri = store.uri(bucket, &key);
    println!("upload complete: {uri}");
    println!("processing will start automatically once the watcher sees the object");
    Ok(uri)
}
