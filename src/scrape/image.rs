// src/scrape/image.rs
// =============================================================================
// This module downloads a single image to disk.
//
// Key behaviors:
// - The destination file name is the last path segment of the URL
// - If the destination already exists, the download is skipped without any
//   network traffic. This is the on-disk idempotence layer: the in-memory
//   claim set prevents duplicate enqueues within one run, the file check
//   prevents duplicate downloads across runs (and when two different URLs
//   end in the same file name)
// - The response body is streamed to disk chunk by chunk, so peak memory
//   per download stays small no matter how large the image is
//
// Errors are returned to the caller, which logs them and moves on — one
// failed image never affects the rest of the crawl.
//
// Rust concepts:
// - async file I/O with tokio::fs
// - Streams: A response body consumed as a sequence of byte chunks
// - anyhow::Context: Attaching "what were we doing" to errors
// =============================================================================

use anyhow::{anyhow, Context, Result};
use futures::StreamExt; // StreamExt gives us .next() on the byte stream
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

// What a download call actually did
#[derive(Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was fetched and written to disk
    Downloaded,
    /// The destination file already existed; nothing was fetched
    AlreadyOnDisk,
}

// Computes the destination path for an image URL
//
// The file name is simply the last '/'-separated segment of the URL,
// mirrored under the download directory.
//
// Example: "http://example.com/img/a.png" -> "<dir>/a.png"
pub fn image_file_path(download_dir: &Path, url: &str) -> PathBuf {
    let name = url.rsplit('/').next().unwrap_or(url);
    download_dir.join(name)
}

// Downloads one image into the download directory
//
// Parameters:
//   client: shared HTTP client (carries the timeout and user-agent)
//   url: absolute image URL
//   download_dir: directory the file lands in (created on demand)
//
// Returns: the outcome, or an error describing the first thing that failed.
// A truncated file may remain on disk after an interrupted write; the next
// run will skip it, which is the accepted trade-off for not keeping a
// manifest.
pub async fn download_image(
    client: &Client,
    url: &str,
    download_dir: &Path,
) -> Result<DownloadOutcome> {
    let path = image_file_path(download_dir, url);

    // On-disk dedup: an existing file means some run already fetched it
    if fs::try_exists(&path).await.unwrap_or(false) {
        return Ok(DownloadOutcome::AlreadyOnDisk);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {}", url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("HTTP {} for {}", status.as_u16(), url));
    }

    // Stream the body to disk chunk by chunk instead of buffering it all
    let mut file = fs::File::create(&path)
        .await
        .with_context(|| format!("creating {}", path.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("reading body of {}", url))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
    }

    file.flush()
        .await
        .with_context(|| format!("flushing {}", path.display()))?;

    Ok(DownloadOutcome::Downloaded)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is bytes_stream()?
//    - Turns the response body into a Stream of byte chunks
//    - Requires reqwest's 'stream' feature
//    - Each chunk arrives as the network delivers it
//
// 2. Why tokio::fs instead of std::fs?
//    - std::fs would block the worker thread during disk writes
//    - tokio::fs offloads the work so other tasks keep running
//
// 3. What does with_context do?
//    - Wraps the error with a description of the operation that failed
//    - The caller's log line then reads like a small story:
//      "writing images/a.png: No space left on device"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("image-harvester-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("creating scratch dir");
        dir
    }

    #[test]
    fn test_image_file_path_uses_last_segment() {
        let dir = Path::new("images");
        assert_eq!(
            image_file_path(dir, "http://example.com/img/a.png"),
            Path::new("images").join("a.png")
        );
        assert_eq!(
            image_file_path(dir, "http://example.com/b.png"),
            Path::new("images").join("b.png")
        );
    }

    #[tokio::test]
    async fn test_existing_file_short_circuits_the_download() {
        let dir = scratch_dir("skip");
        std::fs::write(dir.join("a.png"), b"already here").expect("seeding file");

        // The URL's host does not resolve; if this returned anything but
        // AlreadyOnDisk the call would have tried the network and failed
        let client = Client::new();
        let outcome = download_image(&client, "http://invalid.invalid/a.png", &dir)
            .await
            .expect("skip path should not error");
        assert_eq!(outcome, DownloadOutcome::AlreadyOnDisk);

        // And the file content is untouched
        let content = std::fs::read(dir.join("a.png")).expect("reading seeded file");
        assert_eq!(content, b"already here");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unreachable_url_reports_an_error() {
        let dir = scratch_dir("unreachable");

        // 127.0.0.1:9 refuses connections immediately (discard port)
        let client = Client::new();
        let result = download_image(&client, "http://127.0.0.1:9/a.png", &dir).await;
        assert!(result.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
