// src/crawl/session.rs
// =============================================================================
// This module is the heart of the crawler: one CrawlSession owns the work
// queue, the dedup registry, and the HTTP client, and runs the
// dequeue-and-dispatch loop until the site is exhausted.
//
// The lifecycle is a small state machine:
//   Seeding    - claim and enqueue the seed URL as the first page
//   Running    - dequeue with an idle timeout; dispatch each item to a
//                worker task (bounded pool); never wait for completion
//   Draining   - the queue stayed empty for a whole idle timeout AND no
//                worker is still running, so no more work can ever arrive
//   Terminated - every outstanding task has finished; report the summary
//
// Termination is liveness-based: there is no central work counter over the
// queue. A dequeue timeout alone is not enough — a worker could still be
// mid-fetch and about to discover new links — so the loop also requires the
// worker pool to be fully idle (all semaphore permits back) before it
// concludes the crawl is done.
//
// Exactly-once discipline: every producer claims a URL in the registry
// BEFORE enqueuing it, and only the winning claimer enqueues. The dispatch
// loop can therefore process whatever it dequeues without re-checking.
//
// Rust concepts:
// - Arc: Shared ownership between the orchestrator and spawned workers
// - Semaphore: Bounds how many fetches run at once
// - tokio::spawn: Fire-and-forget worker tasks
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use url::Url;

use crate::crawl::config::CrawlConfig;
use crate::crawl::dedup::DedupRegistry;
use crate::crawl::work::{WorkItem, WorkQueue};
use crate::scrape::html;
use crate::scrape::image;
use crate::scrape::urls;

// What one finished crawl looked like
//
// Counters come from the dedup registry, so they count distinct URLs that
// were claimed for processing (the "~" in the progress lines is honest:
// a claimed image that then failed to download is still counted).
#[derive(Debug)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub images_downloaded: usize,
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Elapsed wall time formatted as hh:mm:ss
    pub fn elapsed_hhmmss(&self) -> String {
        let total = self.elapsed.as_secs();
        format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    }
}

// The ephemeral state of one crawl run
//
// Owns exactly one queue and one registry; both die with the session.
// Workers share the session through an Arc.
pub struct CrawlSession {
    site_url: String,
    site_domain: String,
    download_dir: PathBuf,
    config: CrawlConfig,
    client: Client,
    queue: WorkQueue,
    registry: DedupRegistry,
}

impl CrawlSession {
    // Builds a session for one site
    //
    // Validates the seed URL (prefixing "http://" if the scheme is missing)
    // and derives the registrable domain that defines "same site" for the
    // whole run. Fails only on an unusable seed URL or client setup.
    pub fn new(site_url: &str, download_dir: &str, config: CrawlConfig) -> Result<Arc<Self>> {
        let site_url = urls::ensure_scheme(site_url);

        let parsed =
            Url::parse(&site_url).with_context(|| format!("invalid site URL: {}", site_url))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| anyhow!("site URL has no host: {}", site_url))?;
        let site_domain = urls::registrable_domain(host);

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .context("building HTTP client")?;

        Ok(Arc::new(Self {
            queue: WorkQueue::new(config.queue_capacity),
            registry: DedupRegistry::new(),
            download_dir: PathBuf::from(download_dir),
            site_url,
            site_domain,
            config,
            client,
        }))
    }

    // Runs the crawl to completion and returns the summary
    //
    // This is the orchestrator loop. It only dequeues and dispatches; all
    // network and file I/O happens inside worker tasks. No failure in any
    // single task can abort the loop.
    pub async fn download_site_images(self: &Arc<Self>) -> CrawlSummary {
        let start = Instant::now();

        // Seeding: the root page is the first work item. The claim is a
        // formality here (the registry is empty) but keeps the invariant
        // "everything in the queue was claimed first" without exception.
        if self.registry.claim_page(&self.site_url) {
            let seed = WorkItem::CrawlPage {
                url: self.site_url.clone(),
            };
            self.queue.enqueue(seed, self.config.enqueue_wait).await;
        }

        let pool = Arc::new(Semaphore::new(self.config.workers));

        // Running
        loop {
            match self.queue.dequeue(self.config.idle_timeout).await {
                Some(item) => {
                    // Bounded pool: wait for a free worker slot, then hand
                    // the item off and immediately go back to dequeuing
                    let permit = pool
                        .clone()
                        .acquire_owned()
                        .await
                        .expect("worker pool semaphore closed");
                    let session = Arc::clone(self);

                    match item {
                        WorkItem::CrawlPage { url } => {
                            println!(
                                "Scraping url: {}\nCount so far ~{}",
                                url,
                                self.registry.pages_claimed()
                            );
                            tokio::spawn(async move {
                                session.scrape_page(&url).await;
                                drop(permit);
                            });
                        }
                        WorkItem::FetchImage { url } => {
                            println!(
                                "Downloading image: {}\nDownloaded so far ~{}",
                                url,
                                self.registry.images_claimed()
                            );
                            tokio::spawn(async move {
                                session.fetch_image(&url).await;
                                drop(permit);
                            });
                        }
                    }
                }
                None => {
                    // Queue idle for a full timeout. If a worker is still
                    // running it may yet enqueue more work, so only a fully
                    // idle pool means the crawl is complete.
                    if pool.available_permits() == self.config.workers {
                        break;
                    }
                }
            }
        }

        // Draining: reclaim every permit, which can only succeed once the
        // last in-flight worker has finished
        let _drained = pool
            .acquire_many(self.config.workers as u32)
            .await
            .expect("worker pool semaphore closed");

        // Terminated
        CrawlSummary {
            pages_visited: self.registry.pages_claimed(),
            images_downloaded: self.registry.images_claimed(),
            elapsed: start.elapsed(),
        }
    }

    // Fetches one page and turns what it references into new work items
    //
    // Every failure is final for this page: log and return. The crawl as a
    // whole never sees it.
    async fn scrape_page(&self, url: &str) {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                eprintln!("Error while scraping url: {}", url);
                eprintln!("Cause: {}", err);
                return;
            }
        };

        if response.status() != StatusCode::OK {
            return;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("image/") {
            // The "page" is actually an image served directly; hand our own
            // URL to the image pipeline instead of parsing it as HTML
            self.claim_and_enqueue_image(url.to_string()).await;
            return;
        }

        if !content_type.starts_with("text/html") {
            // Not something we know how to extract links from
            return;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                eprintln!("Error while reading page body: {}", url);
                eprintln!("Cause: {}", err);
                return;
            }
        };

        let refs = html::extract_page_refs(&body);

        for src in refs.image_sources {
            if let Some(image_url) = urls::normalize_image_link(&self.site_url, &src) {
                self.claim_and_enqueue_image(image_url).await;
            }
        }

        for href in refs.hyperlinks {
            if let Some(page_url) =
                urls::normalize_page_link(&self.site_url, &self.site_domain, &href)
            {
                if self.registry.claim_page(&page_url) {
                    let item = WorkItem::CrawlPage { url: page_url };
                    self.queue.enqueue(item, self.config.enqueue_wait).await;
                }
            }
        }
    }

    // Claim-then-enqueue for images; losing the claim means some other
    // page already scheduled this URL
    async fn claim_and_enqueue_image(&self, image_url: String) {
        if self.registry.claim_image(&image_url) {
            let item = WorkItem::FetchImage { url: image_url };
            self.queue.enqueue(item, self.config.enqueue_wait).await;
        }
    }

    // Downloads one image, logging any failure and moving on
    async fn fetch_image(&self, url: &str) {
        if let Err(err) = image::download_image(&self.client, url, &self.download_dir).await {
            eprintln!("Unable to download image: {}", url);
            eprintln!("Cause: {:#}", err);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Self> instead of &self for download_site_images?
//    - Spawned workers outlive the current stack frame, so each one needs
//      shared ownership of the session (queue, registry, client)
//    - Arc::clone is cheap: it bumps a reference count
//
// 2. What is acquire_owned?
//    - Takes a semaphore permit that can move into a spawned task
//    - Dropping the permit (even on panic) frees the worker slot
//
// 3. Why does the timeout alone not end the crawl?
//    - Picture one worker mid-fetch on a slow page while the queue sits
//      empty: its links haven't been discovered yet. Checking that every
//      permit is back rules that situation out.
//
// 4. Why not retry failed pages?
//    - A crawl is a best-effort sweep; a page that fails once would likely
//      fail again moments later, and the queue would never drain
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_config() -> CrawlConfig {
        CrawlConfig {
            request_timeout: Duration::from_secs(2),
            idle_timeout: Duration::from_millis(300),
            workers: 4,
            ..CrawlConfig::default()
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("image-harvester-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("creating scratch dir");
        dir
    }

    #[test]
    fn test_elapsed_hhmmss_formatting() {
        let summary = CrawlSummary {
            pages_visited: 0,
            images_downloaded: 0,
            elapsed: Duration::from_secs(3725),
        };
        assert_eq!(summary.elapsed_hhmmss(), "01:02:05");
    }

    #[tokio::test]
    async fn test_crawl_terminates_when_the_seed_is_unreachable() {
        let dir = scratch_dir("dead-seed");

        // 127.0.0.1:9 refuses connections; the seed fetch fails, is logged,
        // and the crawl must still drain and terminate on its own
        let session = CrawlSession::new("http://127.0.0.1:9", dir.to_str().unwrap(), test_config())
            .expect("building session");
        let summary = session.download_site_images().await;

        assert_eq!(summary.pages_visited, 1); // the seed claim
        assert_eq!(summary.images_downloaded, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    // Serves a tiny two-page site for the end-to-end test:
    //   /      links to /b and embeds /a.png
    //   /b     links back to the seed and embeds /b.png
    //   *.png  a few bytes of fake image data
    async fn serve_fixture_site() -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("binding fixture server");
        let addr = listener.local_addr().expect("fixture server addr");

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 2048];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();

                    let seed = format!("http://{}", addr);
                    let (content_type, body): (&str, Vec<u8>) = match path.as_str() {
                        "/" => (
                            "text/html",
                            br#"<html><body>
                                  <a href="/b">page b</a>
                                  <img src="/a.png">
                                </body></html>"#
                                .to_vec(),
                        ),
                        "/b" => (
                            "text/html",
                            format!(
                                r#"<html><body>
                                     <a href="{}">back to start</a>
                                     <img src="/b.png">
                                   </body></html>"#,
                                seed
                            )
                            .into_bytes(),
                        ),
                        "/a.png" | "/b.png" => ("image/png", b"\x89PNG fake image".to_vec()),
                        _ => ("text/plain", b"not found".to_vec()),
                    };

                    let header = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        content_type,
                        body.len()
                    );
                    let _ = socket.write_all(header.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (addr, handle)
    }

    #[tokio::test]
    async fn test_end_to_end_two_pages_two_images() {
        let dir = scratch_dir("e2e");
        let (addr, server) = serve_fixture_site().await;

        let seed = format!("http://{}", addr);
        let session = CrawlSession::new(&seed, dir.to_str().unwrap(), test_config())
            .expect("building session");
        let summary = session.download_site_images().await;

        // Two pages (seed and /b; the link back to the seed loses its
        // claim), two images, both files on disk
        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.images_downloaded, 2);
        assert!(dir.join("a.png").exists());
        assert!(dir.join("b.png").exists());

        server.abort();
        let _ = std::fs::remove_dir_all(&dir);
    }
}
