// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build a crawl session for the requested site
// 3. Run the crawl to completion (it cannot fail mid-run: individual fetch
//    failures are logged by the workers and swallowed)
// 4. Print the summary and exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because the crawl makes many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle the subcommand
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - the concurrent crawl engine
mod scrape;        // src/scrape/ - HTML, URL and image helpers

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method
use crawl::{CrawlConfig, CrawlSession};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl ran to completion (individual fetch failures included -
//           they are logged, not fatal)
//   Err = the session could not even be constructed (bad URL, client setup)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Run {
            site_url,
            download_directory,
        } => handle_run(&site_url, &download_directory).await,
    }
}

// Handles the 'run' subcommand
// Parameters:
//   site_url: seed URL the crawl starts from
//   download_directory: where downloaded images land
async fn handle_run(site_url: &str, download_directory: &str) -> Result<i32> {
    println!("🔍 Harvesting images from: {}", site_url);
    println!("📁 Download directory: {}", download_directory);

    // Build the session with the documented default tunables
    // (10s request timeout, 20s idle timeout, queue of 160, 8 workers)
    let session = CrawlSession::new(site_url, download_directory, CrawlConfig::default())?;

    // Run the whole crawl; progress lines stream to stdout as work happens
    let summary = session.download_site_images().await;

    // Print the closing summary
    println!();
    println!("📊 Summary:");
    println!("   📄 Pages visited: {}", summary.pages_visited);
    println!("   🖼  Images downloaded: {}", summary.images_downloaded);
    println!("Scraping took [hh:mm:ss]: {}", summary.elapsed_hhmmss());

    // Individual fetch failures never surface as a non-zero exit;
    // reaching this point means the crawl terminated normally
    Ok(0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does the crawl itself always exit 0?
//    - A crawl is best-effort: some pages 404, some images time out
//    - Those are logged as they happen; the run "succeeding" means the
//      site was swept and the queue drained, not that every fetch worked
//
// 2. What is #[tokio::main]?
//    - Sets up the async runtime before main runs
//    - Without it, there would be nothing to drive our futures
//
// 3. Why match on a single-variant enum?
//    - The Commands enum has one variant today; matching keeps the
//      compiler honest when more subcommands are added
// -----------------------------------------------------------------------------
