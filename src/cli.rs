// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "image-harvester",
    version = "0.1.0",
    about = "A CLI tool that crawls a website and downloads every image it references",
    long_about = "image-harvester starts from a seed URL, follows every same-domain hyperlink \
                  it can find, and downloads each image exactly once into a local directory. \
                  Pages are never re-visited and images are never re-downloaded within a run."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and download every image it references
    ///
    /// Example: image-harvester run https://example.com ./images
    Run {
        /// Website URL to start crawling from (e.g., https://example.com)
        ///
        /// This is a positional argument (required, no flag needed)
        /// A URL without a scheme gets "http://" prefixed automatically
        site_url: String,

        /// Directory to download images into
        ///
        /// This is also positional; intermediate directories are created
        /// on demand. Defaults to "images" in the current directory.
        #[arg(default_value = "images")]
        download_directory: String,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a subcommand for a single action?
//    - It leaves room to grow (e.g., a future 'resume' or 'report' command)
//    - `image-harvester run <url> <dir>` reads naturally on the shell
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What does 'pub' mean?
//    - pub = public, meaning other modules can use this
//    - Without pub, items are private to this module
//
// 4. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
//
// 5. What does default_value do?
//    - Makes a positional argument optional by supplying a fallback
//    - clap shows the default in --help output automatically
// -----------------------------------------------------------------------------
