//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Worldbuilder - publish generated Phaser games to their own subdomain
#[derive(Parser, Debug)]
#[command(name = "worldbuilder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a game and print its public URL
    Deploy {
        /// JavaScript file with the game source
        #[arg(short, long)]
        game: PathBuf,

        /// Project name (page title and default subdomain)
        #[arg(short, long)]
        name: String,

        /// Custom subdomain label
        #[arg(short, long)]
        subdomain: Option<String>,

        /// Owner identifier sent to the registry
        #[arg(short, long)]
        username: Option<String>,

        /// Directory of assets uploaded under assets/
        #[arg(long)]
        assets: Option<PathBuf>,

        /// Skip the availability check
        #[arg(long)]
        no_check: bool,

        /// Skip post-deploy verification
        #[arg(long)]
        no_verify: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a subdomain is available
    Check {
        subdomain: String,
    },

    /// Write the HTML page for a game without deploying it
    Package {
        /// JavaScript file with the game source
        #[arg(short, long)]
        game: PathBuf,

        /// Page title
        #[arg(short, long)]
        title: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a deployed URL until it answers
    Verify {
        url: String,

        /// Number of attempts
        #[arg(long)]
        attempts: Option<u32>,

        /// Seconds between attempts
        #[arg(long)]
        interval: Option<u64>,

        /// Print the verification response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the subdomains registered by a user
    List {
        /// Owner identifier (defaults to the configured owner)
        #[arg(short, long)]
        username: Option<String>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the subdomain a project would be published under
    Resolve {
        project: String,

        /// Custom subdomain label
        #[arg(short, long)]
        subdomain: Option<String>,
    },

    /// Print the effective configuration
    Config,
}
