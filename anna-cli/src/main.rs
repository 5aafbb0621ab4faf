//! # anna CLI
//!
//! Command-line interface for inspecting the content of an anna site.

mod commands;

use anna_core::LinkSyntax;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anna")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Site directory containing `content/` and `layout/config.yml`
    #[arg(long, default_value = "site", env = "ANNA_SITE")]
    site: PathBuf,

    /// Include draft posts
    #[arg(long)]
    drafts: bool,

    /// Syntax of note references (wikilink, markdown, any)
    #[arg(long, default_value = "wikilink")]
    links: LinkSyntax,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the site and print a summary
    Check {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List posts, newest first
    Posts {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Note {
        /// Note URL (the `.html` suffix may be omitted)
        url: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = NoteFormat::Json)]
        format: NoteFormat,

        /// Include backlinks/outgoing links
        #[arg(long)]
        with_links: bool,
    },

    /// List the notes referencing a note
    Backlinks {
        /// Note URL (the `.html` suffix may be omitted)
        url: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum NoteFormat {
    Json,
    Html,
    Raw,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let site = commands::SiteArgs {
        root: cli.site,
        drafts: cli.drafts,
        links: cli.links,
    };

    match cli.command {
        Commands::Check { json } => commands::check_site(&site, json),
        Commands::Posts { json } => commands::list_posts(&site, json),
        Commands::Note {
            url,
            format,
            with_links,
        } => commands::show_note(&site, &url, format, with_links),
        Commands::Backlinks { url, json } => commands::show_backlinks(&site, &url, json),
    }
}
