//! CLI argument definitions using clap
//!
//! Commands:
//! - charbase validate --character <path> [--guide <path>]
//! - charbase plan --universe <uuid> --user <uuid> [--role <role>] [query options]
//! - charbase list --characters <path> --universe <uuid> --user <uuid> [query options]
//! - charbase default-guide

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::access::{AccessContext, Role};
use crate::config::DEFAULT_CONFIG_FILE;
use crate::planner::{CharacterFilter, SortMode};

/// charbase - guide-driven character validation and listing
#[derive(Parser, Debug)]
#[command(name = "charbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate character fields against a guide and print them normalized
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Guide file (defaults to the configured default guide)
        #[arg(long)]
        guide: Option<PathBuf>,

        /// Character fields file
        #[arg(long)]
        character: PathBuf,
    },

    /// Print the SQL for a character list request
    Plan {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Run a character list request against a file of characters
    List {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// JSON array of characters
        #[arg(long)]
        characters: PathBuf,

        /// Allow lexicographic ordering for the universe
        #[arg(long)]
        allow_lexicographic: bool,

        #[command(flatten)]
        actor: ActorArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the guide new universes start from
    DefaultGuide {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

/// Who is asking, and in which universe
#[derive(Args, Debug, Clone)]
pub struct ActorArgs {
    /// Universe to list
    #[arg(long)]
    pub universe: Uuid,

    /// Requesting user
    #[arg(long)]
    pub user: Uuid,

    /// Requesting user's role (member, admin, owner)
    #[arg(long, default_value = "member")]
    pub role: Role,
}

impl ActorArgs {
    pub fn context(&self) -> AccessContext {
        AccessContext::new(self.user, self.role)
    }
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Name search
    #[arg(long, default_value = "")]
    pub query: String,

    /// Zero-based page
    #[arg(long, default_value_t = 0)]
    pub page: u64,

    /// nominal or lexicographic
    #[arg(long, default_value = "nominal")]
    pub sort: SortMode,

    /// Leave hidden characters out
    #[arg(long)]
    pub exclude_hidden: bool,
}

impl QueryArgs {
    pub fn filter(&self) -> CharacterFilter {
        CharacterFilter::default()
            .with_text(self.query.clone())
            .with_page(self.page)
            .with_sort(self.sort)
            .with_include_hidden(!self.exclude_hidden)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
