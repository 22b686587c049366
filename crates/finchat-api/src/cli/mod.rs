//! CLI command definitions for the `finchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a finance-services assistant and match requests to services.
#[derive(Parser)]
#[command(name = "finchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the YAML service catalog.
    #[arg(long, global = true, env = "FINCHAT_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default tracing directives for the chosen verbosity.
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,finchat=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session in the terminal.
    Chat,

    /// Rank catalog services against a request.
    Match {
        /// Free-text request, e.g. "help with my 1040".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of services to return.
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// List every service in the catalog.
    #[command(alias = "ls")]
    Services,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn match_joins_free_text() {
        let cli = Cli::try_parse_from(["finchat", "match", "help", "with", "1040", "-k", "2"]).unwrap();
        match cli.command {
            Commands::Match { query, top_k } => {
                assert_eq!(query.join(" "), "help with 1040");
                assert_eq!(top_k, Some(2));
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn verbosity_maps_to_directives() {
        let cli = Cli::try_parse_from(["finchat", "--quiet", "services"]).unwrap();
        assert_eq!(cli.log_directives(), "error");
        let cli = Cli::try_parse_from(["finchat", "-v", "services"]).unwrap();
        assert_eq!(cli.log_directives(), "info,finchat=debug");
        let cli = Cli::try_parse_from(["finchat", "-vv", "services"]).unwrap();
        assert_eq!(cli.log_directives(), "trace");
    }
}
