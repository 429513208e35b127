use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Verigate - email-domain verification engine
#[derive(Parser, Debug)]
#[command(name = "verigate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ./verigate.toml, then user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the verification dispatcher, reading requests from stdin
    ///
    /// One request per line: `verify <user> <email>`, `code <user> <code>`,
    /// `quit`. Replies go to stdout, one line per request.
    Serve,

    /// Send a single verification code (the pending entry dies with the process)
    Verify {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Email address to verify
        #[arg(long)]
        email: String,

        /// Treat the caller as already verified (no-op success)
        #[arg(long)]
        already_verified: bool,
    },

    /// Admin operations
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Add a domain to the allow-list
    DomainAdd {
        /// Domain to add (e.g. university.edu)
        domain: String,
    },

    /// Remove a domain from the allow-list
    DomainRemove {
        /// Domain to remove
        domain: String,
    },

    /// List allowed domains
    DomainList,

    /// Check an email's verification history
    CheckEmail {
        /// Email address to check
        email: String,
    },

    /// Reset an email so it can verify again
    ResetEmail {
        /// Email address to reset
        email: String,
    },

    /// Show active storage backends
    StorageInfo,
}
