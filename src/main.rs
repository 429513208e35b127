//! Verigate CLI - email-domain verification engine
//!
//! `serve` runs the dispatcher loop; `verify` issues a one-off code; the
//! `admin` subcommands manage the allow-list and verification records.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{AdminCommands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => verigate::config::load(path)?,
        None => verigate::config::load_or_default(std::env::current_dir().ok().as_deref()),
    };
    let engine = commands::build_engine(&config);

    match cli.command {
        Commands::Serve => commands::serve::cmd_serve(&engine),
        Commands::Verify {
            user,
            email,
            already_verified,
        } => commands::verify::cmd_verify(&engine, &user, &email, already_verified),
        Commands::Admin(admin) => match admin {
            AdminCommands::DomainAdd { domain } => commands::admin::cmd_domain_add(&engine, &domain),
            AdminCommands::DomainRemove { domain } => {
                commands::admin::cmd_domain_remove(&engine, &domain)
            }
            AdminCommands::DomainList => commands::admin::cmd_domain_list(&engine),
            AdminCommands::CheckEmail { email } => {
                commands::admin::cmd_check_email(&engine, &email)
            }
            AdminCommands::ResetEmail { email } => {
                commands::admin::cmd_reset_email(&engine, &email)
            }
            AdminCommands::StorageInfo => commands::admin::cmd_storage_info(&engine),
        },
    }
}
