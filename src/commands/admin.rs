//! Admin command handlers

use anyhow::Result;

use verigate::application::DomainAddOutcome;
use verigate::error::VerigateError;

use super::Engine;

pub fn cmd_domain_add(engine: &Engine, domain: &str) -> Result<()> {
    match engine.add_domain(domain) {
        Ok(DomainAddOutcome::Added) => {
            println!("Added \"{}\" to the allowed domains list.", domain.trim());
        }
        Ok(DomainAddOutcome::AlreadyListed) => {
            println!("The domain \"{}\" is already in the allowed list.", domain.trim());
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub fn cmd_domain_remove(engine: &Engine, domain: &str) -> Result<()> {
    match engine.remove_domain(domain) {
        Ok(()) => println!("Removed \"{}\" from the allowed domains list.", domain.trim()),
        Err(err @ VerigateError::LastDomain) => println!("{err}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub fn cmd_domain_list(engine: &Engine) -> Result<()> {
    let domains = engine.list_domains()?;
    if domains.is_empty() {
        println!("No domains are currently allowed. Add at least one domain.");
        return Ok(());
    }
    println!("Currently allowed email domains:");
    for domain in domains {
        println!("- {domain}");
    }
    Ok(())
}

pub fn cmd_check_email(engine: &Engine, email: &str) -> Result<()> {
    match engine.check_email(email) {
        Ok(report) => {
            println!("Email: {}", report.email);
            println!("Total verifications: {}/{}", report.count, report.max_allowed);
            println!("Storage method: {}", report.backend);
            println!(
                "Domain status: {}",
                if report.domain_allowed { "allowed" } else { "not allowed" }
            );
            if report.cap_reached() {
                println!("This email has reached its maximum verification limit.");
            }
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub fn cmd_reset_email(engine: &Engine, email: &str) -> Result<()> {
    match engine.reset_email(email) {
        Ok(report) => {
            println!(
                "Reset verification for {}. Deleted {} record(s); the email can be used again.",
                report.email, report.deleted_records
            );
        }
        Err(err) => println!("Unable to reset {}: {err}", email.trim()),
    }
    Ok(())
}

pub fn cmd_storage_info(engine: &Engine) -> Result<()> {
    let info = engine.storage_info();
    println!("Storage configuration:");
    println!("- Domains: {} ({})", info.domains.kind, info.domains.location);
    println!(
        "- Pending codes: {} ({})",
        info.codes.pending.kind, info.codes.pending.location
    );
    println!(
        "- Used codes: {} ({})",
        info.codes.used.kind, info.codes.used.location
    );
    Ok(())
}
