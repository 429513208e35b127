//! AllowedDomains entity
//!
//! The set of email domains permitted to start a verification. Persisted as
//! a whole-set overwrite by the repository; this entity enforces list
//! integrity (normalization, shape, never-empty-after-init).

use std::collections::BTreeSet;

use crate::domain::value_objects::EmailAddress;
use crate::error::{VerigateError, VerigateResult};

/// Outcome of adding a domain to the set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Domain was already present; treated as success, nothing to persist
    AlreadyPresent,
}

/// The allow-listed email domain set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedDomains {
    domains: BTreeSet<String>,
}

impl AllowedDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-persisted entries. Entries are normalized but not
    /// re-validated; the stored set is trusted.
    pub fn from_entries(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            domains: entries
                .into_iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Normalize and validate a candidate domain string
    pub fn normalize(raw: &str) -> VerigateResult<String> {
        let domain = raw.trim().to_lowercase();
        if domain.is_empty() {
            return Err(VerigateError::InvalidInput(
                "domain must not be empty".to_string(),
            ));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(VerigateError::InvalidInput(format!(
                "'{domain}' is not a valid domain (expected something like university.edu)"
            )));
        }
        Ok(domain)
    }

    /// Add a domain. Duplicates are a no-op success.
    pub fn add(&mut self, raw: &str) -> VerigateResult<AddOutcome> {
        let domain = Self::normalize(raw)?;
        if self.domains.insert(domain) {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyPresent)
        }
    }

    /// Remove a domain. Fails if the domain is absent or is the last entry.
    pub fn remove(&mut self, raw: &str) -> VerigateResult<()> {
        let domain = raw.trim().to_lowercase();
        if !self.domains.contains(&domain) {
            return Err(VerigateError::NotFound(format!("domain '{domain}'")));
        }
        if self.domains.len() == 1 {
            return Err(VerigateError::LastDomain);
        }
        self.domains.remove(&domain);
        Ok(())
    }

    /// Whether the email's domain is on the allow-list. No `@` yields false.
    pub fn is_allowed(&self, email: &EmailAddress) -> bool {
        match email.domain() {
            Some(domain) => self.domains.contains(domain),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Domains in stable (sorted) order
    pub fn list(&self) -> Vec<String> {
        self.domains.iter().cloned().collect()
    }
}
