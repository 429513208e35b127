//! Domain repository over a record store
//!
//! The allow-list is one JSON array persisted as a whole-set overwrite,
//! matching the shape of the durable `allowed_domains.json` record.

use crate::domain::entities::AllowedDomains;
use crate::domain::ports::{BackendDescriptor, DomainRepository, StorageError, StorageResult};

use super::RecordStore;

const DOMAINS_KEY: &str = "allowed_domains.json";

pub struct StoredDomainRepository {
    store: Box<dyn RecordStore>,
}

impl StoredDomainRepository {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self { store }
    }
}

impl DomainRepository for StoredDomainRepository {
    fn load(&self) -> StorageResult<AllowedDomains> {
        let Some(body) = self.store.get(DOMAINS_KEY)? else {
            return Ok(AllowedDomains::new());
        };
        let entries: Vec<String> =
            serde_json::from_str(&body).map_err(|e| StorageError::Corrupted {
                location: format!("{}/{}", self.store.describe().location, DOMAINS_KEY),
                message: e.to_string(),
            })?;
        Ok(AllowedDomains::from_entries(entries))
    }

    fn save(&self, domains: &AllowedDomains) -> StorageResult<()> {
        let body = serde_json::to_string_pretty(&domains.list())
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.store.put(DOMAINS_KEY, &body)
    }

    fn describe(&self) -> BackendDescriptor {
        self.store.describe()
    }
}
