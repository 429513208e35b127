//! Code store over two record stores
//!
//! Pending audit copies are keyed by user; used-code records are append-only
//! and keyed by a sanitized email prefix. Key sanitization is lossy, so
//! every read verifies the exact email stored inside the record before
//! counting or deleting it.

use crate::domain::entities::{PendingVerification, UsedCodeRecord};
use crate::domain::ports::{
    CodeStore, StorageDescriptor, StorageError, StorageResult,
};
use crate::domain::value_objects::EmailAddress;

use super::RecordStore;

pub struct RecordCodeStore {
    pending: Box<dyn RecordStore>,
    used: Box<dyn RecordStore>,
}

impl RecordCodeStore {
    pub fn new(pending: Box<dyn RecordStore>, used: Box<dyn RecordStore>) -> Self {
        Self { pending, used }
    }

    fn pending_key(user_id: &str) -> String {
        format!("{}.json", sanitize(user_id))
    }

    fn used_key(record: &UsedCodeRecord) -> String {
        format!(
            "{}_{}_{}.json",
            record.email.sanitized(),
            record.consumed_at.timestamp_millis(),
            sanitize(&record.user_id)
        )
    }

    /// Used-code keys whose stored record really is for `email`
    fn used_keys_for(&self, email: &EmailAddress) -> StorageResult<Vec<String>> {
        let prefix = format!("{}_", email.sanitized());
        let mut matching = Vec::new();
        for key in self.used.list(&prefix)? {
            let Some(body) = self.used.get(&key)? else {
                continue;
            };
            let record: UsedCodeRecord =
                serde_json::from_str(&body).map_err(|e| StorageError::Corrupted {
                    location: key.clone(),
                    message: e.to_string(),
                })?;
            if record.email == *email {
                matching.push(key);
            }
        }
        Ok(matching)
    }
}

impl CodeStore for RecordCodeStore {
    fn save_pending(&self, user_id: &str, entry: &PendingVerification) -> StorageResult<()> {
        let body = serde_json::to_string_pretty(entry)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.pending.put(&Self::pending_key(user_id), &body)
    }

    fn move_to_used(&self, record: &UsedCodeRecord) -> StorageResult<()> {
        let body = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.used.put(&Self::used_key(record), &body)?;

        // The audit copy served its purpose; losing this delete only leaves
        // a stale pending file behind.
        let _ = self.pending.delete(&Self::pending_key(&record.user_id));
        Ok(())
    }

    fn count_for_email(&self, email: &EmailAddress) -> StorageResult<u32> {
        Ok(self.used_keys_for(email)?.len() as u32)
    }

    fn reset(&self, email: &EmailAddress) -> StorageResult<u32> {
        let mut deleted = 0u32;

        for key in self.used_keys_for(email)? {
            self.used.delete(&key)?;
            deleted += 1;
        }

        // Pending audit copies are keyed by user, so scan them all.
        for key in self.pending.list("")? {
            let Some(body) = self.pending.get(&key)? else {
                continue;
            };
            let Ok(entry) = serde_json::from_str::<PendingVerification>(&body) else {
                continue;
            };
            if entry.email == *email {
                self.pending.delete(&key)?;
                deleted += 1;
            }
        }

        if deleted == 0 {
            return Err(StorageError::NotFound(email.to_string()));
        }
        Ok(deleted)
    }

    fn info(&self) -> StorageDescriptor {
        StorageDescriptor {
            pending: self.pending.describe(),
            used: self.used.describe(),
        }
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
