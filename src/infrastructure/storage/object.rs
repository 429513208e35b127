//! Object-storage record store
//!
//! Drives the object-storage CLI (`aws` by default) as a subprocess, the
//! same way the sync layer would drive any external transfer tool. Records
//! are objects under `<prefix><key>` in the configured bucket. Listing uses
//! `s3api list-objects-v2` with JSON output; bodies move through stdin and
//! stdout so nothing is staged on disk.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::ports::{BackendDescriptor, BackendKind, StorageError, StorageResult};

use super::RecordStore;

/// Thin wrapper around the object-storage CLI binary
#[derive(Debug, Clone)]
pub struct ObjectCli {
    binary: String,
}

impl ObjectCli {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    fn run(&self, args: &[&str], input: Option<&str>) -> StorageResult<String> {
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StorageError::Unavailable(format!("{}: {e}", self.binary)))?;

        if let Some(body) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(body.as_bytes())
                    .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StorageError::Unavailable(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Record store over a bucket prefix
pub struct ObjectRecordStore {
    cli: ObjectCli,
    bucket: String,
    prefix: String,
}

impl ObjectRecordStore {
    pub fn new(cli: ObjectCli, bucket: &str, prefix: String) -> Self {
        Self {
            cli,
            bucket: bucket.to_string(),
            prefix,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("s3://{}/{}{}", self.bucket, self.prefix, key)
    }
}

impl RecordStore for ObjectRecordStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.cli.run(&["s3", "cp", &self.object_url(key), "-"], None) {
            Ok(body) => Ok(Some(body)),
            // The CLI reports missing keys as a 404 fetch failure; treat any
            // failed fetch of a single key as absence only when it names 404.
            Err(StorageError::Unavailable(msg)) if msg.contains("404") || msg.contains("Not Found") => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn put(&self, key: &str, body: &str) -> StorageResult<()> {
        self.cli
            .run(&["s3", "cp", "-", &self.object_url(key)], Some(body))
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let full_prefix = format!("{}{}", self.prefix, prefix);
        let stdout = self.cli.run(
            &[
                "s3api",
                "list-objects-v2",
                "--bucket",
                &self.bucket,
                "--prefix",
                &full_prefix,
                "--query",
                "Contents[].Key",
                "--output",
                "json",
            ],
            None,
        )?;

        // An empty bucket prints "null" instead of an array.
        let trimmed = stdout.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Vec::new());
        }

        let keys: Vec<String> =
            serde_json::from_str(trimmed).map_err(|e| StorageError::Corrupted {
                location: format!("s3://{}/{}", self.bucket, full_prefix),
                message: e.to_string(),
            })?;

        let mut keys: Vec<String> = keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.cli
            .run(&["s3", "rm", &self.object_url(key)], None)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn describe(&self) -> BackendDescriptor {
        BackendDescriptor {
            kind: BackendKind::ObjectStorage,
            location: format!("s3://{}/{}", self.bucket, self.prefix),
        }
    }
}
