use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::sinks::{DocumentStore, SinkError, StoredDocument};

/// Filesystem-backed document store. Files are written as `{uuid}.pdf` under
/// the configured directory, which the server exposes through its static
/// files mount; the human-readable file name only travels in headers and the
/// ledger. Keying by UUID keeps rapid same-minute orders from overwriting
/// each other even though their file names may collide.
#[derive(Clone, Debug)]
pub struct FsDocumentStore {
    root: PathBuf,
    base_url: String,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn store(&self, bytes: &[u8], _file_name: &str) -> Result<StoredDocument, SinkError> {
        let id = Uuid::new_v4().to_string();
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(format!("{id}.pdf")), bytes)?;

        Ok(StoredDocument {
            url: format!("{}/{id}.pdf", self.base_url),
            id,
        })
    }
}
