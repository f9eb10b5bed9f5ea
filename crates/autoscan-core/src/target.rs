use async_trait::async_trait;

use crate::error::Result;
use crate::library::{Library, LibraryId};

/// A folder that changed and should be re-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub folder: String,
}

impl Scan {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

/// A remote media service that can be told to re-index folders.
#[async_trait]
pub trait Target: Send + Sync {
    async fn available(&self) -> Result<()>;
    async fn scan(&self, scan: &Scan) -> Result<()>;
}

/// Requests a target's indexing service understands.
#[async_trait]
pub trait LibraryClient: Send + Sync + 'static {
    async fn version(&self) -> Result<String>;
    async fn libraries(&self) -> Result<Vec<Library>>;
    async fn scan(&self, path: &str, library: &LibraryId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent {
    /// The target accepted a scan request for `path` within `library`.
    ScanMoved {
        library: LibraryId,
        name: String,
        path: String,
    },
}
