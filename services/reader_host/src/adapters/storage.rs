//! services/reader_host/src/adapters/storage.rs
//!
//! Reads imported documents out of the app's storage directory. Implements the
//! `DocumentStore` port from the core crate.

use async_trait::async_trait;
use bytes::Bytes;
use shelf_reader_core::ports::{DocumentStore, PortError, PortResult};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// A document store backed by a flat directory of imported files.
#[derive(Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a stored file name inside the root, refusing anything that
    /// is not a single plain path component.
    fn path_for(&self, name: &str) -> PortResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Ok(self.root.join(file)),
            _ => Err(PortError::NotFound(format!("invalid document name '{}'", name))),
        }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn read_document(&self, name: &str) -> PortResult<Bytes> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PortError::NotFound(format!("document '{}'", name)))
            }
            Err(e) => Err(PortError::Unexpected(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_stored_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("novel.txt"), b"Hello").unwrap();

        let store = LocalDocumentStore::new(dir.path());
        assert_eq!(&store.read_document("novel.txt").await.unwrap()[..], b"Hello");
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());
        assert!(matches!(store.read_document("nope.epub").await, Err(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn names_cannot_escape_the_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("library");
        std::fs::create_dir(&library).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"x").unwrap();

        let store = LocalDocumentStore::new(&library);
        for name in ["../secret.txt", "/etc/passwd", "sub/file.txt", "", "."] {
            assert!(
                matches!(store.read_document(name).await, Err(PortError::NotFound(_))),
                "{} should be refused",
                name
            );
        }
    }
}
