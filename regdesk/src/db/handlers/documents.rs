use crate::db::{
    errors::{DbError, Result},
    models::documents::{DocumentStoreRequest, DocumentStoreResponse},
};
use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Trait for identity-document storage backends
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store document content under a generated unique name and return its access path
    async fn store(&self, request: DocumentStoreRequest) -> Result<DocumentStoreResponse>;

    /// Delete a stored document; a missing file is not an error
    async fn delete(&self, file_name: &str) -> Result<()>;

    /// Check if a stored document exists
    async fn exists(&self, file_name: &str) -> Result<bool>;
}

/// Generate a unique stored name: `idFile-<epoch-millis>-<random suffix>` plus
/// the original extension. The random suffix keeps two uploads landing on the
/// same millisecond from colliding.
fn generate_file_name(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u16 = rand::rng().random();
    format!("idFile-{millis}-{suffix:04x}{extension}")
}

/// Local filesystem storage backend - stores documents in a single flat directory
/// that is served back verbatim under `/uploads`.
pub struct LocalDocumentStorage {
    base_path: PathBuf,
}

impl LocalDocumentStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Resolve a stored name inside the base directory, refusing path components
    fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| DbError::Other(anyhow::anyhow!("Invalid document name: {file_name}")))?;
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn store(&self, request: DocumentStoreRequest) -> Result<DocumentStoreResponse> {
        let file_name = generate_file_name(&request.original_filename);
        let full_path = self.base_path.join(&file_name);

        fs::create_dir_all(&self.base_path).await?;

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(&request.content).await?;
        file.sync_all().await?;

        Ok(DocumentStoreResponse {
            url: format!("/uploads/{file_name}"),
            file_name,
        })
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        let full_path = self.resolve(file_name)?;

        if full_path.exists() {
            fs::remove_file(&full_path).await?;
        }

        Ok(())
    }

    async fn exists(&self, file_name: &str) -> Result<bool> {
        let full_path = self.resolve(file_name)?;
        Ok(full_path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_keep_extension_and_differ() {
        let a = generate_file_name("passport.png");
        let b = generate_file_name("passport.png");
        assert!(a.starts_with("idFile-"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);

        let bare = generate_file_name("no-extension");
        assert!(bare.starts_with("idFile-"));
        assert!(!bare.contains('.'));
    }

    #[tokio::test]
    async fn local_storage_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(temp_dir.path().to_path_buf());

        let content = b"test content for local storage";

        let response = storage
            .store(DocumentStoreRequest {
                original_filename: "id.pdf".to_string(),
                content: content.to_vec(),
            })
            .await
            .unwrap();
        assert!(response.url.starts_with("/uploads/idFile-"));
        assert!(response.file_name.ends_with(".pdf"));

        assert!(storage.exists(&response.file_name).await.unwrap());

        let on_disk = std::fs::read(temp_dir.path().join(&response.file_name)).unwrap();
        assert_eq!(on_disk, content);

        storage.delete(&response.file_name).await.unwrap();
        assert!(!storage.exists(&response.file_name).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_a_missing_document_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(temp_dir.path().to_path_buf());

        storage.delete("idFile-0000-0000.png").await.unwrap();
    }

    #[tokio::test]
    async fn path_components_are_stripped_on_delete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(temp_dir.path().to_path_buf());

        // Resolves to the bare file name inside the base directory, which does not exist
        storage.delete("../../etc/passwd").await.unwrap();
        assert!(!temp_dir.path().join("passwd").exists());
    }
}
