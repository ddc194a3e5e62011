//! Models for identity-document storage.

/// Request to persist an accepted upload
#[derive(Debug, Clone)]
pub struct DocumentStoreRequest {
    /// Filename as submitted by the client; only its extension is preserved
    pub original_filename: String,
    pub content: Vec<u8>,
}

/// Result of persisting an upload
#[derive(Debug, Clone)]
pub struct DocumentStoreResponse {
    /// Generated name of the stored file inside the upload directory
    pub file_name: String,
    /// Relative path the file is served back at, e.g. `/uploads/<file_name>`
    pub url: String,
}
