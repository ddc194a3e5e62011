//! Upload acceptance policy for identity documents.
//!
//! Screens an incoming attachment before anything is validated or persisted:
//! both the filename extension and the declared content type must name one of
//! the accepted document formats, and the payload may not exceed the
//! configured size limit. Rejections carry distinct messages so clients can
//! tell an oversized file from an unsupported one.

use crate::errors::Error;

/// Accepted filename extensions (compared case-insensitively)
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "pdf"];

/// Accepted declared content types
const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "application/pdf"];

const TYPE_REJECTED_MESSAGE: &str = "Only images (JPEG, JPG, PNG) and PDFs are allowed!";

/// Pre-filter applied to the `idFile` attachment of a registration.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    max_size_bytes: u64,
}

impl UploadPolicy {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// Check the filename extension and the declared content type.
    ///
    /// A matching extension with a mismatched content type (or vice versa) is
    /// rejected: renaming a text file to `.png` does not get it through.
    pub fn check_type(&self, filename: &str, content_type: Option<&str>) -> Result<(), Error> {
        let extension_ok = std::path::Path::new(filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));

        let content_type_ok = content_type.is_some_and(|ct| ALLOWED_CONTENT_TYPES.contains(&ct.to_lowercase().as_str()));

        if extension_ok && content_type_ok {
            Ok(())
        } else {
            Err(Error::UploadRejected {
                message: TYPE_REJECTED_MESSAGE.to_string(),
            })
        }
    }

    /// Check the accumulated payload size; called incrementally while draining
    /// the upload stream so oversized files fail fast.
    pub fn check_size(&self, total_bytes: u64) -> Result<(), Error> {
        if total_bytes > self.max_size_bytes {
            Err(Error::UploadRejected {
                message: "File too large".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
