//! Media store port for hosting uploaded reference photos.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// An image payload to upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type reported by the client (e.g., `"image/jpeg"`).
    pub mime_type: String,
}

/// A stored media asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMedia {
    /// Durable HTTPS URL of the uploaded asset.
    pub url: String,
}

/// Boxed future type returned by [`MediaStore::upload`].
pub type UploadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<StoredMedia, StoryError>> + Send + 'a>>;

/// Uploads images to a hosted media store and returns durable URLs.
pub trait MediaStore: Send + Sync {
    /// Upload one image.
    fn upload(&self, request: &UploadRequest) -> UploadFuture<'_>;
}

impl std::fmt::Debug for dyn MediaStore + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn MediaStore")
    }
}
