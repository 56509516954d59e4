use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::CoverStoreError;
use crate::domain::covers::{CoverUpload, generated_file_name, is_valid_file_name};
use crate::domain::repositories::CoverStore;

/// Filesystem-backed cover image store rooted at a configured upload
/// directory. File names are generated, never user-controlled.
pub struct FsCoverStore {
    upload_dir: PathBuf,
}

impl FsCoverStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.upload_dir.join(file_name)
    }
}

#[async_trait]
impl CoverStore for FsCoverStore {
    async fn store(&self, upload: CoverUpload) -> Result<Option<String>, CoverStoreError> {
        if !upload.is_allowed() {
            // The upload filter drops disallowed types without an error;
            // the submission proceeds as if no file was provided.
            debug!(content_type = %upload.content_type, "rejected cover upload");
            return Ok(None);
        }

        fs::create_dir_all(&self.upload_dir).await?;

        let file_name = generated_file_name(&upload.content_type);
        let path = self.path_for(&file_name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(&upload.bytes).await?;
        file.flush().await?;

        debug!(file = %file_name, "stored cover image");
        Ok(Some(file_name))
    }

    async fn read(&self, file_name: &str) -> Result<Vec<u8>, CoverStoreError> {
        if !is_valid_file_name(file_name) {
            return Err(CoverStoreError::InvalidFileName);
        }

        match fs::read(self.path_for(file_name)).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(CoverStoreError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, file_name: &str) {
        if !is_valid_file_name(file_name) {
            warn!(file = %file_name, "refusing to delete invalid cover file name");
            return;
        }

        if let Err(err) = fs::remove_file(self.path_for(file_name)).await {
            warn!(error = %err, file = %file_name, "failed to delete cover image");
        }
    }
}
