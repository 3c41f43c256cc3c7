//! Optional archive of original resume uploads (S3 / MinIO).

use anyhow::Result;
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ArchiveConfig;

#[async_trait]
pub trait DocumentArchive: Send + Sync {
    /// Stores `bytes` under `key`. Returns the key that was written.
    async fn put(&self, key: &str, content_type: &str, bytes: Bytes) -> Result<String>;
}

pub struct S3Archive {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Archive {
    /// Static credentials when both keys are configured, otherwise the default
    /// provider chain. A custom endpoint (MinIO) switches to path-style addressing.
    pub async fn from_config(config: &ArchiveConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "prepcoach-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl DocumentArchive for S3Archive {
    async fn put(&self, key: &str, content_type: &str, bytes: Bytes) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Archived upload to s3://{}/{}", self.bucket, key);
        Ok(key.to_string())
    }
}

/// `resumes/{id}/{filename}` with the filename reduced to a safe character set.
pub fn resume_key(resume_id: Uuid, filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('.');
    let name = if safe.is_empty() { "upload" } else { safe };
    format!("resumes/{resume_id}/{name}")
}

/// Best effort: a failed upload is logged and yields `None`.
pub async fn archive_resume(
    archive: Option<&dyn DocumentArchive>,
    resume_id: Uuid,
    filename: &str,
    content_type: &str,
    bytes: Bytes,
) -> Option<String> {
    let archive = archive?;
    let key = resume_key(resume_id, filename);
    match archive.put(&key, content_type, bytes).await {
        Ok(stored) => Some(stored),
        Err(e) => {
            warn!("Resume {resume_id} archive failed, continuing without it: {e:#}");
            None
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records puts in memory; optionally fails every call.
    #[derive(Default)]
    pub struct RecordingArchive {
        pub fail: bool,
        pub stored: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl DocumentArchive for RecordingArchive {
        async fn put(&self, key: &str, content_type: &str, bytes: Bytes) -> Result<String> {
            if self.fail {
                anyhow::bail!("bucket unavailable");
            }
            self.stored
                .lock()
                .unwrap()
                .push((key.to_string(), content_type.to_string(), bytes.len()));
            Ok(key.to_string())
        }
    }
}
