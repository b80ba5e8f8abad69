//! SiteSync S3 - destination object store
//!
//! Implements the [`ObjectStore`] port against an S3 bucket. Uploads carry
//! a content type and a public-read ACL so the bucket can be served as a
//! static site; deletes tolerate already-absent keys.
//!
//! Credentials come from the standard AWS provider chain (environment,
//! shared config, instance metadata). An endpoint override switches the
//! client to path-style addressing for S3-compatible stores in tests and
//! local development.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use sitesync_core::config::DestinationConfig;
use sitesync_core::domain::SyncError;
use sitesync_core::ports::ObjectStore;

/// S3-backed destination store
pub struct S3Mirror {
    client: S3Client,
    bucket: String,
}

impl S3Mirror {
    /// Builds the client from the destination config and the ambient AWS
    /// credential chain.
    pub async fn new(config: &DestinationConfig) -> Self {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: S3Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }

    /// Wraps an existing client, for tests that point at a local store.
    pub fn with_client(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Mirror {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SyncError> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| SyncError::Replication {
                key: key.to_string(),
                reason: format!("upload failed: {e}"),
            })?;

        debug!("uploaded {size} bytes to s3://{}{key}", self.bucket);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), SyncError> {
        // DeleteObject succeeds for absent keys; only service failures
        // are surfaced.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| SyncError::Replication {
                key: key.to_string(),
                reason: format!("delete failed: {e}"),
            })?;

        debug!("deleted s3://{}{key}", self.bucket);
        Ok(())
    }
}
