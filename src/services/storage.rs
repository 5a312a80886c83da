use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::StorageConfig;

/// All uploads live under this prefix; listing is scoped to it
pub const UPLOAD_PREFIX: &str = "uploads/";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("listing failed: {0}")]
    List(String),
    #[error("delete failed: {0}")]
    Delete(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// One listed object, as reported by the backend
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// The only component that talks to the object-storage backend.
///
/// Holds one S3 client built from explicit credentials at startup. Every
/// endpoint performs at most one or two of these calls per request; there is
/// no caching and no retry logic of our own.
#[derive(Clone)]
pub struct StorageGateway {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl StorageGateway {
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "app-config",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        // Custom endpoint (MinIO, R2, Spaces) needs path-style addressing
        let client = if let Some(ref endpoint) = config.endpoint_url {
            let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
                .endpoint_url(endpoint)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&shared_config)
        };

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint_url: config.endpoint_url.clone(),
        })
    }

    /// Generate an object key for a fresh upload:
    /// `uploads/<field>-<millis>-<random><ext>`.
    ///
    /// Unique by construction (timestamp + random suffix); keys are never
    /// reused and never renamed.
    pub fn generate_key(field_name: &str, original_name: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let ext = Path::new(original_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        format!("{}{}-{}-{}{}", UPLOAD_PREFIX, field_name, millis, suffix, ext)
    }

    /// Public (unsigned) URL for an object.
    ///
    /// Standard AWS form `https://{bucket}.s3.{region}.amazonaws.com/{key}`,
    /// or path-style `{endpoint}/{bucket}/{key}` when an endpoint override is
    /// configured.
    pub fn public_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    /// Stream a file's bytes to the backend under `key`
    pub async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "put_object failed"
                );
                StorageError::Upload(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "put_object successful"
        );

        Ok(())
    }

    /// List objects under `prefix`.
    ///
    /// Only the first page of `list_objects_v2` is read; buckets exceeding
    /// the backend's page size are truncated here.
    pub async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectSummary>> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    "list_objects_v2 failed"
                );
                StorageError::List(e.to_string())
            })?;

        let objects: Vec<ObjectSummary> = response
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?.to_string();
                Some(ObjectSummary {
                    key,
                    size: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: object
                        .last_modified()
                        .and_then(|t| Utc.timestamp_opt(t.secs(), t.subsec_nanos()).single()),
                })
            })
            .collect();

        tracing::info!(
            bucket = %self.bucket,
            prefix = %prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "list_objects_v2 successful"
        );

        Ok(objects)
    }

    /// Existence probe via `head_object`
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    HeadObjectError::NotFound(_) => Ok(false),
                    _ => Err(StorageError::Backend(e.to_string())),
                },
                _ => Err(StorageError::Backend(e.to_string())),
            },
        }
    }

    /// Time-limited signed GET URL for a private object
    pub async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let presigning_config = aws_sdk_s3::presigning::PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(presigned_request.uri().to_string())
    }

    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "delete_object failed"
                );
                StorageError::Delete(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "delete_object successful"
        );

        Ok(())
    }
}
