//! S3-compatible store client built on the AWS SDK.

use async_trait::async_trait;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

use crate::store::{MultipartStore, ObjectStore, ObjectInfo, SignedUrlStore};
use crate::{PartResult, SessionId, TransferError, TransferResult};

/// Connection settings for an S3-compatible store
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Route transfers through the bucket's acceleration endpoint
    pub accelerate: bool,
}

impl S3Config {
    /// Create a config for a bucket in a region
    pub fn new<B: Into<String>, R: Into<String>>(bucket: B, region: R) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            accelerate: false,
        }
    }

    /// Read settings from the environment: `AWS_BUCKET_NAME` is
    /// required; `AWS_REGION` defaults to us-east-1; credentials fall
    /// back to the SDK's ambient provider chain when unset.
    pub fn from_env() -> TransferResult<Self> {
        let bucket = std::env::var("AWS_BUCKET_NAME")
            .map_err(|_| TransferError::invalid("AWS_BUCKET_NAME is not set"))?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let mut config = Self::new(bucket, region);
        config.endpoint = std::env::var("AWS_ENDPOINT_URL").ok();
        config.access_key = std::env::var("AWS_ACCESS_KEY_ID").ok();
        config.secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok();
        Ok(config)
    }

    /// Point at a custom S3-compatible endpoint
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use static credentials instead of the ambient provider chain
    pub fn with_credentials<A: Into<String>, S: Into<String>>(
        mut self,
        access_key: A,
        secret_key: S,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Enable transfer acceleration
    pub fn with_accelerate(mut self) -> Self {
        self.accelerate = true;
        self
    }
}

/// Store backend for any S3-compatible service
pub struct S3CompatibleStore {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl S3CompatibleStore {
    /// Build a client from explicit settings
    pub async fn new(config: S3Config) -> TransferResult<Self> {
        if config.bucket.is_empty() {
            return Err(TransferError::invalid("S3 bucket is not configured"));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            let credentials = Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "reelvault-static",
            );
            loader = loader.credentials_provider(SharedCredentialsProvider::new(credentials));
        }

        let sdk_config = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&sdk_config).accelerate(config.accelerate);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket,
            region: config.region,
            endpoint: config.endpoint,
        })
    }

    /// Build a client from environment settings
    pub async fn from_env() -> TransferResult<Self> {
        Self::new(S3Config::from_env()?).await
    }
}

#[async_trait]
impl ObjectStore for S3CompatibleStore {
    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> TransferResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(TransferError::upload)?;
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> TransferResult<Vec<ObjectInfo>> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(TransferError::listing)?;

            for object in response.contents() {
                objects.push(ObjectInfo {
                    key: object.key().unwrap_or_default().to_string(),
                    last_modified: object.last_modified().and_then(|modified| {
                        chrono::DateTime::from_timestamp(
                            modified.secs(),
                            modified.subsec_nanos(),
                        )
                    }),
                    size: object.size().unwrap_or(0).max(0) as u64,
                });
            }

            if response.is_truncated().unwrap_or(false) {
                continuation = response.next_continuation_token().map(str::to_string);
            } else {
                break;
            }
        }

        debug!(prefix, count = objects.len(), "listed objects");
        Ok(objects)
    }

    fn object_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[async_trait]
impl MultipartStore for S3CompatibleStore {
    async fn initiate(&self, key: &str, content_type: &str) -> TransferResult<SessionId> {
        let response = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await
            .map_err(TransferError::upload)?;

        let upload_id = response
            .upload_id()
            .ok_or_else(|| TransferError::upload("store returned no upload id"))?;

        Ok(SessionId::from_string(upload_id.to_string()))
    }

    async fn upload_part(
        &self,
        key: &str,
        session: &SessionId,
        part_number: u32,
        body: Bytes,
    ) -> TransferResult<Option<String>> {
        let response = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(session.as_str())
            .part_number(part_number as i32)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|error| TransferError::part_upload(part_number, error))?;

        // S3 wraps etags in quotes on the wire; strip them so callers
        // hold the bare token.
        Ok(response
            .e_tag()
            .map(|etag| etag.trim_matches('"').to_string()))
    }

    async fn complete(
        &self,
        key: &str,
        session: &SessionId,
        parts: &[PartResult],
    ) -> TransferResult<String> {
        let completed_parts: Vec<CompletedPart> = parts
            .iter()
            .map(|part| {
                CompletedPart::builder()
                    .part_number(part.part_number as i32)
                    .e_tag(&part.etag)
                    .build()
            })
            .collect();

        let response = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(session.as_str())
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed_parts))
                    .build(),
            )
            .send()
            .await
            .map_err(TransferError::completion)?;

        Ok(response
            .location()
            .map(str::to_string)
            .unwrap_or_else(|| self.object_url(key)))
    }

    async fn abort(&self, key: &str, session: &SessionId) -> TransferResult<()> {
        self.client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(session.as_str())
            .send()
            .await
            .map_err(TransferError::abort)?;
        Ok(())
    }
}

#[async_trait]
impl SignedUrlStore for S3CompatibleStore {
    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> TransferResult<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(TransferError::listing)?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(TransferError::listing)?;

        Ok(request.uri().to_string())
    }
}
