//! Upload of exported spreadsheets to S3-compatible object storage.
//!
//! An upload is a single signed `PUT` of the whole file; it is never retried.

mod signing;

pub use signing::{PutRequest, SignedHeaders, sha256_hex, sign_put, signing_key};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::config::UploadConfig;
use crate::export::TIMESTAMP_FORMAT;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl UploadError {
    /// What the user should check for this kind of failure.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "check that the exported file still exists",
            Self::Auth(_) => "check the access key and secret key",
            Self::Network(_) => "check the network connection and the endpoint setting",
        }
    }
}

/// Static access key pair.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.access_key.trim().is_empty() && !self.secret_key.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Validated endpoint plus the authority used in the signed `host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoint {
    url: Url,
    host: String,
}

fn parse_endpoint(endpoint: &str) -> std::result::Result<Endpoint, UploadError> {
    let invalid =
        |reason: &str| UploadError::Network(format!("invalid endpoint {:?}: {}", endpoint, reason));

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("credentials belong in the upload settings, not the URL"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("missing host"))?;
    // `port()` is `None` for the scheme's default port
    let host = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(Endpoint { url, host })
}

/// Path-style object URL: `{endpoint}/{bucket}/{key}`, each segment encoded
/// with the RFC 3986 unreserved set that signing expects.
fn object_url(endpoint: &Endpoint, bucket: &str, key: &str) -> Url {
    let base = endpoint.url.path().trim_end_matches('/');
    let mut url = endpoint.url.clone();
    url.set_path(&format!(
        "{}/{}/{}",
        base,
        urlencoding::encode(bucket),
        urlencoding::encode(key)
    ));
    url
}

fn classify(error: ureq::Error) -> UploadError {
    match error {
        ureq::Error::StatusCode(code @ (401 | 403)) => {
            UploadError::Auth(format!("server rejected the credentials (HTTP {})", code))
        }
        ureq::Error::StatusCode(code) => {
            UploadError::Network(format!("server responded with HTTP {}", code))
        }
        other => UploadError::Network(other.to_string()),
    }
}

pub struct S3Uploader {
    endpoint: String,
    bucket: String,
    region: String,
    prefix: String,
    credentials: Credentials,
    agent: ureq::Agent,
}

impl S3Uploader {
    /// Create an uploader. Settings are checked when a file is uploaded.
    pub fn from_config(config: &UploadConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();
        let agent: ureq::Agent = agent_config.into();

        Self {
            endpoint: config.endpoint.clone(),
            bucket: config.bucket.trim().to_string(),
            region: config.region.clone(),
            prefix: config.prefix.clone(),
            credentials: Credentials::new(&config.access_key, &config.secret_key),
            agent,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// `{prefix}_{YYYYMMDD_HHMMSS}.xlsx`
    pub fn remote_key(&self, now: &DateTime<Local>) -> String {
        format!("{}_{}.xlsx", self.prefix, now.format(TIMESTAMP_FORMAT))
    }

    /// Upload a file under a key stamped with the current time.
    /// Returns the remote key.
    pub fn upload(&self, path: &Path) -> std::result::Result<String, UploadError> {
        self.upload_at(path, &Local::now())
    }

    pub fn upload_at(
        &self,
        path: &Path,
        now: &DateTime<Local>,
    ) -> std::result::Result<String, UploadError> {
        let payload = fs::read(path).map_err(|e| {
            warn!("Cannot read {} for upload: {}", path.display(), e);
            UploadError::FileNotFound {
                path: path.to_path_buf(),
            }
        })?;

        if !self.credentials.is_complete() {
            return Err(UploadError::Auth(
                "access key or secret key is missing".to_string(),
            ));
        }

        if self.bucket.is_empty() {
            return Err(UploadError::Network(
                "upload bucket is not configured".to_string(),
            ));
        }
        let endpoint = parse_endpoint(&self.endpoint)?;
        let key = self.remote_key(now);
        let url = object_url(&endpoint, &self.bucket, &key);

        let signed = sign_put(
            &PutRequest {
                host: &endpoint.host,
                path: url.path(),
                payload: &payload,
                region: &self.region,
                access_key: &self.credentials.access_key,
                secret_key: &self.credentials.secret_key,
            },
            &now.with_timezone(&Utc),
        );

        let response = self
            .agent
            .put(url.as_str())
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", XLSX_CONTENT_TYPE)
            .send(payload.as_slice())
            .map_err(classify)?;

        info!(
            "Uploaded {} to {}/{} (status: {})",
            path.display(),
            self.bucket,
            key,
            response.status()
        );
        Ok(key)
    }
}
