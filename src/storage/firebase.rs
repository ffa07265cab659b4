//! Firebase Storage bucket, spoken to through the Google Cloud Storage JSON API.

use anyhow::Context;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;

use super::ObjectStore;

const STORAGE_HOST: &str = "https://storage.googleapis.com";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.full_control";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const USER_AGENT: &str = "shapesketch/0.1.0";

/// Refresh the access token this long before Google says it expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::seconds(60);

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Fields used from a service-account key file
#[derive(Clone, Deserialize)]
struct ServiceAccount {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    value: String,
    expires_at: OffsetDateTime,
}

pub struct FirebaseBucket {
    bucket: String,
    account: ServiceAccount,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for FirebaseBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseBucket")
            .field("bucket", &self.bucket)
            .field("client_email", &self.account.client_email)
            .finish()
    }
}

impl FirebaseBucket {
    pub fn new(bucket: &str, credentials: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(credentials)
            .with_context(|| format!("Failed to read credentials {}", credentials.display()))?;
        let account: ServiceAccount = serde_json::from_str(&source)
            .with_context(|| format!("Invalid service account file {}", credentials.display()))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            bucket: bucket.to_string(),
            account,
            client,
            token: Mutex::new(None),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn client_email(&self) -> &str {
        &self.account.client_email
    }

    /// Return a cached access token, exchanging a fresh signed JWT when needed
    async fn access_token(&self) -> anyhow::Result<String> {
        let mut cached = self.token.lock().await;
        let now = OffsetDateTime::now_utc();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - TOKEN_EXPIRY_MARGIN > now {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch_token(&self, now: OffsetDateTime) -> anyhow::Result<CachedToken> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            iss: &self.account.client_email,
            scope: TOKEN_SCOPE,
            aud: &self.account.token_uri,
            iat,
            exp: iat + 3600,
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM")?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("Failed to sign token request")?;

        debug!("Requesting access token for {}", self.account.client_email);
        let response: TokenResponse = self
            .client
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(CachedToken {
            value: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in),
        })
    }
}

impl ObjectStore for FirebaseBucket {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        let body = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read {}", local_path.display()))?;
        let token = self.access_token().await?;

        self.client
            .post(upload_url(&self.bucket, remote_path)?)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn make_public(&self, remote_path: &str) -> anyhow::Result<String> {
        let token = self.access_token().await?;

        self.client
            .post(acl_url(&self.bucket, remote_path)?)
            .bearer_auth(token)
            .json(&serde_json::json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await?
            .error_for_status()?;

        public_url(&self.bucket, remote_path)
    }
}

fn storage_url<'a>(segments: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Url> {
    let mut url = Url::parse(STORAGE_HOST)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("{} cannot carry a path", STORAGE_HOST))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Media upload endpoint; the object name travels as a query parameter
pub fn upload_url(bucket: &str, remote_path: &str) -> anyhow::Result<Url> {
    let mut url = storage_url(["upload", "storage", "v1", "b", bucket, "o"])?;
    url.query_pairs_mut()
        .append_pair("uploadType", "media")
        .append_pair("name", remote_path);
    Ok(url)
}

/// Object ACL endpoint; the whole object name is a single escaped segment
pub fn acl_url(bucket: &str, remote_path: &str) -> anyhow::Result<Url> {
    storage_url(["storage", "v1", "b", bucket, "o", remote_path, "acl"])
}

/// Public download URL of an object
pub fn public_url(bucket: &str, remote_path: &str) -> anyhow::Result<String> {
    let segments = std::iter::once(bucket).chain(remote_path.split('/'));
    Ok(storage_url(segments)?.to_string())
}
