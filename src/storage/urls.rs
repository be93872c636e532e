use std::collections::HashSet;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::storage::{Bucket, ObjectKey, StorageError, StorageResult};

type HmacSha256 = Hmac<Sha256>;

/// Turns stored image paths into URLs the browser can load.
///
/// Buckets listed as public get a stable URL. Other buckets get a URL signed
/// with HMAC-SHA256 that expires after the configured TTL.
#[derive(Clone)]
pub struct ImageUrlResolver {
    base_url: String,
    public_buckets: HashSet<Bucket>,
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl ImageUrlResolver {
    pub fn new(
        base_url: &str,
        public_buckets: impl IntoIterator<Item = Bucket>,
        secret: &[u8],
        ttl_secs: i64,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            public_buckets: public_buckets.into_iter().collect(),
            secret: secret.to_vec(),
            ttl_secs,
        }
    }

    pub fn is_public(&self, bucket: Bucket) -> bool {
        self.public_buckets.contains(&bucket)
    }

    /// Resolve against the current time. Empty paths resolve to `None`.
    pub fn resolve(&self, bucket: Bucket, path: &str) -> Option<String> {
        self.resolve_at(bucket, path, Utc::now())
    }

    pub fn resolve_at(&self, bucket: Bucket, path: &str, now: DateTime<Utc>) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        let key = match ObjectKey::new(path.trim_start_matches('/')) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("Failed to resolve image path {path}: {e}");
                return None;
            }
        };
        if self.is_public(bucket) {
            return Some(format!(
                "{}/storage/public/{bucket}/{key}",
                self.base_url
            ));
        }
        let expires = now.timestamp() + self.ttl_secs;
        match self.sign(bucket, &key, expires) {
            Ok(signature) => Some(format!(
                "{}/storage/signed/{bucket}/{key}?expires={expires}&signature={signature}",
                self.base_url
            )),
            Err(e) => {
                log::error!("Failed to sign image url {bucket}/{key}: {e}");
                None
            }
        }
    }

    /// Hex HMAC of `{bucket}/{key}:{expires}`.
    pub fn sign(&self, bucket: Bucket, key: &ObjectKey, expires: i64) -> StorageResult<String> {
        Ok(hex::encode(
            self.mac(bucket, key, expires)?.finalize().into_bytes(),
        ))
    }

    pub fn verify(
        &self,
        bucket: Bucket,
        key: &ObjectKey,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> StorageResult<()> {
        let expected = hex::decode(signature).map_err(|_| StorageError::InvalidSignature)?;
        self.mac(bucket, key, expires)?
            .verify_slice(&expected)
            .map_err(|_| StorageError::InvalidSignature)?;
        if now.timestamp() > expires {
            return Err(StorageError::Expired);
        }
        Ok(())
    }

    fn mac(&self, bucket: Bucket, key: &ObjectKey, expires: i64) -> StorageResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| StorageError::InvalidSignature)?;
        mac.update(format!("{bucket}/{key}:{expires}").as_bytes());
        Ok(mac)
    }
}
