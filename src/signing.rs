//! Signed, expiring links to a customer's shared wishlist.
//!
//! A link looks like
//! `{base_url}/wishlist/shared?expires=..&id=..[&product_ids=a%2Cb]&signature=..`.
//! The signature is a hex HMAC-SHA256 over the path plus every query pair
//! except `signature`, in the order received. Signing the path rather than
//! the full URL keeps links valid behind proxies that rewrite the host.

use std::sync::Arc;

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const SHARED_WISHLIST_PATH: &str = "/wishlist/shared";

/// Parameters carried by a link whose signature checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLinkParams {
    pub customer_id: String,
    /// Empty = every shared item of the customer
    pub product_ids: Vec<String>,
    pub expires: i64,
}

#[derive(Clone)]
pub struct ShareLinkSigner {
    secret: Arc<[u8]>,
    base_url: String,
    ttl_seconds: i64,
}

impl std::fmt::Debug for ShareLinkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareLinkSigner")
            .field("base_url", &self.base_url)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl ShareLinkSigner {
    pub fn new(secret: impl AsRef<[u8]>, base_url: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ttl_seconds,
        }
    }

    /// Random 256-bit hex secret for deployments that did not configure one.
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    pub fn shared_link(&self, customer_id: &str, product_ids: &[String]) -> String {
        self.shared_link_at(customer_id, product_ids, Utc::now().timestamp())
    }

    /// Mint a link as of `now` (unix seconds).
    pub fn shared_link_at(&self, customer_id: &str, product_ids: &[String], now: i64) -> String {
        let mut query = format!(
            "expires={}&id={}",
            now.saturating_add(self.ttl_seconds),
            urlencoding::encode(customer_id)
        );
        if !product_ids.is_empty() {
            query.push_str("&product_ids=");
            query.push_str(&urlencoding::encode(&product_ids.join(",")));
        }
        let signature = self.sign(&query);
        format!(
            "{}{}?{}&signature={}",
            self.base_url, SHARED_WISHLIST_PATH, query, signature
        )
    }

    fn mac(&self, query: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length");
        mac.update(SHARED_WISHLIST_PATH.as_bytes());
        mac.update(b"?");
        mac.update(query.as_bytes());
        mac
    }

    fn sign(&self, query: &str) -> String {
        hex::encode(self.mac(query).finalize().into_bytes())
    }

    pub fn verify(&self, raw_query: &str) -> Option<SharedLinkParams> {
        self.verify_at(raw_query, Utc::now().timestamp())
    }

    /// Check the signature and expiry of a raw query string as of `now`.
    /// Returns None for any failure; callers must not tell the cases apart.
    pub fn verify_at(&self, raw_query: &str, now: i64) -> Option<SharedLinkParams> {
        let mut provided = None;
        let mut unsigned = Vec::new();
        for pair in raw_query.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some(("signature", value)) => {
                    provided.get_or_insert(value);
                }
                _ => unsigned.push(pair),
            }
        }

        let provided = provided?;
        let expected = self.sign(&unsigned.join("&"));
        if !bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
            return None;
        }

        let mut customer_id = None;
        let mut product_ids = Vec::new();
        let mut expires = None;
        for pair in unsigned {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value).ok()?;
            match key {
                "id" => customer_id = Some(value.into_owned()),
                "expires" => expires = value.parse::<i64>().ok(),
                "product_ids" => {
                    product_ids = value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(String::from)
                        .collect();
                }
                _ => {}
            }
        }

        let expires = expires?;
        if expires <= now {
            return None;
        }

        Some(SharedLinkParams {
            customer_id: customer_id.filter(|id| !id.is_empty())?,
            product_ids,
            expires,
        })
    }
}
