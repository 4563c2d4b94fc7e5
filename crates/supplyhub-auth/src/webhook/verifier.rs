//! Per-provider HMAC-SHA256 signature checks over the raw request body.
//!
//! | Provider | Header                  | Encoding                        |
//! |----------|-------------------------|---------------------------------|
//! | Shopify  | `X-Shopify-Hmac-Sha256` | base64                          |
//! | SAP      | `X-SAP-Signature`       | hex, optional `sha256=` prefix  |
//! | Power BI | `X-PowerBI-Signature`   | hex, optional `sha256=` prefix  |
//! | IoT      | `X-IoT-Signature`       | hex, optional `sha256=` prefix  |
//!
//! Verification never errors: a missing header, missing secret, malformed
//! encoding, or mismatch all yield `false`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

use supplyhub_core::config::WebhookSecrets;
use supplyhub_entity::webhook::WebhookProvider;

type HmacSha256 = Hmac<Sha256>;

/// How a provider encodes its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// Base64 of the raw MAC.
    Base64HmacSha256,
    /// Hex of the raw MAC, optionally prefixed with `sha256=`.
    HexHmacSha256,
}

impl SignatureScheme {
    /// Scheme used by a provider.
    pub fn for_provider(provider: WebhookProvider) -> Self {
        match provider {
            WebhookProvider::Shopify => Self::Base64HmacSha256,
            WebhookProvider::Sap | WebhookProvider::PowerBi | WebhookProvider::Iot => {
                Self::HexHmacSha256
            }
        }
    }

    fn decode(&self, signature: &str) -> Option<Vec<u8>> {
        let signature = signature.trim();
        match self {
            Self::Base64HmacSha256 => BASE64.decode(signature).ok(),
            Self::HexHmacSha256 => {
                let hex_sig = signature.strip_prefix("sha256=").unwrap_or(signature);
                hex::decode(hex_sig).ok()
            }
        }
    }
}

/// Verifies inbound webhook signatures with the configured shared secrets.
#[derive(Clone)]
pub struct WebhookVerifier {
    secrets: WebhookSecrets,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Create a verifier over per-provider secrets.
    pub fn new(secrets: WebhookSecrets) -> Self {
        Self { secrets }
    }

    /// Name of the header carrying the provider's signature.
    pub fn signature_header(provider: WebhookProvider) -> &'static str {
        match provider {
            WebhookProvider::Shopify => "X-Shopify-Hmac-Sha256",
            WebhookProvider::Sap => "X-SAP-Signature",
            WebhookProvider::PowerBi => "X-PowerBI-Signature",
            WebhookProvider::Iot => "X-IoT-Signature",
        }
    }

    fn secret(&self, provider: WebhookProvider) -> &str {
        match provider {
            WebhookProvider::Shopify => &self.secrets.shopify,
            WebhookProvider::Sap => &self.secrets.sap,
            WebhookProvider::PowerBi => &self.secrets.power_bi,
            WebhookProvider::Iot => &self.secrets.iot,
        }
    }

    /// Check `signature` (the header value, if present) against `body`.
    pub fn verify(&self, provider: WebhookProvider, signature: Option<&str>, body: &[u8]) -> bool {
        let Some(signature) = signature else {
            debug!(provider = %provider, "Webhook signature header missing");
            return false;
        };

        let secret = self.secret(provider);
        if secret.is_empty() {
            warn!(provider = %provider, "No webhook secret configured; rejecting delivery");
            return false;
        }

        let Some(expected) = SignatureScheme::for_provider(provider).decode(signature) else {
            debug!(provider = %provider, "Webhook signature is not validly encoded");
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Compute the signature header value a provider would send for `body`.
    pub fn sign(&self, provider: WebhookProvider, body: &[u8]) -> Option<String> {
        let secret = self.secret(provider);
        if secret.is_empty() {
            return None;
        }
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(body);
        let digest = mac.finalize().into_bytes();
        Some(match SignatureScheme::for_provider(provider) {
            SignatureScheme::Base64HmacSha256 => BASE64.encode(digest),
            SignatureScheme::HexHmacSha256 => format!("sha256={}", hex::encode(digest)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDERS: [WebhookProvider; 4] = [
        WebhookProvider::Shopify,
        WebhookProvider::Sap,
        WebhookProvider::PowerBi,
        WebhookProvider::Iot,
    ];

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(WebhookSecrets {
            shopify: "shopify-secret".into(),
            sap: "sap-secret".into(),
            power_bi: "pbi-secret".into(),
            iot: "iot-secret".into(),
        })
    }

    #[test]
    fn test_valid_signature_accepted_for_every_provider() {
        let v = verifier();
        let body = br#"{"id":1}"#;
        for provider in PROVIDERS {
            let sig = v.sign(provider, body).unwrap();
            assert!(v.verify(provider, Some(&sig), body), "{provider}");
        }
    }

    #[test]
    fn test_any_flipped_byte_rejected() {
        let v = verifier();
        let body = br#"{"line_items":[{"sku":"W-1","quantity":6}]}"#.to_vec();
        for provider in PROVIDERS {
            let sig = v.sign(provider, &body).unwrap();
            for i in 0..body.len() {
                let mut tampered = body.clone();
                tampered[i] ^= 0x01;
                assert!(!v.verify(provider, Some(&sig), &tampered), "{provider} byte {i}");
            }
        }
    }

    #[test]
    fn test_hex_prefix_is_optional() {
        let v = verifier();
        let body = b"payload";
        let sig = v.sign(WebhookProvider::Sap, body).unwrap();
        let bare = sig.strip_prefix("sha256=").unwrap();
        assert!(v.verify(WebhookProvider::Sap, Some(bare), body));
    }

    #[test]
    fn test_missing_header_or_secret_rejected() {
        let v = verifier();
        assert!(!v.verify(WebhookProvider::Iot, None, b"x"));

        let empty = WebhookVerifier::new(WebhookSecrets::default());
        let sig = v.sign(WebhookProvider::Iot, b"x").unwrap();
        assert!(!empty.verify(WebhookProvider::Iot, Some(&sig), b"x"));
        assert!(empty.sign(WebhookProvider::Iot, b"x").is_none());
    }

    #[test]
    fn test_signature_from_other_provider_rejected() {
        let v = verifier();
        let sig = v.sign(WebhookProvider::Sap, b"x").unwrap();
        assert!(!v.verify(WebhookProvider::Iot, Some(&sig), b"x"));
        assert!(!v.verify(WebhookProvider::Shopify, Some("%%%"), b"x"));
    }
}
