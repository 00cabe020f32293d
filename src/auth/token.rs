use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::Identity;
use crate::config::SignaturePolicy;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token rejected: {0}")]
    Rejected(String),
}

/// Claim set carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The `sub` claim as an identity; empty subjects count as missing
    pub fn subject(&self) -> Option<Identity> {
        self.sub
            .as_deref()
            .filter(|sub| !sub.is_empty())
            .map(Identity::from)
    }
}

/// Splits a JWT into its claim set.
///
/// SECURITY: the decoder built by [`TokenDecoder::unverified`] checks only the
/// token's structure. Signature, algorithm, expiry, audience and issuer are NOT
/// checked, so any well-formed token naming any `sub` is accepted, unsigned
/// `alg: none` tokens included. A deployment outside local development has to
/// select [`SignaturePolicy::Hs256`] before the non-mock path can be trusted.
#[derive(Clone)]
pub struct TokenDecoder {
    verifier: Option<Verifier>,
}

#[derive(Clone)]
struct Verifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    pub fn from_policy(policy: &SignaturePolicy) -> Self {
        match policy {
            SignaturePolicy::Unverified => Self::unverified(),
            SignaturePolicy::Hs256 { secret } => Self::hs256(secret.as_bytes()),
        }
    }

    pub fn unverified() -> Self {
        Self { verifier: None }
    }

    /// Checks the HS256 signature and `exp`/`nbf` when present
    pub fn hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            verifier: Some(Verifier {
                key: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verifier.is_some()
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        match &self.verifier {
            None => decode_structure(token),
            Some(verifier) => decode::<Claims>(token, &verifier.key, &verifier.validation)
                .map(|data| data.claims)
                .map_err(|e| TokenError::Rejected(e.to_string())),
        }
    }
}

/// Three dot-separated base64url segments: JSON header, JSON claims, signature
fn decode_structure(token: &str) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed(
            "expected three dot-separated segments".to_string(),
        ));
    };

    decode_segment::<Map<String, Value>>(header, "header")?;
    decode_segment::<Claims>(claims, "claims")
}

fn decode_segment<T: DeserializeOwned>(segment: &str, part: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| TokenError::Malformed(format!("{} is not base64url: {}", part, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("{} is not a JSON object: {}", part, e)))
}

/// Token from an `Authorization: Bearer <token>` header, if well-formed
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
