// src/infrastructure/security/token.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::{security::TokenVerifier, time::Clock},
};
use crate::domain::user::{Role, UserId};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_SECRET_LEN: usize = 32;

/// Payload of a bearer token issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub name: String,
    pub role: Role,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

/// Verifies `base64url(claims).base64url(hmac_sha256(claims))` tokens.
#[derive(Clone)]
pub struct HmacTokenVerifier {
    secret: Arc<[u8]>,
    clock: Arc<dyn Clock>,
}

impl HmacTokenVerifier {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> ApplicationResult<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(ApplicationError::infrastructure(format!(
                "token secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(Self {
            secret: Arc::from(secret),
            clock,
        })
    }

    fn mac(&self) -> ApplicationResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }

    /// Issue a token for `claims`. Production tokens come from the identity
    /// service; this exists for tooling and tests.
    pub fn sign(&self, claims: &TokenClaims) -> ApplicationResult<String> {
        let payload = serde_json::to_vec(claims)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{encoded}.{signature}"))
    }
}

#[async_trait]
impl TokenVerifier for HmacTokenVerifier {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let (encoded, signature) = token
            .split_once('.')
            .ok_or_else(|| ApplicationError::unauthorized("malformed token"))?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| ApplicationError::unauthorized("malformed token signature"))?;
        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| ApplicationError::unauthorized("invalid token signature"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| ApplicationError::unauthorized("malformed token payload"))?;
        let claims: TokenClaims = serde_json::from_slice(&payload)
            .map_err(|_| ApplicationError::unauthorized("malformed token claims"))?;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(ApplicationError::unauthorized("token expired"));
        }

        Ok(AuthenticatedUser {
            id: UserId::new(claims.sub)
                .map_err(|_| ApplicationError::unauthorized("invalid token subject"))?,
            name: claims.name,
            role: claims.role,
        })
    }
}
