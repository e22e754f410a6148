pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::models::Account;

/// Algorithm new tokens are signed with
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Header algorithms accepted on the way in. HMAC only.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// `None` when `now + expiry` falls outside the representable date range.
    pub fn new(account_number: i64, expiry: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(expiry)?;

        Some(Self {
            account_number,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Signing(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates bearer tokens carrying an account's bank number.
///
/// Built from [`SecurityConfig`]; without a secret every call fails instead
/// of falling back to a default key.
#[derive(Clone)]
pub struct TokenService {
    keys: Option<Arc<Keys>>,
    /// `None` when the configured hours do not fit a `Duration`
    expiry: Option<Duration>,
}

impl TokenService {
    pub fn new(config: &SecurityConfig) -> Self {
        let keys = config.jwt_secret.expose().map(|secret| {
            Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            })
        });

        Self {
            keys,
            expiry: i64::try_from(config.jwt_expiry_hours)
                .ok()
                .and_then(Duration::try_hours),
        }
    }

    /// Token lifetime in seconds, reported in login responses
    pub fn expires_in(&self) -> i64 {
        self.expiry.map_or(0, |expiry| expiry.num_seconds())
    }

    pub fn issue(&self, account: &Account) -> Result<String, JwtError> {
        let keys = self.keys.as_ref().ok_or(JwtError::MissingSecret)?;
        let claims = self
            .expiry
            .and_then(|expiry| Claims::new(account.number, expiry))
            .ok_or_else(|| JwtError::Signing("token expiry is out of range".to_string()))?;

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &keys.encoding)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| JwtError::InvalidToken("JWT secret is not configured".to_string()))?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("configured", &self.keys.is_some())
            .field("expiry_secs", &self.expires_in())
            .finish()
    }
}
