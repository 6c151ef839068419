/// Authentication service - bearer token verification
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Verifies the bearer tokens minted by the external token issuer.
///
/// One shared symmetric secret and one algorithm (HS256) for every
/// caller; there are no per-tenant keys and no rotation.
#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
}

impl AuthService {
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            token_expiration: Duration::hours(expiration_hours as i64),
        }
    }

    /// Verify a token and return the embedded user id.
    ///
    /// Accepts the raw signed token or a `Bearer `-prefixed value.
    pub fn verify_token(&self, header_value: &str) -> Result<String> {
        let token = header_value
            .strip_prefix("Bearer ")
            .unwrap_or(header_value)
            .trim();

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

        if token_data.claims.user_id.is_empty() {
            return Err(ServerError::Unauthenticated(
                "Token carries no user_id".to_string(),
            ));
        }
        Ok(token_data.claims.user_id)
    }

    /// Mint a signed token for the given user.
    ///
    /// Production tokens come from the external issuer; this exists for
    /// the `token` CLI subcommand and the test suite.
    pub fn issue_token(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_expiration;

        let claims = Claims {
            user_id: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
