use std::collections::HashSet;

use anyhow::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session lifetime, matching the `token` cookie's Max-Age.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Issues a session token. Sign-in itself lives with the identity provider;
/// it shares `JWT_SECRET` with this service.
pub fn create_token(secret: &[u8], user_id: &str) -> Result<String> {
    create_token_with_ttl(secret, user_id, SESSION_TTL_SECS)
}

pub fn create_token_with_ttl(secret: &[u8], user_id: &str, ttl_secs: i64) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: usize::try_from(now + ttl_secs).unwrap_or(0),
        iat: usize::try_from(now).unwrap_or(0),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;
    Ok(token)
}

pub fn verify_token(secret: &[u8], token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims =
        HashSet::from(["exp".to_string(), "iat".to_string(), "sub".to_string()]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}
