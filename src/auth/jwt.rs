use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::user::User;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
    #[serde(default)]
    pub is_guest: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

fn create_token(user: &User, token_type: TokenType, config: &Config) -> AppResult<String> {
    let ttl = match token_type {
        TokenType::Access => config.jwt_access_ttl_secs,
        TokenType::Refresh => config.jwt_refresh_ttl_secs,
    };
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: (now + Duration::seconds(ttl)).timestamp(),
        iat: now.timestamp(),
        token_type,
        is_guest: user.is_guest,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create {:?} token: {}", token_type, e)))
}

pub fn create_access_token(user: &User, config: &Config) -> AppResult<String> {
    create_token(user, TokenType::Access, config)
}

pub fn create_token_pair(user: &User, config: &Config) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access_token: create_access_token(user, config)?,
        refresh_token: create_token(user, TokenType::Refresh, config)?,
        expires_in: config.jwt_access_ttl_secs,
    })
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_carries_distinct_token_types() {
        let config = Config::for_tests();
        let user = User::registered("ana", "ana@example.com", "hash".into());
        let pair = create_token_pair(&user, &config).unwrap();

        let access = verify_token(&pair.access_token, &config).unwrap();
        let refresh = verify_token(&pair.refresh_token, &config).unwrap();
        assert_eq!(access.claims.token_type, TokenType::Access);
        assert_eq!(refresh.claims.token_type, TokenType::Refresh);
        assert_eq!(access.claims.sub, user.id);
        assert_eq!(access.claims.username, "ana");
        assert_eq!(pair.expires_in, config.jwt_access_ttl_secs);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let config = Config::for_tests();
        let user = User::guest();
        let token = create_access_token(&user, &config).unwrap();

        let mut other = Config::for_tests();
        other.jwt_secret = "different".into();
        assert!(matches!(verify_token(&token, &other), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = Config::for_tests();
        // Beyond the default 60s leeway.
        config.jwt_access_ttl_secs = -120;
        let token = create_access_token(&User::guest(), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }
}
