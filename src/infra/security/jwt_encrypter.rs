//! JWT implementation of the reversible token encrypter port.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;
use crate::services::TokenEncrypter;

/// Access-token claims payload.
///
/// `jti` is a random nonce so two tokens issued for the same user id in
/// the same second still differ (token rotation guarantee).
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    jti: Uuid,
    iat: i64,
    exp: i64,
}

/// JWT-based token encrypter keyed on the user id.
pub struct JwtEncrypter {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtEncrypter {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret_bytes()),
            expiration_hours: config.token_expiration_hours,
        }
    }
}

impl TokenEncrypter for JwtEncrypter {
    fn encrypt(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    fn decrypt(&self, token: &str) -> AppResult<Uuid> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypter() -> JwtEncrypter {
        JwtEncrypter::new(&Config::with_secret("test-secret-key-for-tests-32chars!"))
    }

    #[test]
    fn token_round_trips_to_the_same_id() {
        let encrypter = encrypter();
        let id = Uuid::new_v4();

        let token = encrypter.encrypt(id).unwrap();
        assert_eq!(encrypter.decrypt(&token).unwrap(), id);
    }

    #[test]
    fn consecutive_tokens_for_same_id_differ() {
        let encrypter = encrypter();
        let id = Uuid::new_v4();

        let first = encrypter.encrypt(id).unwrap();
        let second = encrypter.encrypt(id).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let encrypter = encrypter();
        assert!(encrypter.decrypt("not-a-token").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let id = Uuid::new_v4();
        let token = encrypter().encrypt(id).unwrap();

        let other =
            JwtEncrypter::new(&Config::with_secret("another-secret-key-for-tests-32ch!"));
        assert!(other.decrypt(&token).is_err());
    }
}
