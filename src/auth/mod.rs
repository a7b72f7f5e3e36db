use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Token claims. `sub` is the opaque identity that owns notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when `expiry_hours` puts `exp` past the representable date range.
    pub fn new(subject: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!("expiry of {} hours is out of range", expiry_hours))
            })?;

        Ok(Self {
            sub: subject.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// The authenticated principal behind a request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
    InvalidToken(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// HS256 signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_hours: u64,
}

impl AuthKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Mint a token for `subject` with the configured lifetime
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.generate_jwt(&Claims::new(subject, self.expiry_hours)?)
    }

    pub fn generate_jwt(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Validate signature and expiry, returning the identity in `sub`
    pub fn verify(&self, token: &str) -> Result<Identity, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let subject = token_data.claims.sub.trim();
        if subject.is_empty() {
            return Err(JwtError::InvalidToken("empty subject".to_string()));
        }
        Ok(Identity::new(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_subject() {
        let keys = AuthKeys::new("test-secret", 1).unwrap();
        let token = keys.issue("user_123").unwrap();
        let identity = keys.verify(&token).unwrap();
        assert_eq!(identity.subject(), "user_123");
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(AuthKeys::new("", 1), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issuer = AuthKeys::new("secret-a", 1).unwrap();
        let verifier = AuthKeys::new("secret-b", 1).unwrap();
        let token = issuer.issue("user_123").unwrap();
        assert!(matches!(verifier.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let keys = AuthKeys::new("test-secret", 1).unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user_123".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = keys.generate_jwt(&claims).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn rejects_blank_subject() {
        let keys = AuthKeys::new("test-secret", 1).unwrap();
        let token = keys.issue("   ").unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let keys = AuthKeys::new("test-secret", 1).unwrap();
        assert!(keys.verify("not.a.jwt").is_err());
    }

    #[test]
    fn oversized_expiry_is_an_error() {
        let keys = AuthKeys::new("test-secret", u64::MAX / 2).unwrap();
        assert!(matches!(keys.issue("user_123"), Err(JwtError::TokenGeneration(_))));
        assert!(Claims::new("user_123", u64::MAX).is_err());
    }

    #[test]
    fn expiry_is_hours_after_issue() {
        let claims = Claims::new("user_123", 24).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }
}
