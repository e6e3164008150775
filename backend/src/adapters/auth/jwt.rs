//! HS256 access tokens.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, DomainError, Role, Timestamp, UserId};
use crate::domain::user::Account;
use crate::ports::{IssuedToken, TokenIssuer};

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and verifies access tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl_hours,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.expose_secret().as_bytes(),
            config.issuer.clone(),
            config.token_ttl_hours,
        )
    }

    /// Verifies signature, issuer and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Parses the subject and role out of verified claims.
    pub fn identity(claims: &Claims) -> Result<(UserId, Role), AuthError> {
        let id = claims.sub.parse::<UserId>().map_err(|_| AuthError::InvalidToken)?;
        let role = claims.role.parse::<Role>().map_err(|_| AuthError::InvalidToken)?;
        Ok((id, role))
    }

    fn sign(&self, account: &Account, issued_at: Timestamp) -> Result<IssuedToken, DomainError> {
        let expires_at = issued_at.add_hours(self.ttl_hours);
        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.as_str().to_string(),
            role: account.role.as_str().to_string(),
            iss: self.issuer.clone(),
            exp: expires_at.as_unix_secs(),
            iat: issued_at.as_unix_secs(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("Token signing failed: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_at,
        })
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, account: &Account) -> Result<IssuedToken, DomainError> {
        self.sign(account, Timestamp::now())
    }
}
