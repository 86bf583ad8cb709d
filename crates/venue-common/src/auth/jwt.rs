//! JWT identity resolution
//!
//! Access tokens are HS256 JWTs carrying the user id in `sub` and the role in
//! `user_type`. Resolving a token yields an [`Identity`] that is passed
//! explicitly into every reservation engine call.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use venue_core::{DomainError, Identity, IdentityResolver, RepoResult, UserId, UserRole};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role token (`customer` or `owner`)
    pub user_type: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Get the role carried by the token
    #[must_use]
    pub fn role(&self) -> UserRole {
        UserRole::from_token(&self.user_type)
    }

    /// Build the caller identity from these claims
    pub fn identity(&self) -> Result<Identity, AppError> {
        Ok(Identity::new(self.user_id()?, self.role()))
    }
}

/// JWT service for decoding (and, for tooling and tests, encoding) tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Encode a token for an identity
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(&self, identity: Identity) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.user_id.to_string(),
            user_type: identity.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate a token and return the caller identity
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or has a bad subject
    pub fn identity_from_token(&self, token: &str) -> Result<Identity, AppError> {
        self.decode_token(token)?.identity()
    }
}

impl IdentityResolver for JwtService {
    fn resolve(&self, token: &str) -> RepoResult<Identity> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return Err(DomainError::Unauthenticated(AppError::MissingAuth.to_string()));
        }

        self.identity_from_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            DomainError::Unauthenticated(e.to_string())
        })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}
