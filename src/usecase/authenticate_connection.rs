//! UseCase: connection authentication.
//!
//! Validates the bearer token presented with the connection attempt and
//! resolves its subject to an identity. Runs before any room logic; a
//! failure here is terminal for the connection attempt and the client must
//! reconnect with a fresh token.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, Identity, IdentityStore};

/// JWT claims carried by connection tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id of the token holder
    pub sub: String,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

/// Authentication gate for incoming connections.
pub struct AuthenticateConnectionUseCase {
    decoding_key: DecodingKey,
    identity_store: Arc<dyn IdentityStore>,
}

impl AuthenticateConnectionUseCase {
    /// Create a new AuthenticateConnectionUseCase over an HS256 secret.
    pub fn new(secret: &str, identity_store: Arc<dyn IdentityStore>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            identity_store,
        }
    }

    /// Validate a presented token and resolve it to an Identity.
    ///
    /// # Arguments
    ///
    /// * `token` - the token query parameter, if the client supplied one
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingToken` - no token supplied
    /// * `AuthError::InvalidToken` - signature or expiry check failed
    /// * `AuthError::UnknownSubject` - token valid but the account is gone
    pub async fn execute(&self, token: Option<&str>) -> Result<Identity, AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("rejected connection token: {e}");
            AuthError::InvalidToken
        })?;

        let subject = data.claims.sub;
        self.identity_store
            .find_by_id(&subject)
            .await
            .ok_or(AuthError::UnknownSubject(subject))
    }
}

/// Mint a token for a subject, valid for `ttl_secs` from now.
///
/// The credential subsystem owning login mints with the same secret; this
/// helper exists for the demo seeding path and the test suites.
pub fn issue_token(
    secret: &str,
    subject: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
