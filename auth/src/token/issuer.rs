use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is loaded once at
/// construction and never exposed afterwards.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from a signing secret and a validity window.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `validity` - How long issued tokens remain valid
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty; callers must treat this as a
    ///   fatal startup-time configuration error
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
        })
    }

    /// Issue a signed token for a subject.
    ///
    /// The token expires at `now + validity`.
    ///
    /// # Arguments
    /// * `subject` - User identifier to bind into the token
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, now, now + self.validity);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and extract its subject.
    ///
    /// Structure and signature are checked before expiry; a token that fails
    /// any one check is rejected outright. Expiry is evaluated against the
    /// caller's clock, with the bound inclusive (`now >= exp` fails).
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    /// * `now` - Verification instant
    ///
    /// # Returns
    /// Subject embedded in the token
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify
    /// * `Malformed` - Structure cannot be parsed
    /// * `Expired` - Token expiry has passed
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller-supplied clock.
        validation.validate_exp = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims.sub)
    }
}
