use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Stateless signed-token capability.
///
/// Tokens are opaque URL-safe strings embedding a [`Claims`] payload plus
/// issuance and expiry timestamps, signed with a process-wide secret. Nothing
/// is persisted server-side; tokens expire by time and cannot be revoked
/// before expiry.
pub trait TokenService: Send + Sync + 'static {
    /// Sign claims into a token, stamping `iat` and `exp`.
    ///
    /// Expiry is issuance time plus the configured validity window.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    fn create_token(&self, claims: Claims) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch, malformed structure, or expired.
    ///   The cause is never distinguished.
    fn decode_token(&self, token: &str) -> Result<Claims, TokenError>;
}

const SECONDS_PER_DAY: i64 = 86_400;

/// HMAC-SHA256 JWT implementation of [`TokenService`].
///
/// The signing secret and validity window are fixed at construction; secret
/// rotation is out of scope.
pub struct Hs256TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl Hs256TokenService {
    /// Create a token service from the configured secret and validity window.
    ///
    /// # Arguments
    /// * `secret` - Signing secret, at least 256 bits for HS256
    /// * `validity_days` - Token lifetime in whole days
    pub fn new(secret: &[u8], validity_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validity: Duration::seconds(validity_days * SECONDS_PER_DAY),
        }
    }
}

impl TokenService for Hs256TokenService {
    fn create_token(&self, mut claims: Claims) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        claims.iat = Some(now);
        claims.exp = Some(now + self.validity.num_seconds());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)?;

        // The library keeps a token whose exp equals the current second; the
        // window is strictly now < exp, so re-check the boundary ourselves.
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_create_and_decode_token() {
        let service = Hs256TokenService::new(SECRET, 7);

        let token = service
            .create_token(Claims::for_user("user123"))
            .expect("Failed to create token");
        assert!(!token.is_empty());

        let decoded = service.decode_token(&token).expect("Failed to decode");
        assert_eq!(decoded.user_id, Some("user123".to_string()));
    }

    #[test]
    fn test_created_token_carries_validity_window() {
        let service = Hs256TokenService::new(SECRET, 7);

        let before = Utc::now().timestamp();
        let token = service
            .create_token(Claims::for_user("user123"))
            .expect("Failed to create token");
        let after = Utc::now().timestamp();

        let decoded = service.decode_token(&token).expect("Failed to decode");
        let iat = decoded.iat.expect("iat missing");
        let exp = decoded.exp.expect("exp missing");

        assert!(iat >= before && iat <= after);
        assert_eq!(exp - iat, 7 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let service = Hs256TokenService::new(SECRET, 1);

        let token = service
            .create_token(Claims::for_user("user123").with_field("role", "moderator"))
            .expect("Failed to create token");

        let decoded = service.decode_token(&token).expect("Failed to decode");
        assert_eq!(
            decoded.extra.get("role").and_then(|v| v.as_str()),
            Some("moderator")
        );
    }

    #[test]
    fn test_decode_garbage_token() {
        let service = Hs256TokenService::new(SECRET, 7);

        assert_eq!(
            service.decode_token("invalid.token.here"),
            Err(TokenError::InvalidToken)
        );
        assert_eq!(service.decode_token(""), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let service = Hs256TokenService::new(SECRET, 7);
        let other = Hs256TokenService::new(b"another_secret_of_32_bytes_here!!", 7);

        let token = service
            .create_token(Claims::for_user("user123"))
            .expect("Failed to create token");

        assert_eq!(other.decode_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_decode_expired_token() {
        let service = Hs256TokenService::new(SECRET, 7);

        // Sign an already-elapsed window with the same secret
        let now = Utc::now().timestamp();
        let expired = Claims {
            user_id: Some("user123".to_string()),
            iat: Some(now - 2 * SECONDS_PER_DAY),
            exp: Some(now - SECONDS_PER_DAY),
            ..Claims::new()
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &expired,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode");

        assert_eq!(service.decode_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_decode_token_at_expiry_instant() {
        let service = Hs256TokenService::new(SECRET, 7);

        // exp equal to the current second is already outside the window
        let now = Utc::now().timestamp();
        let boundary = Claims {
            user_id: Some("user123".to_string()),
            iat: Some(now - SECONDS_PER_DAY),
            exp: Some(now),
            ..Claims::new()
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &boundary,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode");

        assert_eq!(service.decode_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_decode_token_without_expiry() {
        let service = Hs256TokenService::new(SECRET, 7);

        // A signed token with no exp claim is malformed for this service
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Claims::for_user("user123"),
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode");

        assert_eq!(service.decode_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_token_missing_user_id_still_decodes() {
        let service = Hs256TokenService::new(SECRET, 7);

        let token = service
            .create_token(Claims::new())
            .expect("Failed to create token");

        let decoded = service.decode_token(&token).expect("Failed to decode");
        assert!(decoded.user_id.is_none());
    }
}
