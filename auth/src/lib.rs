//! Authentication utilities library
//!
//! Provides the security-sensitive building blocks for the discussion backend:
//! - Password hashing (Argon2id)
//! - Stateless signed-token issuance and verification (HS256 JWT)
//!
//! Both capabilities are exposed as traits with one concrete implementation
//! selected at startup, so services depend on the seam rather than on the
//! underlying crates.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, Hs256TokenService, TokenService};
//!
//! let service = Hs256TokenService::new(b"secret_key_at_least_32_bytes_long!", 7);
//! let token = service.create_token(Claims::for_user("user123")).unwrap();
//! let claims = service.decode_token(&token).unwrap();
//! assert_eq!(claims.user_id.as_deref(), Some("user123"));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Hs256TokenService;
pub use token::TokenError;
pub use token::TokenService;
