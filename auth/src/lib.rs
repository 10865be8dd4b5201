//! Authentication infrastructure library
//!
//! Provides the security primitives for the identity service:
//! - Password hashing (Argon2id, fresh salt per hash)
//! - Signed bearer token issuance and verification (JWT, HS256)
//!
//! The service defines its own domain-level authentication flow and adapts
//! these implementations. Nothing in this crate performs I/O or holds shared
//! mutable state, so both types are safe to share across request handlers.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::{Duration, Utc};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::days(30)).unwrap();
//! let token = issuer.issue("user123", Utc::now()).unwrap();
//! let subject = issuer.verify(&token, Utc::now()).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
