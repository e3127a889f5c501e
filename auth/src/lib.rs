//! Authentication utilities library
//!
//! Provides the credential primitives of the SSO service:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT access claims and HS256 encoding/decoding
//! - Token issuance scoped to an application secret
//!
//! The service defines its own capability traits and adapts these
//! implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashingCost::minimal()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Application-scoped tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::{TokenIssuer, TokenSubject};
//!
//! let issuer = TokenIssuer::new();
//! let subject = TokenSubject { user_id: 1, email: "a@x.com", app_id: 1 };
//!
//! let token = issuer
//!     .issue(&subject, b"app_secret_at_least_32_bytes_long!", Duration::from_secs(3600))
//!     .unwrap();
//! let claims = issuer
//!     .verify(&token, b"app_secret_at_least_32_bytes_long!")
//!     .unwrap();
//! assert_eq!(claims.uid, 1);
//! assert!(issuer.verify(&token, b"another_app_secret_32_bytes_long!").is_err());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSubject;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
