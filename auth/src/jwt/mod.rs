pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::TokenSubject;
pub use errors::JwtError;
pub use handler::JwtHandler;
