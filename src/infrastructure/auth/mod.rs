//! Authentication infrastructure module
//!
//! Bearer tokens identify registry users; the token subject is a user id.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService, DEFAULT_ISSUER};
