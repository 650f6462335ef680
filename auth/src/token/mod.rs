pub mod claims;
pub mod errors;
pub mod hs256;

pub use claims::Claims;
pub use errors::TokenError;
pub use hs256::Hs256TokenService;
pub use hs256::TokenService;
