pub mod claims;
pub mod config;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use config::TokenConfig;
pub use errors::JwtError;
pub use handler::JwtHandler;
