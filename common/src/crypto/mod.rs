mod hash;

pub mod error;

pub use error::CryptoError;
pub use hash::*;
