pub mod address;
pub mod error;

pub use address::{
   DEFAULT_VERSION, KeyPair, address_from_key, decode_address, hash160, validate_address,
};
pub use error::KeyError;
