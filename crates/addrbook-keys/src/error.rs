use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
   #[error("Base58Check decoding failed: {0}")]
   Base58(#[from] bs58::decode::Error),

   #[error("Address payload must be 21 bytes, got {0}")]
   InvalidLength(usize),

   #[error("Address version {found} does not match the expected version {expected}")]
   WrongVersion { expected: u8, found: u8 },
}
