use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;

use super::error::KeyError;

/// Version byte of pay-to-pubkey-hash addresses on the main network
pub const DEFAULT_VERSION: u8 = 30;

/// Version byte followed by the 20 byte key hash
const PAYLOAD_LEN: usize = 21;

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
   let sha256_hash = Sha256::digest(data);
   let ripemd160_hash = Ripemd160::digest(sha256_hash);

   let mut bytes = [0u8; 20];
   bytes.copy_from_slice(&ripemd160_hash);
   bytes
}

/// Encode the address of a public key, the key is hashed in its compressed form
pub fn address_from_key(version: u8, key: &VerifyingKey) -> String {
   let point = key.to_encoded_point(true);

   let mut payload = Vec::with_capacity(PAYLOAD_LEN);
   payload.push(version);
   payload.extend_from_slice(&hash160(point.as_bytes()));

   bs58::encode(payload).with_check().into_string()
}

/// Decode an address and return its key hash
pub fn decode_address(version: u8, address: &str) -> Result<[u8; 20], KeyError> {
   let payload = bs58::decode(address).with_check(None).into_vec()?;

   if payload.len() != PAYLOAD_LEN {
      return Err(KeyError::InvalidLength(payload.len()));
   }

   if payload[0] != version {
      return Err(KeyError::WrongVersion {
         expected: version,
         found: payload[0],
      });
   }

   let mut hash = [0u8; 20];
   hash.copy_from_slice(&payload[1..]);
   Ok(hash)
}

pub fn validate_address(version: u8, address: &str) -> bool {
   decode_address(version, address).is_ok()
}

/// A secp256k1 key and the address derived from it
///
/// The secret is zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
   secret: SigningKey,
   address: String,
}

impl KeyPair {
   /// Create a new key from the OS random number generator
   pub fn generate(version: u8) -> Self {
      let secret = SigningKey::random(&mut OsRng);
      let address = address_from_key(version, secret.verifying_key());
      Self { secret, address }
   }

   pub fn address(&self) -> &str {
      &self.address
   }

   pub fn public_key(&self) -> &VerifyingKey {
      self.secret.verifying_key()
   }
}

impl fmt::Debug for KeyPair {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("KeyPair").field("address", &self.address).finish_non_exhaustive()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn hash160_of_empty_input() {
      assert_eq!(
         hex::encode(hash160(&[])),
         "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
      );
   }

   #[test]
   fn known_address() {
      let pubkey =
         hex::decode("0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352")
            .unwrap();
      let key = VerifyingKey::from_sec1_bytes(&pubkey).unwrap();

      assert_eq!(
         hex::encode(hash160(&pubkey)),
         "f54a5851e9372b87810a8e60cdd2e7cfd80b6e31"
      );
      assert_eq!(
         address_from_key(0, &key),
         "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs"
      );
   }

   #[test]
   fn generated_addresses_validate() {
      let key = KeyPair::generate(DEFAULT_VERSION);
      assert!(validate_address(DEFAULT_VERSION, key.address()));

      let hash = decode_address(DEFAULT_VERSION, key.address()).unwrap();
      let expected = hash160(key.public_key().to_encoded_point(true).as_bytes());
      assert_eq!(hash, expected);

      let other = KeyPair::generate(DEFAULT_VERSION);
      assert_ne!(key.address(), other.address());
   }

   #[test]
   fn wrong_version_is_rejected() {
      let key = KeyPair::generate(DEFAULT_VERSION);
      let err = decode_address(0, key.address()).unwrap_err();
      assert!(matches!(
         err,
         KeyError::WrongVersion {
            expected: 0,
            found: DEFAULT_VERSION
         }
      ));
   }

   #[test]
   fn tampered_address_is_rejected() {
      let key = KeyPair::generate(DEFAULT_VERSION);
      let mut chars: Vec<char> = key.address().chars().collect();
      let last = chars.len() - 1;
      chars[last] = if chars[last] == 'z' { 'y' } else { 'z' };
      let tampered: String = chars.into_iter().collect();

      assert!(!validate_address(DEFAULT_VERSION, &tampered));
      assert!(!validate_address(DEFAULT_VERSION, ""));
      assert!(!validate_address(DEFAULT_VERSION, "not base58 0OIl"));
   }

   #[test]
   fn short_payload_is_rejected() {
      let short = bs58::encode([DEFAULT_VERSION, 1, 2, 3]).with_check().into_string();
      assert!(matches!(
         decode_address(DEFAULT_VERSION, &short),
         Err(KeyError::InvalidLength(4))
      ));
   }

   #[test]
   fn debug_does_not_leak_the_secret() {
      let key = KeyPair::generate(DEFAULT_VERSION);
      let debug = format!("{:?}", key);
      assert!(debug.contains(key.address()));
      assert!(debug.starts_with("KeyPair"));
   }
}
