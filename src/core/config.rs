use addrbook_keys::DEFAULT_VERSION;
use addrbook_model::AddressKind;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::utils::data_dir;

pub const CONFIG_FILE: &str = "config.json";

pub fn config_dir() -> Result<PathBuf, anyhow::Error> {
   let dir = data_dir()?.join(CONFIG_FILE);
   Ok(dir)
}

/// Application settings, stored as JSON in the data directory
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
   /// Version byte of the addresses we generate and accept
   pub address_version: u8,

   /// How many unused keys the wallet keeps around
   pub keypool_size: usize,

   pub log_dir: PathBuf,

   /// Start with the wallet locked, new receiving addresses then come only from the key pool
   pub start_locked: bool,

   /// Hex encoded SHA-256 of the unlock passphrase
   pub passphrase_sha256: Option<String>,

   /// The tab shown on startup
   pub default_tab: AddressKind,

   pub window_size: (f32, f32),
}

impl Default for AppConfig {
   fn default() -> Self {
      Self {
         address_version: DEFAULT_VERSION,
         keypool_size: 10,
         log_dir: PathBuf::from("./logs"),
         start_locked: false,
         passphrase_sha256: None,
         default_tab: AddressKind::Receiving,
         window_size: (900.0, 600.0),
      }
   }
}

impl AppConfig {
   pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
      let data = std::fs::read_to_string(path)?;
      let config: Self = serde_json::from_str(&data)?;
      config.validate()?;
      Ok(config)
   }

   pub fn save_to(&self, path: &Path) -> Result<(), anyhow::Error> {
      let data = serde_json::to_string_pretty(self)?;
      std::fs::write(path, data)?;
      Ok(())
   }

   /// Load the config from the data directory, writing the defaults there if there is none yet
   pub fn load_or_default() -> Result<Self, anyhow::Error> {
      let path = config_dir()?;
      if path.exists() {
         return Self::load_from(&path);
      }

      let config = Self::default();
      config.save_to(&path)?;
      Ok(config)
   }

   pub fn validate(&self) -> Result<(), anyhow::Error> {
      if self.default_tab.is_hidden() {
         return Err(anyhow!("default_tab must be Sending or Receiving"));
      }

      self.passphrase_hash()?;
      Ok(())
   }

   pub fn passphrase_hash(&self) -> Result<Option<[u8; 32]>, anyhow::Error> {
      let Some(hex_str) = self.passphrase_sha256.as_ref() else {
         return Ok(None);
      };

      let bytes = hex::decode(hex_str)?;
      let hash: [u8; 32] = bytes
         .try_into()
         .map_err(|_| anyhow!("passphrase_sha256 must be 32 bytes"))?;
      Ok(Some(hash))
   }
}
