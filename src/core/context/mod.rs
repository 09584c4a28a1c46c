use addrbook_keys::KeyPair;
use addrbook_model::{
   AddressBookNotification, AddressBookStore, BookRecord, ChangeKind, PURPOSE_RECEIVE, Wallet,
};
use anyhow::anyhow;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::config::AppConfig;
use super::utils::RT;

pub mod book;
pub mod key_pool;

pub use book::{AddressBook, AddressBookData};
pub use key_pool::KeyPool;

/// Label of the receiving address created for an empty wallet
pub const DEFAULT_LABEL: &str = "Default";

pub struct WalletContext {
   version: u8,
   book: AddressBook,

   /// Keys we own
   ///
   /// Key: address
   keys: BTreeMap<String, KeyPair>,

   key_pool: KeyPool,
   locked: bool,
   passphrase_hash: Option<[u8; 32]>,

   /// Raised while the lock is held, delivered once it is released
   pending: Vec<AddressBookNotification>,
}

impl WalletContext {
   pub fn new(config: &AppConfig) -> Result<Self, anyhow::Error> {
      let mut key_pool = KeyPool::new(config.keypool_size);
      if !config.start_locked {
         key_pool.top_up(config.address_version);
      }

      Ok(Self {
         version: config.address_version,
         book: AddressBook::new(),
         keys: BTreeMap::new(),
         key_pool,
         locked: config.start_locked,
         passphrase_hash: config.passphrase_hash()?,
         pending: Vec::new(),
      })
   }

   pub fn version(&self) -> u8 {
      self.version
   }

   pub fn book(&self) -> &AddressBook {
      &self.book
   }

   pub fn key_pool(&self) -> &KeyPool {
      &self.key_pool
   }

   pub fn is_locked(&self) -> bool {
      self.locked
   }

   fn queue(&mut self, record: BookRecord, change: ChangeKind) {
      let is_mine = self.keys.contains_key(&record.address);
      self.pending.push(AddressBookNotification::new(record, is_mine, change));
   }
}

impl AddressBookStore for WalletContext {
   fn records(&self) -> Vec<BookRecord> {
      self.book.records()
   }

   fn is_mine(&self, address: &str) -> bool {
      self.keys.contains_key(address)
   }

   fn contains(&self, address: &str) -> bool {
      self.book.contains(address)
   }

   fn label(&self, address: &str) -> Option<String> {
      self.book.get(address).map(|data| data.label.clone())
   }

   fn set_address_book(&mut self, address: &str, label: &str, purpose: &str) {
      let change = if self.book.insert(address, label, purpose) {
         ChangeKind::Added
      } else {
         ChangeKind::Updated
      };
      tracing::info!(address, purpose, ?change, "Address book entry saved");
      self.queue(BookRecord::new(address, label, purpose), change);
   }

   fn delete_address_book(&mut self, address: &str) -> bool {
      let Some(data) = self.book.remove(address) else {
         return false;
      };
      tracing::info!(address, "Address book entry deleted");
      self.queue(
         BookRecord::new(address, data.label, data.purpose),
         ChangeKind::Removed,
      );
      true
   }

   fn next_key_from_pool(&mut self) -> Option<String> {
      // an unlocked wallet can always make a new key
      if self.key_pool.is_empty() && !self.locked {
         self.key_pool.extend([KeyPair::generate(self.version)]);
      }

      let key = self.key_pool.reserve()?;
      let address = key.address().to_string();
      self.keys.insert(address.clone(), key);

      tracing::info!(
         address,
         remaining = self.key_pool.len(),
         "Reserved key from pool"
      );
      Some(address)
   }
}

/// Thread-safe handle to the [WalletContext]
///
/// Address book changes are broadcast to every [WalletCtx::subscribe]r after the lock is released.
#[derive(Clone)]
pub struct WalletCtx {
   inner: Arc<RwLock<WalletContext>>,
   subscribers: Arc<RwLock<Vec<UnboundedSender<AddressBookNotification>>>>,
}

impl WalletCtx {
   pub fn new(config: &AppConfig) -> Result<Self, anyhow::Error> {
      let ctx = WalletContext::new(config)?;
      Ok(Self::from_context(ctx))
   }

   pub fn from_context(ctx: WalletContext) -> Self {
      Self {
         inner: Arc::new(RwLock::new(ctx)),
         subscribers: Arc::new(RwLock::new(Vec::new())),
      }
   }

   /// Receive all future address book changes
   pub fn subscribe(&self) -> UnboundedReceiver<AddressBookNotification> {
      let (tx, rx) = unbounded_channel();
      self.subscribers.write().unwrap().push(tx);
      rx
   }

   fn dispatch(&self, notifications: Vec<AddressBookNotification>) {
      if notifications.is_empty() {
         return;
      }

      let mut subscribers = self.subscribers.write().unwrap();
      for notification in notifications {
         tracing::debug!(
            address = %notification.address,
            change = ?notification.change,
            "Dispatching address book change"
         );
         // drop the subscribers that went away
         subscribers.retain(|tx| tx.send(notification.clone()).is_ok());
      }
   }

   pub fn is_locked(&self) -> bool {
      self.read(|ctx| ctx.locked)
   }

   pub fn lock(&self) {
      self.write(|ctx| ctx.locked = true);
      tracing::info!("Wallet locked");
   }

   /// Unlock the wallet
   ///
   /// A wallet without a passphrase accepts any input.
   pub fn unlock(&self, passphrase: &str) -> Result<(), anyhow::Error> {
      let mut hash = [0u8; 32];
      hash.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));

      self.write(|ctx| {
         if let Some(expected) = ctx.passphrase_hash.as_ref() {
            if expected != &hash {
               return Err(anyhow!("The passphrase entered for the wallet is incorrect"));
            }
         }
         ctx.locked = false;
         Ok(())
      })?;

      tracing::info!("Wallet unlocked");
      Ok(())
   }

   pub fn key_pool_size(&self) -> usize {
      self.read(|ctx| ctx.key_pool.len())
   }

   /// Refill the key pool up to its target size
   ///
   /// Keys are generated without holding the lock. Nothing happens while the wallet is locked.
   ///
   /// Returns the number of keys added
   pub fn top_up_key_pool(&self) -> usize {
      let (version, missing) = self.read(|ctx| {
         let missing = if ctx.locked {
            0
         } else {
            ctx.key_pool.missing()
         };
         (ctx.version, missing)
      });

      if missing == 0 {
         return 0;
      }

      let keys: Vec<KeyPair> = (0..missing).map(|_| KeyPair::generate(version)).collect();

      let added = self.write(|ctx| {
         if ctx.locked {
            return 0;
         }
         // someone else may have refilled it in the meantime
         let needed = ctx.key_pool.missing().min(keys.len());
         ctx.key_pool.extend(keys.into_iter().take(needed));
         needed
      });

      if added > 0 {
         tracing::info!(added, "Key pool topped up");
      }
      added
   }

   /// [WalletCtx::top_up_key_pool] on the blocking thread pool
   pub fn spawn_top_up(&self) {
      let ctx = self.clone();
      RT.spawn_blocking(move || {
         ctx.top_up_key_pool();
      });
   }

   /// Give an empty wallet its first receiving address
   ///
   /// Returns the new address, `None` if the wallet already has one or no key is available
   pub fn ensure_default_address(&self) -> Option<String> {
      self.write(|ctx| {
         let has_receiving = ctx
            .book
            .records()
            .iter()
            .any(|r| r.purpose == PURPOSE_RECEIVE);

         if has_receiving {
            return None;
         }

         let address = ctx.next_key_from_pool()?;
         ctx.set_address_book(&address, DEFAULT_LABEL, PURPOSE_RECEIVE);
         Some(address)
      })
   }
}

impl Wallet for WalletCtx {
   type Store = WalletContext;

   fn read<R>(&self, reader: impl FnOnce(&Self::Store) -> R) -> R {
      reader(&self.inner.read().unwrap())
   }

   fn write<R>(&self, writer: impl FnOnce(&mut Self::Store) -> R) -> R {
      let (result, pending) = {
         let mut ctx = self.inner.write().unwrap();
         let result = writer(&mut ctx);
         (result, std::mem::take(&mut ctx.pending))
      };
      self.dispatch(pending);
      result
   }

   fn validate_address(&self, address: &str) -> bool {
      let version = self.read(|ctx| ctx.version);
      addrbook_keys::validate_address(version, address)
   }

   fn request_unlock(&self) -> bool {
      let unlocked = !self.is_locked();
      if !unlocked {
         tracing::info!("Wallet is locked, it has to be unlocked first");
      }
      unlocked
   }
}
