/// An address book entry as the wallet stores it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
   pub address: String,
   pub label: String,
   pub purpose: String,
}

impl BookRecord {
   pub fn new(
      address: impl Into<String>,
      label: impl Into<String>,
      purpose: impl Into<String>,
   ) -> Self {
      Self {
         address: address.into(),
         label: label.into(),
         purpose: purpose.into(),
      }
   }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
   Added,
   Updated,
   Removed,
}

/// Emitted by the wallet whenever an address book entry changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBookNotification {
   pub address: String,
   pub label: String,
   pub is_mine: bool,
   pub purpose: String,
   pub change: ChangeKind,
}

impl AddressBookNotification {
   pub fn new(record: BookRecord, is_mine: bool, change: ChangeKind) -> Self {
      Self {
         address: record.address,
         label: record.label,
         is_mine,
         purpose: record.purpose,
         change,
      }
   }
}

/// The wallet's address book as seen while its lock is held
///
/// Only reachable through [Wallet::read] and [Wallet::write].
pub trait AddressBookStore {
   /// All the entries, in no particular order
   fn records(&self) -> Vec<BookRecord>;

   /// True if the wallet owns the key of this address
   fn is_mine(&self, address: &str) -> bool;

   fn contains(&self, address: &str) -> bool;

   fn label(&self, address: &str) -> Option<String>;

   /// Insert or overwrite an entry
   fn set_address_book(&mut self, address: &str, label: &str, purpose: &str);

   /// Returns false if there was no such entry
   fn delete_address_book(&mut self, address: &str) -> bool;

   /// Reserve a fresh key and return its address
   ///
   /// Returns `None` if the pool is exhausted and cannot be refilled (eg. the wallet is locked)
   fn next_key_from_pool(&mut self) -> Option<String>;
}

/// Thread-safe handle to a wallet
///
/// The lock is held for the duration of the closure only.
pub trait Wallet {
   type Store: AddressBookStore;

   /// Shared access to the address book
   fn read<R>(&self, reader: impl FnOnce(&Self::Store) -> R) -> R;

   /// Exclusive mutable access to the address book
   fn write<R>(&self, writer: impl FnOnce(&mut Self::Store) -> R) -> R;

   fn validate_address(&self, address: &str) -> bool;

   /// Returns true if the wallet is unlocked and keys can be generated
   fn request_unlock(&self) -> bool;
}
