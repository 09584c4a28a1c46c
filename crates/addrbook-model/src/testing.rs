//! In-memory wallet and observer used by the tests

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use crate::model::TableObserver;
use crate::wallet::{
   AddressBookNotification, AddressBookStore, BookRecord, ChangeKind, Wallet,
};

/// A 34 character address that passes [MockWallet::validate_address]
pub fn valid_address(c: char) -> String {
   format!("D{}", c.to_string().repeat(33))
}

#[derive(Default)]
pub struct MockBook {
   entries: BTreeMap<String, (String, String)>,
   mine: HashSet<String>,
   pool: VecDeque<String>,
   pending: Vec<AddressBookNotification>,
   unlock_allowed: bool,
   refill_on_unlock: Vec<String>,
}

impl MockBook {
   fn notify(&mut self, address: &str, label: &str, purpose: &str, change: ChangeKind) {
      let record = BookRecord::new(address, label, purpose);
      let is_mine = self.mine.contains(address);
      self.pending.push(AddressBookNotification::new(record, is_mine, change));
   }
}

impl AddressBookStore for MockBook {
   fn records(&self) -> Vec<BookRecord> {
      // reversed so the model has to sort
      self
         .entries
         .iter()
         .rev()
         .map(|(address, (label, purpose))| BookRecord::new(address, label, purpose))
         .collect()
   }

   fn is_mine(&self, address: &str) -> bool {
      self.mine.contains(address)
   }

   fn contains(&self, address: &str) -> bool {
      self.entries.contains_key(address)
   }

   fn label(&self, address: &str) -> Option<String> {
      self.entries.get(address).map(|(label, _)| label.clone())
   }

   fn set_address_book(&mut self, address: &str, label: &str, purpose: &str) {
      let previous = self.entries.insert(
         address.to_string(),
         (label.to_string(), purpose.to_string()),
      );
      let change = if previous.is_some() {
         ChangeKind::Updated
      } else {
         ChangeKind::Added
      };
      self.notify(address, label, purpose, change);
   }

   fn delete_address_book(&mut self, address: &str) -> bool {
      match self.entries.remove(address) {
         Some((label, purpose)) => {
            self.notify(address, &label, &purpose, ChangeKind::Removed);
            true
         }
         None => false,
      }
   }

   fn next_key_from_pool(&mut self) -> Option<String> {
      let address = self.pool.pop_front()?;
      self.mine.insert(address.clone());
      Some(address)
   }
}

#[derive(Clone)]
pub struct MockWallet(Arc<RwLock<MockBook>>);

impl MockWallet {
   pub fn new() -> Self {
      let book = MockBook {
         unlock_allowed: true,
         ..Default::default()
      };
      Self(Arc::new(RwLock::new(book)))
   }

   /// Insert an entry without emitting a notification
   pub fn seed(&self, address: &str, label: &str, purpose: &str, is_mine: bool) {
      let mut book = self.0.write().unwrap();
      book.entries.insert(
         address.to_string(),
         (label.to_string(), purpose.to_string()),
      );
      if is_mine {
         book.mine.insert(address.to_string());
      }
   }

   pub fn fill_pool(&self, addresses: &[&str]) {
      let mut book = self.0.write().unwrap();
      book.pool.extend(addresses.iter().map(|a| a.to_string()));
   }

   /// Whether [Wallet::request_unlock] succeeds and what it puts in the pool when it does
   pub fn set_unlock(&self, allowed: bool, refill: &[&str]) {
      let mut book = self.0.write().unwrap();
      book.unlock_allowed = allowed;
      book.refill_on_unlock = refill.iter().map(|a| a.to_string()).collect();
   }

   pub fn drain_notifications(&self) -> Vec<AddressBookNotification> {
      std::mem::take(&mut self.0.write().unwrap().pending)
   }

   pub fn len(&self) -> usize {
      self.0.read().unwrap().entries.len()
   }

   pub fn contains(&self, address: &str) -> bool {
      self.0.read().unwrap().entries.contains_key(address)
   }

   pub fn purpose_of(&self, address: &str) -> Option<String> {
      let book = self.0.read().unwrap();
      book.entries.get(address).map(|(_, purpose)| purpose.clone())
   }
}

impl Wallet for MockWallet {
   type Store = MockBook;

   fn read<R>(&self, reader: impl FnOnce(&Self::Store) -> R) -> R {
      reader(&self.0.read().unwrap())
   }

   fn write<R>(&self, writer: impl FnOnce(&mut Self::Store) -> R) -> R {
      writer(&mut self.0.write().unwrap())
   }

   fn validate_address(&self, address: &str) -> bool {
      address.len() == 34
         && address.starts_with('D')
         && address.chars().all(|c| c.is_ascii_alphanumeric())
   }

   fn request_unlock(&self) -> bool {
      let mut book = self.0.write().unwrap();
      if !book.unlock_allowed {
         return false;
      }
      let refill = std::mem::take(&mut book.refill_on_unlock);
      book.pool.extend(refill);
      true
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
   Inserted(usize, usize),
   Removed(usize, usize),
   Changed(usize, usize, usize, usize),
   Reset,
}

#[derive(Clone, Default)]
pub struct RecordingObserver(Arc<RwLock<Vec<RowEvent>>>);

impl RecordingObserver {
   pub fn events(&self) -> Vec<RowEvent> {
      self.0.read().unwrap().clone()
   }
}

impl TableObserver for RecordingObserver {
   fn rows_inserted(&mut self, first: usize, last: usize) {
      self.0.write().unwrap().push(RowEvent::Inserted(first, last));
   }

   fn rows_removed(&mut self, first: usize, last: usize) {
      self.0.write().unwrap().push(RowEvent::Removed(first, last));
   }

   fn data_changed(&mut self, top_row: usize, left_column: usize, bottom_row: usize, right_column: usize) {
      self
         .0
         .write()
         .unwrap()
         .push(RowEvent::Changed(top_row, left_column, bottom_row, right_column));
   }

   fn model_reset(&mut self) {
      self.0.write().unwrap().push(RowEvent::Reset);
   }
}
