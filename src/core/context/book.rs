use addrbook_model::BookRecord;
use std::collections::BTreeMap;

/// What the wallet stores per address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBookData {
   pub label: String,
   pub purpose: String,
}

/// The wallet's address book
///
/// Key: address
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
   entries: BTreeMap<String, AddressBookData>,
}

impl AddressBook {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn len(&self) -> usize {
      self.entries.len()
   }

   pub fn is_empty(&self) -> bool {
      self.entries.is_empty()
   }

   pub fn contains(&self, address: &str) -> bool {
      self.entries.contains_key(address)
   }

   pub fn get(&self, address: &str) -> Option<&AddressBookData> {
      self.entries.get(address)
   }

   /// Insert or overwrite an entry
   ///
   /// Returns true if the address was not in the book before
   pub fn insert(&mut self, address: &str, label: &str, purpose: &str) -> bool {
      let data = AddressBookData {
         label: label.to_string(),
         purpose: purpose.to_string(),
      };
      self.entries.insert(address.to_string(), data).is_none()
   }

   pub fn remove(&mut self, address: &str) -> Option<AddressBookData> {
      self.entries.remove(address)
   }

   pub fn records(&self) -> Vec<BookRecord> {
      self
         .entries
         .iter()
         .map(|(address, data)| BookRecord::new(address, &data.label, &data.purpose))
         .collect()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn insert_overwrite_remove() {
      let mut book = AddressBook::new();
      assert!(book.insert("DA", "alice", "send"));
      assert!(!book.insert("DA", "alice 2", "send"));
      assert_eq!(book.len(), 1);
      assert_eq!(book.get("DA").unwrap().label, "alice 2");

      let removed = book.remove("DA").unwrap();
      assert_eq!(removed.purpose, "send");
      assert!(book.is_empty());
      assert!(book.remove("DA").is_none());
   }
}
