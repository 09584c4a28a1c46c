use std::borrow::Cow;

use crate::error::{EditError, EditStatus};
use crate::kind::{AddressKind, PURPOSE_RECEIVE, PURPOSE_SEND};
use crate::wallet::{AddressBookNotification, AddressBookStore, ChangeKind, Wallet};

/// Shown in place of an empty label
pub const NO_LABEL: &str = "(no label)";

/// A cached row of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
   pub kind: AddressKind,
   pub label: String,
   pub address: String,
}

impl AddressEntry {
   pub fn new(kind: AddressKind, label: impl Into<String>, address: impl Into<String>) -> Self {
      Self {
         kind,
         label: label.into(),
         address: address.into(),
      }
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
   Label,
   Address,
}

impl Column {
   pub const COUNT: usize = 2;

   pub const ALL: [Column; Column::COUNT] = [Column::Label, Column::Address];

   pub fn from_index(index: usize) -> Option<Self> {
      Self::ALL.get(index).copied()
   }

   pub fn index(&self) -> usize {
      match self {
         Self::Label => 0,
         Self::Address => 1,
      }
   }

   pub fn title(&self) -> &'static str {
      match self {
         Self::Label => "Label",
         Self::Address => "Address",
      }
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
   /// What the user sees, empty labels are replaced with [NO_LABEL]
   Display,
   /// The raw value to put in an editor
   Edit,
   /// The [crate::SEND] or [crate::RECEIVE] tag of the row
   Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue<'a> {
   Text(Cow<'a, str>),
   Kind(&'static str),
}

impl CellValue<'_> {
   pub fn as_str(&self) -> &str {
      match self {
         Self::Text(text) => text.as_ref(),
         Self::Kind(tag) => *tag,
      }
   }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
   pub selectable: bool,
   pub enabled: bool,
   pub editable: bool,
}

/// Receives the row changes of an [AddressTableModel]
///
/// Row ranges are inclusive. Called after the cache has been updated, never while the wallet lock is held.
pub trait TableObserver {
   fn rows_inserted(&mut self, first: usize, last: usize);

   fn rows_removed(&mut self, first: usize, last: usize);

   fn data_changed(&mut self, top_row: usize, left_column: usize, bottom_row: usize, right_column: usize);

   /// The whole table was rebuilt
   fn model_reset(&mut self) {}
}

/// Table model over the address book of a [Wallet]
///
/// Keeps a copy of the address book sorted by address, which is patched by
/// [AddressTableModel::apply_change] as the wallet reports changes.
///
/// Edits made through the model go to the wallet, the cache only changes once the
/// wallet notification for them comes back.
pub struct AddressTableModel<W: Wallet> {
   wallet: W,
   cache: Vec<AddressEntry>,
   observer: Option<Box<dyn TableObserver>>,
   edit_status: EditStatus,
}

impl<W: Wallet> AddressTableModel<W> {
   pub fn new(wallet: W) -> Self {
      let mut model = Self {
         wallet,
         cache: Vec::new(),
         observer: None,
         edit_status: EditStatus::Ok,
      };
      model.load();
      model
   }

   pub fn with_observer(mut self, observer: impl TableObserver + 'static) -> Self {
      self.observer = Some(Box::new(observer));
      self
   }

   pub fn set_observer(&mut self, observer: Box<dyn TableObserver>) {
      self.observer = Some(observer);
   }

   pub fn wallet(&self) -> &W {
      &self.wallet
   }

   /// Rebuild the whole table from the wallet
   pub fn refresh(&mut self) {
      self.load();
      if let Some(observer) = self.observer.as_mut() {
         observer.model_reset();
      }
   }

   fn load(&mut self) {
      let mut cache = self.wallet.read(|book| {
         book
            .records()
            .into_iter()
            .map(|record| {
               let kind = AddressKind::classify(&record.purpose, book.is_mine(&record.address));
               AddressEntry::new(kind, record.label, record.address)
            })
            .collect::<Vec<_>>()
      });

      // the bound lookups in apply_change depend on this order
      cache.sort_by(|a, b| a.address.cmp(&b.address));
      cache.dedup_by(|a, b| a.address == b.address);

      tracing::debug!(rows = cache.len(), "Address table loaded");
      self.cache = cache;
   }

   pub fn row_count(&self) -> usize {
      self.cache.len()
   }

   pub fn column_count(&self) -> usize {
      Column::COUNT
   }

   pub fn entry(&self, row: usize) -> Option<&AddressEntry> {
      self.cache.get(row)
   }

   pub fn entries(&self) -> &[AddressEntry] {
      &self.cache
   }

   pub fn data(&self, row: usize, column: Column, role: Role) -> Option<CellValue<'_>> {
      match role {
         Role::Display => self.display(row, column).map(CellValue::Text),
         Role::Edit => self.edit_value(row, column).map(|v| CellValue::Text(Cow::Borrowed(v))),
         Role::Kind => self.kind_tag(row).map(CellValue::Kind),
      }
   }

   /// Same as [AddressTableModel::data] for callers that address columns by index
   pub fn data_at(&self, row: usize, column: usize, role: Role) -> Option<CellValue<'_>> {
      self.data(row, Column::from_index(column)?, role)
   }

   pub fn display(&self, row: usize, column: Column) -> Option<Cow<'_, str>> {
      let entry = self.cache.get(row)?;
      let value = match column {
         Column::Label if entry.label.is_empty() => Cow::Borrowed(NO_LABEL),
         Column::Label => Cow::Borrowed(entry.label.as_str()),
         Column::Address => Cow::Borrowed(entry.address.as_str()),
      };
      Some(value)
   }

   pub fn edit_value(&self, row: usize, column: Column) -> Option<&str> {
      let entry = self.cache.get(row)?;
      match column {
         Column::Label => Some(entry.label.as_str()),
         Column::Address => Some(entry.address.as_str()),
      }
   }

   pub fn kind_tag(&self, row: usize) -> Option<&'static str> {
      self.cache.get(row)?.kind.tag()
   }

   /// Sending addresses can be edited in both columns, receiving addresses only their label
   pub fn flags(&self, row: usize, column: Column) -> Option<CellFlags> {
      let entry = self.cache.get(row)?;
      let editable = match entry.kind {
         AddressKind::Sending => true,
         AddressKind::Receiving => column == Column::Label,
         AddressKind::Hidden => false,
      };

      Some(CellFlags {
         selectable: true,
         enabled: true,
         editable,
      })
   }

   pub fn header(&self, section: usize) -> Option<&'static str> {
      Column::from_index(section).map(|column| column.title())
   }

   /// Patch the table with a change reported by the wallet
   ///
   /// Notifications that do not match the table (an add for an address we already have,
   /// an update or removal for one we don't) are logged and ignored.
   pub fn apply_change(
      &mut self,
      address: &str,
      label: &str,
      is_mine: bool,
      purpose: &str,
      change: ChangeKind,
   ) {
      let lower = self.cache.partition_point(|e| e.address.as_str() < address);
      let upper = self.cache.partition_point(|e| e.address.as_str() <= address);
      let in_model = lower != upper;
      let kind = AddressKind::classify(purpose, is_mine);

      match change {
         ChangeKind::Added => {
            if in_model {
               tracing::warn!(address, "Got an Added notification, but entry is already in the table");
               return;
            }
            self.cache.insert(lower, AddressEntry::new(kind, label, address));
            tracing::debug!(row = lower, address, "Row inserted");
            if let Some(observer) = self.observer.as_mut() {
               observer.rows_inserted(lower, lower);
            }
         }
         ChangeKind::Updated => {
            if !in_model {
               tracing::warn!(address, "Got an Updated notification, but entry is not in the table");
               return;
            }
            let entry = &mut self.cache[lower];
            entry.kind = kind;
            entry.label = label.to_string();
            tracing::debug!(row = lower, address, "Row updated");
            if let Some(observer) = self.observer.as_mut() {
               observer.data_changed(lower, 0, lower, Column::COUNT - 1);
            }
         }
         ChangeKind::Removed => {
            if !in_model {
               tracing::warn!(address, "Got a Removed notification, but entry is not in the table");
               return;
            }
            self.cache.drain(lower..upper);
            tracing::debug!(first = lower, last = upper - 1, address, "Rows removed");
            if let Some(observer) = self.observer.as_mut() {
               observer.rows_removed(lower, upper - 1);
            }
         }
      }
   }

   pub fn apply_notification(&mut self, notification: &AddressBookNotification) {
      self.apply_change(
         &notification.address,
         &notification.label,
         notification.is_mine,
         &notification.purpose,
         notification.change,
      );
   }

   /// Status of the last [AddressTableModel::add_row] or [AddressTableModel::set_data]
   pub fn edit_status(&self) -> EditStatus {
      self.edit_status
   }

   /// Add a new address to the wallet's address book
   ///
   /// For [AddressKind::Sending] the given address is validated and stored,
   /// for [AddressKind::Receiving] a new address is taken from the key pool and `address` is ignored.
   ///
   /// Returns the address that was stored.
   pub fn add_row(
      &mut self,
      kind: AddressKind,
      label: &str,
      address: &str,
   ) -> Result<String, EditError> {
      let result = self.try_add_row(kind, label, address);
      self.edit_status = EditStatus::from(&result);
      result
   }

   fn try_add_row(
      &mut self,
      kind: AddressKind,
      label: &str,
      address: &str,
   ) -> Result<String, EditError> {
      match kind {
         AddressKind::Sending => {
            if !self.wallet.validate_address(address) {
               return Err(EditError::InvalidAddress);
            }

            self.wallet.write(|book| {
               if book.contains(address) {
                  return Err(EditError::DuplicateAddress);
               }
               book.set_address_book(address, label, PURPOSE_SEND);
               Ok(())
            })?;

            Ok(address.to_string())
         }
         AddressKind::Receiving => {
            let address = self.new_receiving_address()?;
            self.wallet.write(|book| book.set_address_book(&address, label, PURPOSE_RECEIVE));
            Ok(address)
         }
         AddressKind::Hidden => Err(EditError::UnsupportedKind),
      }
   }

   fn new_receiving_address(&self) -> Result<String, EditError> {
      if let Some(address) = self.wallet.write(|book| book.next_key_from_pool()) {
         return Ok(address);
      }

      if !self.wallet.request_unlock() {
         tracing::info!("Key pool is empty and the wallet is locked");
         return Err(EditError::WalletUnlockFailure);
      }

      self
         .wallet
         .write(|book| book.next_key_from_pool())
         .ok_or(EditError::KeyGenerationFailure)
   }

   /// Remove a sending address from the wallet's address book
   ///
   /// Only one row can be removed at a time and receiving addresses are never removed.
   pub fn remove_rows(&mut self, row: usize, count: usize) -> bool {
      let Some(entry) = self.cache.get(row) else {
         return false;
      };

      if count != 1 || entry.kind.is_receiving() {
         return false;
      }

      let address = entry.address.clone();
      self.wallet.write(|book| book.delete_address_book(&address));
      true
   }

   /// Edit a cell, see [AddressTableModel::flags] for what is editable
   ///
   /// Changing the address of a sending entry replaces the entry, keeping its label.
   pub fn set_data(&mut self, row: usize, column: Column, value: &str) -> Result<(), EditError> {
      let result = self.try_set_data(row, column, value);
      self.edit_status = EditStatus::from(&result);
      result
   }

   fn try_set_data(&mut self, row: usize, column: Column, value: &str) -> Result<(), EditError> {
      if !self.flags(row, column).is_some_and(|flags| flags.editable) {
         return Err(EditError::NotEditable);
      }

      let entry = self.cache[row].clone();
      let purpose = entry.kind.purpose().ok_or(EditError::NotEditable)?;

      match column {
         Column::Label => {
            if entry.label == value {
               return Err(EditError::NoChanges);
            }
            self.wallet.write(|book| book.set_address_book(&entry.address, value, purpose));
         }
         Column::Address => {
            if entry.address == value {
               return Err(EditError::NoChanges);
            }

            if !self.wallet.validate_address(value) {
               return Err(EditError::InvalidAddress);
            }

            self.wallet.write(|book| {
               if book.contains(value) {
                  return Err(EditError::DuplicateAddress);
               }
               book.delete_address_book(&entry.address);
               book.set_address_book(value, &entry.label, PURPOSE_SEND);
               Ok(())
            })?;
         }
      }

      Ok(())
   }

   /// Look up the label for an address in the wallet, empty if there is none
   pub fn label_for_address(&self, address: &str) -> String {
      self.wallet.read(|book| book.label(address)).unwrap_or_default()
   }

   /// Row of the entry with exactly this address
   pub fn lookup_address(&self, address: &str) -> Option<usize> {
      self.cache.binary_search_by(|e| e.address.as_str().cmp(address)).ok()
   }
}
