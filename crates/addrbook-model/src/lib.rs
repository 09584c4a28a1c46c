//! A table model over a wallet address book.
//!
//! [AddressTableModel] keeps a sorted copy of the address book for display,
//! patches it from the wallet's change notifications and forwards user edits back to the wallet.

pub mod error;
pub mod kind;
pub mod model;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use error::{EditError, EditStatus};
pub use kind::{AddressKind, PURPOSE_RECEIVE, PURPOSE_SEND, RECEIVE, SEND};
pub use model::{
   AddressEntry, AddressTableModel, CellFlags, CellValue, Column, NO_LABEL, Role, TableObserver,
};
pub use wallet::{AddressBookNotification, AddressBookStore, BookRecord, ChangeKind, Wallet};
