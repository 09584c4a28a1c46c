pub mod app;
pub mod selection;
pub mod ui;

use addrbook_model::{AddressBookNotification, AddressKind, AddressTableModel};
use eframe::egui::{Context, Ui};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::core::WalletCtx;
use selection::Selection;

pub struct GUI {
   pub egui_ctx: Context,

   pub wallet: WalletCtx,

   pub model: AddressTableModel<WalletCtx>,

   /// Address book changes from the wallet, applied to the model every frame
   pub notifications: UnboundedReceiver<AddressBookNotification>,

   pub selection: Selection,

   pub address_book: ui::AddressBookUi,

   pub add_address: ui::AddAddress,

   pub unlock_window: ui::UnlockWindow,

   pub msg_window: ui::MsgWindow,
}

impl GUI {
   pub fn new(wallet: WalletCtx, egui_ctx: Context, tab: AddressKind) -> Self {
      // subscribe before the model takes its snapshot so nothing is missed
      let notifications = wallet.subscribe();
      let selection = Selection::new();
      let model = AddressTableModel::new(wallet.clone()).with_observer(selection.clone());

      Self {
         egui_ctx,
         wallet,
         model,
         notifications,
         selection,
         address_book: ui::AddressBookUi::new(tab),
         add_address: ui::AddAddress::new(),
         unlock_window: ui::UnlockWindow::new(),
         msg_window: ui::MsgWindow::new(),
      }
   }

   /// Apply the pending wallet notifications to the model
   ///
   /// Returns the number of notifications applied
   pub fn process_notifications(&mut self) -> usize {
      let mut applied = 0;
      while let Ok(notification) = self.notifications.try_recv() {
         self.model.apply_notification(&notification);
         applied += 1;
      }

      if applied > 0 {
         // an in-place editor may now point at a different row
         self.address_book.editor = None;
      }

      let found = self
         .address_book
         .pending_select
         .as_deref()
         .and_then(|address| self.model.lookup_address(address));

      if let Some(row) = found {
         self.selection.set(Some(row));
         self.address_book.pending_select = None;
      }

      applied
   }

   pub fn show_central_panel(&mut self, ui: &mut Ui) {
      ui::address_book::show(ui, self);
   }

   pub fn show_windows(&mut self, ui: &mut Ui) {
      match self.add_address.show(&mut self.model, ui) {
         Some(ui::AddOutcome::Added(address)) => {
            self.address_book.pending_select = Some(address);
         }
         Some(ui::AddOutcome::NeedsUnlock) => {
            self.unlock_window.open();
         }
         Some(ui::AddOutcome::Failed(e)) => {
            self.open_msg_window("Could not add address", e.to_string());
         }
         None => {}
      }

      if let Some(err) = self.unlock_window.show(&self.wallet, ui) {
         self.open_msg_window("Unlock failed", err);
      }

      self.msg_window.show(ui);
   }

   pub fn open_msg_window(&mut self, title: impl Into<String>, msg: impl Into<String>) {
      self.msg_window.open(title, msg);
   }

   pub fn request_repaint(&self) {
      self.egui_ctx.request_repaint();
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::core::AppConfig;
   use addrbook_keys::{DEFAULT_VERSION, KeyPair};

   #[test]
   fn new_address_gets_selected() {
      let wallet = WalletCtx::new(&AppConfig::default()).unwrap();
      let mut gui = GUI::new(wallet, Context::default(), AddressKind::Sending);

      let address = KeyPair::generate(DEFAULT_VERSION).address().to_string();
      gui.add_address.open(AddressKind::Sending);
      gui.add_address.address = address.clone();
      let outcome = gui.add_address.submit(&mut gui.model);
      assert_eq!(outcome, ui::AddOutcome::Added(address.clone()));
      gui.address_book.pending_select = Some(address.clone());

      assert_eq!(gui.process_notifications(), 1);
      assert_eq!(gui.selection.get(), gui.model.lookup_address(&address));
      assert!(gui.address_book.pending_select.is_none());
   }

   #[test]
   fn selection_follows_inserted_rows() {
      let wallet = WalletCtx::new(&AppConfig::default()).unwrap();
      let mut gui = GUI::new(wallet, Context::default(), AddressKind::Sending);

      let mut addresses: Vec<String> = (0..2)
         .map(|_| KeyPair::generate(DEFAULT_VERSION).address().to_string())
         .collect();
      addresses.sort();
      let (low, high) = (addresses[0].clone(), addresses[1].clone());

      gui.model.add_row(AddressKind::Sending, "", &high).unwrap();
      gui.process_notifications();
      gui.selection.set(gui.model.lookup_address(&high));
      assert_eq!(gui.selection.get(), Some(0));

      gui.model.add_row(AddressKind::Sending, "", &low).unwrap();
      gui.process_notifications();
      assert_eq!(gui.selection.get(), Some(1));
      assert_eq!(gui.model.entry(1).unwrap().address, high);
   }
}
