use addrbook_model::{AddressKind, AddressTableModel, EditError};
use eframe::egui::{Align2, Frame, Order, Ui, Window, vec2};

use super::{button, heading, rich_text, text_edit_single};
use crate::core::WalletCtx;

/// What happened when the user pressed "Add"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
   Added(String),
   NeedsUnlock,
   Failed(EditError),
}

/// Window for a new sending address or a new receiving address from the key pool
pub struct AddAddress {
   pub open: bool,
   pub kind: AddressKind,
   pub label: String,
   pub address: String,
   pub size: (f32, f32),
}

impl AddAddress {
   pub fn new() -> Self {
      Self {
         open: false,
         kind: AddressKind::Sending,
         label: String::new(),
         address: String::new(),
         size: (450.0, 250.0),
      }
   }

   pub fn open(&mut self, kind: AddressKind) {
      self.open = true;
      self.kind = kind;
   }

   pub fn reset(&mut self) {
      self.open = false;
      self.label.clear();
      self.address.clear();
   }

   /// Store the entry through the model
   ///
   /// The window stays open on failure so the user can fix the input or retry after unlocking.
   pub fn submit(&mut self, model: &mut AddressTableModel<WalletCtx>) -> AddOutcome {
      let address = self.address.trim().to_string();
      match model.add_row(self.kind, self.label.trim(), &address) {
         Ok(address) => {
            tracing::info!(%address, kind = ?self.kind, "Address added");
            if self.kind.is_receiving() {
               model.wallet().spawn_top_up();
            }
            self.reset();
            AddOutcome::Added(address)
         }
         Err(EditError::WalletUnlockFailure) => AddOutcome::NeedsUnlock,
         Err(e) => AddOutcome::Failed(e),
      }
   }

   pub fn show(&mut self, model: &mut AddressTableModel<WalletCtx>, ui: &mut Ui) -> Option<AddOutcome> {
      if !self.open {
         return None;
      }

      let mut open = self.open;
      let mut submit = false;

      let title = if self.kind.is_receiving() {
         "New receiving address"
      } else {
         "New sending address"
      };

      Window::new(heading(title))
         .open(&mut open)
         .resizable(false)
         .collapsible(false)
         .order(Order::Foreground)
         .anchor(Align2::CENTER_CENTER, (0.0, 0.0))
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.set_width(self.size.0);
            ui.set_height(self.size.1);

            ui.vertical_centered(|ui| {
               ui.spacing_mut().item_spacing.y = 15.0;
               ui.spacing_mut().button_padding = vec2(10.0, 8.0);
               let text_edit_width = ui.available_width() * 0.8;

               ui.label(rich_text("Label:"));
               ui.add(text_edit_single(&mut self.label).desired_width(text_edit_width));

               // receiving addresses come from the key pool
               if self.kind.is_sending() {
                  ui.label(rich_text("Address:"));
                  ui.add(text_edit_single(&mut self.address).desired_width(text_edit_width));
               }

               if ui.add(button(rich_text("Add"))).clicked() {
                  submit = true;
               }
            });
         });

      if !open {
         self.reset();
         return None;
      }

      submit.then(|| self.submit(model))
   }
}
