use egui::{Align2, Frame, Key, Order, Ui, Window, vec2};

use super::{button, heading, rich_text, text_edit_single};
use crate::core::WalletCtx;

pub struct MsgWindow {
   pub open: bool,
   pub title: String,
   pub message: String,
}

impl MsgWindow {
   pub fn new() -> Self {
      Self {
         open: false,
         title: String::new(),
         message: String::new(),
      }
   }

   /// Open the window with this title and message
   pub fn open(&mut self, title: impl Into<String>, msg: impl Into<String>) {
      self.open = true;
      self.title = title.into();
      self.message = msg.into();
   }

   pub fn reset(&mut self) {
      self.open = false;
      self.title.clear();
      self.message.clear();
   }

   pub fn show(&mut self, ui: &mut Ui) {
      if !self.open {
         return;
      }

      let mut close = false;
      Window::new(heading(self.title.clone()))
         .resizable(false)
         .order(Order::Foreground)
         .movable(true)
         .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
         .collapsible(false)
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.vertical_centered(|ui| {
               ui.set_min_size(vec2(300.0, 100.0));
               ui.spacing_mut().item_spacing.y = 20.0;
               ui.spacing_mut().button_padding = vec2(10.0, 8.0);

               ui.label(rich_text(&self.message));

               if ui.add(button(rich_text("Ok"))).clicked() {
                  close = true;
               }
            });
         });

      if close {
         self.reset();
      }
   }
}

/// Asks for the wallet passphrase
pub struct UnlockWindow {
   pub open: bool,
   pub passphrase: String,
   pub size: (f32, f32),
}

impl UnlockWindow {
   pub fn new() -> Self {
      Self {
         open: false,
         passphrase: String::new(),
         size: (350.0, 150.0),
      }
   }

   pub fn open(&mut self) {
      self.open = true;
   }

   pub fn reset(&mut self) {
      self.open = false;
      self.passphrase.clear();
   }

   /// Returns the error message if the passphrase was rejected
   pub fn show(&mut self, wallet: &WalletCtx, ui: &mut Ui) -> Option<String> {
      if !self.open {
         return None;
      }

      let mut open = self.open;
      let mut submit = false;

      Window::new(heading("Unlock wallet"))
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

               ui.label(rich_text("Enter the wallet passphrase"));
               let res = ui.add(text_edit_single(&mut self.passphrase).password(true));
               let enter = res.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

               if ui.add(button(rich_text("Unlock"))).clicked() || enter {
                  submit = true;
               }
            });
         });

      if !open {
         self.reset();
         return None;
      }

      if !submit {
         return None;
      }

      let result = wallet.unlock(&self.passphrase);
      self.passphrase.clear();
      match result {
         Ok(()) => {
            self.open = false;
            wallet.spawn_top_up();
            None
         }
         Err(e) => {
            tracing::warn!("Unlock failed: {}", e);
            Some(e.to_string())
         }
      }
   }
}
