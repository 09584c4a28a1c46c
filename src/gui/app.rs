use std::time::Duration;

use addrbook_model::AddressKind;
use eframe::{
   CreationContext,
   egui::{self, Frame, Margin},
};

use crate::core::WalletCtx;
use crate::gui::GUI;

pub struct AddressBookApp {
   pub gui: GUI,
}

impl AddressBookApp {
   pub fn new(cc: &CreationContext, wallet: WalletCtx, tab: AddressKind) -> Self {
      let gui = GUI::new(wallet, cc.egui_ctx.clone(), tab);
      Self { gui }
   }
}

impl eframe::App for AddressBookApp {
   fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
      if self.gui.process_notifications() > 0 {
         self.gui.request_repaint();
      }

      let frame = Frame::new()
         .fill(ctx.style().visuals.panel_fill)
         .inner_margin(Margin::same(16));

      egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
         self.gui.show_central_panel(ui);
         self.gui.show_windows(ui);
      });

      // the key pool is refilled in the background
      ctx.request_repaint_after(Duration::from_secs(1));
   }
}
