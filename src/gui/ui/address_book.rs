use addrbook_model::{AddressKind, AddressTableModel, Column, EditError, Role};
use egui::{Align, Key, Layout, Sense, Ui, vec2};
use egui_extras::{Column as TableColumn, TableBuilder};

use super::{button, heading, rich_text, text_edit_single};
use crate::core::WalletCtx;
use crate::gui::GUI;

const ROW_HEIGHT: f32 = 24.0;

/// A cell being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditor {
   pub row: usize,
   pub column: Column,
   pub value: String,
   pub focus_requested: bool,
}

/// The tabbed address table
pub struct AddressBookUi {
   pub tab: AddressKind,
   pub editor: Option<CellEditor>,

   /// Address to select once its row shows up
   pub pending_select: Option<String>,
}

impl AddressBookUi {
   pub fn new(tab: AddressKind) -> Self {
      Self {
         tab,
         editor: None,
         pending_select: None,
      }
   }

   /// Rows shown under the current tab, hidden entries are never shown
   pub fn visible_rows(&self, model: &AddressTableModel<WalletCtx>) -> Vec<usize> {
      let Some(tag) = self.tab.tag() else {
         return Vec::new();
      };

      (0..model.row_count())
         .filter(|&row| model.kind_tag(row) == Some(tag))
         .collect()
   }

   /// Start editing a cell if the model allows it
   pub fn begin_edit(&mut self, model: &AddressTableModel<WalletCtx>, row: usize, column: Column) -> bool {
      let editable = model.flags(row, column).is_some_and(|flags| flags.editable);
      let value = model
         .data(row, column, Role::Edit)
         .map(|value| value.as_str().to_string());

      match (editable, value) {
         (true, Some(value)) => {
            self.editor = Some(CellEditor {
               row,
               column,
               value,
               focus_requested: false,
            });
            true
         }
         _ => false,
      }
   }

   /// Write the edited cell back through the model
   pub fn commit_edit(&mut self, model: &mut AddressTableModel<WalletCtx>) -> Result<(), EditError> {
      let Some(editor) = self.editor.take() else {
         return Ok(());
      };

      match model.set_data(editor.row, editor.column, editor.value.trim()) {
         Ok(()) | Err(EditError::NoChanges) => Ok(()),
         Err(e) => Err(e),
      }
   }
}

enum Action {
   Select(usize),
   Edit(usize, Column),
   Commit,
   Cancel,
}

pub fn show(ui: &mut Ui, gui: &mut GUI) {
   ui.horizontal(|ui| {
      for kind in [AddressKind::Receiving, AddressKind::Sending] {
         let title = if kind.is_receiving() { "Receiving" } else { "Sending" };
         let res = ui.selectable_value(&mut gui.address_book.tab, kind, heading(title));
         if res.clicked() {
            gui.selection.clear();
            gui.address_book.editor = None;
         }
      }
   });

   ui.add_space(10.0);
   toolbar(ui, gui);
   ui.add_space(10.0);
   table(ui, gui);
}

fn toolbar(ui: &mut Ui, gui: &mut GUI) {
   let tab = gui.address_book.tab;
   let selected = gui
      .selection
      .get()
      .filter(|&row| gui.model.entry(row).is_some_and(|e| e.kind == tab));

   ui.horizontal(|ui| {
      ui.spacing_mut().button_padding = vec2(10.0, 6.0);

      if ui.add(button(rich_text("New"))).clicked() {
         gui.add_address.open(tab);
      }

      if ui
         .add_enabled(selected.is_some(), button(rich_text("Copy address")))
         .clicked()
      {
         if let Some(entry) = selected.and_then(|row| gui.model.entry(row)) {
            ui.ctx().copy_text(entry.address.clone());
         }
      }

      // our own addresses can't be deleted
      let can_delete = selected.is_some() && tab.is_sending();
      if ui.add_enabled(can_delete, button(rich_text("Delete"))).clicked() {
         if let Some(row) = selected {
            if !gui.model.remove_rows(row, 1) {
               gui.open_msg_window("Delete failed", "This address can't be deleted");
            }
         }
      }

      if ui.add(button(rich_text("Reload"))).clicked() {
         gui.address_book.editor = None;
         gui.model.refresh();
      }

      ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
         if gui.wallet.is_locked() {
            if ui.add(button(rich_text("Unlock"))).clicked() {
               gui.unlock_window.open();
            }
         } else if ui.add(button(rich_text("Lock"))).clicked() {
            gui.wallet.lock();
         }

         let pool = gui.wallet.key_pool_size();
         ui.label(rich_text(format!("Key pool: {}", pool)));
      });
   });
}

fn table(ui: &mut Ui, gui: &mut GUI) {
   let rows = gui.address_book.visible_rows(&gui.model);
   let mut action = None;

   {
      let GUI {
         model,
         selection,
         address_book,
         ..
      } = &mut *gui;

      TableBuilder::new(ui)
         .striped(true)
         .resizable(true)
         .sense(Sense::click())
         .column(TableColumn::initial(220.0).at_least(120.0))
         .column(TableColumn::remainder().at_least(200.0))
         .header(ROW_HEIGHT, |mut header| {
            for column in Column::ALL {
               header.col(|ui| {
                  ui.strong(model.header(column.index()).unwrap_or_default());
               });
            }
         })
         .body(|mut body| {
            for &row in &rows {
               body.row(ROW_HEIGHT, |mut table_row| {
                  table_row.set_selected(selection.is_selected(row));

                  for column in Column::ALL {
                     let (_, res) = table_row.col(|ui| {
                        let editing = address_book
                           .editor
                           .as_mut()
                           .filter(|e| e.row == row && e.column == column);

                        let Some(editor) = editing else {
                           let text = model.data(row, column, Role::Display);
                           ui.label(rich_text(text.map(|t| t.as_str().to_string()).unwrap_or_default()));
                           return;
                        };

                        let res = ui.add(text_edit_single(&mut editor.value).desired_width(f32::INFINITY));
                        if !editor.focus_requested {
                           res.request_focus();
                           editor.focus_requested = true;
                        }

                        if ui.input(|i| i.key_pressed(Key::Escape)) {
                           action = Some(Action::Cancel);
                        } else if res.lost_focus() {
                           action = Some(Action::Commit);
                        }
                     });

                     if res.double_clicked() {
                        action = Some(Action::Edit(row, column));
                     } else if res.clicked() && action.is_none() {
                        action = Some(Action::Select(row));
                     }
                  }
               });
            }
         });
   }

   let Some(action) = action else {
      return;
   };

   match action {
      Action::Select(row) => gui.selection.set(Some(row)),
      Action::Edit(row, column) => {
         gui.selection.set(Some(row));
         gui.address_book.begin_edit(&gui.model, row, column);
      }
      Action::Commit => {
         if let Err(e) = gui.address_book.commit_edit(&mut gui.model) {
            gui.open_msg_window("Could not save the change", e.to_string());
         }
      }
      Action::Cancel => gui.address_book.editor = None,
   }
}
