use addrbook_model::TableObserver;
use std::sync::{Arc, RwLock};

/// The selected row of the address table
///
/// Registered as the model's [TableObserver] so the selection follows its row when rows
/// are inserted or removed above it.
#[derive(Clone, Default)]
pub struct Selection(Arc<RwLock<Option<usize>>>);

impl Selection {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn get(&self) -> Option<usize> {
      *self.0.read().unwrap()
   }

   pub fn set(&self, row: Option<usize>) {
      *self.0.write().unwrap() = row;
   }

   pub fn clear(&self) {
      self.set(None);
   }

   pub fn is_selected(&self, row: usize) -> bool {
      self.get() == Some(row)
   }
}

impl TableObserver for Selection {
   fn rows_inserted(&mut self, first: usize, last: usize) {
      let mut selected = self.0.write().unwrap();
      if let Some(row) = selected.as_mut() {
         if *row >= first {
            *row += last - first + 1;
         }
      }
   }

   fn rows_removed(&mut self, first: usize, last: usize) {
      let mut selected = self.0.write().unwrap();
      *selected = match *selected {
         Some(row) if row < first => Some(row),
         Some(row) if row > last => Some(row - (last - first + 1)),
         _ => None,
      };
   }

   fn data_changed(&mut self, _top_row: usize, _left_column: usize, _bottom_row: usize, _right_column: usize) {}

   fn model_reset(&mut self) {
      self.clear();
   }
}
