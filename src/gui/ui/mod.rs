pub mod add_address;
pub mod address_book;
pub mod misc;

pub use add_address::{AddAddress, AddOutcome};
pub use address_book::AddressBookUi;
pub use misc::{MsgWindow, UnlockWindow};

use eframe::egui::{Button, FontId, RichText, Sense, TextEdit, vec2, widget_text::WidgetText};

pub const TEXT_SIZE: f32 = 15.0;
pub const HEADING_SIZE: f32 = 18.0;

pub fn rich_text(text: impl Into<String>) -> RichText {
   RichText::new(text).size(TEXT_SIZE)
}

pub fn heading(text: impl Into<String>) -> RichText {
   RichText::new(text).size(HEADING_SIZE).strong()
}

pub fn button(text: impl Into<WidgetText>) -> Button<'static> {
   Button::new(text)
      .sense(Sense::click())
      .min_size(vec2(70.0, 25.0))
}

pub fn text_edit_single(text: &mut String) -> TextEdit<'_> {
   let font = FontId::proportional(TEXT_SIZE);
   TextEdit::singleline(text)
      .min_size(vec2(150.0, 25.0))
      .font(font)
}
