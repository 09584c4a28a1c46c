/// Tag returned by [crate::Role::Kind] for sending addresses
pub const SEND: &str = "S";

/// Tag returned by [crate::Role::Kind] for receiving addresses
pub const RECEIVE: &str = "R";

/// Purpose the wallet records for addresses we send to
pub const PURPOSE_SEND: &str = "send";

/// Purpose the wallet records for addresses we generated to receive on
pub const PURPOSE_RECEIVE: &str = "receive";

/// How an address book entry is presented in the table
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
   Sending,
   Receiving,
   /// Kept in the table but never shown, views filter these out
   Hidden,
}

impl AddressKind {
   /// Determine the kind of an address from the purpose the wallet recorded for it
   ///
   /// If the purpose was never set we guess from the ownership of the address.
   ///
   /// Anything else (eg. "refund") is hidden.
   pub fn classify(purpose: &str, is_mine: bool) -> Self {
      match purpose {
         PURPOSE_SEND => Self::Sending,
         PURPOSE_RECEIVE => Self::Receiving,
         "" | "unknown" => {
            if is_mine {
               Self::Receiving
            } else {
               Self::Sending
            }
         }
         _ => Self::Hidden,
      }
   }

   /// The short tag consumers use to filter rows by kind
   pub fn tag(&self) -> Option<&'static str> {
      match self {
         Self::Sending => Some(SEND),
         Self::Receiving => Some(RECEIVE),
         Self::Hidden => None,
      }
   }

   pub fn from_tag(tag: &str) -> Option<Self> {
      match tag {
         SEND => Some(Self::Sending),
         RECEIVE => Some(Self::Receiving),
         _ => None,
      }
   }

   /// The purpose stored in the wallet for a new entry of this kind
   pub fn purpose(&self) -> Option<&'static str> {
      match self {
         Self::Sending => Some(PURPOSE_SEND),
         Self::Receiving => Some(PURPOSE_RECEIVE),
         Self::Hidden => None,
      }
   }

   pub fn is_sending(&self) -> bool {
      matches!(self, Self::Sending)
   }

   pub fn is_receiving(&self) -> bool {
      matches!(self, Self::Receiving)
   }

   pub fn is_hidden(&self) -> bool {
      matches!(self, Self::Hidden)
   }
}
