use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
   #[error("The entered address is not a valid address")]
   InvalidAddress,

   #[error("The entered address is already in the address book")]
   DuplicateAddress,

   #[error("Wallet could not be unlocked")]
   WalletUnlockFailure,

   #[error("Generation of a new key failed")]
   KeyGenerationFailure,

   #[error("Only sending and receiving addresses can be added")]
   UnsupportedKind,

   #[error("This cell cannot be edited")]
   NotEditable,

   #[error("Nothing to change")]
   NoChanges,
}

/// Outcome of the last edit made through the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditStatus {
   #[default]
   Ok,
   Failed(EditError),
}

impl EditStatus {
   pub fn is_ok(&self) -> bool {
      matches!(self, Self::Ok)
   }

   pub fn error(&self) -> Option<EditError> {
      match self {
         Self::Ok => None,
         Self::Failed(e) => Some(*e),
      }
   }
}

impl<T> From<&Result<T, EditError>> for EditStatus {
   fn from(result: &Result<T, EditError>) -> Self {
      match result {
         Ok(_) => Self::Ok,
         Err(e) => Self::Failed(*e),
      }
   }
}
