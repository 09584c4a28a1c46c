pub mod config;
pub mod context;
pub mod utils;


pub use config::AppConfig;
pub use context::{WalletContext, WalletCtx};
