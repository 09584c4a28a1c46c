#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use gui::app::AddressBookApp;

pub mod core;
pub mod gui;

use core::utils::trace::*;
use core::{AppConfig, WalletCtx};
use std::panic;

fn main() -> eframe::Result {
   panic::set_hook(Box::new(|panic_info| {
      let message = panic_info
         .payload()
         .downcast_ref::<&str>()
         .map_or("Unknown panic", |s| s);
      let location = panic_info
         .location()
         .map_or("Unknown location".to_string(), |loc| {
            format!("{}:{}:{}", loc.file(), loc.line(), loc.column())
         });
      tracing::error!("Panic occurred: '{}' at {}", message, location);
   }));

   let (config, config_err) = match AppConfig::load_or_default() {
      Ok(config) => (config, None),
      Err(e) => (AppConfig::default(), Some(e)),
   };

   let _tracing_guard = setup_tracing(&config.log_dir);

   if let Some(e) = config_err {
      tracing::error!("Failed to load config, using defaults: {:?}", e);
   }

   let wallet = WalletCtx::new(&config).map_err(|e| eframe::Error::AppCreation(e.into()))?;
   if let Some(address) = wallet.ensure_default_address() {
      tracing::info!(%address, "Created default receiving address");
   }

   // only use wgpu for windows
   let renderer = if cfg!(target_os = "windows") {
      eframe::Renderer::Wgpu
   } else {
      eframe::Renderer::Glow
   };

   let (width, height) = config.window_size;
   let options = eframe::NativeOptions {
      renderer,
      viewport: egui::ViewportBuilder::default()
         .with_inner_size([width, height])
         .with_min_inner_size([600.0, 400.0]),

      ..Default::default()
   };

   let tab = config.default_tab;
   eframe::run_native(
      "Address Book",
      options,
      Box::new(move |cc| {
         let app = AddressBookApp::new(cc, wallet, tab);
         Ok(Box::new(app))
      }),
   )
}
