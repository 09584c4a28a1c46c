use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;

use tracing_subscriber::{
   EnvFilter, fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt,
};

const CONSOLE_FILTER: &str = "addrbook=info,addrbook_model=info,warn,error";
const TRACE_FILTER: &str = "addrbook=trace,addrbook_model=trace";
const OUTPUT_FILTER: &str = "addrbook=info,addrbook_model=info,warn,error";

/// Log to stdout and to daily rolling files in `log_dir`
///
/// The console filter can be overridden with `RUST_LOG`.
///
/// Keep the returned guards alive, the file writers stop when they are dropped.
pub fn setup_tracing(log_dir: &Path) -> (WorkerGuard, WorkerGuard) {
   // Setup for file appenders
   let trace_appender = tracing_appender::rolling::daily(log_dir, "trace.log");
   let output_appender = tracing_appender::rolling::daily(log_dir, "output.log");

   // Creating non-blocking writers
   let (trace_writer, trace_guard) = tracing_appender::non_blocking(trace_appender);
   let (output_writer, output_guard) = tracing_appender::non_blocking(output_appender);

   let console_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_FILTER));
   let trace_filter = EnvFilter::new(TRACE_FILTER);
   let output_filter = EnvFilter::new(OUTPUT_FILTER);

   // Setting up layers
   let console_layer = fmt::layer()
      .with_writer(std::io::stdout)
      .with_filter(console_filter);

   let trace_layer = fmt::layer()
      .with_writer(trace_writer)
      .with_ansi(false)
      .with_filter(trace_filter);

   let output_layer = fmt::layer()
      .with_writer(output_writer)
      .with_ansi(false)
      .with_filter(output_filter);

   Registry::default()
      .with(trace_layer)
      .with(console_layer)
      .with(output_layer)
      .init();

   (trace_guard, output_guard)
}
