//! # Pakload Core
//!
//! Platform-neutral semantics for staging a user-selected asset pack into
//! a separately-built WebAssembly module and starting it. This crate holds
//! everything that does not need a browser: configuration, the error
//! taxonomy, the sink traits abstracting the module and the status
//! display, and the load-session state machine.
//!
//! The browser glue lives in `pakload-wasm-bindings`, which implements the
//! sink traits over the real page and module objects.
//!
//! ## Quick Start
//!
//! ```rust
//! use pakload_core::{Loader, LoaderConfig, LoaderResult};
//! # use pakload_core::{AssetSink, StatusSink, EntryPoint};
//! # struct NullModule;
//! # impl AssetSink for NullModule {
//! #     fn write_asset(&mut self, _: &str, _: &str, _: &[u8], _: bool, _: bool) -> LoaderResult<()> { Ok(()) }
//! #     fn invoke_entry_point(&mut self) -> LoaderResult<EntryPoint> { Ok(EntryPoint::NotExposed) }
//! # }
//! # struct NullStatus;
//! # impl StatusSink for NullStatus {
//! #     fn set_status(&mut self, _: &str) {}
//! # }
//!
//! # fn main() -> LoaderResult<()> {
//! let mut loader = Loader::new(NullModule, NullStatus, LoaderConfig::default())?;
//! if let Some(ticket) = loader.begin_load(1) {
//!     loader.finish_load(ticket, b"pak bytes")?;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod session;
pub mod sink;

// Re-export commonly used items
pub use config::LoaderConfig;
pub use error::{LoaderError, LoaderResult};
pub use session::{LoadOutcome, LoadTicket, Loader};
pub use sink::{AssetSink, EntryPoint, StatusSink};

/// Version information for the pakload core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the pakload core library
pub const NAME: &str = env!("CARGO_PKG_NAME");
