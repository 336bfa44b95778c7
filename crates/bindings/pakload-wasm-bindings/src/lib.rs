//! # Pakload WASM Bindings
//!
//! Browser glue for pakload: binds a file-input control to a
//! separately-built WebAssembly module, reads the selected asset pack and
//! stages it inside that module's in-memory filesystem before starting it.
//!
//! The loader semantics live in `pakload-core`; this crate implements the
//! core sink traits over the real page and module objects and exports the
//! [`AssetLoader`] wrapper to the host page.

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod loader;
pub mod module;

pub use dom::DomStatus;
pub use loader::{attach_asset_loader, AssetLoader};
pub use module::JsAssetModule;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information for the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
