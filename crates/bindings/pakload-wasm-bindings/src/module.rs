//! Binding to the external module object.
//!
//! The separately-built WebAssembly module hands the page a runtime object
//! exposing a virtual-filesystem write primitive and, optionally, an entry
//! point. The filesystem write is bound as a typed method; the entry point
//! is resolved dynamically because not every build exports one.

use js_sys::{Array, Function, Reflect, Uint8Array};
use pakload_core::{AssetSink, EntryPoint, LoaderError, LoaderResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Property holding the entry-point callable on the module object.
const ENTRY_POINT_PROP: &str = "callMain";

/// Name of the ambient global the original host page publishes.
const AMBIENT_MODULE_GLOBAL: &str = "Module";

#[wasm_bindgen]
extern "C" {
    /// Runtime object exported by the separately-built WebAssembly module.
    #[derive(Debug, Clone)]
    pub type AssetModuleObject;

    #[wasm_bindgen(method, js_name = FS_createDataFile, catch)]
    fn fs_create_data_file(
        this: &AssetModuleObject,
        parent: &str,
        name: &str,
        data: &Uint8Array,
        create: bool,
        overwrite: bool,
    ) -> Result<JsValue, JsValue>;
}

/// [`AssetSink`] over the external module's runtime object.
#[derive(Debug, Clone)]
pub struct JsAssetModule {
    raw: AssetModuleObject,
}

impl JsAssetModule {
    /// Wrap an explicitly provided module object.
    ///
    /// This is the primary construction path: the host passes its module
    /// reference in rather than the loader reaching for ambient state.
    pub fn from_value(value: JsValue) -> LoaderResult<Self> {
        if !value.is_object() {
            return Err(LoaderError::module("module reference is not an object"));
        }
        Ok(Self {
            raw: value.unchecked_into(),
        })
    }

    /// Wrap the page's ambient global `Module` object.
    ///
    /// Kept for drop-in parity with host pages that publish the module as
    /// a global instead of handing it to the loader.
    pub fn ambient() -> LoaderResult<Self> {
        let value = Reflect::get(&js_sys::global(), &JsValue::from_str(AMBIENT_MODULE_GLOBAL))
            .map_err(|e| LoaderError::module(js_error_message(&e)))?;
        if value.is_undefined() || value.is_null() {
            return Err(LoaderError::module(format!(
                "no ambient global '{AMBIENT_MODULE_GLOBAL}' object"
            )));
        }
        Self::from_value(value)
    }
}

impl AssetSink for JsAssetModule {
    fn write_asset(
        &mut self,
        dir: &str,
        name: &str,
        bytes: &[u8],
        create: bool,
        overwrite: bool,
    ) -> LoaderResult<()> {
        let data = Uint8Array::new_with_length(bytes.len() as u32);
        data.copy_from(bytes);
        self.raw
            .fs_create_data_file(dir, name, &data, create, overwrite)
            .map(|_| ())
            .map_err(|e| LoaderError::inject(js_error_message(&e)))
    }

    fn invoke_entry_point(&mut self) -> LoaderResult<EntryPoint> {
        let value = Reflect::get(self.raw.as_ref(), &JsValue::from_str(ENTRY_POINT_PROP))
            .unwrap_or(JsValue::UNDEFINED);
        // Absent or non-callable means the capability is not exposed.
        let Ok(entry) = value.dyn_into::<Function>() else {
            return Ok(EntryPoint::NotExposed);
        };
        entry
            .call1(self.raw.as_ref(), &Array::new())
            .map(|_| EntryPoint::Invoked)
            .map_err(|e| LoaderError::entry_point(js_error_message(&e)))
    }
}

/// Best-effort human-readable message from a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
