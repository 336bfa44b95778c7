//! The exported asset loader: DOM event wiring and the read task.

use crate::dom::{self, DomStatus};
use crate::module::{js_error_message, JsAssetModule};
use pakload_core::{LoadOutcome, LoadTicket, Loader, LoaderConfig, LoaderError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{console, File, FileList};

type BrowserLoader = Loader<JsAssetModule, DomStatus>;

/// Binds a file-input control to an external module's startup sequence.
///
/// On every selection the loader reads the chosen file, stages the bytes
/// inside the module's virtual filesystem and invokes the module's entry
/// point if it exposes one. A selection made while an earlier read is
/// still in flight supersedes it; the stale result is discarded.
#[wasm_bindgen]
pub struct AssetLoader {
    inner: Rc<RefCell<BrowserLoader>>,
    input: web_sys::HtmlInputElement,
    onchange: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl AssetLoader {
    /// Create a loader over an explicitly provided module object.
    ///
    /// `config` may be `undefined` for the defaults, or an object
    /// overriding individual [`LoaderConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(module: JsValue, config: JsValue) -> Result<AssetLoader, JsValue> {
        let config = parse_config(config)?;
        let module = JsAssetModule::from_value(module).map_err(|e| to_js(&e))?;
        Self::with_parts(module, config)
    }

    /// Create a loader over the page's ambient global `Module` object.
    pub fn ambient(config: JsValue) -> Result<AssetLoader, JsValue> {
        let config = parse_config(config)?;
        let module = JsAssetModule::ambient().map_err(|e| to_js(&e))?;
        Self::with_parts(module, config)
    }

    /// Install the change handler on the file-input control.
    ///
    /// Attaching twice is a no-op. The handler stays bound for the
    /// lifetime of this loader (or until [`detach`](Self::detach)).
    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.onchange.is_some() {
            return Ok(());
        }
        let inner = Rc::clone(&self.inner);
        let input = self.input.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let files = input.files();
            let count = files.as_ref().map_or(0, FileList::length) as usize;
            let Some(file) = files.and_then(|list| list.get(0)) else {
                return;
            };
            let Some(ticket) = inner.borrow_mut().begin_load(count) else {
                return;
            };
            spawn_local(run_load(Rc::clone(&inner), ticket, file));
        });
        self.input
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(|e| JsValue::from_str(&js_error_message(&e)))?;
        self.onchange = Some(closure);
        Ok(())
    }

    /// Remove the change handler installed by [`attach`](Self::attach).
    pub fn detach(&mut self) {
        if let Some(closure) = self.onchange.take() {
            let _ = self
                .input
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }
    }

    /// Stage a given file directly, bypassing the file-input control.
    ///
    /// Resolves with the load outcome; rejects if the read, the write or
    /// the entry-point invocation failed. Failures are surfaced on the
    /// status element either way.
    pub fn load(&self, file: File) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        let ticket = self.inner.borrow_mut().begin_load(1);
        future_to_promise(async move {
            let Some(ticket) = ticket else {
                return Err(JsValue::from_str("no selection"));
            };
            let outcome = load_into(&inner, ticket, file).await.map_err(|e| to_js(&e))?;
            serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }
}

impl AssetLoader {
    fn with_parts(module: JsAssetModule, config: LoaderConfig) -> Result<AssetLoader, JsValue> {
        let document = dom::document().map_err(|e| to_js(&e))?;
        let input = dom::find_input(&document, &config.input_element_id).map_err(|e| to_js(&e))?;
        let status = DomStatus::find(&document, &config.status_element_id).map_err(|e| to_js(&e))?;
        let inner = Loader::new(module, status, config).map_err(|e| to_js(&e))?;
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
            input,
            onchange: None,
        })
    }
}

/// Construct a loader with the default configuration and attach it.
///
/// The one-line embedding for the canonical host page. The returned
/// handle owns the change handler; the page must keep it alive for as
/// long as the control should stay bound.
#[wasm_bindgen]
pub fn attach_asset_loader(module: JsValue) -> Result<AssetLoader, JsValue> {
    let mut loader = AssetLoader::new(module, JsValue::UNDEFINED)?;
    loader.attach()?;
    Ok(loader)
}

/// Read task spawned by the change handler.
async fn run_load(inner: Rc<RefCell<BrowserLoader>>, ticket: LoadTicket, file: File) {
    if let Err(error) = load_into(&inner, ticket, file).await {
        console::error_1(&format!("asset load failed: {error}").into());
    }
}

/// The single suspension point: read the whole file, then complete or
/// fail the session. Borrows on the shared loader are never held across
/// the await.
async fn load_into(
    inner: &Rc<RefCell<BrowserLoader>>,
    ticket: LoadTicket,
    file: File,
) -> Result<LoadOutcome, LoaderError> {
    match read_file(&file).await {
        Ok(bytes) => inner.borrow_mut().finish_load(ticket, &bytes),
        Err(error) => {
            inner.borrow_mut().fail_load(ticket, &error);
            Err(error)
        }
    }
}

/// Materialize the file's contents as a byte buffer.
async fn read_file(file: &File) -> Result<Vec<u8>, LoaderError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| LoaderError::read(js_error_message(&e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn parse_config(config: JsValue) -> Result<LoaderConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        Ok(LoaderConfig::default())
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_js(error: &LoaderError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_sys::{Reflect, Uint8Array};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    type WriteRecord = Rc<RefCell<Vec<Vec<u8>>>>;

    struct Fixture {
        module: JsValue,
        writes: WriteRecord,
        entry_calls: Rc<RefCell<u32>>,
        config: LoaderConfig,
    }

    /// One fake module plus a pair of uniquely-identified page elements
    /// per test; tests share the browser document.
    fn fixture(test_id: &str) -> Fixture {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();

        let input = document.create_element("input").unwrap();
        input.set_id(&format!("{test_id}-input"));
        input.set_attribute("type", "file").unwrap();
        body.append_child(&input).unwrap();

        let status = document.create_element("div").unwrap();
        status.set_id(&format!("{test_id}-status"));
        status.set_text_content(Some("idle"));
        body.append_child(&status).unwrap();

        let writes: WriteRecord = Rc::default();
        let entry_calls = Rc::new(RefCell::new(0u32));

        let obj = js_sys::Object::new();
        let record = Rc::clone(&writes);
        let write = Closure::<dyn FnMut(String, String, Uint8Array, bool, bool)>::new(
            move |_dir: String, _name: String, data: Uint8Array, _create: bool, _overwrite: bool| {
                record.borrow_mut().push(data.to_vec());
            },
        );
        Reflect::set(&obj, &JsValue::from_str("FS_createDataFile"), write.as_ref()).unwrap();
        write.forget();

        let calls = Rc::clone(&entry_calls);
        let main = Closure::<dyn FnMut(JsValue)>::new(move |_args: JsValue| {
            *calls.borrow_mut() += 1;
        });
        Reflect::set(&obj, &JsValue::from_str("callMain"), main.as_ref()).unwrap();
        main.forget();

        let config = LoaderConfig {
            input_element_id: format!("{test_id}-input"),
            status_element_id: format!("{test_id}-status"),
            ..LoaderConfig::default()
        };

        Fixture {
            module: obj.into(),
            writes,
            entry_calls,
            config,
        }
    }

    fn status_text(test_id: &str) -> String {
        dom::document()
            .unwrap()
            .get_element_by_id(&format!("{test_id}-status"))
            .unwrap()
            .text_content()
            .unwrap()
    }

    fn make_file(bytes: &[u8]) -> File {
        let part = Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&part);
        File::new_with_u8_array_sequence(&parts, "whatever.bin").unwrap()
    }

    fn make_loader(fixture: &Fixture) -> AssetLoader {
        let config = serde_wasm_bindgen::to_value(&fixture.config).unwrap();
        AssetLoader::new(fixture.module.clone(), config).unwrap()
    }

    #[wasm_bindgen_test]
    async fn load_stages_asset_and_starts_module() {
        let fx = fixture("loader-e2e");
        let loader = make_loader(&fx);

        let file = make_file(b"pak contents");
        JsFuture::from(loader.load(file)).await.unwrap();

        assert_eq!(*fx.writes.borrow(), vec![b"pak contents".to_vec()]);
        assert_eq!(*fx.entry_calls.borrow(), 1);
        // The loader never writes a success message; the started module
        // owns the page from here.
        assert_eq!(status_text("loader-e2e"), "Loading assets...");
    }

    #[wasm_bindgen_test]
    async fn empty_file_is_staged_like_any_other() {
        let fx = fixture("loader-empty");
        let loader = make_loader(&fx);

        JsFuture::from(loader.load(make_file(b""))).await.unwrap();

        assert_eq!(*fx.writes.borrow(), vec![Vec::<u8>::new()]);
        assert_eq!(*fx.entry_calls.borrow(), 1);
    }

    #[wasm_bindgen_test]
    async fn newer_selection_supersedes_pending_read() {
        let fx = fixture("loader-race");
        let loader = make_loader(&fx);

        let first = loader.load(make_file(b"old"));
        let second = loader.load(make_file(b"new"));
        JsFuture::from(first).await.unwrap();
        JsFuture::from(second).await.unwrap();

        assert_eq!(*fx.writes.borrow(), vec![b"new".to_vec()]);
        assert_eq!(*fx.entry_calls.borrow(), 1);
    }

    #[wasm_bindgen_test]
    fn change_event_with_no_files_has_no_effect() {
        let fx = fixture("loader-nofiles");
        let mut loader = make_loader(&fx);
        loader.attach().unwrap();

        let event = web_sys::Event::new("change").unwrap();
        dom::document()
            .unwrap()
            .get_element_by_id("loader-nofiles-input")
            .unwrap()
            .dispatch_event(&event)
            .unwrap();

        assert!(fx.writes.borrow().is_empty());
        assert_eq!(*fx.entry_calls.borrow(), 0);
        assert_eq!(status_text("loader-nofiles"), "idle");
    }

    #[wasm_bindgen_test]
    fn constructor_rejects_a_missing_input_element() {
        let fx = fixture("loader-missing");
        let config = LoaderConfig {
            input_element_id: "loader-missing-no-such-element".to_string(),
            ..fx.config.clone()
        };
        let config = serde_wasm_bindgen::to_value(&config).unwrap();
        assert!(AssetLoader::new(fx.module.clone(), config).is_err());
    }

    #[wasm_bindgen_test]
    fn detach_removes_the_handler() {
        let fx = fixture("loader-detach");
        let mut loader = make_loader(&fx);
        loader.attach().unwrap();
        loader.detach();
        assert!(loader.onchange.is_none());
    }
}
