//! DOM contract: the file-input control and the status text element.

use pakload_core::{LoaderError, LoaderResult, StatusSink};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// The page's document.
pub(crate) fn document() -> LoaderResult<Document> {
    web_sys::window()
        .ok_or_else(|| LoaderError::dom("no global window"))?
        .document()
        .ok_or_else(|| LoaderError::dom("window has no document"))
}

/// Resolve the file-input control by id.
pub(crate) fn find_input(document: &Document, id: &str) -> LoaderResult<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| LoaderError::dom(format!("no element with id '{id}'")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| LoaderError::dom(format!("element '{id}' is not an input control")))
}

/// [`StatusSink`] over a text-bearing page element.
#[derive(Debug, Clone)]
pub struct DomStatus {
    element: Element,
}

impl DomStatus {
    /// Resolve the status element by id.
    pub fn find(document: &Document, id: &str) -> LoaderResult<Self> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| LoaderError::dom(format!("no element with id '{id}'")))?;
        Ok(Self { element })
    }
}

impl StatusSink for DomStatus {
    fn set_status(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}
