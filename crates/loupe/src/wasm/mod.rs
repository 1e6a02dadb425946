//! Browser bindings
//!
//! ```js
//! import init, { attachZoom } from "loupe";
//!
//! await init();
//! const lens = attachZoom(document.querySelector(".easyzoom"), {
//!   errorDuration: 4000,
//!   onShow() { this.classList.add("zooming"); },
//! });
//! lens.swap("thumb-2.jpg", "zoom-2.jpg", ["thumb-2.jpg 1x", "thumb-2@2x.jpg 2x"]);
//! ```
//!
//! Lenses are kept in a per-thread registry keyed by element, so attaching
//! twice to one element returns the same lens. Options passed on a later
//! attach are ignored.

mod events;
mod host;
mod lens;
mod options;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement};

pub use host::WebHost;

use crate::error::ZoomError;
use crate::registry::Registry;
use lens::Lens;

thread_local! {
    static LENSES: RefCell<Registry<Element, Rc<Lens>>> = RefCell::new(Registry::new());
}

impl From<ZoomError> for JsValue {
    fn from(err: ZoomError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Attach a zoom lens to `target`, reusing the one already registered for it
#[wasm_bindgen(js_name = attachZoom)]
pub fn attach_zoom(target: HtmlElement, options: JsValue) -> Result<ZoomLens, JsValue> {
    let key = Element::from(target.clone());
    let registered = LENSES.with(|lenses| lenses.borrow().get(&key).cloned());

    let lens = match registered {
        Some(lens) => lens,
        None => Lens::create(target, &options)?,
    };
    let attachment = LENSES.with(|lenses| {
        lenses
            .borrow_mut()
            .attach_with(key, || Rc::clone(&lens))
    });
    debug!(?attachment, "attachZoom");

    Ok(ZoomLens { lens })
}

/// Lens registered for `target`, if any
#[wasm_bindgen(js_name = zoomFor)]
pub fn zoom_for(target: &Element) -> Option<ZoomLens> {
    LENSES
        .with(|lenses| lenses.borrow().get(target).cloned())
        .map(|lens| ZoomLens { lens })
}

/// JS handle to one zoom lens
#[wasm_bindgen]
pub struct ZoomLens {
    lens: Rc<Lens>,
}

#[wasm_bindgen]
impl ZoomLens {
    #[wasm_bindgen(constructor)]
    pub fn new(target: HtmlElement, options: JsValue) -> Result<ZoomLens, JsValue> {
        attach_zoom(target, options)
    }

    /// Open the flyout, positioned for `event` when given
    pub fn show(&self, event: Option<Event>) -> Result<(), JsValue> {
        let origin = event.as_ref().map(events::pointer);
        self.lens.dispatch(|zoom| zoom.show(origin)).unwrap_or(Ok(()))?;
        Ok(())
    }

    pub fn hide(&self) {
        self.lens.dispatch(|zoom| zoom.hide());
    }

    /// Bind new images; `srcset` is a string, an array of candidates, or omitted
    pub fn swap(&self, src: &str, href: &str, srcset: JsValue) -> Result<(), JsValue> {
        let srcset = options::srcset(&srcset);
        self.lens
            .dispatch(|zoom| zoom.swap(src, href, srcset))
            .unwrap_or(Ok(()))?;
        Ok(())
    }

    pub fn teardown(&self) {
        self.lens.dispatch(|zoom| zoom.teardown());
    }

    /// `undefined` while torn down
    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> Option<bool> {
        self.lens.inspect(|zoom| zoom.is_open()).flatten()
    }

    /// `undefined` while torn down
    #[wasm_bindgen(getter, js_name = isReady)]
    pub fn is_ready(&self) -> Option<bool> {
        self.lens.inspect(|zoom| zoom.is_ready()).flatten()
    }

    #[wasm_bindgen(getter)]
    pub fn target(&self) -> HtmlElement {
        self.lens.target().clone()
    }

    /// Controller state as a JSON string
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let snapshot = self
            .lens
            .inspect(|zoom| zoom.snapshot())
            .ok_or_else(|| JsValue::from_str("zoom controller busy"))?;
        serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
