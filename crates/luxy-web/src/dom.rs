use crate::frame::Callbacks;
use luxy_core::{parse_px, Host, Loop, LuxyError, Result};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The window, document and body the controller runs against.
pub struct Page {
    window: web::Window,
    document: web::Document,
    body: web::HtmlElement,
}

impl Page {
    pub fn current() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no <body>"))?;
        Ok(Self {
            window,
            document,
            body,
        })
    }
}

pub struct DomHost {
    page: Page,
    callbacks: Callbacks,
    listening: Cell<bool>,
}

impl DomHost {
    pub fn new(page: Page, callbacks: Callbacks) -> Self {
        Self {
            page,
            callbacks,
            listening: Cell::new(false),
        }
    }
}

fn scheduling(e: wasm_bindgen::JsValue) -> LuxyError {
    LuxyError::Scheduling(format!("{:?}", e))
}

impl Host for DomHost {
    type Element = web::HtmlElement;
    type FrameId = i32;
    type TimerId = i32;

    fn element_by_id(&self, id: &str) -> Option<web::HtmlElement> {
        self.page
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<web::HtmlElement>> {
        let list = self
            .page
            .document
            .query_selector_all(selector)
            .map_err(|e| LuxyError::InvalidSelector {
                selector: selector.to_owned(),
                reason: format!("{:?}", e),
            })?;
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            let Some(node) = list.item(i) else { continue };
            match node.dyn_into::<web::HtmlElement>() {
                Ok(el) => out.push(el),
                Err(_) => log::warn!("[luxy] {selector} matched a non-HTML element; skipped"),
            }
        }
        Ok(out)
    }

    fn attribute(&self, el: &web::HtmlElement, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn client_height(&self, el: &web::HtmlElement) -> f64 {
        el.client_height() as f64
    }

    fn set_style(&self, el: &web::HtmlElement, property: &str, value: &str) {
        if let Err(e) = el.style().set_property(property, value) {
            log::warn!("[luxy] set {property}={value} failed: {:?}", e);
        }
    }

    fn clear_styles(&self, el: &web::HtmlElement) {
        _ = el.remove_attribute("style");
    }

    fn body_height(&self) -> Option<f64> {
        let raw = self.page.body.style().get_property_value("height").ok()?;
        parse_px(&raw)
    }

    fn set_body_height(&self, px: f64) {
        _ = self
            .page
            .body
            .style()
            .set_property("height", &format!("{px}px"));
    }

    fn clear_body_height(&self) {
        _ = self.page.body.style().remove_property("height");
    }

    fn scroll_top(&self) -> f64 {
        // scrollY keeps sub-pixel offsets that Element::scroll_top truncates
        self.page.window.scroll_y().unwrap_or_else(|_| {
            self.page
                .document
                .document_element()
                .map(|el| el.scroll_top())
                .unwrap_or_else(|| self.page.body.scroll_top()) as f64
        })
    }

    fn viewport_height(&self) -> f64 {
        self.page
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .or_else(|| {
                self.page
                    .document
                    .document_element()
                    .map(|el| el.client_height() as f64)
            })
            .unwrap_or(0.0)
    }

    fn request_frame(&self, which: Loop) -> Result<i32> {
        self.page
            .window
            .request_animation_frame(self.callbacks.frame(which).as_ref().unchecked_ref())
            .map_err(scheduling)
    }

    fn cancel_frame(&self, id: i32) {
        _ = self.page.window.cancel_animation_frame(id);
    }

    fn set_timer(&self, delay_ms: u32) -> Result<i32> {
        self.page
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callbacks.debounce.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(scheduling)
    }

    fn clear_timer(&self, id: i32) {
        self.page.window.clear_timeout_with_handle(id);
    }

    fn listen_resize(&self) -> Result<()> {
        if self.listening.get() {
            return Ok(());
        }
        self.page
            .window
            .add_event_listener_with_callback(
                "resize",
                self.callbacks.resize_event.as_ref().unchecked_ref(),
            )
            .map_err(scheduling)?;
        self.listening.set(true);
        Ok(())
    }

    fn unlisten_resize(&self) {
        if self.listening.replace(false) {
            _ = self.page.window.remove_event_listener_with_callback(
                "resize",
                self.callbacks.resize_event.as_ref().unchecked_ref(),
            );
        }
    }
}
