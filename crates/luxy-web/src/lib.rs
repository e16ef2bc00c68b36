#![cfg(target_arch = "wasm32")]
//! Browser frontend: exposes the parallax controller to JS as the `Luxy` class.

use luxy_core::Controller;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod dom;
mod frame;
mod options;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("luxy-web loaded");
    Ok(())
}

/// State reachable from both the JS handle and the browser callbacks.
pub(crate) struct Shared {
    pub(crate) host: dom::DomHost,
    pub(crate) controller: RefCell<Controller<dom::DomHost>>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        // callbacks die with the host; none may stay registered with the browser
        self.controller.get_mut().cancel(&self.host);
    }
}

#[wasm_bindgen]
pub struct Luxy {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Luxy {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Luxy, JsValue> {
        let page = dom::Page::current().map_err(|e| js_error(format!("{e:#}")))?;
        let shared = Rc::new_cyclic(|weak| Shared {
            host: dom::DomHost::new(page, frame::Callbacks::new(weak.clone())),
            controller: RefCell::new(Controller::new()),
        });
        Ok(Luxy { shared })
    }

    /// Start animating. Throws if the wrapper element is missing or an option is malformed.
    pub fn init(&self, options: JsValue) -> Result<(), JsValue> {
        let options = options::parse(&options).map_err(js_error)?;
        let mut controller = self
            .shared
            .controller
            .try_borrow_mut()
            .map_err(|_| js_error("luxy is busy"))?;
        controller
            .init(&self.shared.host, &options)
            .map_err(|e| {
                log::error!("[luxy] {e}");
                js_error(e)
            })
    }

    pub fn cancel(&self) {
        match self.shared.controller.try_borrow_mut() {
            Ok(mut controller) => controller.cancel(&self.shared.host),
            Err(_) => log::warn!("[luxy] cancel ignored: controller busy"),
        }
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.shared
            .controller
            .try_borrow()
            .map(|c| c.is_active())
            .unwrap_or(true)
    }
}

fn js_error(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
