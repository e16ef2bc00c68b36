use crate::dom::DomHost;
use crate::Shared;
use luxy_core::{Controller, Loop};
use std::rc::Weak;
use wasm_bindgen::closure::Closure;

/// The four browser callbacks, each re-entering the controller through a weak handle.
pub struct Callbacks {
    pub scroll: Closure<dyn FnMut(f64)>,
    pub resize_frame: Closure<dyn FnMut(f64)>,
    pub resize_event: Closure<dyn FnMut()>,
    pub debounce: Closure<dyn FnMut()>,
}

impl Callbacks {
    pub fn new(shared: Weak<Shared>) -> Self {
        Self {
            scroll: frame_callback(shared.clone(), Loop::Scroll),
            resize_frame: frame_callback(shared.clone(), Loop::Resize),
            resize_event: {
                let shared = shared.clone();
                Closure::wrap(Box::new(move || {
                    dispatch(&shared, |c, host| c.on_resize(host));
                }) as Box<dyn FnMut()>)
            },
            debounce: Closure::wrap(Box::new(move || {
                dispatch(&shared, |c, host| c.on_debounce_elapsed(host));
            }) as Box<dyn FnMut()>),
        }
    }

    pub fn frame(&self, which: Loop) -> &Closure<dyn FnMut(f64)> {
        match which {
            Loop::Scroll => &self.scroll,
            Loop::Resize => &self.resize_frame,
        }
    }
}

fn frame_callback(shared: Weak<Shared>, which: Loop) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |timestamp_ms: f64| {
        dispatch(&shared, |c, host| c.on_frame(host, which, timestamp_ms));
    }) as Box<dyn FnMut(f64)>)
}

fn dispatch(shared: &Weak<Shared>, f: impl FnOnce(&mut Controller<DomHost>, &DomHost)) {
    // gone means the JS handle was freed; the drop already cancelled everything
    let Some(shared) = shared.upgrade() else {
        return;
    };
    match shared.controller.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller, &shared.host),
        Err(_) => log::warn!("[luxy] controller busy; skipping callback"),
    }
}
