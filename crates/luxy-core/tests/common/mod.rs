// Recording host used by the controller tests: an in-memory page, a frame
// queue flushed one frame at a time, and timers on a virtual clock.

#![allow(dead_code)]

use luxy_core::{Controller, Host, Loop, LuxyError, Options, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

pub const FRAME_MS: f64 = 16.0;

#[derive(Default)]
pub struct Node {
    pub id: Option<String>,
    pub class: Option<String>,
    pub attrs: HashMap<String, String>,
    pub client_height: f64,
    pub styles: BTreeMap<String, String>,
}

#[derive(Default)]
pub struct MockHost {
    pub nodes: RefCell<Vec<Node>>,
    pub body_height: RefCell<Option<f64>>,
    pub scroll_top: Cell<f64>,
    pub viewport_height: Cell<f64>,
    pub now_ms: Cell<f64>,
    pub style_writes: Cell<usize>,
    pub frames: RefCell<Vec<(u32, Loop)>>,
    pub frame_requests: RefCell<Vec<(Loop, f64)>>,
    pub timers: RefCell<Vec<(u32, f64)>>,
    pub listeners: Cell<i32>,
    next_id: Cell<u32>,
}

impl MockHost {
    /// A page with a `#luxy` wrapper of the given content height.
    pub fn with_wrapper(content_height: f64) -> Self {
        let host = Self::default();
        host.viewport_height.set(800.0);
        host.add(Node {
            id: Some("luxy".into()),
            client_height: content_height,
            ..Node::default()
        });
        host
    }

    pub fn add(&self, node: Node) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        nodes.len() - 1
    }

    /// Add a `.luxy-el` target carrying the given data attributes.
    pub fn add_target(&self, attrs: &[(&str, &str)]) -> usize {
        self.add(Node {
            class: Some("luxy-el".into()),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Node::default()
        })
    }

    pub fn style(&self, el: usize, property: &str) -> Option<String> {
        self.nodes.borrow()[el].styles.get(property).cloned()
    }

    pub fn has_styles(&self, el: usize) -> bool {
        !self.nodes.borrow()[el].styles.is_empty()
    }

    pub fn set_client_height(&self, el: usize, px: f64) {
        self.nodes.borrow_mut()[el].client_height = px;
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn requests_for(&self, which: Loop) -> usize {
        self.frame_requests
            .borrow()
            .iter()
            .filter(|(w, _)| *w == which)
            .count()
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl Host for MockHost {
    type Element = usize;
    type FrameId = u32;
    type TimerId = u32;

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<usize>> {
        let class = selector
            .strip_prefix('.')
            .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_alphanumeric() || ch == '-'))
            .ok_or_else(|| LuxyError::InvalidSelector {
                selector: selector.to_owned(),
                reason: "unsupported by mock".into(),
            })?;
        Ok(self
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.class.as_deref() == Some(class))
            .map(|(i, _)| i)
            .collect())
    }

    fn attribute(&self, el: &usize, name: &str) -> Option<String> {
        self.nodes.borrow()[*el].attrs.get(name).cloned()
    }

    fn client_height(&self, el: &usize) -> f64 {
        self.nodes.borrow()[*el].client_height
    }

    fn set_style(&self, el: &usize, property: &str, value: &str) {
        self.style_writes.set(self.style_writes.get() + 1);
        self.nodes.borrow_mut()[*el]
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn clear_styles(&self, el: &usize) {
        self.nodes.borrow_mut()[*el].styles.clear();
    }

    fn body_height(&self) -> Option<f64> {
        *self.body_height.borrow()
    }

    fn set_body_height(&self, px: f64) {
        self.style_writes.set(self.style_writes.get() + 1);
        *self.body_height.borrow_mut() = Some(px);
    }

    fn clear_body_height(&self) {
        *self.body_height.borrow_mut() = None;
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn request_frame(&self, which: Loop) -> Result<u32> {
        let id = self.id();
        self.frames.borrow_mut().push((id, which));
        self.frame_requests.borrow_mut().push((which, self.now_ms.get()));
        Ok(id)
    }

    fn cancel_frame(&self, id: u32) {
        self.frames.borrow_mut().retain(|(f, _)| *f != id);
    }

    fn set_timer(&self, delay_ms: u32) -> Result<u32> {
        let id = self.id();
        let due = self.now_ms.get() + delay_ms as f64;
        self.timers.borrow_mut().push((id, due));
        Ok(id)
    }

    fn clear_timer(&self, id: u32) {
        self.timers.borrow_mut().retain(|(t, _)| *t != id);
    }

    fn listen_resize(&self) -> Result<()> {
        self.listeners.set(self.listeners.get() + 1);
        Ok(())
    }

    fn unlisten_resize(&self) {
        self.listeners.set(self.listeners.get() - 1);
    }
}

/// Controller plus host, driven like a browser event loop.
pub struct Page {
    pub host: MockHost,
    pub luxy: Controller<MockHost>,
}

impl Page {
    pub fn new(host: MockHost) -> Self {
        Self {
            host,
            luxy: Controller::new(),
        }
    }

    pub fn init(&mut self, options: Options) -> Result<()> {
        self.luxy.init(&self.host, &options)
    }

    pub fn cancel(&mut self) {
        self.luxy.cancel(&self.host);
    }

    /// Dispatch every frame callback queued before this frame began.
    pub fn frame(&mut self) {
        let now = self.host.now_ms.get() + FRAME_MS;
        self.host.now_ms.set(now);
        let due: Vec<_> = self.host.frames.borrow_mut().drain(..).collect();
        for (_, which) in due {
            self.luxy.on_frame(&self.host, which, now);
        }
        self.fire_timers();
    }

    pub fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    pub fn resize_event(&mut self) {
        self.luxy.on_resize(&self.host);
    }

    /// Move the clock forward without rendering, firing any timers that come due.
    pub fn advance(&mut self, ms: f64) {
        self.host.now_ms.set(self.host.now_ms.get() + ms);
        self.fire_timers();
    }

    fn fire_timers(&mut self) {
        let now = self.host.now_ms.get();
        let fired: Vec<u32> = {
            let mut timers = self.host.timers.borrow_mut();
            let (due, rest): (Vec<_>, Vec<_>) = timers.drain(..).partition(|(_, at)| *at <= now);
            *timers = rest;
            due.into_iter().map(|(id, _)| id).collect()
        };
        for _ in fired {
            self.luxy.on_debounce_elapsed(&self.host);
        }
    }
}
