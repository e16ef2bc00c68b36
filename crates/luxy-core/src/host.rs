//! The seam between the controller and the page it animates.
//!
//! The web frontend implements [`Host`] over `web-sys`; tests implement it
//! with a recording mock. All methods take `&self`: hosts are driven from a
//! single thread and keep any bookkeeping behind interior mutability.

use crate::error::Result;

/// The two self-rescheduling per-frame chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Loop {
    Scroll,
    Resize,
}

pub trait Host {
    type Element: Clone;
    type FrameId: Copy;
    type TimerId: Copy;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>>;
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn client_height(&self, el: &Self::Element) -> f64;

    fn set_style(&self, el: &Self::Element, property: &str, value: &str);
    /// Drop every inline style on `el`.
    fn clear_styles(&self, el: &Self::Element);

    /// The body's inline `height`, if one is set and parses as pixels.
    fn body_height(&self) -> Option<f64>;
    fn set_body_height(&self, px: f64);
    fn clear_body_height(&self);

    fn scroll_top(&self) -> f64;
    fn viewport_height(&self) -> f64;

    fn request_frame(&self, which: Loop) -> Result<Self::FrameId>;
    fn cancel_frame(&self, id: Self::FrameId);
    fn set_timer(&self, delay_ms: u32) -> Result<Self::TimerId>;
    fn clear_timer(&self, id: Self::TimerId);

    fn listen_resize(&self) -> Result<()>;
    fn unlisten_resize(&self);
}

/// Parse an inline CSS length such as `"1200px"`; other units yield `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}
