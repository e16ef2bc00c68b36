// Built-in defaults and tuning limits shared by the core and the web frontend.

// Markup contract
pub const DEFAULT_WRAPPER_ID: &str = "luxy";
pub const DEFAULT_TARGET_CLASS: &str = ".luxy-el";

// Smoothing rates (fraction of the remaining distance covered per frame)
pub const DEFAULT_WRAPPER_SPEED: f64 = 0.08;
pub const DEFAULT_TARGET_SPEED: f64 = 0.02; // scroll-to-target scale, multiplied by per-target speed
pub const DEFAULT_TARGET_PERCENTAGE: f64 = 0.1;

// Resize handling
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 200;
pub const DEFAULT_RESIZE_POLLING: bool = true;

// Time-scaled smoothing: largest gap between frames that still counts as elapsed time
pub const MAX_FRAME_GAP_MS: f64 = 100.0;

// Per-target attribute fallbacks
pub const DEFAULT_TARGET_OFFSET: f64 = 0.0;
pub const DEFAULT_TARGET_SPEED_X: f64 = 1.0;
pub const DEFAULT_TARGET_SPEED_Y: f64 = 1.0;
pub const DEFAULT_TARGET_ATTR_PERCENTAGE: f64 = 0.0;

// Data attributes read from each target element
pub const ATTR_OFFSET: &str = "data-offset";
pub const ATTR_SPEED_X: &str = "data-speed-x";
pub const ATTR_SPEED_Y: &str = "data-speed-y";
pub const ATTR_PERCENTAGE: &str = "data-percentage";
pub const ATTR_HORIZONTAL: &str = "data-horizontal";
