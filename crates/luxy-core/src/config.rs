//! Controller configuration.
//!
//! [`Options`] is the partial record a caller hands to `init`; every field is
//! optional. [`Settings`] is the resolved, immutable record the controller
//! runs with. Each merge builds a new record from the constants in
//! `constants.rs`, so one controller's overrides never leak into another's.

use crate::constants::*;
use crate::error::{LuxyError, Result};

// Option keys as they appear on the JS options object.
pub const KEY_WRAPPER_ID: &str = "wrapperId";
pub const KEY_TARGET_CLASS: &str = "targetClass";
pub const KEY_WRAPPER_SPEED: &str = "wrapperSpeed";
pub const KEY_TARGET_SPEED: &str = "targetSpeed";
pub const KEY_TARGET_PERCENTAGE: &str = "targetPercentage";
pub const KEY_REFERENCE_FPS: &str = "referenceFps";
pub const KEY_RESIZE_POLLING: &str = "resizePolling";
pub const KEY_RESIZE_DEBOUNCE_MS: &str = "resizeDebounceMs";

/// Caller-supplied overrides. `None` keeps the built-in default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub wrapper_id: Option<String>,
    pub target_class: Option<String>,
    pub wrapper_speed: Option<f64>,
    pub target_speed: Option<f64>,
    pub target_percentage: Option<f64>,
    /// Enables time-scaled smoothing: rates are defined per frame at this refresh rate.
    pub reference_fps: Option<f64>,
    pub resize_polling: Option<bool>,
    pub resize_debounce_ms: Option<u32>,
}

impl Options {
    pub fn wrapper_id(mut self, id: impl Into<String>) -> Self {
        self.wrapper_id = Some(id.into());
        self
    }

    pub fn target_class(mut self, selector: impl Into<String>) -> Self {
        self.target_class = Some(selector.into());
        self
    }

    pub fn wrapper_speed(mut self, speed: f64) -> Self {
        self.wrapper_speed = Some(speed);
        self
    }

    pub fn target_speed(mut self, speed: f64) -> Self {
        self.target_speed = Some(speed);
        self
    }

    pub fn target_percentage(mut self, percentage: f64) -> Self {
        self.target_percentage = Some(percentage);
        self
    }

    pub fn reference_fps(mut self, fps: f64) -> Self {
        self.reference_fps = Some(fps);
        self
    }

    pub fn resize_polling(mut self, polling: bool) -> Self {
        self.resize_polling = Some(polling);
        self
    }

    pub fn resize_debounce_ms(mut self, ms: u32) -> Self {
        self.resize_debounce_ms = Some(ms);
        self
    }
}

/// A JS value as the options reader sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// `undefined` or `null`.
    Missing,
    Str(String),
    Number(f64),
    Bool(bool),
    Object,
    /// Functions, symbols, bigints.
    Other,
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Missing => "nothing",
            Self::Str(_) => "a string",
            Self::Number(_) => "a number",
            Self::Bool(_) => "a boolean",
            Self::Object => "an object",
            Self::Other => "an unsupported value",
        }
    }
}

impl Options {
    /// Read the value handed to `init`.
    ///
    /// `root` is that value; `field` fetches one key from it and is only
    /// called when `root` is an object. A missing root means all defaults;
    /// unknown keys are never asked for.
    pub fn read(root: OptionValue, mut field: impl FnMut(&str) -> Result<OptionValue>) -> Result<Self> {
        match root {
            OptionValue::Missing => return Ok(Self::default()),
            OptionValue::Object => {}
            other => return Err(wrong_type("options", "an object", &other)),
        }
        Ok(Self {
            wrapper_id: string(KEY_WRAPPER_ID, field(KEY_WRAPPER_ID)?)?,
            target_class: string(KEY_TARGET_CLASS, field(KEY_TARGET_CLASS)?)?,
            wrapper_speed: number(KEY_WRAPPER_SPEED, field(KEY_WRAPPER_SPEED)?)?,
            target_speed: number(KEY_TARGET_SPEED, field(KEY_TARGET_SPEED)?)?,
            target_percentage: number(KEY_TARGET_PERCENTAGE, field(KEY_TARGET_PERCENTAGE)?)?,
            reference_fps: number(KEY_REFERENCE_FPS, field(KEY_REFERENCE_FPS)?)?,
            resize_polling: flag(KEY_RESIZE_POLLING, field(KEY_RESIZE_POLLING)?)?,
            resize_debounce_ms: number(KEY_RESIZE_DEBOUNCE_MS, field(KEY_RESIZE_DEBOUNCE_MS)?)?
                .map(|ms| {
                    if ms >= 0.0 {
                        Ok(ms.round().min(u32::MAX as f64) as u32)
                    } else {
                        Err(LuxyError::InvalidOption {
                            key: KEY_RESIZE_DEBOUNCE_MS.to_owned(),
                            reason: format!("must not be negative, got {ms}"),
                        })
                    }
                })
                .transpose()?,
        })
    }
}

fn wrong_type(key: &str, expected: &str, got: &OptionValue) -> LuxyError {
    LuxyError::InvalidOption {
        key: key.to_owned(),
        reason: format!("expected {expected}, got {}", got.type_name()),
    }
}

fn string(key: &str, value: OptionValue) -> Result<Option<String>> {
    match value {
        OptionValue::Missing => Ok(None),
        OptionValue::Str(s) => Ok(Some(s)),
        other => Err(wrong_type(key, "a string", &other)),
    }
}

fn number(key: &str, value: OptionValue) -> Result<Option<f64>> {
    match value {
        OptionValue::Missing => Ok(None),
        OptionValue::Number(n) if n.is_finite() => Ok(Some(n)),
        OptionValue::Number(n) => Err(LuxyError::InvalidOption {
            key: key.to_owned(),
            reason: format!("expected a finite number, got {n}"),
        }),
        other => Err(wrong_type(key, "a number", &other)),
    }
}

fn flag(key: &str, value: OptionValue) -> Result<Option<bool>> {
    match value {
        OptionValue::Missing => Ok(None),
        OptionValue::Bool(b) => Ok(Some(b)),
        other => Err(wrong_type(key, "a boolean", &other)),
    }
}

/// How per-frame smoothing rates are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SmoothingMode {
    /// Apply each rate once per rendered frame, whatever the refresh rate.
    PerFrame,
    /// Rescale each rate by elapsed time so motion matches `reference_fps` on any display.
    TimeScaled { reference_fps: f64 },
}

/// Resolved configuration, fixed for the lifetime of one `init`.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub wrapper_id: String,
    pub target_class: String,
    pub wrapper_speed: f64,
    pub target_speed: f64,
    pub target_percentage: f64,
    pub smoothing: SmoothingMode,
    pub resize_polling: bool,
    pub resize_debounce_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::merged(&Options::default())
    }
}

impl Settings {
    /// Build a fresh record from the built-in defaults overlaid with `options`.
    pub fn merged(options: &Options) -> Self {
        let settings = Self {
            wrapper_id: options
                .wrapper_id
                .clone()
                .unwrap_or_else(|| DEFAULT_WRAPPER_ID.to_owned()),
            target_class: options
                .target_class
                .clone()
                .unwrap_or_else(|| DEFAULT_TARGET_CLASS.to_owned()),
            wrapper_speed: options.wrapper_speed.unwrap_or(DEFAULT_WRAPPER_SPEED),
            target_speed: options.target_speed.unwrap_or(DEFAULT_TARGET_SPEED),
            target_percentage: options
                .target_percentage
                .unwrap_or(DEFAULT_TARGET_PERCENTAGE),
            smoothing: match options.reference_fps {
                Some(fps) if fps > 0.0 => SmoothingMode::TimeScaled { reference_fps: fps },
                _ => SmoothingMode::PerFrame,
            },
            resize_polling: options.resize_polling.unwrap_or(DEFAULT_RESIZE_POLLING),
            resize_debounce_ms: options
                .resize_debounce_ms
                .unwrap_or(DEFAULT_RESIZE_DEBOUNCE_MS),
        };
        settings.warn_unstable_rates();
        settings
    }

    // Rates outside [0, 1] overshoot or diverge; accepted, but worth a warning.
    fn warn_unstable_rates(&self) {
        for (key, rate) in [
            (KEY_WRAPPER_SPEED, self.wrapper_speed),
            (KEY_TARGET_PERCENTAGE, self.target_percentage),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                log::warn!("[luxy] {key}={rate} is outside [0, 1]; smoothing may overshoot");
            }
        }
    }
}
