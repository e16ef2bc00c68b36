use crate::constants::*;
use crate::smoothing::{round2, Translate3d};
use glam::DVec2;

/// Raw `data-*` attribute values read from one target element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetAttributes {
    pub offset: Option<String>,
    pub speed_x: Option<String>,
    pub speed_y: Option<String>,
    pub percentage: Option<String>,
    pub horizontal: Option<String>,
}

impl TargetAttributes {
    /// Collect the attributes through any lookup (DOM, test fixture, ...).
    pub fn read(mut attr: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            offset: attr(ATTR_OFFSET),
            speed_x: attr(ATTR_SPEED_X),
            speed_y: attr(ATTR_SPEED_Y),
            percentage: attr(ATTR_PERCENTAGE),
            horizontal: attr(ATTR_HORIZONTAL),
        }
    }
}

/// Typed per-target parameters, parsed once at registration.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetParams {
    /// Static pixel bias added on both axes.
    pub offset: f64,
    pub horizontal: bool,
    pub speed: DVec2,
    /// Read for completeness; the update uses the global `target_percentage`.
    pub percentage: f64,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            offset: DEFAULT_TARGET_OFFSET,
            horizontal: false,
            speed: DVec2::new(DEFAULT_TARGET_SPEED_X, DEFAULT_TARGET_SPEED_Y),
            percentage: DEFAULT_TARGET_ATTR_PERCENTAGE,
        }
    }
}

impl TargetParams {
    pub fn parse(attrs: &TargetAttributes) -> Self {
        Self {
            offset: parse_number(ATTR_OFFSET, attrs.offset.as_deref(), DEFAULT_TARGET_OFFSET),
            horizontal: parse_flag(attrs.horizontal.as_deref()),
            speed: DVec2::new(
                parse_number(ATTR_SPEED_X, attrs.speed_x.as_deref(), DEFAULT_TARGET_SPEED_X),
                parse_number(ATTR_SPEED_Y, attrs.speed_y.as_deref(), DEFAULT_TARGET_SPEED_Y),
            ),
            percentage: parse_number(
                ATTR_PERCENTAGE,
                attrs.percentage.as_deref(),
                DEFAULT_TARGET_ATTR_PERCENTAGE,
            ),
        }
    }
}

fn parse_number(name: &str, raw: Option<&str>, fallback: f64) -> f64 {
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("[luxy] ignoring {name}={raw:?}; using {fallback}");
            fallback
        }
    }
}

/// Narrower than JS truthiness on purpose: `"0"` and `"false"` turn the axis off.
fn parse_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// One animated element plus its smoothed position.
#[derive(Clone, Debug)]
pub struct Target<E> {
    pub el: E,
    pub params: TargetParams,
    /// Running position: `x` is left, `y` is top.
    pub position: DVec2,
}

impl<E> Target<E> {
    pub fn new(el: E, params: TargetParams) -> Self {
        Self {
            el,
            params,
            position: DVec2::ZERO,
        }
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    /// Advance both axes one smoothing step toward `scroll_top * target_speed * speed`.
    pub fn step(&mut self, scroll_top: f64, target_speed: f64, rate: f64) {
        let goal = self.params.speed * (scroll_top * target_speed);
        self.position += (goal - self.position) * rate;
    }

    /// Screen offset for the current position; X stays 0 unless the target is horizontal.
    pub fn transform(&self) -> Translate3d {
        let y = round2(self.position.y + self.params.offset);
        let x = if self.params.horizontal {
            round2(self.position.x + self.params.offset)
        } else {
            0.0
        };
        Translate3d::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> TargetAttributes {
        TargetAttributes::read(|name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        })
    }

    #[test]
    fn missing_attributes_use_fallbacks() {
        let p = TargetParams::parse(&TargetAttributes::default());
        assert_eq!(p, TargetParams::default());
        assert_eq!(p.offset, 0.0);
        assert!(!p.horizontal);
        assert_eq!(p.speed, DVec2::new(1.0, 1.0));
        assert_eq!(p.percentage, 0.0);
    }

    #[test]
    fn explicit_attributes_round_trip() {
        let p = TargetParams::parse(&attrs(&[
            ("data-offset", "5"),
            ("data-speed-x", "2"),
            ("data-speed-y", "3"),
            ("data-percentage", "0.2"),
            ("data-horizontal", "true"),
        ]));
        assert_eq!(p.offset, 5.0);
        assert_eq!(p.speed, DVec2::new(2.0, 3.0));
        assert_eq!(p.percentage, 0.2);
        assert!(p.horizontal);
    }

    #[test]
    fn fractional_offset_survives_on_both_axes() {
        let p = TargetParams::parse(&attrs(&[("data-offset", " 2.75 "), ("data-horizontal", "1")]));
        let t = Target::new((), p);
        assert_eq!(t.transform(), Translate3d::new(2.75, 2.75));
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let p = TargetParams::parse(&attrs(&[("data-speed-y", "fast"), ("data-offset", "NaN")]));
        assert_eq!(p.speed.y, 1.0);
        assert_eq!(p.offset, 0.0);
    }

    #[test]
    fn horizontal_flag_values() {
        for (raw, expected) in [
            ("", false),
            ("0", false),
            ("false", false),
            ("FALSE", false),
            ("1", true),
            ("true", true),
            ("yes", true),
        ] {
            let p = TargetParams::parse(&attrs(&[("data-horizontal", raw)]));
            assert_eq!(p.horizontal, expected, "data-horizontal={raw:?}");
        }
    }

    #[test]
    fn vertical_only_target_keeps_x_at_zero() {
        let mut t = Target::new((), TargetParams::default());
        t.step(1000.0, 0.02, 0.1);
        assert_eq!(t.transform().x, 0.0);
        assert_eq!(t.transform().y, 2.0);
        assert_eq!(t.left(), 2.0);
    }
}
