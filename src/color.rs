//! Color types and the conversions between them.
//!
//! [`Rgb`] is the 8-bit sRGB output form, [`Hsv`] the picker's canonical
//! internal form and [`Hsl`] a derived form for the lightness inputs. All
//! integer conversions go through the float kernels in [`crate::math`] and
//! round to the nearest integer at the end.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;
use crate::math;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSV with hue in whole degrees (0–359) and saturation/value in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

/// HSL with the same ranges as [`Hsv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// A validated `#RRGGBB` color.
///
/// Only ever displayed in the canonical 7-character uppercase form. Build
/// one from user text with [`crate::normalize_hex`] (or `str::parse`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(Rgb);

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    fn from_unit((r, g, b): (f64, f64, f64)) -> Self {
        Self {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
        }
    }

    /// Channel-wise linear mix toward `target`, `weight` in 0.0–1.0.
    pub fn mix(self, target: Rgb, weight: f64) -> Rgb {
        let weight = weight.clamp(0.0, 1.0);
        let channel = |base: u8, target: u8| {
            let base = base as f64;
            (base + (target as f64 - base) * weight).round() as u8
        };
        Rgb {
            r: channel(self.r, target.r),
            g: channel(self.g, target.g),
            b: channel(self.b, target.b),
        }
    }

    /// `rgb(r, g, b)`
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)`
    pub fn to_css_alpha(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl Hsv {
    /// Builds an HSV value, wrapping the hue into 0–359 and clamping
    /// saturation and value to 0–100.
    pub fn new(h: u16, s: u8, v: u8) -> Self {
        Self {
            h: h % 360,
            s: s.min(100),
            v: v.min(100),
        }
    }
}

impl Hsl {
    /// Builds an HSL value, wrapping the hue into 0–359 and clamping
    /// saturation and lightness to 0–100.
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h % 360,
            s: s.min(100),
            l: l.min(100),
        }
    }
}

impl HexColor {
    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb)
    }

    pub fn rgb(self) -> Rgb {
        self.0
    }

    pub fn hsv(self) -> Hsv {
        rgb_to_hsv(self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::normalize::normalize_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn unit_to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn unit_to_percent(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn unit_to_degrees(h: f64) -> u16 {
    ((h * 360.0).round() as u16) % 360
}

/// Parse `#RGB` / `#RRGGBB` (leading `#` optional, any case).
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let stripped = hex.strip_prefix('#').unwrap_or(hex);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHexFormat(hex.to_string()));
    }
    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16).map_err(|_| ColorError::UnparseableChannel(digits.into()))
    };
    match stripped.len() {
        3 => Ok(Rgb {
            r: channel(&stripped[0..1])? * 17,
            g: channel(&stripped[1..2])? * 17,
            b: channel(&stripped[2..3])? * 17,
        }),
        6 => Ok(Rgb {
            r: channel(&stripped[0..2])?,
            g: channel(&stripped[2..4])?,
            b: channel(&stripped[4..6])?,
        }),
        _ => Err(ColorError::InvalidHexFormat(hex.to_string())),
    }
}

pub fn rgb_to_hex(rgb: Rgb) -> HexColor {
    HexColor::from_rgb(rgb)
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.to_unit();
    let (h, s, v) = math::rgb_to_hsv(r, g, b);
    Hsv {
        h: unit_to_degrees(h),
        s: unit_to_percent(s),
        v: unit_to_percent(v),
    }
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    Rgb::from_unit(math::hsv_to_rgb(
        (hsv.h % 360) as f64 / 360.0,
        hsv.s.min(100) as f64 / 100.0,
        hsv.v.min(100) as f64 / 100.0,
    ))
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.to_unit();
    let (h, s, l) = math::rgb_to_hsl(r, g, b);
    Hsl {
        h: unit_to_degrees(h),
        s: unit_to_percent(s),
        l: unit_to_percent(l),
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    Rgb::from_unit(math::hsl_to_rgb(
        (hsl.h % 360) as f64 / 360.0,
        hsl.s.min(100) as f64 / 100.0,
        hsl.l.min(100) as f64 / 100.0,
    ))
}

pub fn hex_to_hsv(hex: &str) -> Result<Hsv, ColorError> {
    hex_to_rgb(hex).map(rgb_to_hsv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Whole-degree hue and whole-percent s/v/l cost up to 0.5° and 0.5%
    /// each, which adds up to a few 8-bit steps on the middle channel.
    const QUANTIZATION_TOLERANCE: i16 = 5;

    fn within(a: Rgb, b: Rgb, tol: i16) -> bool {
        (a.r as i16 - b.r as i16).abs() <= tol
            && (a.g as i16 - b.g as i16).abs() <= tol
            && (a.b as i16 - b.b as i16).abs() <= tol
    }

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(hex_to_rgb("#5B7C99"), Ok(Rgb::new(91, 124, 153)));
        assert_eq!(hex_to_rgb("5b7c99"), Ok(Rgb::new(91, 124, 153)));
    }

    #[test]
    fn expands_three_digit_hex() {
        assert_eq!(hex_to_rgb("5A3"), hex_to_rgb("55AA33"));
        assert_eq!(hex_to_rgb("#fff"), Ok(Rgb::WHITE));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["", "#", "12", "1234", "#12345", "1234567", "GGGGGG", "+12345", "#12 456"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(ColorError::InvalidHexFormat(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn hex_output_is_uppercase_and_padded() {
        assert_eq!(rgb_to_hex(Rgb::new(0, 10, 255)).to_string(), "#000AFF");
        assert_eq!(rgb_to_hex(Rgb::new(171, 205, 239)).to_string().len(), 7);
    }

    #[test]
    fn black_converts_without_nan() {
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 0)), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 0)), Hsl { h: 0, s: 0, l: 0 });
    }

    #[test]
    fn known_hsv_values() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 0)), Hsv::new(0, 100, 100));
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 255)), Hsv::new(240, 100, 100));
        assert_eq!(hsv_to_rgb(Hsv::new(120, 100, 100)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(210, 0, 0)), Rgb::new(0, 0, 0));
        assert_eq!(hex_to_hsv("#5B7C99"), Ok(Hsv::new(208, 41, 60)));
    }

    #[test]
    fn tied_maximum_prefers_red_then_green() {
        // r == g: red branch, hue 60
        assert_eq!(rgb_to_hsv(Rgb::new(200, 200, 0)).h, 60);
        // g == b: green branch, hue 180
        assert_eq!(rgb_to_hsv(Rgb::new(0, 200, 200)).h, 180);
        // r == b: red branch, hue 300
        assert_eq!(rgb_to_hsv(Rgb::new(200, 0, 200)).h, 300);
    }

    #[test]
    fn hue_near_full_turn_wraps_to_zero() {
        // 359.76° rounds to 360 and wraps.
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 1)).h, 0);
    }

    #[test]
    fn hsl_gray_is_achromatic() {
        assert_eq!(hsl_to_rgb(Hsl::new(200, 0, 50)), Rgb::new(128, 128, 128));
        assert_eq!(rgb_to_hsl(Rgb::new(128, 128, 128)).s, 0);
    }

    #[test]
    fn hsv_round_trip_in_mid_range() {
        for hsv in [
            Hsv::new(210, 100, 100),
            Hsv::new(0, 100, 100),
            Hsv::new(120, 60, 80),
            Hsv::new(300, 75, 90),
        ] {
            let back = rgb_to_hsv(hsv_to_rgb(hsv));
            assert!((back.h as i32 - hsv.h as i32).abs() <= 1, "{hsv:?} -> {back:?}");
            assert!((back.s as i32 - hsv.s as i32).abs() <= 1, "{hsv:?} -> {back:?}");
            assert!((back.v as i32 - hsv.v as i32).abs() <= 1, "{hsv:?} -> {back:?}");
        }
    }

    #[test]
    fn constructors_wrap_and_clamp() {
        assert_eq!(Hsv::new(360, 120, 200), Hsv { h: 0, s: 100, v: 100 });
        assert_eq!(Hsl::new(725, 50, 101), Hsl { h: 5, s: 50, l: 100 });
    }

    #[test]
    fn css_strings() {
        let rgb = Rgb::new(91, 124, 153);
        assert_eq!(rgb.to_css(), "rgb(91, 124, 153)");
        assert_eq!(rgb.to_css_alpha(0.22), "rgba(91, 124, 153, 0.22)");
    }

    #[test]
    fn mix_is_channel_wise() {
        assert_eq!(Rgb::new(0, 100, 200).mix(Rgb::WHITE, 0.5), Rgb::new(128, 178, 228));
        assert_eq!(Rgb::new(10, 20, 30).mix(Rgb::WHITE, 0.0), Rgb::new(10, 20, 30));
        assert_eq!(Rgb::new(10, 20, 30).mix(Rgb::WHITE, 1.0), Rgb::WHITE);
    }

    proptest! {
        #[test]
        fn six_digit_hex_round_trips(r: u8, g: u8, b: u8, lower: bool) {
            let hex = format!("#{:02X}{:02X}{:02X}", r, g, b);
            let input = if lower { hex.to_lowercase() } else { hex.clone() };
            let rgb = hex_to_rgb(&input).unwrap();
            prop_assert_eq!(rgb_to_hex(rgb).to_string(), hex);
        }

        #[test]
        fn rgb_round_trips_through_hsv(r: u8, g: u8, b: u8) {
            let rgb = Rgb::new(r, g, b);
            let back = hsv_to_rgb(rgb_to_hsv(rgb));
            prop_assert!(within(rgb, back, QUANTIZATION_TOLERANCE), "{:?} -> {:?}", rgb, back);
        }

        #[test]
        fn rgb_round_trips_through_hsl(r: u8, g: u8, b: u8) {
            let rgb = Rgb::new(r, g, b);
            let back = hsl_to_rgb(rgb_to_hsl(rgb));
            prop_assert!(within(rgb, back, QUANTIZATION_TOLERANCE), "{:?} -> {:?}", rgb, back);
        }

        #[test]
        fn grays_round_trip_exactly(c: u8) {
            let rgb = Rgb::new(c, c, c);
            prop_assert!(within(rgb, hsl_to_rgb(rgb_to_hsl(rgb)), 1));
            prop_assert!(within(rgb, hsv_to_rgb(rgb_to_hsv(rgb)), 1));
        }
    }
}
