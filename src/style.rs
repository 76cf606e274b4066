//! Projection of one accent color onto the palette the host widget renders.
//!
//! The host consumes the palette as CSS custom properties; the picker's own
//! Floem views paint with the same values through [`AccentPalette`].

use floem::peniko::Color;

use crate::color::{hex_to_rgb, HexColor, Rgb};
use crate::presets::DEFAULT_ACCENT;

/// Alpha of the translucent accent fill.
pub const SOFT_ALPHA: f64 = 0.12;
/// Alpha of the accent border.
pub const BORDER_ALPHA: f64 = 0.22;

/// Light gray the background gradient ends on.
const BG_END_TARGET: Rgb = Rgb::new(226, 231, 240);
const BG_START_WEIGHT: f64 = 0.86;
const BG_END_WEIGHT: f64 = 0.78;

/// Resolved palette colors for one accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    pub accent: Rgb,
    pub bg_start: Rgb,
    pub bg_end: Rgb,
}

/// CSS color strings for the host widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentStyles {
    pub accent_color: String,
    pub accent_soft: String,
    pub accent_border: String,
    pub bg_start: String,
    pub bg_end: String,
}

impl AccentPalette {
    pub fn from_rgb(accent: Rgb) -> Self {
        Self {
            accent,
            bg_start: accent.mix(Rgb::WHITE, BG_START_WEIGHT),
            bg_end: accent.mix(BG_END_TARGET, BG_END_WEIGHT),
        }
    }

    /// Resolves `hex`, falling back to `fallback` when it does not parse.
    pub fn from_hex_or(hex: &str, fallback: HexColor) -> Self {
        let accent = match hex_to_rgb(hex) {
            Ok(rgb) => rgb,
            Err(err) => {
                tracing::warn!(%err, %fallback, "substituting fallback accent");
                fallback.rgb()
            }
        };
        Self::from_rgb(accent)
    }

    pub fn styles(&self) -> AccentStyles {
        AccentStyles {
            accent_color: self.accent.to_css(),
            accent_soft: self.accent.to_css_alpha(SOFT_ALPHA),
            accent_border: self.accent.to_css_alpha(BORDER_ALPHA),
            bg_start: self.bg_start.to_css(),
            bg_end: self.bg_end.to_css(),
        }
    }

    pub fn accent_color(&self) -> Color {
        color(self.accent, 1.0)
    }

    pub fn soft_color(&self) -> Color {
        color(self.accent, SOFT_ALPHA)
    }

    pub fn border_color(&self) -> Color {
        color(self.accent, BORDER_ALPHA)
    }

    pub fn bg_start_color(&self) -> Color {
        color(self.bg_start, 1.0)
    }

    pub fn bg_end_color(&self) -> Color {
        color(self.bg_end, 1.0)
    }
}

impl AccentStyles {
    /// Custom-property name/value pairs, in declaration order.
    pub fn css_vars(&self) -> [(&'static str, &str); 5] {
        [
            ("--accent-color", self.accent_color.as_str()),
            ("--accent-soft", self.accent_soft.as_str()),
            ("--accent-border", self.accent_border.as_str()),
            ("--bg-start", self.bg_start.as_str()),
            ("--bg-end", self.bg_end.as_str()),
        ]
    }
}

fn color(rgb: Rgb, alpha: f64) -> Color {
    Color::rgba8(rgb.r, rgb.g, rgb.b, (alpha * 255.0).round() as u8)
}

/// Builds the host style strings for `hex`, using the default accent when
/// `hex` is not a valid color.
pub fn build_accent_styles(hex: &str) -> AccentStyles {
    AccentPalette::from_hex_or(hex, DEFAULT_ACCENT).styles()
}
