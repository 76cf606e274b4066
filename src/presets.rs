//! Built-in accent presets.

use std::borrow::Cow;

use crate::color::{HexColor, Rgb};

/// Fallback accent whenever a color cannot be resolved (Slate).
pub const DEFAULT_ACCENT: HexColor = HexColor::from_rgb(Rgb::new(0x5B, 0x7C, 0x99));

/// A named catalog color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetColor {
    pub hex: HexColor,
    pub label: Cow<'static, str>,
}

impl PresetColor {
    pub const fn new(hex: HexColor, label: &'static str) -> Self {
        Self {
            hex,
            label: Cow::Borrowed(label),
        }
    }
}

pub const PRESETS: [PresetColor; 5] = [
    PresetColor::new(DEFAULT_ACCENT, "Slate"),
    PresetColor::new(HexColor::from_rgb(Rgb::new(0xA0, 0x6A, 0x4F)), "Clay"),
    PresetColor::new(HexColor::from_rgb(Rgb::new(0x4C, 0x8A, 0x78)), "Teal"),
    PresetColor::new(HexColor::from_rgb(Rgb::new(0x8A, 0x7B, 0x5F)), "Sand"),
    PresetColor::new(HexColor::from_rgb(Rgb::new(0xC0, 0x6B, 0x6B)), "Rosewood"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_published_hex_values() {
        let hexes: Vec<String> = PRESETS.iter().map(|p| p.hex.to_string()).collect();
        assert_eq!(
            hexes,
            ["#5B7C99", "#A06A4F", "#4C8A78", "#8A7B5F", "#C06B6B"]
        );
    }

    #[test]
    fn default_accent_is_slate() {
        assert_eq!(DEFAULT_ACCENT.to_string(), "#5B7C99");
        assert_eq!(PRESETS[0].label, "Slate");
    }
}
