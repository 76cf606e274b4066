//! Runtime configuration for the picker.

use floem::kurbo::Point;

use crate::color::HexColor;
use crate::constants;
use crate::presets::{PresetColor, DEFAULT_ACCENT, PRESETS};
use crate::style::{AccentPalette, AccentStyles};

/// Picker settings. `Default` gives the built-in catalog and layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickerConfig {
    /// Starting accent, and the one substituted when a host-supplied accent
    /// cannot be resolved.
    pub default_accent: HexColor,
    /// Swatches offered in the dialog.
    pub presets: Vec<PresetColor>,
    /// Minimum distance kept between the dialog and the window edge.
    pub dialog_margin: f64,
    /// Top-left position of the dialog when first opened, as `(x, y)`.
    pub dialog_origin: (f64, f64),
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_accent: DEFAULT_ACCENT,
            presets: PRESETS.to_vec(),
            dialog_margin: constants::DIALOG_MARGIN,
            dialog_origin: constants::DIALOG_ORIGIN,
        }
    }
}

impl PickerConfig {
    pub fn dialog_origin(&self) -> Point {
        Point::new(self.dialog_origin.0, self.dialog_origin.1)
    }

    /// Host style strings for `hex`, falling back to `default_accent`.
    pub fn accent_styles(&self, hex: &str) -> AccentStyles {
        AccentPalette::from_hex_or(hex, self.default_accent).styles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtin_catalog() {
        let config = PickerConfig::default();
        assert_eq!(config.default_accent, DEFAULT_ACCENT);
        assert_eq!(config.presets.len(), 5);
        assert!(config.dialog_margin > 0.0);
    }

    #[test]
    fn styles_fall_back_to_configured_accent() {
        let config = PickerConfig {
            default_accent: PRESETS[1].hex,
            ..PickerConfig::default()
        };
        assert_eq!(config.accent_styles("#ZZZZZZ"), config.accent_styles("#A06A4F"));
        assert_ne!(config.accent_styles(""), PickerConfig::default().accent_styles(""));
        assert_eq!(config.accent_styles("fff").accent_color, "rgb(255, 255, 255)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn hex_fields_serialize_as_strings() {
        let config = PickerConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["default_accent"], "#5B7C99");
        assert_eq!(value["presets"][1]["label"], "Clay");
        let back: PickerConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
