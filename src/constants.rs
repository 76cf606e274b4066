//! Sizing, color, and styling constants for the picker.

/// Hue slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Cursor circle radius on the saturation/value surface
pub const CURSOR_RADIUS: f64 = 7.0;

/// Thumb radius on the hue slider
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for the surface, swatches and dialog
pub const RADIUS: f32 = 6.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding inside the dialog
pub const PADDING: f32 = 12.0;

/// Numeric input field width
pub const INPUT_WIDTH: f32 = 32.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 72.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Dialog width
pub const DIALOG_WIDTH: f32 = 248.0;

/// Saturation/value surface height
pub const SURFACE_HEIGHT: f32 = 150.0;

/// Fixed raster resolution of the saturation/value surface, scaled to fit
pub const SURFACE_RASTER_SIZE: u32 = 128;

/// Preset swatch side length
pub const SWATCH_SIZE: f32 = 22.0;

/// Keep-out distance between the dialog and the window edge
pub const DIALOG_MARGIN: f64 = 8.0;

/// Dialog position the first time it opens
pub const DIALOG_ORIGIN: (f64, f64) = (24.0, 24.0);
