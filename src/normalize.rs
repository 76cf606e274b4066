//! Validation of free-text hex input.

use crate::color::{hex_to_rgb, HexColor};
use crate::error::ColorError;

/// Normalize a user-typed hex string into a [`HexColor`].
///
/// Surrounding whitespace and one leading `#` are ignored. Exactly 3 or 6
/// hex digits are accepted; the 3-digit form is expanded. Everything else
/// is rejected whole, never partially applied.
pub fn normalize_hex(raw: &str) -> Result<HexColor, ColorError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) || !matches!(stripped.len(), 3 | 6) {
        tracing::debug!(input = raw, "rejected hex input");
        return Err(ColorError::InvalidHexFormat(raw.to_string()));
    }
    hex_to_rgb(stripped).map(HexColor::from_rgb)
}
