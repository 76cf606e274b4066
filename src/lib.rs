//! # floem-accent
//!
//! An accent color picker for [Floem](https://github.com/lapce/floem) and
//! the color engine behind it.
//!
//! The engine is plain Rust and usable without a window: conversions
//! between hex, RGB, HSV and HSL ([`hex_to_rgb`], [`rgb_to_hsv`], ...),
//! hex input normalization ([`normalize_hex`]), the palette a host widget
//! renders from one accent ([`build_accent_styles`]), and the picker state
//! machine ([`PickerState`]) driven by UI events.
//!
//! The widget is a swatch that opens a draggable dialog with a
//! saturation/value surface, hue slider, hex and HSL inputs, and presets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_accent::{accent_picker, DEFAULT_ACCENT};
//!
//! let accent = RwSignal::new(DEFAULT_ACCENT);
//! // Mount `accent_picker(accent)` at the root of your Floem view tree.
//! ```

mod color;
mod config;
mod drag;
mod error;
mod math;
mod normalize;
mod picker;
mod presets;
mod style;

mod accent_dialog;
mod constants;
mod hue_slider;
mod inputs;
mod paint;
mod sv_surface;

pub use color::{
    hex_to_hsv, hex_to_rgb, hsl_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_hsv, HexColor,
    Hsl, Hsv, Rgb,
};
pub use config::PickerConfig;
pub use drag::{BoundsQuery, DragBounds, DragController, DragSession};
pub use error::ColorError;
pub use normalize::normalize_hex;
pub use picker::{AccentState, HslChannel, PickerEvent, PickerMode, PickerState};
pub use presets::{PresetColor, DEFAULT_ACCENT, PRESETS};
pub use style::{build_accent_styles, AccentPalette, AccentStyles};

use std::sync::Once;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate, SignalWith};
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the accent picker with the default configuration.
///
/// See [`accent_picker_with_config`].
pub fn accent_picker(accent: RwSignal<HexColor>) -> impl IntoView {
    accent_picker_with_config(accent, PickerConfig::default())
}

/// Creates the accent picker: a swatch that opens the picker dialog.
///
/// The picker reads from and writes to `accent`. External changes to the
/// signal are reflected in the dialog and committed edits update the
/// signal. The dialog overlay covers the picker's parent, so mount this at
/// the window root.
pub fn accent_picker_with_config(
    accent: RwSignal<HexColor>,
    config: PickerConfig,
) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });

    let mut initial = PickerState::with_config(&config);
    initial.set_accent(accent.get_untracked());
    tracing::debug!(accent = %initial.hex(), presets = config.presets.len(), "accent picker created");
    let state = RwSignal::new(initial);

    // External accent → picker
    create_effect(move |_| {
        let hex = accent.get();
        if state.with_untracked(|s| s.hex()) != hex {
            state.update(|s| {
                s.set_accent(hex);
            });
        }
    });

    // Picker → external accent
    create_effect(move |_| {
        let hex = state.with(|s| s.hex());
        if accent.get_untracked() != hex {
            accent.set(hex);
        }
    });

    stack((
        empty()
            .style(move |s| {
                let palette = state.with(|st| st.palette());
                s.size(28.0, 28.0)
                    .border_radius(constants::RADIUS)
                    .border(2.0)
                    .border_color(palette.border_color())
                    .background(palette.accent_color())
                    .cursor(floem::style::CursorStyle::Pointer)
            })
            .on_event_stop(EventListener::Click, move |_| {
                state.update(|s| {
                    s.open();
                });
            }),
        accent_dialog::accent_dialog(state, config),
    ))
    .style(|s| s.size_full())
}
