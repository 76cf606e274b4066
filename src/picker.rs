//! Picker state machine.
//!
//! [`PickerState`] owns the committed accent (HSV is authoritative, the hex
//! is derived from it), the dialog mode, the hex field draft and the
//! saturation/value drag session. Views never mutate these directly; every
//! UI event goes through one of the transitions below, or through
//! [`PickerState::apply`] with a [`PickerEvent`].

use floem::kurbo::{Point, Size};
use tracing::{debug, trace, warn};

use crate::color::{hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv, HexColor, Hsl, Hsv, Rgb};
use crate::config::PickerConfig;
use crate::drag::{DragBounds, DragController};
use crate::normalize::normalize_hex;
use crate::presets::PresetColor;
use crate::style::{AccentPalette, AccentStyles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// Dialog closed.
    #[default]
    Idle,
    /// Dialog visible and editable.
    Open,
}

/// One of the three HSL inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HslChannel {
    Hue,
    Saturation,
    Lightness,
}

/// UI events the picker reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    Open,
    Close,
    BackdropClick,
    Escape,
    /// Pointer down on the saturation/value surface, in control coordinates.
    SurfacePress { pos: Point, size: Size },
    SurfaceMove { pos: Point, size: Size },
    SurfaceRelease,
    SurfaceCancel,
    SetHue(u16),
    SetHslChannel(HslChannel, u16),
    EditHexDraft(String),
    CommitHexDraft,
    SelectPreset(PresetColor),
}

/// The committed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentState {
    pub hex: HexColor,
    pub hsv: Hsv,
}

impl AccentState {
    pub fn from_hex(hex: HexColor) -> Self {
        Self { hex, hsv: hex.hsv() }
    }

    pub fn from_hsv(hsv: Hsv) -> Self {
        Self {
            hex: HexColor::from_rgb(hsv_to_rgb(hsv)),
            hsv,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    mode: PickerMode,
    accent: AccentState,
    hex_draft: Option<String>,
    surface: DragController,
    default_accent: HexColor,
}

impl PickerState {
    pub fn new(accent: HexColor) -> Self {
        Self {
            mode: PickerMode::Idle,
            accent: AccentState::from_hex(accent),
            hex_draft: None,
            surface: DragController::new(),
            default_accent: accent,
        }
    }

    /// Starts at the configured default accent, which is also the fallback
    /// for [`set_accent_str`](Self::set_accent_str).
    pub fn with_config(config: &PickerConfig) -> Self {
        Self::new(config.default_accent)
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode == PickerMode::Open
    }

    pub fn accent(&self) -> AccentState {
        self.accent
    }

    pub fn hex(&self) -> HexColor {
        self.accent.hex
    }

    pub fn hsv(&self) -> Hsv {
        self.accent.hsv
    }

    pub fn rgb(&self) -> Rgb {
        self.accent.hex.rgb()
    }

    /// HSL of the committed hex, recomputed on every call.
    pub fn hsl(&self) -> Hsl {
        rgb_to_hsl(self.rgb())
    }

    /// Text the hex field should show: the draft while editing, otherwise
    /// the committed hex.
    pub fn hex_text(&self) -> String {
        match &self.hex_draft {
            Some(draft) => draft.clone(),
            None => self.accent.hex.to_string(),
        }
    }

    pub fn has_hex_draft(&self) -> bool {
        self.hex_draft.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.surface.is_active()
    }

    pub fn palette(&self) -> AccentPalette {
        AccentPalette::from_rgb(self.rgb())
    }

    pub fn styles(&self) -> AccentStyles {
        self.palette().styles()
    }

    /// Dispatches `event`. Returns whether anything visible changed.
    pub fn apply(&mut self, event: PickerEvent) -> bool {
        match event {
            PickerEvent::Open => self.open(),
            PickerEvent::Close => self.close(),
            PickerEvent::BackdropClick => self.backdrop_click(),
            PickerEvent::Escape => self.escape(),
            PickerEvent::SurfacePress { pos, size } => self.surface_press(pos, size),
            PickerEvent::SurfaceMove { pos, size } => self.surface_move(pos, size),
            PickerEvent::SurfaceRelease => self.surface_release(),
            PickerEvent::SurfaceCancel => {
                self.surface_cancel();
                false
            }
            PickerEvent::SetHue(h) => self.set_hue(h),
            PickerEvent::SetHslChannel(channel, value) => self.set_hsl_channel(channel, value),
            PickerEvent::EditHexDraft(text) => self.edit_hex_draft(text),
            PickerEvent::CommitHexDraft => self.commit_hex_draft(),
            PickerEvent::SelectPreset(preset) => self.select_preset(&preset),
        }
    }

    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        debug!(hex = %self.accent.hex, "picker opened");
        self.mode = PickerMode::Open;
        true
    }

    /// Closes the dialog. A pending hex draft is committed first, matching
    /// the field losing focus.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.commit_hex_draft();
        self.surface.cancel();
        self.mode = PickerMode::Idle;
        debug!(hex = %self.accent.hex, "picker closed");
        true
    }

    pub fn backdrop_click(&mut self) -> bool {
        self.close()
    }

    /// Escape discards a pending hex draft; with no draft it closes the
    /// dialog.
    pub fn escape(&mut self) -> bool {
        if self.discard_hex_draft() {
            return true;
        }
        self.close()
    }

    /// Replaces the committed color from outside the picker, e.g. when the
    /// host signal changes. Allowed while idle.
    pub fn set_accent(&mut self, hex: HexColor) -> bool {
        if hex == self.accent.hex {
            return false;
        }
        self.accent = AccentState::from_hex(hex);
        self.hex_draft = None;
        true
    }

    /// Like [`set_accent`](Self::set_accent) for a host that stores the
    /// accent as text. Unresolvable text selects the default accent.
    pub fn set_accent_str(&mut self, raw: &str) -> bool {
        let hex = match normalize_hex(raw) {
            Ok(hex) => hex,
            Err(err) => {
                warn!(%err, fallback = %self.default_accent, "substituting default accent");
                self.default_accent
            }
        };
        self.set_accent(hex)
    }

    fn editable(&self, what: &str) -> bool {
        if !self.is_open() {
            trace!(what, "ignored while picker is idle");
        }
        self.is_open()
    }

    pub fn surface_press(&mut self, pos: Point, size: Size) -> bool {
        if !self.editable("surface press") {
            return false;
        }
        let Some(norm) = normalize_to(pos, size) else {
            return false;
        };
        let norm = DragBounds::UnitSquare.clamp(norm);
        self.surface.press(norm, norm);
        self.apply_surface_point(norm)
    }

    pub fn surface_move(&mut self, pos: Point, size: Size) -> bool {
        let Some(norm) = normalize_to(pos, size) else {
            return false;
        };
        match self.surface.move_to(norm, &DragBounds::UnitSquare) {
            Some(point) => self.apply_surface_point(point),
            None => false,
        }
    }

    pub fn surface_release(&mut self) -> bool {
        if self.surface.release() {
            debug!(hsv = ?self.accent.hsv, "surface drag finished");
        }
        false
    }

    pub fn surface_cancel(&mut self) {
        self.surface.cancel();
    }

    /// `x` is saturation left to right, `y` is value top (full) to bottom.
    fn apply_surface_point(&mut self, p: Point) -> bool {
        let hsv = Hsv::new(
            self.accent.hsv.h,
            (p.x * 100.0).round() as u8,
            ((1.0 - p.y) * 100.0).round() as u8,
        );
        trace!(?hsv, "surface update");
        self.commit_hsv(hsv)
    }

    /// Hue in degrees, 0–360; 360 wraps to 0.
    pub fn set_hue(&mut self, hue: u16) -> bool {
        if !self.editable("hue change") {
            return false;
        }
        let hsv = Hsv::new(hue.min(360), self.accent.hsv.s, self.accent.hsv.v);
        self.commit_hsv(hsv)
    }

    /// Edits one HSL channel against the HSL derived from the committed
    /// hex. HSV is re-derived from the result, so at the saturation/value
    /// extremes the untouched components can shift.
    pub fn set_hsl_channel(&mut self, channel: HslChannel, value: u16) -> bool {
        if !self.editable("hsl change") {
            return false;
        }
        let hsl = self.hsl();
        let hsl = match channel {
            HslChannel::Hue => Hsl::new(value.min(360), hsl.s, hsl.l),
            HslChannel::Saturation => Hsl::new(hsl.h, percent(value), hsl.l),
            HslChannel::Lightness => Hsl::new(hsl.h, hsl.s, percent(value)),
        };
        let rgb = hsl_to_rgb(hsl);
        let next = AccentState {
            hex: HexColor::from_rgb(rgb),
            hsv: rgb_to_hsv(rgb),
        };
        debug!(?channel, value, hex = %next.hex, "hsl channel edited");
        self.replace(next)
    }

    pub fn edit_hex_draft(&mut self, text: String) -> bool {
        if !self.editable("hex edit") {
            return false;
        }
        if self.hex_draft.as_deref() == Some(text.as_str()) {
            return false;
        }
        self.hex_draft = Some(text);
        true
    }

    /// Commits the hex draft if it normalizes; otherwise drops it and keeps
    /// the committed color.
    pub fn commit_hex_draft(&mut self) -> bool {
        let Some(draft) = self.hex_draft.take() else {
            return false;
        };
        match normalize_hex(&draft) {
            Ok(hex) => {
                debug!(%hex, "hex committed");
                self.replace(AccentState::from_hex(hex));
            }
            Err(err) => debug!(%err, "hex draft discarded"),
        }
        // The field text changes either way.
        true
    }

    pub fn discard_hex_draft(&mut self) -> bool {
        self.hex_draft.take().is_some()
    }

    pub fn select_preset(&mut self, preset: &PresetColor) -> bool {
        if !self.editable("preset") {
            return false;
        }
        debug!(label = %preset.label, hex = %preset.hex, "preset selected");
        self.hex_draft = None;
        self.replace(AccentState::from_hex(preset.hex))
    }

    fn commit_hsv(&mut self, hsv: Hsv) -> bool {
        self.replace(AccentState::from_hsv(hsv))
    }

    fn replace(&mut self, next: AccentState) -> bool {
        if next == self.accent {
            return false;
        }
        self.accent = next;
        true
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::with_config(&PickerConfig::default())
    }
}

fn percent(value: u16) -> u8 {
    value.min(100) as u8
}

fn normalize_to(pos: Point, size: Size) -> Option<Point> {
    if size.width <= 0.0 || size.height <= 0.0 {
        return None;
    }
    Some(Point::new(pos.x / size.width, pos.y / size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{DEFAULT_ACCENT, PRESETS};

    const SURFACE: Size = Size::new(200.0, 100.0);

    fn open_at_hue(h: u16) -> PickerState {
        let mut state = PickerState::new(DEFAULT_ACCENT);
        state.open();
        state.set_hue(h);
        state
    }

    #[test]
    fn starts_idle_with_default_accent() {
        let state = PickerState::default();
        assert_eq!(state.mode(), PickerMode::Idle);
        assert_eq!(state.hex(), DEFAULT_ACCENT);
        assert_eq!(state.hsv(), DEFAULT_ACCENT.hsv());
        assert_eq!(state.hex_text(), "#5B7C99");
    }

    #[test]
    fn open_close_cycle() {
        let mut state = PickerState::default();
        assert!(!state.close());
        assert!(state.open());
        assert!(!state.open());
        assert!(state.close());
        assert!(state.open());
        assert!(state.backdrop_click());
        assert!(state.open());
        assert!(state.escape());
        assert!(!state.is_open());
    }

    #[test]
    fn edits_are_ignored_while_idle() {
        let mut state = PickerState::default();
        let before = state.clone();
        assert!(!state.set_hue(10));
        assert!(!state.surface_press(Point::new(10.0, 10.0), SURFACE));
        assert!(!state.set_hsl_channel(HslChannel::Lightness, 90));
        assert!(!state.edit_hex_draft("#000".into()));
        assert!(!state.select_preset(&PRESETS[1]));
        assert_eq!(state, before);
    }

    #[test]
    fn surface_top_right_is_full_saturation_and_value() {
        let mut state = open_at_hue(210);
        state.surface_press(Point::new(SURFACE.width, 0.0), SURFACE);
        assert_eq!(state.hsv(), Hsv::new(210, 100, 100));
        assert_eq!(state.hex(), HexColor::from_rgb(hsv_to_rgb(Hsv::new(210, 100, 100))));
    }

    #[test]
    fn surface_bottom_left_is_black_but_keeps_hue() {
        let mut state = open_at_hue(210);
        state.surface_press(Point::new(0.0, SURFACE.height), SURFACE);
        assert_eq!(state.hsv(), Hsv::new(210, 0, 0));
        assert_eq!(state.hex().to_string(), "#000000");
    }

    #[test]
    fn surface_drag_clamps_outside_the_box() {
        let mut state = open_at_hue(30);
        state.surface_press(Point::new(100.0, 50.0), SURFACE);
        assert_eq!(state.hsv(), Hsv::new(30, 50, 50));
        assert!(state.is_dragging());
        state.surface_move(Point::new(500.0, -40.0), SURFACE);
        assert_eq!(state.hsv(), Hsv::new(30, 100, 100));
        state.surface_move(Point::new(-10.0, 400.0), SURFACE);
        assert_eq!(state.hsv(), Hsv::new(30, 0, 0));
        state.surface_release();
        assert!(!state.is_dragging());
        assert!(!state.surface_move(Point::new(100.0, 50.0), SURFACE));
        assert_eq!(state.hsv(), Hsv::new(30, 0, 0));
    }

    #[test]
    fn surface_move_without_press_is_noop() {
        let mut state = open_at_hue(30);
        let before = state.accent();
        assert!(!state.surface_move(Point::new(10.0, 10.0), SURFACE));
        assert!(!state.surface_release());
        assert_eq!(state.accent(), before);
    }

    #[test]
    fn zero_sized_surface_is_ignored() {
        let mut state = open_at_hue(30);
        assert!(!state.surface_press(Point::new(0.0, 0.0), Size::ZERO));
        assert!(!state.is_dragging());
    }

    #[test]
    fn hue_change_keeps_saturation_and_value() {
        let mut state = open_at_hue(0);
        let Hsv { s, v, .. } = state.hsv();
        assert!(state.set_hue(120));
        assert_eq!(state.hsv(), Hsv::new(120, s, v));
        assert!(state.set_hue(360));
        assert_eq!(state.hsv().h, 0);
    }

    #[test]
    fn hsl_edit_rederives_hsv() {
        let mut state = PickerState::default();
        state.open();
        assert!(state.set_hsl_channel(HslChannel::Lightness, 50));
        let rgb = state.rgb();
        assert_eq!(state.hsv(), rgb_to_hsv(rgb));
        assert_eq!(state.hsl().l, 50);
    }

    #[test]
    fn hsl_edit_at_black_loses_hue() {
        let mut state = open_at_hue(210);
        state.surface_press(Point::new(SURFACE.width, SURFACE.height), SURFACE);
        state.surface_release();
        assert_eq!(state.hsv(), Hsv::new(210, 100, 0));
        // Derived HSL of black is (0, 0, 0), so raising lightness gives gray.
        state.set_hsl_channel(HslChannel::Lightness, 40);
        assert_eq!(state.hsv().h, 0);
        assert_eq!(state.hsv().s, 0);
    }

    #[test]
    fn valid_hex_commit_updates_color() {
        let mut state = PickerState::default();
        state.open();
        state.edit_hex_draft(" a06a4f".into());
        assert_eq!(state.hex_text(), " a06a4f");
        assert_eq!(state.hex(), DEFAULT_ACCENT);
        assert!(state.commit_hex_draft());
        assert_eq!(state.hex().to_string(), "#A06A4F");
        assert_eq!(state.hsv(), rgb_to_hsv(state.rgb()));
        assert_eq!(state.hex_text(), "#A06A4F");
    }

    #[test]
    fn invalid_hex_commit_keeps_committed_color() {
        let mut state = PickerState::default();
        state.open();
        let before = state.accent();
        state.edit_hex_draft("xyz".into());
        state.commit_hex_draft();
        assert_eq!(state.accent(), before);
        assert_eq!(state.hex_text(), "#5B7C99");
        assert!(!state.has_hex_draft());
    }

    #[test]
    fn escape_discards_draft_before_closing() {
        let mut state = PickerState::default();
        state.open();
        state.edit_hex_draft("#000000".into());
        assert!(state.escape());
        assert!(state.is_open());
        assert_eq!(state.hex(), DEFAULT_ACCENT);
        assert_eq!(state.hex_text(), "#5B7C99");
        assert!(state.escape());
        assert!(!state.is_open());
    }

    #[test]
    fn closing_commits_pending_draft() {
        let mut state = PickerState::default();
        state.open();
        state.edit_hex_draft("4c8a78".into());
        state.backdrop_click();
        assert_eq!(state.hex().to_string(), "#4C8A78");
    }

    #[test]
    fn preset_jumps_directly() {
        let mut state = PickerState::default();
        state.open();
        state.edit_hex_draft("12".into());
        assert!(state.select_preset(&PRESETS[4]));
        assert_eq!(state.hex().to_string(), "#C06B6B");
        assert_eq!(state.hsv(), PRESETS[4].hex.hsv());
        assert!(!state.has_hex_draft());
    }

    #[test]
    fn external_accent_applies_while_idle() {
        let mut state = PickerState::default();
        assert!(state.set_accent(PRESETS[2].hex));
        assert_eq!(state.hex(), PRESETS[2].hex);
        assert!(!state.set_accent(PRESETS[2].hex));
    }

    #[test]
    fn unresolvable_host_text_selects_configured_default() {
        let config = PickerConfig {
            default_accent: PRESETS[2].hex,
            ..PickerConfig::default()
        };
        let mut state = PickerState::with_config(&config);
        assert!(state.set_accent_str("#C06B6B"));
        assert_eq!(state.hex(), PRESETS[4].hex);
        assert!(state.set_accent_str("not a color"));
        assert_eq!(state.hex(), PRESETS[2].hex);
        assert!(state.set_accent_str(" b08a5a "));
        assert_eq!(state.hex().to_string(), "#B08A5A");
    }

    #[test]
    fn apply_dispatches_events() {
        let mut state = PickerState::default();
        assert!(state.apply(PickerEvent::Open));
        assert!(state.apply(PickerEvent::SetHue(210)));
        assert!(state.apply(PickerEvent::SurfacePress {
            pos: Point::new(SURFACE.width, 0.0),
            size: SURFACE,
        }));
        assert!(!state.apply(PickerEvent::SurfaceRelease));
        assert_eq!(state.hsv(), Hsv::new(210, 100, 100));
        assert!(state.apply(PickerEvent::EditHexDraft("zzz".into())));
        assert!(state.apply(PickerEvent::CommitHexDraft));
        assert_eq!(state.hsv(), Hsv::new(210, 100, 100));
        assert!(state.apply(PickerEvent::SelectPreset(PRESETS[1].clone())));
        assert!(state.apply(PickerEvent::Escape));
        assert_eq!(state.mode(), PickerMode::Idle);
    }

    #[test]
    fn styles_follow_the_committed_color() {
        let state = PickerState::default();
        assert_eq!(state.styles().accent_soft, "rgba(91, 124, 153, 0.12)");
    }
}
