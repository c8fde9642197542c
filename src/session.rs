//! The drawing session: tool mode, gesture and style state, and the canvas
//! they paint into.
//!
//! Pointer events are interpreted by the active [`ToolMode`]:
//!
//! ```text
//!             pointer_down                 pointer_up / pointer_leave
//!   ┌──────┐ ─────────────► ┌────────────┐ ─────────────────────────► ┌──────┐
//!   │ Idle │                │   Active   │                            │ Idle │
//!   └──────┘                └─────┬──────┘                            └──────┘
//!                                 │ pointer_move
//!                                 ▼
//!          Draw / Erase     : segment last → pos, no restore
//!          Rectangle        : restore snapshot, outline from start
//!          Ellipse          : restore snapshot, circle around start
//!          Picker           : nothing
//! ```
//!
//! Shape tools never accumulate previews: each move restores the buffer
//! captured at pointer-down before painting, so the last preview is the
//! committed shape.

use std::task::{Context, Poll};

use egui::{Color32, Pos2, Vec2};
use futures::task::noop_waker_ref;
use futures::FutureExt;

use crate::canvas::Canvas;
use crate::error::PickError;
use crate::eyedropper::{Eyedropper, NoEyedropper, PickFuture, PickResult};
use crate::input::Key;
use crate::settings::Settings;
use crate::state::GestureState;
use crate::style::{CursorHint, StrokeStyle};
use crate::surface::Surface;
use crate::tools::ToolMode;

/// How an eyedropper pick ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The color was adopted and the previous mode restored
    Picked(Color32),
    /// Nothing changed; the session stays in Picker mode
    Cancelled(PickError),
}

pub struct DrawingSession<S: Surface = Canvas> {
    settings: Settings,
    surface: S,
    mode: ToolMode,
    /// Mode to return to after a successful pick
    previous_mode: Option<ToolMode>,
    style: StrokeStyle,
    cursor: CursorHint,
    constrain: bool,
    gesture: GestureState<S::Snapshot>,
    pending_pick: Option<PickFuture>,
    eyedropper: Box<dyn Eyedropper>,
    /// Bumped on every buffer mutation
    revision: u64,
}

impl DrawingSession<Canvas> {
    /// A white canvas of the given size in Draw mode.
    pub fn with_size(settings: Settings, width: u32, height: u32) -> Self {
        Self::new(settings, Canvas::new(width, height))
    }
}

impl<S: Surface> DrawingSession<S> {
    pub fn new(settings: Settings, surface: S) -> Self {
        let mut session = Self {
            style: StrokeStyle::new(settings.color, settings.line_width),
            settings,
            surface,
            mode: ToolMode::Draw,
            previous_mode: None,
            cursor: CursorHint::Default,
            constrain: false,
            gesture: GestureState::Idle,
            pending_pick: None,
            eyedropper: Box::new(NoEyedropper),
            revision: 0,
        };
        session.surface.fill(session.settings.background);
        session.enter_mode(ToolMode::Draw);
        session
    }

    pub fn with_eyedropper(mut self, eyedropper: Box<dyn Eyedropper>) -> Self {
        self.eyedropper = eyedropper;
        self
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn previous_mode(&self) -> Option<ToolMode> {
        self.previous_mode
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Current stroke color, also the value shown by the color selector.
    pub fn color(&self) -> Color32 {
        self.style.color
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn constrain(&self) -> bool {
        self.constrain
    }

    pub fn gesture(&self) -> &GestureState<S::Snapshot> {
        &self.gesture
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn has_pending_pick(&self) -> bool {
        self.pending_pick.is_some()
    }

    pub fn picker_available(&self) -> bool {
        self.eyedropper.is_available()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The color shown at `pos`: the buffer pixel over the background, always
    /// opaque. Positions past the edges are clamped into the buffer.
    pub fn sample_visible(&self, pos: Pos2) -> Option<Color32> {
        let (width, height) = (self.surface.width(), self.surface.height());
        if width == 0 || height == 0 {
            return None;
        }
        let x = (pos.x.max(0.0) as u32).min(width - 1);
        let y = (pos.y.max(0.0) as u32).min(height - 1);
        let pixel = self.surface.pixel(x, y)?;
        Some(over_background(pixel, self.settings.background))
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.gesture.is_active() {
            return;
        }
        log::trace!("gesture started at {pos:?} in {} mode", self.mode);
        self.gesture = GestureState::Active {
            start: pos,
            last: pos,
            snapshot: self.surface.snapshot(),
        };
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        let GestureState::Active {
            start,
            last,
            snapshot,
        } = &mut self.gesture
        else {
            return;
        };

        if self.mode.is_shape() {
            self.surface.restore(snapshot);
        }
        match self.mode {
            ToolMode::Draw | ToolMode::Erase => {
                self.surface.stroke_line(*last, pos, &self.style);
                *last = pos;
            }
            ToolMode::Rectangle => {
                let size = rect_extent(*start, pos, self.constrain);
                self.surface.stroke_rect(*start, size, &self.style);
            }
            ToolMode::Ellipse => {
                self.surface
                    .stroke_circle(*start, start.distance(pos), &self.style);
            }
            ToolMode::Picker => return,
        }
        self.revision += 1;
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    pub fn pointer_leave(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        if self.gesture.is_active() {
            log::trace!("gesture ended in {} mode", self.mode);
        }
        self.gesture = GestureState::Idle;
    }

    /// Switch the tool used by subsequent pointer events.
    ///
    /// An active gesture is not interrupted. Entering Picker opens the
    /// eyedropper; the pick completes later through [`Self::poll_pick`].
    pub fn set_mode(&mut self, mode: ToolMode) {
        let old = self.mode;
        self.enter_mode(mode);

        if mode != ToolMode::Picker {
            if self.pending_pick.take().is_some() {
                log::debug!("pending color pick discarded by switch to {mode}");
            }
            return;
        }

        if old != ToolMode::Picker {
            self.previous_mode = Some(old);
        }
        if !self.eyedropper.is_available() {
            log::debug!("no eyedropper available, staying in Picker mode");
            self.pending_pick = None;
            return;
        }
        self.pending_pick = Some(self.eyedropper.open());
    }

    /// Apply mode-entry parameters. Runs exactly once per mode change.
    fn enter_mode(&mut self, mode: ToolMode) {
        let entry = mode.entry(&self.settings);
        if let Some(composite) = entry.composite {
            self.style.composite = composite;
        }
        if let Some(width) = entry.width {
            self.style.width = width;
        }
        self.cursor = entry.cursor;
        self.mode = mode;
        log::info!("tool mode: {mode}");
    }

    /// Drive the pending eyedropper pick without blocking.
    ///
    /// Returns `None` while the pick is still open or when none is pending.
    pub fn poll_pick(&mut self) -> Option<PickOutcome> {
        let pending = self.pending_pick.as_mut()?;
        let mut cx = Context::from_waker(noop_waker_ref());
        let Poll::Ready(result) = pending.poll_unpin(&mut cx) else {
            return None;
        };
        self.pending_pick = None;
        self.resolve_pick(result)
    }

    /// Apply the result of a pick. Ignored unless the session is in Picker mode.
    pub fn resolve_pick(&mut self, result: PickResult) -> Option<PickOutcome> {
        if self.mode != ToolMode::Picker {
            return None;
        }
        self.pending_pick = None;

        match result {
            Ok(color) => {
                self.style.color = color;
                let back = self.previous_mode.take().unwrap_or_default();
                self.set_mode(back);
                Some(PickOutcome::Picked(color))
            }
            Err(err) => {
                log::debug!("color pick ended without a color: {err}");
                Some(PickOutcome::Cancelled(err))
            }
        }
    }

    /// The color input widget changed.
    pub fn set_color(&mut self, color: Color32) {
        self.style.color = color;
    }

    pub fn set_constrain(&mut self, held: bool) {
        self.constrain = held;
    }

    pub fn key_down(&mut self, key: Key) {
        if key == Key::Shift {
            self.constrain = true;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if key == Key::Shift {
            self.constrain = false;
        }
    }

    /// Blank the whole buffer to transparent.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.revision += 1;
    }

    /// Reallocate the buffer to new viewport dimensions and refill it with
    /// the background. Any active gesture is dropped with it.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("canvas resized to {width}x{height}");
        self.gesture = GestureState::Idle;
        self.surface.resize(width, height);
        self.surface.fill(self.settings.background);
        self.revision += 1;
    }
}

/// Width and height of a rectangle dragged from `start` to `pos`.
///
/// With `constrain`, both axes take the smaller magnitude and keep their own
/// sign. A zero delta counts as negative.
pub fn rect_extent(start: Pos2, pos: Pos2, constrain: bool) -> Vec2 {
    let delta = pos - start;
    if !constrain {
        return delta;
    }
    let side = delta.x.abs().min(delta.y.abs());
    let signed = |d: f32| if d > 0.0 { side } else { -side };
    Vec2::new(signed(delta.x), signed(delta.y))
}

/// Composite `top` over `base` and drop the alpha channel.
fn over_background(top: Color32, base: Color32) -> Color32 {
    let [r, g, b, a] = top.to_srgba_unmultiplied();
    let [br, bg, bb, _] = base.to_srgba_unmultiplied();
    let alpha = u16::from(a);
    let mix = |fg: u8, bg: u8| {
        ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8
    };
    Color32::from_rgb(mix(r, br), mix(g, bg), mix(b, bb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::CompositeRule;

    fn session() -> DrawingSession {
        DrawingSession::with_size(Settings::default(), 64, 64)
    }

    #[test]
    fn test_starts_in_draw_mode_on_white() {
        let session = session();
        assert_eq!(session.mode(), ToolMode::Draw);
        assert_eq!(session.style().width, 2.0);
        assert_eq!(session.style().composite, CompositeRule::SourceOver);
        assert_eq!(session.surface().pixel(10, 10), Some(Color32::WHITE));
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_rect_extent_unconstrained() {
        let extent = rect_extent(Pos2::new(10.0, 10.0), Pos2::new(40.0, -5.0), false);
        assert_eq!(extent, Vec2::new(30.0, -15.0));
    }

    #[test]
    fn test_rect_extent_constrained_keeps_signs() {
        let extent = rect_extent(Pos2::new(10.0, 10.0), Pos2::new(40.0, -5.0), true);
        assert_eq!(extent, Vec2::new(15.0, -15.0));

        let extent = rect_extent(Pos2::new(50.0, 50.0), Pos2::new(20.0, 58.0), true);
        assert_eq!(extent, Vec2::new(-8.0, 8.0));
    }

    #[test]
    fn test_move_without_gesture_is_noop() {
        let mut session = session();
        let before = session.surface().data().to_vec();
        session.pointer_move(Pos2::new(30.0, 30.0));
        assert_eq!(session.surface().data(), before.as_slice());
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_second_pointer_down_keeps_first_start() {
        let mut session = session();
        session.pointer_down(Pos2::new(5.0, 5.0));
        session.pointer_down(Pos2::new(40.0, 40.0));
        assert_eq!(session.gesture().start(), Some(Pos2::new(5.0, 5.0)));
    }

    #[test]
    fn test_draw_updates_last_point() {
        let mut session = session();
        session.pointer_down(Pos2::new(5.0, 5.0));
        session.pointer_move(Pos2::new(20.0, 5.0));
        assert_eq!(session.gesture().last(), Some(Pos2::new(20.0, 5.0)));
        assert_eq!(session.gesture().start(), Some(Pos2::new(5.0, 5.0)));
        session.pointer_leave();
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_shift_tracking() {
        let mut session = session();
        session.key_down(Key::Shift);
        assert!(session.constrain());
        session.key_down(Key::Escape);
        assert!(session.constrain());
        session.key_up(Key::Shift);
        assert!(!session.constrain());
    }

    #[test]
    fn test_over_background_is_opaque() {
        let half_red = Color32::from_rgba_unmultiplied(255, 0, 0, 128);
        let seen = over_background(half_red, Color32::WHITE);
        assert_eq!(seen.a(), 255);
        assert_eq!((seen.g(), seen.b()), (127, 127));
        assert!(seen.r() > 250);
        assert_eq!(over_background(Color32::TRANSPARENT, Color32::WHITE), Color32::WHITE);
        assert_eq!(over_background(Color32::BLUE, Color32::WHITE), Color32::BLUE);
    }

    #[test]
    fn test_sample_visible_after_clear_shows_background() {
        let mut session = session();
        session.clear();
        assert_eq!(session.surface().pixel(4, 4).map(|c| c.a()), Some(0));
        assert_eq!(session.sample_visible(Pos2::new(4.0, 4.0)), Some(Color32::WHITE));
    }

    #[test]
    fn test_sample_visible_clamps_to_edges() {
        let session = session();
        assert_eq!(session.sample_visible(Pos2::new(64.0, 64.0)), Some(Color32::WHITE));
        assert_eq!(session.sample_visible(Pos2::new(-3.0, 500.0)), Some(Color32::WHITE));

        let empty = DrawingSession::with_size(Settings::default(), 0, 0);
        assert_eq!(empty.sample_visible(Pos2::ZERO), None);
    }

    #[test]
    fn test_resize_drops_gesture() {
        let mut session = session();
        session.pointer_down(Pos2::new(5.0, 5.0));
        session.resize(32, 16);
        assert!(!session.is_drawing());
        assert_eq!(session.surface().width(), 32);
        assert_eq!(session.surface().height(), 16);
    }
}
