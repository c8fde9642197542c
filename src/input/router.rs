use crate::eyedropper::CanvasEyedropper;
use crate::session::DrawingSession;
use crate::surface::Surface;

use super::{InputEvent, Key};

/// Routes an input event to the drawing session.
///
/// While the eyedropper is armed it behaves as a modal overlay: a press
/// samples the color shown under the pointer instead of starting a gesture
/// and Escape cancels the pick. Everything else reaches the session unchanged.
pub fn route_event<S: Surface>(
    event: &InputEvent,
    session: &mut DrawingSession<S>,
    eyedropper: &CanvasEyedropper,
) {
    match *event {
        InputEvent::PointerDown { position } => {
            if eyedropper.is_armed() {
                match session.sample_visible(position) {
                    Some(color) => {
                        eyedropper.sample(color);
                    }
                    None => {
                        eyedropper.cancel();
                    }
                }
                return;
            }
            session.pointer_down(position);
        }
        InputEvent::PointerMove { position } => session.pointer_move(position),
        InputEvent::PointerUp { .. } => session.pointer_up(),
        InputEvent::PointerLeave => session.pointer_leave(),
        InputEvent::KeyDown { key: Key::Escape } => {
            eyedropper.cancel();
            session.key_down(Key::Escape);
        }
        InputEvent::KeyDown { key } => session.key_down(key),
        InputEvent::KeyUp { key } => session.key_up(key),
    }
}
