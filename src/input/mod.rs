use egui::{Context, PointerButton, Pos2, Rect};

mod router;
pub use router::route_event;

/// Keys the drawing surface reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Constrain modifier for the Rectangle tool
    Shift,
    /// Cancels an armed eyedropper pick
    Escape,
}

/// Input events in canvas pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved (with or without the button held)
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
    KeyDown { key: Key },
    KeyUp { key: Key },
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last pointer position in screen points, while over the canvas
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
    pixels_per_point: f32,
    shift_down: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pixels_per_point: 1.0,
            ..Self::default()
        }
    }

    /// Update where the canvas is drawn and its point-to-pixel scale
    pub fn set_canvas_rect(&mut self, rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = Some(rect);
        self.pixels_per_point = pixels_per_point;
    }

    /// Screen position to canvas pixel position
    pub fn to_canvas(&self, pos: Pos2) -> Option<Pos2> {
        let rect = self.canvas_rect?;
        Some(((pos - rect.min) * self.pixels_per_point).to_pos2())
    }

    fn over_canvas(&self, pos: Pos2) -> bool {
        self.canvas_rect.is_some_and(|rect| rect.contains(pos))
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            if input.modifiers.shift != self.shift_down {
                self.shift_down = input.modifiers.shift;
                events.push(if self.shift_down {
                    InputEvent::KeyDown { key: Key::Shift }
                } else {
                    InputEvent::KeyUp { key: Key::Shift }
                });
            }
            if input.key_pressed(egui::Key::Escape) {
                events.push(InputEvent::KeyDown { key: Key::Escape });
            }

            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.over_canvas(*pos));

            if input.pointer.button_pressed(PointerButton::Primary) {
                let origin = input.pointer.press_origin().or(hover);
                if let Some(position) = origin
                    .filter(|pos| self.over_canvas(*pos))
                    .and_then(|pos| self.to_canvas(pos))
                {
                    events.push(InputEvent::PointerDown { position });
                }
            }

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    if let Some(position) = self.to_canvas(pos) {
                        events.push(InputEvent::PointerMove { position });
                    }
                }
            }

            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(position) = hover.and_then(|pos| self.to_canvas(pos)) {
                    events.push(InputEvent::PointerUp { position });
                }
            }

            if hover.is_none() && self.last_pointer_pos.is_some() {
                events.push(InputEvent::PointerLeave);
            }
            self.last_pointer_pos = hover;
        });

        events
    }
}
