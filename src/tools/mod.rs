use crate::settings::Settings;
use crate::style::{CompositeRule, CursorHint};

/// Enum representing all available tool modes.
///
/// Exactly one mode is active at a time. Every place that interprets pointer
/// input or applies mode-entry parameters matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
    Rectangle,
    Ellipse,
    Picker,
}

/// Paint parameters applied once when a mode is entered.
///
/// `None` leaves the previous value in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeEntry {
    pub composite: Option<CompositeRule>,
    pub width: Option<f32>,
    pub cursor: CursorHint,
}

impl ToolMode {
    pub const ALL: [ToolMode; 5] = [
        ToolMode::Draw,
        ToolMode::Erase,
        ToolMode::Rectangle,
        ToolMode::Ellipse,
        ToolMode::Picker,
    ];

    /// Return the name of the tool
    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "Draw",
            Self::Erase => "Erase",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Picker => "Picker",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Draw => "✏",
            Self::Erase => "⌫",
            Self::Rectangle => "◻",
            Self::Ellipse => "◯",
            Self::Picker => "💧",
        }
    }

    /// Shape tools repaint from the gesture snapshot on every move.
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse)
    }

    pub fn entry(self, settings: &Settings) -> ModeEntry {
        match self {
            Self::Draw => ModeEntry {
                composite: Some(CompositeRule::SourceOver),
                width: Some(settings.line_width),
                cursor: CursorHint::Default,
            },
            Self::Rectangle | Self::Ellipse => ModeEntry {
                composite: Some(CompositeRule::SourceOver),
                width: Some(settings.line_width),
                cursor: CursorHint::ResizeCorner,
            },
            Self::Erase => ModeEntry {
                composite: Some(CompositeRule::DestinationOut),
                width: Some(settings.eraser_width),
                cursor: CursorHint::Eraser,
            },
            // inherits the paint params of whatever mode was active
            Self::Picker => ModeEntry {
                composite: None,
                width: None,
                cursor: CursorHint::Picker,
            },
        }
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rectangle_and_ellipse_are_shapes() {
        let shapes: Vec<_> = ToolMode::ALL.into_iter().filter(|mode| mode.is_shape()).collect();
        assert_eq!(shapes, [ToolMode::Rectangle, ToolMode::Ellipse]);
    }

    #[test]
    fn test_entry_table() {
        let settings = Settings::default();

        let erase = ToolMode::Erase.entry(&settings);
        assert_eq!(erase.composite, Some(CompositeRule::DestinationOut));
        assert_eq!(erase.width, Some(20.0));
        assert_eq!(erase.cursor, CursorHint::Eraser);

        for mode in [ToolMode::Draw, ToolMode::Rectangle, ToolMode::Ellipse] {
            let entry = mode.entry(&settings);
            assert_eq!(entry.composite, Some(CompositeRule::SourceOver));
            assert_eq!(entry.width, Some(2.0));
        }
        assert_eq!(ToolMode::Rectangle.entry(&settings).cursor, CursorHint::ResizeCorner);

        let picker = ToolMode::Picker.entry(&settings);
        assert_eq!(picker.composite, None);
        assert_eq!(picker.width, None);
        assert_eq!(picker.cursor, CursorHint::Picker);
    }
}
