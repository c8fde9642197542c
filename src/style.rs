use egui::Color32;

/// How new paint combines with the pixels already in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeRule {
    /// Paint over existing pixels
    #[default]
    SourceOver,
    /// Remove existing pixels where the stroke lands, leaving transparency
    DestinationOut,
}

impl CompositeRule {
    pub(crate) fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            Self::SourceOver => tiny_skia::BlendMode::SourceOver,
            Self::DestinationOut => tiny_skia::BlendMode::DestinationOut,
        }
    }
}

/// Parameters every paint operation is issued with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub composite: CompositeRule,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            composite: CompositeRule::SourceOver,
        }
    }
}

/// Pointer appearance requested by the active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    ResizeCorner,
    Eraser,
    Picker,
}

impl CursorHint {
    pub fn cursor_icon(self) -> egui::CursorIcon {
        match self {
            Self::Default => egui::CursorIcon::Default,
            Self::ResizeCorner => egui::CursorIcon::ResizeNorthWest,
            Self::Eraser => egui::CursorIcon::Cell,
            Self::Picker => egui::CursorIcon::Crosshair,
        }
    }
}
