#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod error;
pub mod export;
pub mod eyedropper;
pub mod input;
pub mod panels;
pub mod session;
pub mod settings;
pub mod state;
pub mod style;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use canvas::Canvas;
pub use error::{ExportError, PickError, SettingsError};
pub use eyedropper::{CanvasEyedropper, Eyedropper, NoEyedropper};
pub use input::{InputEvent, Key};
pub use session::{DrawingSession, PickOutcome};
pub use settings::Settings;
pub use style::{CompositeRule, CursorHint, StrokeStyle};
pub use surface::Surface;
pub use tools::ToolMode;
