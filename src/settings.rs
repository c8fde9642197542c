use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Storage key used with eframe persistence.
pub const SETTINGS_KEY: &str = "sketchpad_settings";

/// Optional JSON settings file looked up in the working directory at startup.
pub const SETTINGS_FILE: &str = "sketchpad.json";

/// User-tunable defaults for the drawing session.
///
/// Only these preferences are ever persisted; the drawing itself is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct Settings {
    /// Stroke width for Draw, Rectangle and Ellipse
    pub line_width: f32,
    /// Stroke width while erasing
    pub eraser_width: f32,
    /// Fill used at startup and after every resize
    pub background: Color32,
    /// Initial stroke color
    pub color: Color32,
    /// File name used when saving the canvas
    pub export_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            eraser_width: 20.0,
            background: Color32::WHITE,
            color: Color32::BLACK,
            export_file_name: "drawing.png".to_owned(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
