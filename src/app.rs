use egui::{Color32, Context, TextureHandle, TextureOptions};

use crate::eyedropper::CanvasEyedropper;
use crate::input::{route_event, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::session::{DrawingSession, PickOutcome};
use crate::settings::{Settings, SETTINGS_FILE, SETTINGS_KEY};
use crate::surface::Surface;
use crate::tools::ToolMode;

pub struct SketchApp {
    session: DrawingSession,
    /// Shared with the session; the canvas view answers picks through it
    eyedropper: CanvasEyedropper,
    input: InputHandler,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    /// Text of the hex color field
    hex_input: String,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: Settings = settings_file()
            .or_else(|| cc.storage.and_then(|storage| eframe::get_value(storage, SETTINGS_KEY)))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let eyedropper = CanvasEyedropper::new();
        // Sized by the canvas view on the first frame.
        let session = DrawingSession::with_size(settings, 0, 0)
            .with_eyedropper(Box::new(eyedropper.clone()));
        Self {
            hex_input: session.color().to_hex(),
            session,
            eyedropper,
            input: InputHandler::new(),
            texture: None,
            uploaded_revision: None,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    pub fn select_mode(&mut self, mode: ToolMode) {
        log::info!("Tool selected from UI: {mode}");
        self.session.set_mode(mode);
    }

    pub fn hex_input_mut(&mut self) -> &mut String {
        &mut self.hex_input
    }

    /// Reset the hex field to the current stroke color.
    pub fn sync_hex_input(&mut self) {
        self.hex_input = self.session.color().to_hex();
    }

    /// Adopt the color typed into the hex field. Invalid text is discarded.
    pub fn apply_hex_input(&mut self) {
        match Color32::from_hex(self.hex_input.trim()) {
            Ok(color) => {
                let [r, g, b, _] = color.to_srgba_unmultiplied();
                self.session.set_color(Color32::from_rgb(r, g, b));
            }
            Err(err) => log::debug!("ignoring hex color {:?}: {err:?}", self.hex_input),
        }
        self.sync_hex_input();
    }

    pub fn export_drawing(&self) {
        let file_name = &self.session.settings().export_file_name;
        if let Err(err) = crate::export::save_png(self.session.surface(), file_name) {
            log::error!("failed to save drawing: {err}");
        }
    }

    /// Match the canvas buffer to the on-screen size in physical pixels.
    pub fn fit_canvas(&mut self, rect: egui::Rect, pixels_per_point: f32) {
        let size = rect.size() * pixels_per_point;
        let (width, height) = (size.x.round() as u32, size.y.round() as u32);
        let surface = self.session.surface();
        if surface.width() != width || surface.height() != height {
            self.session.resize(width, height);
        }
        self.input.set_canvas_rect(rect, pixels_per_point);
    }

    /// Feed this frame's input to the session and settle any finished pick.
    pub fn handle_input(&mut self, ctx: &Context) {
        for event in self.input.process_input(ctx) {
            route_event(&event, &mut self.session, &self.eyedropper);
        }

        match self.session.poll_pick() {
            Some(PickOutcome::Picked(color)) => log::info!("picked {}", color.to_hex()),
            Some(PickOutcome::Cancelled(_)) | None => {}
        }
        if self.session.has_pending_pick() {
            // the pick future is polled with a no-op waker, keep frames coming
            ctx.request_repaint();
        }
    }

    /// Upload the canvas when it changed since the last frame.
    pub fn canvas_texture(&mut self, ctx: &Context) -> Option<&TextureHandle> {
        let surface = self.session.surface();
        if surface.is_empty() {
            return None;
        }
        if self.uploaded_revision != Some(self.session.revision()) || self.texture.is_none() {
            let image = surface.to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(self.session.revision());
        }
        self.texture.as_ref()
    }
}

/// Settings from `sketchpad.json` in the working directory, when present.
#[cfg(not(target_arch = "wasm32"))]
fn settings_file() -> Option<Settings> {
    if !std::path::Path::new(SETTINGS_FILE).exists() {
        return None;
    }
    match Settings::from_file(SETTINGS_FILE) {
        Ok(settings) => {
            log::info!("loaded settings from {SETTINGS_FILE}");
            Some(settings)
        }
        Err(err) => {
            log::warn!("ignoring {SETTINGS_FILE}: {err}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn settings_file() -> Option<Settings> {
    None
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self.session.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
