use egui::{Color32, Pos2, Vec2};
use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::style::StrokeStyle;
use crate::surface::Surface;

/// Raster canvas backed by a premultiplied RGBA pixmap.
///
/// A zero-sized canvas holds no pixmap; every paint call is then a no-op.
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    pixmap: Option<Pixmap>,
}

/// Copy of a canvas taken at gesture start
#[derive(Clone, Debug)]
pub struct CanvasSnapshot(Option<Pixmap>);

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
        }
    }

    /// Raw premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        match &self.pixmap {
            Some(pixmap) => pixmap.data(),
            None => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pixmap.is_none()
    }

    /// Texture upload for the canvas view
    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        egui::ColorImage::from_rgba_premultiplied(size, self.data())
    }

    /// Unmultiplied RGBA image, used for export.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let pixmap = self.pixmap.as_ref()?;
        let raw: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
    }

    fn paint_path(&mut self, path: Option<Path>, style: &StrokeStyle, cap: LineCap, join: LineJoin) {
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), path) else {
            return;
        };
        if style.width <= 0.0 {
            return;
        }

        let [r, g, b, a] = style.color.to_srgba_unmultiplied();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint.blend_mode = style.composite.blend_mode();

        let stroke = Stroke {
            width: style.width,
            line_cap: cap,
            line_join: join,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl Surface for Canvas {
    type Snapshot = CanvasSnapshot;

    fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        self.paint_path(pb.finish(), style, LineCap::Round, LineJoin::Round);
    }

    fn stroke_rect(&mut self, origin: Pos2, size: Vec2, style: &StrokeStyle) {
        // Built by hand: tiny_skia::Rect rejects negative extents, drags toward
        // the top-left produce them.
        let far = origin + size;
        let mut pb = PathBuilder::new();
        pb.move_to(origin.x, origin.y);
        pb.line_to(far.x, origin.y);
        pb.line_to(far.x, far.y);
        pb.line_to(origin.x, far.y);
        pb.close();
        self.paint_path(pb.finish(), style, LineCap::Butt, LineJoin::Miter);
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &StrokeStyle) {
        if !(radius > 0.0) {
            return;
        }
        let path = PathBuilder::from_circle(center.x, center.y, radius);
        self.paint_path(path, style, LineCap::Butt, LineJoin::Miter);
    }

    fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot(self.pixmap.clone())
    }

    fn restore(&mut self, snapshot: &CanvasSnapshot) {
        match (&mut self.pixmap, &snapshot.0) {
            (Some(pixmap), Some(saved))
                if pixmap.width() == saved.width() && pixmap.height() == saved.height() =>
            {
                pixmap.data_mut().copy_from_slice(saved.data());
            }
            (current, saved) => current.clone_from(saved),
        }
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn fill(&mut self, color: Color32) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            let [r, g, b, a] = color.to_srgba_unmultiplied();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixmap = Pixmap::new(width, height);
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }
}
