//! Vector and raster export of a drawing snapshot.
//!
//! Export always works on a [`SceneSnapshot`], never on the live scene, so an
//! export running in the background is unaffected by edits made meanwhile.

use egui::Color32;
use std::io::Cursor;
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::geometry::Point;
use crate::shape::{Shape, ShapeKind};
use crate::svg::write_document;

const ELLIPSE_SEGMENTS: usize = 96;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the drawing surface has no area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("could not allocate a {width}x{height} image")]
    Allocation { width: u32, height: u32 },

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Standalone SVG document.
    Svg,
    /// Lossy raster on an opaque white background.
    Jpeg,
    /// Lossless raster on a transparent background.
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Svg, ExportFormat::Jpeg, ExportFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Png => "PNG",
        }
    }

    pub fn file_name(self) -> String {
        format!("drawing.{}", self.extension())
    }
}

/// Encoded export ready to be handed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The committed shapes and surface size at one instant.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub shapes: Vec<Shape>,
    pub width: f64,
    pub height: f64,
}

impl SceneSnapshot {
    pub fn new(shapes: Vec<Shape>, width: f64, height: f64) -> Self {
        Self { shapes, width, height }
    }

    pub fn to_svg(&self) -> String {
        write_document(&self.shapes, self.width, self.height)
    }

    fn pixel_size(&self) -> Result<(u32, u32), ExportError> {
        let width = self.width.max(0.0).round() as u32;
        let height = self.height.max(0.0).round() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::EmptySurface { width, height });
        }
        Ok((width, height))
    }

    /// Renders the shapes over `background` at the surface's pixel size.
    pub fn rasterize(&self, background: Color) -> Result<Pixmap, ExportError> {
        let (width, height) = self.pixel_size()?;
        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;
        pixmap.fill(background);
        for shape in &self.shapes {
            draw_shape(&mut pixmap, shape);
        }
        Ok(pixmap)
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Svg => self.to_svg().into_bytes(),
            ExportFormat::Jpeg => {
                let pixmap = self.rasterize(Color::WHITE)?;
                encode(&pixmap, image::ImageFormat::Jpeg)?
            }
            ExportFormat::Png => {
                let pixmap = self.rasterize(Color::TRANSPARENT)?;
                encode(&pixmap, image::ImageFormat::Png)?
            }
        };
        Ok(ExportArtifact {
            file_name: format.file_name(),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}

fn encode(pixmap: &Pixmap, format: image::ImageFormat) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    // Pixmap data is premultiplied; the encoders want straight alpha.
    let straight: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    let rgba = image::RgbaImage::from_raw(width, height, straight).ok_or(ExportError::Allocation { width, height })?;

    let image = match format {
        image::ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(image::DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => image::DynamicImage::ImageRgba8(rgba),
    };
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}

fn paint_for(color: Color32) -> Option<Paint<'static>> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 0 {
        return None;
    }
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    Some(paint)
}

fn polyline(points: &[Point], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for point in rest {
        pb.line_to(point.x as f32, point.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) {
    let (outline, closed) = match &shape.kind {
        ShapeKind::Line(line) => (vec![line.p1, line.p2], false),
        ShapeKind::Rect(rect) => (rect.outline()[..4].to_vec(), true),
        ShapeKind::Ellipse(ellipse) => (ellipse.outline(ELLIPSE_SEGMENTS), true),
        ShapeKind::Path(path) => (path.points.clone(), false),
    };

    if let Some(fill) = shape.style.fill.display_color().and_then(paint_for) {
        if let Some(area) = polyline(&outline, true) {
            pixmap.fill_path(&area, &fill, FillRule::Winding, Transform::identity(), None);
        }
    }

    if shape.style.stroke_width <= 0.0 {
        return;
    }
    let Some(paint) = paint_for(shape.style.stroke_color) else {
        return;
    };
    let Some(path) = polyline(&outline, closed) else {
        return;
    };
    let stroke = Stroke {
        width: shape.style.stroke_width as f32,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
