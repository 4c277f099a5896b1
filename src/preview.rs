//! # Page Preview Renderer
//!
//! Rasterizes a page geometry tree to an 8-bit grayscale image, one pixel per
//! device unit, so a page can be inspected without an e-ink device.
//!
//! ```text
//! GeometryNode → PreviewRenderer → GrayImage → PNG
//!                     ↓
//!               walk the tree in order:
//!               - fills paint their shade
//!               - lines, strokes and dots paint ink
//!               - text anchors become a short bar (no glyphs)
//! ```
//!
//! Paint never lightens a pixel, so a fill drawn after a rule cannot hide it.
//!
//! ## Example
//!
//! ```
//! use inkplan::preview::render_page;
//! use inkplan::profile::DeviceProfile;
//! use inkplan::template::{TemplateKind, build_template_page};
//! use inkplan::params::TemplateParams;
//! use inkplan::profile::LayoutProfile;
//!
//! let device = DeviceProfile::REMARKABLE;
//! let params = TemplateParams::EMPTY.resolve(&device, &LayoutProfile::BALANCED).unwrap();
//! let page = build_template_page(TemplateKind::Grid, &device, &params).unwrap();
//! let image = render_page(&page, &device).unwrap();
//! assert_eq!(image.dimensions(), (1404, 1872));
//! ```

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::{InkplanError, Result};
use crate::geometry::{GeometryNode, Point, Rect, Shade, Stroke};
use crate::profile::DeviceProfile;

const PAPER: u8 = 255;
const INK: u8 = 0;
const FRAME_INK: u8 = 60;
const TEXT_INK: u8 = 40;

fn stroke_level(stroke: Stroke) -> u8 {
    match stroke {
        Stroke::Border => INK,
        Stroke::Major => 90,
        Stroke::Rule => 140,
        Stroke::Minor => 190,
    }
}

fn shade_level(shade: Shade) -> u8 {
    match shade {
        Shade::Accent => 200,
        Shade::WorkHours => 235,
        Shade::Sidebar => 245,
    }
}

/// Grayscale canvas sized to a device page.
pub struct PreviewRenderer {
    image: GrayImage,
}

impl PreviewRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([PAPER])),
        }
    }

    /// Canvas for a device's full page.
    pub fn for_device(device: &DeviceProfile) -> Result<Self> {
        let (width, height) = device.page_size_units()?;
        Ok(Self::new(width.round() as u32, height.round() as u32))
    }

    /// Draw a node and its descendants.
    pub fn draw(&mut self, node: &GeometryNode) {
        node.walk(&mut |n| self.draw_node(n));
    }

    pub fn finish(self) -> GrayImage {
        self.image
    }

    fn draw_node(&mut self, node: &GeometryNode) {
        match node {
            GeometryNode::Line { from, to, stroke } => self.line(*from, *to, stroke_level(*stroke)),
            GeometryNode::RectFill { rect, shade } => self.fill(*rect, shade_level(*shade)),
            GeometryNode::RectStroke { rect } => self.outline(*rect, FRAME_INK),
            GeometryNode::Dot { center, radius } => self.disc(*center, *radius, INK),
            GeometryNode::TextAnchor { at, text, size, .. } => {
                // roughly half an em per character
                let length = size * 0.5 * text.chars().count() as f64;
                let bar = Rect::new(at.x, at.y - size / 8.0, length, (size / 4.0).max(1.0));
                self.fill(bar, TEXT_INK);
            }
            GeometryNode::Group { .. } => {}
        }
    }

    fn plot(&mut self, x: i64, y: i64, level: u8) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        pixel.0[0] = pixel.0[0].min(level);
    }

    fn line(&mut self, from: Point, to: Point, level: u8) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(
                (from.x + dx * t).round() as i64,
                (from.y + dy * t).round() as i64,
                level,
            );
        }
    }

    fn fill(&mut self, rect: Rect, level: u8) {
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let x1 = rect.right().round() as i64;
        let y1 = rect.bottom().round() as i64;
        for y in y0..y1.max(y0 + 1) {
            for x in x0..x1.max(x0 + 1) {
                self.plot(x, y, level);
            }
        }
    }

    fn outline(&mut self, rect: Rect, level: u8) {
        let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
        self.line(Point::new(l, t), Point::new(r, t), level);
        self.line(Point::new(r, t), Point::new(r, b), level);
        self.line(Point::new(r, b), Point::new(l, b), level);
        self.line(Point::new(l, b), Point::new(l, t), level);
    }

    fn disc(&mut self, center: Point, radius: f64, level: u8) {
        let r = radius.max(0.5);
        let reach = r.ceil() as i64;
        let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
        for y in -reach..=reach {
            for x in -reach..=reach {
                if ((x * x + y * y) as f64) <= r * r {
                    self.plot(cx + x, cy + y, level);
                }
            }
        }
    }
}

/// Rasterize a page for a device.
pub fn render_page(page: &GeometryNode, device: &DeviceProfile) -> Result<GrayImage> {
    let mut renderer = PreviewRenderer::for_device(device)?;
    renderer.draw(page);
    Ok(renderer.finish())
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| InkplanError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(png_bytes)
}

/// Rasterize a page and write it as a PNG file.
pub fn save_png(page: &GeometryNode, device: &DeviceProfile, path: &Path) -> Result<()> {
    render_page(page, device)?
        .save(path)
        .map_err(|e| InkplanError::Image(format!("Failed to save PNG: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_canvas_is_paper() {
        let image = PreviewRenderer::new(4, 3).finish();
        assert!(image.pixels().all(|p| p.0[0] == PAPER));
    }

    #[test]
    fn test_palma_dimensions() {
        let renderer = PreviewRenderer::for_device(&DeviceProfile::PALMA).unwrap();
        assert_eq!(renderer.finish().dimensions(), (824, 1648));
    }

    #[test]
    fn test_line_and_fill_levels() {
        let mut renderer = PreviewRenderer::new(20, 20);
        renderer.draw(&GeometryNode::RectFill {
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            shade: Shade::Sidebar,
        });
        renderer.draw(&GeometryNode::hline(0.0, 19.0, 10.0, Stroke::Border));
        let image = renderer.finish();
        assert_eq!(image.get_pixel(5, 10).0[0], INK);
        assert_eq!(image.get_pixel(5, 2).0[0], shade_level(Shade::Sidebar));
    }

    #[test]
    fn test_fill_never_lightens() {
        let mut renderer = PreviewRenderer::new(10, 10);
        renderer.draw(&GeometryNode::vline(5.0, 0.0, 9.0, Stroke::Rule));
        renderer.draw(&GeometryNode::RectFill {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            shade: Shade::WorkHours,
        });
        assert_eq!(renderer.finish().get_pixel(5, 5).0[0], stroke_level(Stroke::Rule));
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut renderer = PreviewRenderer::new(10, 10);
        renderer.draw(&GeometryNode::Dot {
            center: Point::new(-50.0, 400.0),
            radius: 3.0,
        });
        assert!(renderer.finish().pixels().all(|p| p.0[0] == PAPER));
    }

    #[test]
    fn test_encode_png_signature() {
        let image = PreviewRenderer::new(8, 8).finish();
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
