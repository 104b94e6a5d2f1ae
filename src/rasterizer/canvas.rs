//! Canvas for software rendering
//! Pixel writes, blending and primitive drawing for the CRT pipeline

use std::path::Path;
use super::types::Color;

/// Error type for exporting the canvas
#[derive(Debug)]
pub enum CanvasError {
    ImageError(image::ImageError),
    BufferSize { width: usize, height: usize },
}

impl From<image::ImageError> for CanvasError {
    fn from(e: image::ImageError) -> Self {
        CanvasError::ImageError(e)
    }
}

impl std::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanvasError::ImageError(e) => write!(f, "Image error: {}", e),
            CanvasError::BufferSize { width, height } => {
                write!(f, "Canvas buffer does not match {}x{}", width, height)
            }
        }
    }
}

/// RGBA pixel buffer, 4 bytes per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

/// Source-over blend of one channel
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((src as u16 * a + dst as u16 * (255 - a) + 127) / 255) as u8
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes (row-major), ready for texture upload
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((y as usize * self.width + x as usize) * 4)
        } else {
            None
        }
    }

    /// Overwrite a pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| {
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        })
    }

    /// Blend `color` over the existing pixel using the color's alpha
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            let px = &mut self.pixels[idx..idx + 4];
            px[0] = blend_channel(color.r, px[0], color.a);
            px[1] = blend_channel(color.g, px[1], color.a);
            px[2] = blend_channel(color.b, px[2], color.a);
            px[3] = 255;
        }
    }

    /// Blend a full-width horizontal line
    pub fn blend_row(&mut self, y: i32, color: Color) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        for x in 0..self.width as i32 {
            self.blend_pixel(x, y, color);
        }
    }

    /// Blend a rectangle (clipped to the canvas)
    pub fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Fill a rectangle (clipped to the canvas)
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Rectangle outline growing inward by `thickness` pixels
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: Color) {
        let t = thickness.max(1).min(w / 2).min(h / 2).max(1);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + w - t, y, t, h, color);
    }

    /// Draw a filled circle at (cx, cy) with given radius and color
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r_sq = radius * radius;
        for y in (cy - radius).max(0)..=(cy + radius).min(self.height as i32 - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width as i32 - 1) {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a thick line by drawing multiple parallel lines
    pub fn draw_thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        if thickness <= 1 {
            self.draw_line(x0, y0, x1, y1, color);
            return;
        }

        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 0.001 {
            return;
        }

        let px = -dy / len;
        let py = dx / len;

        // Offsets span [-t/2, t - 1 - t/2] so even widths stay exact
        let start = -(thickness / 2);
        for i in start..start + thickness {
            let offset = i as f32;
            let ox0 = (x0 as f32 + px * offset).round() as i32;
            let oy0 = (y0 as f32 + py * offset).round() as i32;
            let ox1 = (x1 as f32 + px * offset).round() as i32;
            let oy1 = (y1 as f32 + py * offset).round() as i32;
            self.draw_line(ox0, oy0, ox1, oy1, color);
        }
    }

    /// Copy the canvas into an owned image buffer
    pub fn to_image(&self) -> Result<image::RgbaImage, CanvasError> {
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
            .ok_or(CanvasError::BufferSize { width: self.width, height: self.height })
    }

    /// Save the canvas as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.to_image()?.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
