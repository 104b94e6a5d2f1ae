//! CRT display compositor
//!
//! Turns text and ASCII sprites into a CRT-styled image:
//! - Ghosted "phosphor" text with color bleed and horizontal jitter
//! - Scanline grid and a moving sweep band
//! - Periodic flicker, sparse static noise, bezel border

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rasterizer::{self, Canvas, Color, ColorToken};
use super::config::CrtConfig;
use super::timers::EffectTimers;

/// Ghost layers drawn under the main text: (offset, channel divisor)
const GHOST_LAYERS: [(i32, u8); 2] = [(2, 3), (4, 5)];

const SCANLINE_COLOR: (u8, u8, u8) = (20, 20, 20);
const SCANLINE_ALPHA_STRONG: u8 = 30;
const SCANLINE_ALPHA_WEAK: u8 = 15;
const SWEEP_COLOR: Color = Color::with_alpha(40, 40, 40, 80);
const BEZEL_COLOR: Color = Color::new(30, 30, 30);
const BEZEL_THICKNESS: i32 = 2;
/// The panel divider stops this far above the bottom edge (input area)
const DIVIDER_BOTTOM_MARGIN: i32 = 100;

/// Horizontal band a sprite is centered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32) -> Self {
        Self { x, y, width }
    }
}

/// Owns the frame canvas and all effect state.
///
/// Frame contract: the orchestrator clears the canvas, calls `begin_frame`
/// exactly once, issues any number of draw calls, then calls `end_frame`.
/// The jitter offset used by every draw in a frame is fixed by that frame's
/// `begin_frame`.
pub struct Compositor {
    canvas: Canvas,
    config: CrtConfig,
    timers: EffectTimers,
    rng: StdRng,
}

impl Compositor {
    pub fn new(config: CrtConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            canvas: Canvas::new(config.width, config.height),
            config,
            timers: EffectTimers::new(),
            rng,
        }
    }

    pub fn config(&self) -> &CrtConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn width(&self) -> i32 {
        self.canvas.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.canvas.height() as i32
    }

    /// Horizontal offset applied to ghosted draws this frame
    pub fn jitter_offset(&self) -> i32 {
        self.timers.jitter_offset
    }

    /// Advance effect timers; must run once per frame before any draw
    pub fn begin_frame(&mut self) {
        self.timers.advance(&self.config, &mut self.rng);
    }

    /// Draw text with ghost layers and color bleed at `pos` plus jitter
    pub fn draw_text(&mut self, text: &str, pos: (i32, i32), color: impl Into<ColorToken>) {
        if text.is_empty() {
            return;
        }
        let color = color.into().rgb();
        let x = pos.0 + self.timers.jitter_offset;
        self.draw_ghosted(text, x, pos.1, color);
    }

    fn draw_ghosted(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let scale = self.config.text_scale;

        for (offset, divisor) in GHOST_LAYERS {
            rasterizer::draw_text(&mut self.canvas, text, x + offset, y + offset, scale, color.dim(divisor));
        }

        if self.config.color_bleed_strength > 0.0 {
            let bleed = color.scale(self.config.color_bleed_strength);
            rasterizer::draw_text(&mut self.canvas, text, x + 1, y, scale, bleed);
            rasterizer::draw_text(&mut self.canvas, text, x - 1, y, scale, bleed);
        }

        rasterizer::draw_text(&mut self.canvas, text, x, y, scale, color);
    }

    /// Draw a sprite frame with its first line centered in `region`
    pub fn draw_sprite<S: AsRef<str>>(&mut self, lines: &[S], region: Region, color: impl Into<ColorToken>) {
        let Some(first) = lines.first() else {
            return;
        };
        let color = color.into();
        let first_width = rasterizer::text_width(first.as_ref(), self.config.text_scale);
        let x = region.x + (region.width - first_width) / 2;
        let pitch = self.config.sprite_line_pitch;

        for (i, line) in lines.iter().enumerate() {
            self.draw_text(line.as_ref(), (x, region.y + i as i32 * pitch), color);
        }
    }

    /// Single-pass small text for status readouts (no ghosting, no jitter)
    pub fn draw_ui_text(&mut self, text: &str, pos: (i32, i32), color: impl Into<ColorToken>) {
        if text.is_empty() {
            return;
        }
        let color = color.into().rgb();
        rasterizer::draw_text(&mut self.canvas, text, pos.0, pos.1, self.config.ui_text_scale, color);
    }

    /// Apply the overlay passes. Order is fixed: later passes sit on top.
    pub fn end_frame(&mut self) {
        self.apply_scanlines();
        self.apply_sweep();
        self.apply_flicker();
        self.apply_noise();
        self.draw_bezel();
    }

    fn apply_scanlines(&mut self) {
        let (r, g, b) = SCANLINE_COLOR;
        for y in (0..self.height()).step_by(4) {
            let alpha = if y % 8 == 0 { SCANLINE_ALPHA_STRONG } else { SCANLINE_ALPHA_WEAK };
            self.canvas.blend_row(y, Color::with_alpha(r, g, b, alpha));
        }
    }

    fn apply_sweep(&mut self) {
        // Rows past the bottom edge are the overscan; the band is hidden there
        for t in 0..self.config.scanline_thickness {
            let y = self.timers.scanline_y + t;
            if y < self.height() {
                self.canvas.blend_row(y, SWEEP_COLOR);
            }
        }
    }

    fn apply_flicker(&mut self) {
        if !self.timers.flicker_due() {
            return;
        }
        let alpha = flicker_alpha(self.config.flicker_intensity);
        let (w, h) = (self.width(), self.height());
        self.canvas.blend_rect(0, 0, w, h, Color::with_alpha(0, 0, 0, alpha));
    }

    fn apply_noise(&mut self) {
        if !self.timers.noise_due() {
            return;
        }
        let (w, h) = (self.width(), self.height());
        if w <= 0 || h <= 0 {
            return;
        }
        for _ in 0..self.config.noise_density {
            let x = self.rng.random_range(0..w);
            let y = self.rng.random_range(0..h);
            let v: u8 = self.rng.random();
            self.canvas.set_pixel(x, y, Color::new(v, v, v));
        }
    }

    fn draw_bezel(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.canvas.draw_rect(0, 0, w, h, BEZEL_THICKNESS, BEZEL_COLOR);

        let divider_x = w / 2;
        let bottom = (h - DIVIDER_BOTTOM_MARGIN).max(0);
        self.canvas.draw_line(divider_x, 0, divider_x, bottom, BEZEL_COLOR);
    }
}

/// Overlay opacity for a flicker frame; truncates toward zero
fn flicker_alpha(intensity: f32) -> u8 {
    (255.0 * (1.0 - intensity.clamp(0.0, 1.0))) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: usize, height: usize) -> Compositor {
        let config = CrtConfig {
            seed: Some(42),
            ..CrtConfig::with_size(width, height)
        };
        let mut comp = Compositor::new(config);
        comp.canvas_mut().clear(Color::BLACK);
        comp
    }

    fn lit_pixels(canvas: &Canvas) -> Vec<(i32, i32, Color)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if let Some(c) = canvas.get_pixel(x, y) {
                    if c.r > 0 || c.g > 0 || c.b > 0 {
                        out.push((x, y, c));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_hello_renders_green_near_position() {
        let mut comp = seeded(800, 600);
        comp.begin_frame();
        comp.draw_text("HELLO", (20, 20), "GREEN");

        let lit = lit_pixels(comp.canvas());
        assert!(!lit.is_empty());
        for &(x, y, c) in &lit {
            assert!((15..=100).contains(&x), "x {} out of box", x);
            assert!((15..=45).contains(&y), "y {} out of box", y);
            assert!(c.g > c.r && c.g > c.b);
        }
        assert!(lit.iter().any(|&(_, _, c)| c == ColorToken::Green.rgb()));
    }

    #[test]
    fn test_unknown_color_uses_default() {
        let mut comp = seeded(200, 100);
        comp.begin_frame();
        comp.draw_text("X", (10, 10), "MAGENTA");
        let lit = lit_pixels(comp.canvas());
        assert!(lit.iter().any(|&(_, _, c)| c == ColorToken::default().rgb()));
    }

    #[test]
    fn test_empty_content_is_noop() {
        let mut comp = seeded(100, 100);
        comp.begin_frame();
        comp.draw_text("", (10, 10), ColorToken::Red);
        comp.draw_ui_text("", (10, 10), ColorToken::Red);
        let empty: [&str; 0] = [];
        comp.draw_sprite(&empty, Region::new(0, 0, 100), ColorToken::Red);
        assert!(lit_pixels(comp.canvas()).is_empty());
    }

    #[test]
    fn test_ghost_layers_are_dimmer_copies() {
        let config = CrtConfig {
            seed: Some(1),
            jitter_amplitude: 0,
            ..CrtConfig::with_size(100, 60)
        };
        let mut comp = Compositor::new(config);
        comp.begin_frame();
        comp.draw_text("I", (10, 10), ColorToken::Red);

        let red = ColorToken::Red.rgb();
        // 'I' has a full top bar; the faintest ghost peeks out at the far offset
        let scale = comp.config().text_scale;
        let bottom_right = (10 + 4 + 4 * scale - 1, 10 + 4 + 7 * scale - 1);
        assert_eq!(comp.canvas().get_pixel(bottom_right.0, bottom_right.1), Some(red.dim(5)));
        assert_eq!(comp.canvas().get_pixel(10 + scale, 10), Some(red));
    }

    #[test]
    fn test_ui_text_single_pass() {
        let mut comp = seeded(100, 40);
        comp.begin_frame();
        comp.draw_ui_text("OK", (5, 5), ColorToken::Blue);
        let blue = ColorToken::Blue.rgb();
        let lit = lit_pixels(comp.canvas());
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(_, _, c)| c == blue));
        // UI glyphs are smaller than ghosted text glyphs
        let max_y = lit.iter().map(|&(_, y, _)| y).max().unwrap();
        assert!(max_y < 5 + rasterizer::glyph_height(comp.config().text_scale));
    }

    #[test]
    fn test_sprite_first_line_centered() {
        let config = CrtConfig {
            seed: Some(5),
            jitter_amplitude: 0,
            color_bleed_strength: 0.0,
            ..CrtConfig::with_size(400, 200)
        };
        let mut comp = Compositor::new(config);
        comp.begin_frame();
        comp.draw_sprite(&["#####", "#"], Region::new(200, 20, 200), ColorToken::White);

        let scale = comp.config().text_scale;
        let width = rasterizer::text_width("#####", scale);
        let expected_x = 200 + (200 - width) / 2;
        let white = ColorToken::White.rgb();
        let xs: Vec<i32> = lit_pixels(comp.canvas())
            .into_iter()
            .filter(|&(_, _, c)| c == white)
            .map(|(x, _, _)| x)
            .collect();
        // '#' lights its leftmost column on the crossbar rows
        assert_eq!(*xs.iter().min().unwrap(), expected_x);

        // Second line sits one pitch below the first
        let pitch = comp.config().sprite_line_pitch;
        let second_row_y = 20 + pitch + 3 * scale;
        assert_eq!(comp.canvas().get_pixel(expected_x + scale, second_row_y), Some(white));
    }

    #[test]
    fn test_jitter_applied_once_to_sprites() {
        let config = CrtConfig {
            seed: Some(9),
            jitter_amplitude: 5,
            jitter_interval: 1,
            color_bleed_strength: 0.0,
            ..CrtConfig::with_size(300, 100)
        };
        let mut comp = Compositor::new(config);
        // Find a frame with a non-zero jitter
        for _ in 0..50 {
            comp.canvas_mut().clear(Color::BLACK);
            comp.begin_frame();
            if comp.jitter_offset() != 0 {
                break;
            }
        }
        let jitter = comp.jitter_offset();
        assert!(jitter != 0 && jitter.abs() <= 5);

        comp.draw_sprite(&["|"], Region::new(0, 10, 300), ColorToken::White);
        let scale = comp.config().text_scale;
        let centered = (300 - rasterizer::text_width("|", scale)) / 2;
        let white = ColorToken::White.rgb();
        let min_x = lit_pixels(comp.canvas())
            .into_iter()
            .filter(|&(_, _, c)| c == white)
            .map(|(x, _, _)| x)
            .min()
            .unwrap();
        // '|' is lit in its middle column
        assert_eq!(min_x, centered + jitter + 2 * scale);
    }

    #[test]
    fn test_end_frame_draws_bezel_and_divider() {
        let config = CrtConfig {
            seed: Some(2),
            noise_density: 0,
            ..CrtConfig::with_size(200, 200)
        };
        let mut comp = Compositor::new(config);
        comp.canvas_mut().clear(Color::BLACK);
        comp.begin_frame();
        comp.end_frame();

        assert_eq!(comp.canvas().get_pixel(0, 50), Some(BEZEL_COLOR));
        assert_eq!(comp.canvas().get_pixel(199, 199), Some(BEZEL_COLOR));
        assert_eq!(comp.canvas().get_pixel(100, 50), Some(BEZEL_COLOR));
        // Divider stops above the input area
        assert_ne!(comp.canvas().get_pixel(100, 150), Some(BEZEL_COLOR));
    }

    #[test]
    fn test_scanline_grid_rows() {
        let config = CrtConfig {
            seed: Some(2),
            noise_density: 0,
            scanline_thickness: 0,
            ..CrtConfig::with_size(64, 64)
        };
        let mut comp = Compositor::new(config);
        comp.canvas_mut().clear(Color::BLACK);
        comp.begin_frame();
        comp.end_frame();

        let strong = comp.canvas().get_pixel(10, 16).unwrap();
        let weak = comp.canvas().get_pixel(10, 12).unwrap();
        let gap = comp.canvas().get_pixel(10, 13).unwrap();
        assert!(strong.r > weak.r);
        assert!(weak.r > 0);
        assert_eq!(gap.r, 0);
    }

    #[test]
    fn test_flicker_darkens_on_period() {
        let config = CrtConfig {
            seed: Some(2),
            noise_density: 0,
            flicker_period: 2,
            flicker_intensity: 0.5,
            scanline_thickness: 0,
            ..CrtConfig::with_size(32, 32)
        };
        let mut comp = Compositor::new(config);

        comp.canvas_mut().clear(Color::WHITE);
        comp.begin_frame();
        comp.end_frame();
        assert_eq!(comp.canvas().get_pixel(10, 10), Some(Color::WHITE));

        comp.canvas_mut().clear(Color::WHITE);
        comp.begin_frame();
        comp.end_frame();
        let dimmed = comp.canvas().get_pixel(10, 10).unwrap();
        assert!(dimmed.r < 200 && dimmed.r > 100);
    }

    #[test]
    fn test_flicker_alpha_truncates() {
        assert_eq!(flicker_alpha(0.95), 12);
        assert_eq!(flicker_alpha(0.5), 127);
        assert_eq!(flicker_alpha(1.0), 0);
        assert_eq!(flicker_alpha(0.0), 255);
    }

    #[test]
    fn test_noise_is_sparse_and_periodic() {
        let config = CrtConfig {
            seed: Some(8),
            noise_density: 10,
            noise_refresh_interval: 2,
            scanline_thickness: 0,
            ..CrtConfig::with_size(64, 64)
        };
        let mut comp = Compositor::new(config);
        let mut reference = Compositor::new(CrtConfig {
            noise_density: 0,
            ..comp.config().clone()
        });

        let differing = |a: &Canvas, b: &Canvas| {
            a.pixels().chunks(4).zip(b.pixels().chunks(4)).filter(|(p, q)| p != q).count()
        };

        for frame in 1..=4 {
            comp.canvas_mut().clear(Color::BLACK);
            reference.canvas_mut().clear(Color::BLACK);
            comp.begin_frame();
            reference.begin_frame();
            comp.end_frame();
            reference.end_frame();

            let diff = differing(comp.canvas(), reference.canvas());
            if frame % 2 == 0 {
                assert!(diff <= 10);
            } else {
                assert_eq!(diff, 0);
            }
        }
    }
}
