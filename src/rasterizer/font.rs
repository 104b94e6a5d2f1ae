//! 5x7 bitmap font
//!
//! Monospace glyphs for printable ASCII, drawn at an integer scale.
//! Letters render upper-case. Block and box-drawing characters used by the
//! ASCII sprites map to solid cells or ASCII look-alikes.

use super::canvas::Canvas;
use super::types::Color;

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;

type Glyph = [u8; GLYPH_H as usize];

const SOLID: Glyph = [0b11111; 7];
const UNKNOWN: Glyph = [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100];

/// Horizontal distance between glyph origins
pub fn advance(scale: i32) -> i32 {
    (GLYPH_W + 1) * scale.max(1)
}

/// Height of one glyph cell in pixels
pub fn glyph_height(scale: i32) -> i32 {
    GLYPH_H * scale.max(1)
}

/// Width of a string in pixels
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * advance(scale)
}

/// Draw a string with its top-left corner at (x, y)
pub fn draw_text(canvas: &mut Canvas, text: &str, x: i32, y: i32, scale: i32, color: Color) {
    let scale = scale.max(1);
    let step = advance(scale);
    for (i, c) in text.chars().enumerate() {
        if c == ' ' {
            continue;
        }
        let gx = x + i as i32 * step;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0b10000 >> col) != 0 {
                    canvas.fill_rect(gx + col * scale, y + row as i32 * scale, scale, scale, color);
                }
            }
        }
    }
}

fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        ' ' => [0; 7],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '"' => [0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '?' => UNKNOWN,
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        '\\' => [0b10000, 0b01000, 0b01000, 0b00100, 0b00010, 0b00010, 0b00001],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '^' => [0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '`' => [0b01000, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '{' => [0b00010, 0b00100, 0b00100, 0b01000, 0b00100, 0b00100, 0b00010],
        '|' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '}' => [0b01000, 0b00100, 0b00100, 0b00010, 0b00100, 0b00100, 0b01000],
        '~' => [0b00000, 0b00000, 0b01000, 0b10101, 0b00010, 0b00000, 0b00000],

        // Sprite shading and shapes
        '█' | '■' | '●' | '◆' | '★' => SOLID,
        '▓' => [0b11011, 0b10111, 0b11101, 0b01111, 0b11011, 0b10111, 0b11101],
        '▒' => [0b10101, 0b01010, 0b10101, 0b01010, 0b10101, 0b01010, 0b10101],
        '░' => [0b10001, 0b00100, 0b10001, 0b00100, 0b10001, 0b00100, 0b10001],
        '▲' => [0b00000, 0b00100, 0b01110, 0b01110, 0b11111, 0b11111, 0b00000],
        '▼' => [0b00000, 0b11111, 0b11111, 0b01110, 0b01110, 0b00100, 0b00000],
        '°' => [0b01100, 0b10010, 0b10010, 0b01100, 0b00000, 0b00000, 0b00000],

        // Box drawing
        '─' | '═' => glyph('-'),
        '│' | '║' => glyph('|'),
        '┌' | '┐' | '└' | '┘' | '┬' | '┴' | '├' | '┤' | '┼' | '╔' | '╗' | '╚' | '╝' => glyph('+'),
        '╱' => glyph('/'),
        '╲' => glyph('\\'),
        '↑' => glyph('^'),
        '↓' => [0b00100, 0b00100, 0b00100, 0b10101, 0b01110, 0b00100, 0b00000],

        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_counts_chars() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("HELLO", 1), 30);
        assert_eq!(text_width("HELLO", 2), 60);
        assert_eq!(text_width("██", 1), 12);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn test_unmapped_char_uses_fallback() {
        assert_eq!(glyph('\u{2603}'), UNKNOWN);
        assert_eq!(glyph('─'), glyph('-'));
    }

    #[test]
    fn test_draw_text_stays_in_cell() {
        let mut c = Canvas::new(40, 20);
        let green = Color::new(0, 255, 0);
        draw_text(&mut c, "H", 2, 3, 2, green);

        // Top-left stroke of 'H' fills a 2x2 block
        assert_eq!(c.get_pixel(2, 3), Some(green));
        assert_eq!(c.get_pixel(3, 4), Some(green));

        for y in 0..20 {
            for x in 0..40 {
                let lit = c.get_pixel(x, y) == Some(green);
                let inside = x >= 2 && x < 2 + GLYPH_W * 2 && y >= 3 && y < 3 + GLYPH_H * 2;
                assert!(!lit || inside, "pixel ({}, {}) outside glyph cell", x, y);
            }
        }
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut c = Canvas::new(20, 20);
        draw_text(&mut c, "   ", 0, 0, 1, Color::WHITE);
        assert!(c.pixels().iter().all(|&b| b == 0));
    }
}
