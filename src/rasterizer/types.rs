//! Core color types for the rasterizer

use std::fmt;
use std::str::FromStr;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Integer-divide every channel (phosphor ghost layers)
    pub fn dim(self, divisor: u8) -> Self {
        let d = divisor.max(1);
        Self {
            r: self.r / d,
            g: self.g / d,
            b: self.b / d,
            a: self.a,
        }
    }

    /// Multiply every channel by an unclamped factor, saturating at 255
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        Self {
            r: (self.r as f32 * f).min(255.0) as u8,
            g: (self.g as f32 * f).min(255.0) as u8,
            b: (self.b as f32 * f).min(255.0) as u8,
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for the canvas
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Symbolic palette entries used by the narrative layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorToken {
    #[default]
    Green,
    Red,
    Blue,
    Yellow,
    Purple,
    White,
    Gray,
}

impl ColorToken {
    pub const ALL: [ColorToken; 7] = [
        ColorToken::Green,
        ColorToken::Red,
        ColorToken::Blue,
        ColorToken::Yellow,
        ColorToken::Purple,
        ColorToken::White,
        ColorToken::Gray,
    ];

    /// RGB value from the fixed palette table
    pub const fn rgb(self) -> Color {
        match self {
            ColorToken::Green => Color::new(0, 255, 0),
            ColorToken::Red => Color::new(255, 50, 50),
            ColorToken::Blue => Color::new(50, 150, 255),
            ColorToken::Yellow => Color::new(255, 255, 50),
            ColorToken::Purple => Color::new(200, 50, 255),
            ColorToken::White => Color::new(255, 255, 255),
            ColorToken::Gray => Color::new(128, 128, 128),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Green => "GREEN",
            ColorToken::Red => "RED",
            ColorToken::Blue => "BLUE",
            ColorToken::Yellow => "YELLOW",
            ColorToken::Purple => "PURPLE",
            ColorToken::White => "WHITE",
            ColorToken::Gray => "GRAY",
        }
    }

    /// Resolve a palette name, falling back to the default token
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::trace!(name, "unknown color token, using default");
            ColorToken::default()
        })
    }
}

/// Error for palette names outside the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color token: {}", self.0)
    }
}

impl FromStr for ColorToken {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorToken::ALL
            .iter()
            .copied()
            .find(|token| token.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl From<&str> for ColorToken {
    fn from(name: &str) -> Self {
        ColorToken::resolve(name)
    }
}

impl From<ColorToken> for Color {
    fn from(token: ColorToken) -> Self {
        token.rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens_resolve() {
        assert_eq!(ColorToken::resolve("GREEN"), ColorToken::Green);
        assert_eq!(ColorToken::resolve("purple"), ColorToken::Purple);
        assert_eq!(ColorToken::Red.rgb(), Color::new(255, 50, 50));
    }

    #[test]
    fn test_unknown_token_falls_back() {
        assert!("MAGENTA".parse::<ColorToken>().is_err());
        assert_eq!(ColorToken::resolve("MAGENTA"), ColorToken::Green);
        assert_eq!(ColorToken::from(""), ColorToken::Green);
    }

    #[test]
    fn test_dim_and_scale() {
        let c = Color::new(255, 90, 30);
        assert_eq!(c.dim(3), Color::new(85, 30, 10));
        assert_eq!(c.scale(2.0), Color::new(255, 180, 60));
        assert_eq!(c.shade(0.0), Color::new(0, 0, 0));
    }
}
