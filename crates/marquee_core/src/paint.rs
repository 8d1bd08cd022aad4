//! Paint description types
//!
//! Colors, gradients, and brushes used to describe widget fills. Nothing in
//! this module draws; the host renderer interprets these descriptions.

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from a packed 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Create from 8-bit RGBA components
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` string (leading `#` optional).
    ///
    /// Returns None for anything that is not 6 or 8 hex digits.
    pub fn parse_hex_str(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let packed = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(packed))
            }
            8 => {
                let packed = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_rgba8(
                    ((packed >> 24) & 0xFF) as u8,
                    ((packed >> 16) & 0xFF) as u8,
                    ((packed >> 8) & 0xFF) as u8,
                    (packed & 0xFF) as u8,
                ))
            }
            _ => None,
        }
    }

    /// Convert to 8-bit RGBA components
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
            (self.a.clamp(0.0, 1.0) * 255.0) as u8,
        ]
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Lighten toward white by `amount` (0.0..=1.0)
    pub fn lighten(&self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * amount,
            g: self.g + (1.0 - self.g) * amount,
            b: self.b + (1.0 - self.b) * amount,
            a: self.a,
        }
    }

    /// Darken toward black by `amount` (0.0..=1.0)
    pub fn darken(&self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self {
            r: self.r * (1.0 - amount),
            g: self.g * (1.0 - amount),
            b: self.b * (1.0 - amount),
            a: self.a,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Gradient axis within the node's bounding box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientAxis {
    /// Left edge to right edge
    #[default]
    Horizontal,
    /// Top edge to bottom edge
    Vertical,
}

/// Linear gradient description, relative to the node's bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub axis: GradientAxis,
    /// Color stops (should be sorted by offset)
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create a simple two-color gradient
    pub fn linear(axis: GradientAxis, from: Color, to: Color) -> Self {
        Self {
            axis,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Create a gradient with explicit stops
    pub fn with_stops(axis: GradientAxis, stops: Vec<GradientStop>) -> Self {
        Self { axis, stops }
    }
}

/// Fill brush for a markup node
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear(Gradient),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Linear(gradient)
    }
}
