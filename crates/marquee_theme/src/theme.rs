//! Theme definitions and built-in presets

use crate::tokens::{ColorTokens, RadiusTokens, SpacingTokens};
use marquee_core::Color;

/// Light or dark rendering scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Parse a scheme name (as used in override files)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }
}

/// A complete resolved theme
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub scheme: ColorScheme,
    colors: ColorTokens,
    spacing: SpacingTokens,
    radii: RadiusTokens,
}

impl Theme {
    pub fn new(
        name: &'static str,
        scheme: ColorScheme,
        colors: ColorTokens,
        spacing: SpacingTokens,
        radii: RadiusTokens,
    ) -> Self {
        Self {
            name,
            scheme,
            colors,
            spacing,
            radii,
        }
    }

    pub fn colors(&self) -> &ColorTokens {
        &self.colors
    }

    pub fn spacing(&self) -> &SpacingTokens {
        &self.spacing
    }

    pub fn radii(&self) -> &RadiusTokens {
        &self.radii
    }
}

/// Paired light/dark themes
#[derive(Clone, Debug)]
pub struct ThemeBundle {
    pub light: Theme,
    pub dark: Theme,
}

impl ThemeBundle {
    pub fn new(light: Theme, dark: Theme) -> Self {
        Self { light, dark }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> &Theme {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// The default neutral bundle
    pub fn neutral() -> Self {
        Self::new(neutral_light(), neutral_dark())
    }
}

impl Default for ThemeBundle {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Built-in neutral light theme
pub fn neutral_light() -> Theme {
    let accent = Color::from_hex(0x2563EB);
    Theme::new(
        "Neutral Light",
        ColorScheme::Light,
        ColorTokens {
            surface: Color::WHITE,
            surface_overlay: Color::from_hex(0xF4F4F5),
            input_bg: Color::WHITE,
            input_bg_hover: Color::from_hex(0xFAFAFA),
            input_bg_disabled: Color::from_hex(0xE4E4E7),
            text_primary: Color::from_hex(0x18181B),
            text_secondary: Color::from_hex(0x52525B),
            text_tertiary: Color::from_hex(0xA1A1AA),
            text_inverse: Color::WHITE,
            border: Color::from_hex(0xD4D4D8),
            border_hover: Color::from_hex(0xA1A1AA),
            border_focus: accent,
            accent,
            accent_subtle: accent.with_alpha(0.12),
        },
        SpacingTokens::default(),
        RadiusTokens::default(),
    )
}

/// Built-in neutral dark theme
pub fn neutral_dark() -> Theme {
    let accent = Color::from_hex(0x3B82F6);
    Theme::new(
        "Neutral Dark",
        ColorScheme::Dark,
        ColorTokens {
            surface: Color::from_hex(0x18181B),
            surface_overlay: Color::from_hex(0x27272A),
            input_bg: Color::from_hex(0x27272A),
            input_bg_hover: Color::from_hex(0x3F3F46),
            input_bg_disabled: Color::from_hex(0x3F3F46).darken(0.2),
            text_primary: Color::from_hex(0xFAFAFA),
            text_secondary: Color::from_hex(0xA1A1AA),
            text_tertiary: Color::from_hex(0x71717A),
            text_inverse: Color::from_hex(0x18181B),
            border: Color::from_hex(0x3F3F46),
            border_hover: Color::from_hex(0x52525B),
            border_focus: accent,
            accent,
            accent_subtle: accent.with_alpha(0.18),
        },
        SpacingTokens::default(),
        RadiusTokens::default(),
    )
}
