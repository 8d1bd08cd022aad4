//! Design tokens
//!
//! Semantic token keys plus the concrete token sets a theme resolves them
//! against. Widgets always go through token keys; raw colors appear only in
//! presets and overrides.

use marquee_core::Color;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Surface colors
    Surface,
    SurfaceOverlay,

    // Input element colors
    InputBg,
    InputBgHover,
    InputBgDisabled,

    // Text colors
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextInverse,

    // Border colors
    Border,
    BorderHover,
    BorderFocus,

    // Accent
    Accent,
    AccentSubtle,
}

impl ColorToken {
    /// Parse a kebab-case token name (as used in override files)
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "surface" => Self::Surface,
            "surface-overlay" => Self::SurfaceOverlay,
            "input-bg" => Self::InputBg,
            "input-bg-hover" => Self::InputBgHover,
            "input-bg-disabled" => Self::InputBgDisabled,
            "text-primary" => Self::TextPrimary,
            "text-secondary" => Self::TextSecondary,
            "text-tertiary" => Self::TextTertiary,
            "text-inverse" => Self::TextInverse,
            "border" => Self::Border,
            "border-hover" => Self::BorderHover,
            "border-focus" => Self::BorderFocus,
            "accent" => Self::Accent,
            "accent-subtle" => Self::AccentSubtle,
            _ => return None,
        })
    }
}

/// Complete set of semantic color tokens
#[derive(Clone, Debug)]
pub struct ColorTokens {
    pub surface: Color,
    pub surface_overlay: Color,

    pub input_bg: Color,
    pub input_bg_hover: Color,
    pub input_bg_disabled: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub text_inverse: Color,

    pub border: Color,
    pub border_hover: Color,
    pub border_focus: Color,

    pub accent: Color,
    pub accent_subtle: Color,
}

impl ColorTokens {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceOverlay => self.surface_overlay,
            ColorToken::InputBg => self.input_bg,
            ColorToken::InputBgHover => self.input_bg_hover,
            ColorToken::InputBgDisabled => self.input_bg_disabled,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextTertiary => self.text_tertiary,
            ColorToken::TextInverse => self.text_inverse,
            ColorToken::Border => self.border,
            ColorToken::BorderHover => self.border_hover,
            ColorToken::BorderFocus => self.border_focus,
            ColorToken::Accent => self.accent,
            ColorToken::AccentSubtle => self.accent_subtle,
        }
    }
}

/// Spacing token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SpacingToken {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl SpacingToken {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "xs" => Self::Xs,
            "sm" => Self::Sm,
            "md" => Self::Md,
            "lg" => Self::Lg,
            "xl" => Self::Xl,
            _ => return None,
        })
    }
}

/// Spacing scale in logical pixels
#[derive(Clone, Debug)]
pub struct SpacingTokens {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

impl SpacingTokens {
    pub fn get(&self, token: SpacingToken) -> f32 {
        match token {
            SpacingToken::Xs => self.xs,
            SpacingToken::Sm => self.sm,
            SpacingToken::Md => self.md,
            SpacingToken::Lg => self.lg,
            SpacingToken::Xl => self.xl,
        }
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            xs: 4.0,
            sm: 8.0,
            md: 12.0,
            lg: 16.0,
            xl: 24.0,
        }
    }
}

/// Corner radius token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum RadiusToken {
    Sm,
    Md,
    Lg,
    Full,
}

impl RadiusToken {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "sm" => Self::Sm,
            "md" => Self::Md,
            "lg" => Self::Lg,
            "full" => Self::Full,
            _ => return None,
        })
    }
}

/// Corner radius scale in logical pixels
#[derive(Clone, Debug)]
pub struct RadiusTokens {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub full: f32,
}

impl RadiusTokens {
    pub fn get(&self, token: RadiusToken) -> f32 {
        match token {
            RadiusToken::Sm => self.sm,
            RadiusToken::Md => self.md,
            RadiusToken::Lg => self.lg,
            RadiusToken::Full => self.full,
        }
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            sm: 4.0,
            md: 6.0,
            lg: 10.0,
            full: 9999.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_token_parse() {
        assert_eq!(ColorToken::parse("input-bg"), Some(ColorToken::InputBg));
        assert_eq!(ColorToken::parse("accent"), Some(ColorToken::Accent));
        assert_eq!(ColorToken::parse("no-such-token"), None);
    }

    #[test]
    fn test_scale_defaults() {
        let spacing = SpacingTokens::default();
        assert_eq!(spacing.get(SpacingToken::Xs), 4.0);
        assert_eq!(spacing.get(SpacingToken::Xl), 24.0);

        let radii = RadiusTokens::default();
        assert_eq!(radii.get(RadiusToken::Md), 6.0);
        assert_eq!(radii.get(RadiusToken::Full), 9999.0);
    }
}
