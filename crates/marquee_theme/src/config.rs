//! Theme overrides parsed from TOML
//!
//! Hosts may ship a theme file alongside their app; the kit parses the
//! string and applies the result on top of the active preset. No file I/O
//! happens here.
//!
//! ```toml
//! scheme = "dark"
//!
//! [colors]
//! accent = "#7C3AED"
//! input-bg = "#1E1E24"
//!
//! [spacing]
//! md = 14.0
//!
//! [radii]
//! md = 8.0
//! ```

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::theme::ColorScheme;
use crate::tokens::{ColorToken, RadiusToken, SpacingToken};
use marquee_core::Color;

/// Failures while parsing a theme override document
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown color scheme `{0}` (expected `light` or `dark`)")]
    UnknownScheme(String),

    #[error("unknown {kind} token `{name}`")]
    UnknownToken { kind: &'static str, name: String },

    #[error("invalid color `{value}` for token `{token}` (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor { token: String, value: String },
}

/// Raw document shape
#[derive(Debug, Default, Deserialize)]
struct OverridesDoc {
    scheme: Option<String>,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    spacing: HashMap<String, f32>,
    #[serde(default)]
    radii: HashMap<String, f32>,
}

/// Parsed, token-typed theme overrides
#[derive(Debug, Default)]
pub struct ThemeOverrides {
    pub scheme: Option<ColorScheme>,
    pub colors: FxHashMap<ColorToken, Color>,
    pub spacing: FxHashMap<SpacingToken, f32>,
    pub radii: FxHashMap<RadiusToken, f32>,
}

impl ThemeOverrides {
    /// Parse an override document from a TOML string
    pub fn from_toml_str(input: &str) -> Result<Self, ThemeError> {
        let doc: OverridesDoc = toml::from_str(input)?;
        let mut overrides = ThemeOverrides::default();

        if let Some(name) = doc.scheme {
            overrides.scheme =
                Some(ColorScheme::parse(&name).ok_or(ThemeError::UnknownScheme(name))?);
        }

        for (name, value) in doc.colors {
            let token = ColorToken::parse(&name).ok_or_else(|| ThemeError::UnknownToken {
                kind: "color",
                name: name.clone(),
            })?;
            let color = Color::parse_hex_str(&value).ok_or(ThemeError::InvalidColor {
                token: name,
                value,
            })?;
            overrides.colors.insert(token, color);
        }

        for (name, value) in doc.spacing {
            let token = SpacingToken::parse(&name).ok_or(ThemeError::UnknownToken {
                kind: "spacing",
                name,
            })?;
            overrides.spacing.insert(token, value);
        }

        for (name, value) in doc.radii {
            let token = RadiusToken::parse(&name).ok_or(ThemeError::UnknownToken {
                kind: "radius",
                name,
            })?;
            overrides.radii.insert(token, value);
        }

        Ok(overrides)
    }

    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.colors.is_empty()
            && self.spacing.is_empty()
            && self.radii.is_empty()
    }
}
