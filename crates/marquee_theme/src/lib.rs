//! Marquee Theming
//!
//! Design tokens and theme management for the widget kit:
//!
//! - **Tokens**: semantic color/spacing/radius keys resolved per theme
//! - **Presets**: built-in neutral light/dark bundle
//! - **Overrides**: TOML documents applied on top of the active preset
//! - **ThemeState**: process-wide singleton widgets read during building
//!
//! # Example
//!
//! ```rust
//! use marquee_theme::{ColorToken, ThemeState};
//!
//! // Hosts usually call ThemeState::init(bundle, scheme) at startup;
//! // get() falls back to the neutral light preset.
//! let theme = ThemeState::get();
//! let _field_bg = theme.color(ColorToken::InputBg);
//! ```

pub mod config;
pub mod state;
pub mod theme;
pub mod tokens;

pub use config::{ThemeError, ThemeOverrides};
pub use state::{set_redraw_callback, ThemeState};
pub use theme::{neutral_dark, neutral_light, ColorScheme, Theme, ThemeBundle};
pub use tokens::{
    ColorToken, ColorTokens, RadiusToken, RadiusTokens, SpacingToken, SpacingTokens,
};
