//! Global theme state singleton
//!
//! Widgets read tokens through `ThemeState::get()` during markup building.
//! Scheme switches swap whole token sets; individual overrides sit in
//! separate maps consulted first, so they survive scheme changes.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, OnceLock, RwLock,
};

use rustc_hash::FxHashMap;

use crate::config::ThemeOverrides;
use crate::theme::{ColorScheme, ThemeBundle};
use crate::tokens::{ColorToken, ColorTokens, RadiusToken, RadiusTokens, SpacingToken, SpacingTokens};
use marquee_core::Color;

/// Global theme state instance
static THEME_STATE: OnceLock<ThemeState> = OnceLock::new();

/// Global redraw callback - set by the host to trigger re-renders
static REDRAW_CALLBACK: Mutex<Option<fn()>> = Mutex::new(None);

/// Set the redraw callback function
///
/// Hosts register a function here so theme changes can request a re-render
/// without the theme layer knowing anything about the render loop.
pub fn set_redraw_callback(callback: fn()) {
    *REDRAW_CALLBACK.lock().unwrap() = Some(callback);
}

/// Trigger a redraw via the registered callback
fn trigger_redraw() {
    if let Some(callback) = *REDRAW_CALLBACK.lock().unwrap() {
        callback();
    }
}

/// Global theme state - accessed directly by widgets during markup building
pub struct ThemeState {
    /// The active theme bundle (light/dark pair)
    bundle: ThemeBundle,

    /// Current color scheme
    scheme: RwLock<ColorScheme>,

    /// Current color tokens
    colors: RwLock<ColorTokens>,

    /// Current spacing tokens
    spacing: RwLock<SpacingTokens>,

    /// Current radius tokens
    radii: RwLock<RadiusTokens>,

    /// Dynamic color overrides
    color_overrides: RwLock<FxHashMap<ColorToken, Color>>,

    /// Dynamic spacing overrides
    spacing_overrides: RwLock<FxHashMap<SpacingToken, f32>>,

    /// Dynamic radius overrides
    radius_overrides: RwLock<FxHashMap<RadiusToken, f32>>,

    /// Flag indicating widgets need repainting (tokens changed)
    needs_repaint: AtomicBool,
}

impl ThemeState {
    /// Initialize the global theme state (call once at host startup)
    ///
    /// Later calls are ignored; the first bundle wins.
    pub fn init(bundle: ThemeBundle, scheme: ColorScheme) {
        let theme = bundle.for_scheme(scheme);

        let state = ThemeState {
            scheme: RwLock::new(scheme),
            colors: RwLock::new(theme.colors().clone()),
            spacing: RwLock::new(theme.spacing().clone()),
            radii: RwLock::new(theme.radii().clone()),
            bundle,
            color_overrides: RwLock::new(FxHashMap::default()),
            spacing_overrides: RwLock::new(FxHashMap::default()),
            radius_overrides: RwLock::new(FxHashMap::default()),
            needs_repaint: AtomicBool::new(false),
        };

        if THEME_STATE.set(state).is_err() {
            tracing::debug!("ThemeState::init called more than once; keeping the first bundle");
        }
    }

    /// Initialize with the built-in neutral bundle in light scheme
    pub fn init_default() {
        Self::init(ThemeBundle::neutral(), ColorScheme::Light);
    }

    /// Get the global theme state instance
    ///
    /// Initializes the neutral default on first access if the host never
    /// called [`ThemeState::init`].
    pub fn get() -> &'static ThemeState {
        if THEME_STATE.get().is_none() {
            Self::init_default();
        }
        THEME_STATE
            .get()
            .expect("ThemeState failed to initialize")
    }

    /// Try to get the global theme state (returns None if not initialized)
    pub fn try_get() -> Option<&'static ThemeState> {
        THEME_STATE.get()
    }

    // ========== Color Scheme ==========

    /// Get the current color scheme
    pub fn scheme(&self) -> ColorScheme {
        *self.scheme.read().unwrap()
    }

    /// Set the color scheme, swapping in that scheme's token sets
    pub fn set_scheme(&self, scheme: ColorScheme) {
        let mut current = self.scheme.write().unwrap();
        if *current == scheme {
            return;
        }
        tracing::debug!(from = ?*current, to = ?scheme, "theme scheme switch");
        *current = scheme;
        drop(current);

        let theme = self.bundle.for_scheme(scheme);
        *self.colors.write().unwrap() = theme.colors().clone();
        *self.spacing.write().unwrap() = theme.spacing().clone();
        *self.radii.write().unwrap() = theme.radii().clone();

        self.needs_repaint.store(true, Ordering::SeqCst);
        trigger_redraw();
    }

    /// Toggle between light and dark mode
    pub fn toggle_scheme(&self) {
        let current = self.scheme();
        self.set_scheme(current.toggle());
    }

    // ========== Token Access ==========

    /// Get a color token value (checks override first)
    pub fn color(&self, token: ColorToken) -> Color {
        if let Some(color) = self.color_overrides.read().unwrap().get(&token) {
            return *color;
        }
        self.colors.read().unwrap().get(token)
    }

    /// Get all color tokens
    pub fn colors(&self) -> ColorTokens {
        self.colors.read().unwrap().clone()
    }

    /// Get a spacing token value (checks override first)
    pub fn spacing_value(&self, token: SpacingToken) -> f32 {
        if let Some(value) = self.spacing_overrides.read().unwrap().get(&token) {
            return *value;
        }
        self.spacing.read().unwrap().get(token)
    }

    /// Get a radius token value (checks override first)
    pub fn radius(&self, token: RadiusToken) -> f32 {
        if let Some(value) = self.radius_overrides.read().unwrap().get(&token) {
            return *value;
        }
        self.radii.read().unwrap().get(token)
    }

    // ========== Overrides ==========

    /// Set a color override (survives scheme switches)
    pub fn set_color_override(&self, token: ColorToken, color: Color) {
        self.color_overrides.write().unwrap().insert(token, color);
        self.needs_repaint.store(true, Ordering::SeqCst);
        trigger_redraw();
    }

    /// Remove a color override
    pub fn remove_color_override(&self, token: ColorToken) {
        self.color_overrides.write().unwrap().remove(&token);
        self.needs_repaint.store(true, Ordering::SeqCst);
        trigger_redraw();
    }

    /// Apply a parsed override document on top of the active theme
    pub fn apply_overrides(&self, overrides: &ThemeOverrides) {
        if let Some(scheme) = overrides.scheme {
            self.set_scheme(scheme);
        }
        {
            let mut colors = self.color_overrides.write().unwrap();
            for (token, color) in &overrides.colors {
                colors.insert(*token, *color);
            }
        }
        {
            let mut spacing = self.spacing_overrides.write().unwrap();
            for (token, value) in &overrides.spacing {
                spacing.insert(*token, *value);
            }
        }
        {
            let mut radii = self.radius_overrides.write().unwrap();
            for (token, value) in &overrides.radii {
                radii.insert(*token, *value);
            }
        }
        self.needs_repaint.store(true, Ordering::SeqCst);
        trigger_redraw();
    }

    /// Clear all dynamic overrides
    pub fn clear_overrides(&self) {
        self.color_overrides.write().unwrap().clear();
        self.spacing_overrides.write().unwrap().clear();
        self.radius_overrides.write().unwrap().clear();
        self.needs_repaint.store(true, Ordering::SeqCst);
        trigger_redraw();
    }

    // ========== Repaint Flag ==========

    /// Check whether tokens changed since the last clear
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint.load(Ordering::SeqCst)
    }

    /// Acknowledge a repaint
    pub fn clear_repaint(&self) {
        self.needs_repaint.store(false, Ordering::SeqCst);
    }
}
