//! Color-picker bands: hue strip, opacity strip, preview swatch
//!
//! The bands pane is a presentational color-offset picker. It renders two
//! horizontal gradient strips with draggable thumbs and a preview swatch,
//! and reports thumb positions as percentages. It performs no color-space
//! math itself: the base color shown in the opacity strip and the preview
//! is supplied by the owner, which derives it from the hue offset however
//! it likes.
//!
//! Interaction is press-and-drag: pressing a band jumps its thumb to the
//! pointer and starts a drag, moving while pressed keeps tracking, and
//! release ends it. Offsets clamp to `0..=100` even when the pointer runs
//! past the strip.

use std::sync::{Arc, Mutex};

use marquee_core::geometry::{Point, Rect, Size};
use marquee_core::paint::{Brush, Color, Gradient, GradientAxis, GradientStop};
use marquee_core::reactive::State;
use marquee_theme::{RadiusToken, ThemeState};

use crate::context::UiContext;
use crate::dropdown::ScrollAction;
use crate::key::InstanceKey;
use crate::markup::{node, Node, Role};
use crate::registry::ElementRegistry;
use crate::router::EventSink;

/// One thumb movement, reported through the change handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandChange {
    /// Hue strip thumb moved to this percentage.
    Color(f32),
    /// Opacity strip thumb moved to this percentage.
    Opacity(f32),
}

/// Change handler fired after an offset commits.
pub type BandsChangeHandler = Arc<dyn Fn(BandChange) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BandKind {
    Color,
    Opacity,
}

/// The hue strip's gradient: the six primary/secondary hues, wrapping
/// back to red.
pub fn hue_gradient() -> Gradient {
    let hues = [
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(1.0, 1.0, 0.0),
        Color::rgb(0.0, 1.0, 0.0),
        Color::rgb(0.0, 1.0, 1.0),
        Color::rgb(0.0, 0.0, 1.0),
        Color::rgb(1.0, 0.0, 1.0),
        Color::rgb(1.0, 0.0, 0.0),
    ];
    Gradient::with_stops(
        GradientAxis::Horizontal,
        hues.iter()
            .enumerate()
            .map(|(i, &color)| GradientStop::new(i as f32 / 6.0, color))
            .collect(),
    )
}

/// The opacity strip's gradient: fully transparent base color to fully
/// opaque.
pub fn opacity_gradient(base: Color) -> Gradient {
    Gradient::linear(GradientAxis::Horizontal, base.with_alpha(0.0), base)
}

// =============================================================================
// Ids
// =============================================================================

#[derive(Debug, Clone)]
struct BandsIds {
    root: String,
    color_band: String,
    color_thumb: String,
    opacity_band: String,
    opacity_thumb: String,
    preview: String,
}

impl BandsIds {
    fn new(key: &InstanceKey) -> Self {
        Self {
            root: key.get().to_string(),
            color_band: key.derive("color"),
            color_thumb: key.derive("color-thumb"),
            opacity_band: key.derive("opacity"),
            opacity_thumb: key.derive("opacity-thumb"),
            preview: key.derive("preview"),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Start building a bands pane bound to two offset cells.
#[track_caller]
pub fn bands(color_offset: &State<f32>, opacity_offset: &State<f32>) -> BandsBuilder {
    BandsBuilder {
        key: InstanceKey::new("bands"),
        color_offset: color_offset.clone(),
        opacity_offset: opacity_offset.clone(),
        color: None,
        on_change: None,
    }
}

/// Fluent configuration for a bands pane.
pub struct BandsBuilder {
    key: InstanceKey,
    color_offset: State<f32>,
    opacity_offset: State<f32>,
    color: Option<State<Color>>,
    on_change: Option<BandsChangeHandler>,
}

impl BandsBuilder {
    /// Use an explicit instance key instead of the caller-location one.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = InstanceKey::explicit(key);
        self
    }

    /// Bind the base color shown in the opacity strip and the preview.
    pub fn color(mut self, color: &State<Color>) -> Self {
        self.color = Some(color.clone());
        self
    }

    /// Handler fired after an offset commits.
    pub fn on_change(mut self, handler: impl Fn(BandChange) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Wire the pane into a context and register it with the event router.
    pub fn mount(self, ctx: &UiContext) -> Arc<Mutex<Bands>> {
        let color = self
            .color
            .unwrap_or_else(|| ctx.use_state(Color::rgb(1.0, 0.0, 0.0)));

        let widget = Arc::new(Mutex::new(Bands {
            ids: BandsIds::new(&self.key),
            color,
            color_offset: self.color_offset,
            opacity_offset: self.opacity_offset,
            on_change: self.on_change,
            registry: ctx.registry(),
            dragging: None,
        }));
        ctx.register_sink(widget.clone());
        widget
    }
}

// =============================================================================
// Bands
// =============================================================================

/// A mounted bands pane.
pub struct Bands {
    ids: BandsIds,
    color: State<Color>,
    color_offset: State<f32>,
    opacity_offset: State<f32>,
    on_change: Option<BandsChangeHandler>,
    registry: Arc<ElementRegistry>,
    dragging: Option<BandKind>,
}

impl Bands {
    pub fn color_offset(&self) -> f32 {
        self.color_offset.get()
    }

    pub fn opacity_offset(&self) -> f32 {
        self.opacity_offset.get()
    }

    /// True while a thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Describe the pane: two gradient strips with thumbs, then the
    /// preview swatch over its checkerboard backing.
    pub fn view(&self) -> Node {
        let theme = ThemeState::get();
        let base = self.color.get();
        let color_pct = self.color_offset.get().clamp(0.0, 100.0);
        let opacity_pct = self.opacity_offset.get().clamp(0.0, 100.0);
        let radius = theme.radius(RadiusToken::Sm);

        let strip = |band_id: &str, thumb_id: &str, kind_class: &str, brush: Brush, pct: f32| {
            node(Role::Band)
                .id(band_id)
                .class("color-band")
                .class(kind_class)
                .brush(brush)
                .rounded(radius)
                .child(
                    node(Role::BandThumb)
                        .id(thumb_id)
                        .class("thumb")
                        .data("left", format_percent(pct)),
                )
        };

        node(Role::Container)
            .id(&self.ids.root)
            .class("band-pane")
            .child(
                node(Role::Container)
                    .class("color-bands")
                    .child(strip(
                        &self.ids.color_band,
                        &self.ids.color_thumb,
                        "is-color",
                        Brush::from(hue_gradient()),
                        color_pct,
                    ))
                    .child(strip(
                        &self.ids.opacity_band,
                        &self.ids.opacity_thumb,
                        "is-opacity",
                        Brush::from(opacity_gradient(base)),
                        opacity_pct,
                    )),
            )
            .child(
                node(Role::Container).class("preview-bg").child(
                    node(Role::Swatch)
                        .id(&self.ids.preview)
                        .class("preview")
                        .brush(base.with_alpha(opacity_pct / 100.0))
                        .rounded(radius),
                ),
            )
    }

    fn band_bounds(&self, kind: BandKind) -> Option<Rect> {
        let id = match kind {
            BandKind::Color => &self.ids.color_band,
            BandKind::Opacity => &self.ids.opacity_band,
        };
        self.registry.bounds(id)
    }

    fn hit_band(&self, point: Point) -> Option<BandKind> {
        for kind in [BandKind::Color, BandKind::Opacity] {
            if self
                .band_bounds(kind)
                .is_some_and(|band| band.contains(point))
            {
                return Some(kind);
            }
        }
        None
    }

    /// Map a pointer x to a thumb percentage and commit it.
    fn track_to(&mut self, kind: BandKind, x: f32) {
        let Some(band) = self.band_bounds(kind) else {
            return;
        };
        if band.width() <= 0.0 {
            return;
        }
        let pct = ((x - band.x()) / band.width() * 100.0).clamp(0.0, 100.0);

        let change = match kind {
            BandKind::Color => {
                self.color_offset.set(pct);
                BandChange::Color(pct)
            }
            BandKind::Opacity => {
                self.opacity_offset.set(pct);
                BandChange::Opacity(pct)
            }
        };
        if let Some(on_change) = &self.on_change {
            on_change(change);
        }
    }
}

impl EventSink for Bands {
    fn pointer_moved(&mut self, x: f32, _y: f32, _now: u64) {
        if let Some(kind) = self.dragging {
            self.track_to(kind, x);
        }
    }

    fn pointer_down(&mut self, x: f32, y: f32, _now: u64) -> bool {
        match self.hit_band(Point::new(x, y)) {
            Some(kind) => {
                self.dragging = Some(kind);
                self.track_to(kind, x);
                true
            }
            None => false,
        }
    }

    fn pointer_up(&mut self, _x: f32, _y: f32, _now: u64) {
        self.dragging = None;
    }

    fn scrolled(&mut self, _target: Option<&str>, _now: u64) -> ScrollAction {
        ScrollAction::Ignored
    }

    fn resized(&mut self, _viewport: Size, _now: u64) {}

    fn update(&mut self, _now: u64) -> bool {
        false
    }
}

impl std::fmt::Debug for Bands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bands")
            .field("id", &self.ids.root)
            .field("dragging", &self.dragging)
            .finish()
    }
}

/// Percent string for thumb offsets, e.g. `"42"` or `"66.5"`.
fn format_percent(pct: f32) -> String {
    if (pct - pct.round()).abs() < f32::EPSILON {
        format!("{}", pct.round() as i32)
    } else {
        format!("{pct:.1}")
    }
}

// =============================================================================
// Tests
// =============================================================================
