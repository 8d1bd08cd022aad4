//! Select widget: a themed dropdown value picker
//!
//! A select binds a reactive `State<String>` to a trigger and a floating
//! option menu. Clicking the trigger opens the menu through a
//! [`Dropdown`] controller; clicking a visible option commits its value,
//! notifies the change handler, and closes the menu. Clicks elsewhere
//! close without committing.
//!
//! # Example
//!
//! ```
//! use marquee_ui::context::UiContext;
//! use marquee_ui::portal::NullRenderer;
//! use marquee_ui::select::{select, SelectSize};
//! use marquee_ui::options::OptionGroup;
//!
//! let ctx = UiContext::new(NullRenderer);
//! let fruit = ctx.use_state(String::new());
//!
//! let widget = select(&fruit)
//!     .key("fruit")
//!     .placeholder("Choose a fruit…")
//!     .option("Apple")
//!     .option(OptionGroup::new("Stone fruit").option("Peach").option("Plum"))
//!     .size(SelectSize::Small)
//!     .on_change(|value| println!("picked {value}"))
//!     .mount(&ctx);
//!
//! let view = widget.lock().unwrap().view();
//! ctx.mount_view(&view);
//! ```
//!
//! The widget is presentational: [`Select::view`] describes the trigger as
//! markup, the host lays it out and reports bounds back through the
//! element registry, and menu content reaches the screen via the portal
//! layer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use marquee_core::geometry::{Point, Size};
use marquee_core::reactive::{State, WatcherId};
use marquee_theme::{ColorToken, RadiusToken, ThemeState};

use crate::context::UiContext;
use crate::dropdown::{
    Dropdown, DropdownConfig, DropdownHook, DropdownHooks, MenuContentFn, ScrollAction,
};
use crate::key::InstanceKey;
use crate::markup::{class_list, node, Node, Role};
use crate::options::{Entry, OptionList, DEFAULT_EMPTY_MESSAGE, DEFAULT_PLACEHOLDER};
use crate::position::{MenuAlign, MenuPlacement};
use crate::registry::ElementRegistry;
use crate::router::EventSink;

/// Menu width when the trigger has no reported bounds yet.
const DEFAULT_MENU_WIDTH: f32 = 200.0;

/// Vertical padding inside the menu surface, above and below the rows.
const MENU_PADDING: f32 = 4.0;

/// Select size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectSize {
    /// Small select (height: 32px, text: 13px)
    Small,
    /// Medium select (height: 40px, text: 14px)
    #[default]
    Medium,
    /// Large select (height: 48px, text: 16px)
    Large,
}

impl SelectSize {
    /// Trigger height for this size
    pub fn height(&self) -> f32 {
        match self {
            SelectSize::Small => 32.0,
            SelectSize::Medium => 40.0,
            SelectSize::Large => 48.0,
        }
    }

    /// Font size for this size
    pub fn font_size(&self) -> f32 {
        match self {
            SelectSize::Small => 13.0,
            SelectSize::Medium => 14.0,
            SelectSize::Large => 16.0,
        }
    }

    /// Horizontal trigger padding for this size
    pub fn padding(&self) -> f32 {
        match self {
            SelectSize::Small => 8.0,
            SelectSize::Medium => 12.0,
            SelectSize::Large => 16.0,
        }
    }

    /// Menu row height for this size
    pub fn row_height(&self) -> f32 {
        match self {
            SelectSize::Small => 28.0,
            SelectSize::Medium => 32.0,
            SelectSize::Large => 40.0,
        }
    }

    fn class(&self) -> Option<&'static str> {
        match self {
            SelectSize::Small => Some("is-small"),
            SelectSize::Medium => None,
            SelectSize::Large => Some("is-large"),
        }
    }
}

/// Visual flavor of the trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectVariant {
    /// Bordered input-field look.
    #[default]
    Classic,
    /// Flat panel look, blends into toolbars.
    Panel,
}

/// Change handler fired after a value commits.
pub type SelectChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

// =============================================================================
// Element ids
// =============================================================================

/// Derived element ids for one select instance.
#[derive(Debug, Clone)]
struct SelectIds {
    root: String,
    trigger: String,
    label: String,
    menu: String,
    empty: String,
    opt_prefix: String,
    title_prefix: String,
}

impl SelectIds {
    fn new(key: &InstanceKey) -> Self {
        Self {
            root: key.get().to_string(),
            trigger: key.derive("trigger"),
            label: key.derive("label"),
            menu: key.derive("menu"),
            empty: key.derive("empty"),
            opt_prefix: key.derive("opt:"),
            title_prefix: key.derive("title:"),
        }
    }

    fn opt(&self, flat_index: usize) -> String {
        format!("{}{}", self.opt_prefix, flat_index)
    }

    fn title(&self, title_index: usize) -> String {
        format!("{}{}", self.title_prefix, title_index)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Start building a select bound to a value cell.
#[track_caller]
pub fn select(value: &State<String>) -> SelectBuilder {
    SelectBuilder {
        key: InstanceKey::new("select"),
        value: value.clone(),
        options: OptionList::new(),
        placeholder: None,
        empty_message: None,
        label: None,
        disabled: false,
        size: SelectSize::default(),
        variant: SelectVariant::default(),
        align: MenuAlign::default(),
        set_max_height: true,
        on_change: None,
        hooks: DropdownHooks::default(),
    }
}

/// Fluent configuration for a select widget.
pub struct SelectBuilder {
    key: InstanceKey,
    value: State<String>,
    options: OptionList,
    placeholder: Option<String>,
    empty_message: Option<String>,
    label: Option<String>,
    disabled: bool,
    size: SelectSize,
    variant: SelectVariant,
    align: MenuAlign,
    set_max_height: bool,
    on_change: Option<SelectChangeHandler>,
    hooks: DropdownHooks,
}

impl SelectBuilder {
    /// Use an explicit instance key instead of the caller-location one.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = InstanceKey::explicit(key);
        self
    }

    /// Append one option entry (string, item, or group).
    pub fn option(mut self, entry: impl Into<Entry>) -> Self {
        self.options.entries.push(entry.into());
        self
    }

    /// Replace the whole option list.
    pub fn options(mut self, options: OptionList) -> Self {
        self.options = options;
        self
    }

    /// Trigger text while nothing is selected.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Menu row shown when the option list is empty.
    pub fn empty_message(mut self, text: impl Into<String>) -> Self {
        self.empty_message = Some(text.into());
        self
    }

    /// Caption rendered above the trigger.
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Disabled selects render but never open.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn size(mut self, size: SelectSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: SelectVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Horizontal menu alignment relative to the trigger.
    pub fn align(mut self, align: MenuAlign) -> Self {
        self.align = align;
        self
    }

    /// Let the menu keep its natural height instead of capping it to the
    /// available space.
    pub fn natural_height(mut self) -> Self {
        self.set_max_height = false;
        self
    }

    /// Handler fired after a value commits, before the menu closes.
    pub fn on_change(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Hook fired when the menu opens.
    pub fn on_open(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks.on_open = Some(Arc::new(hook) as DropdownHook);
        self
    }

    /// Hook fired whenever the menu closes, for any reason.
    pub fn on_close(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks.on_close = Some(Arc::new(hook) as DropdownHook);
        self
    }

    /// Hook fired when the widget is torn down.
    pub fn on_dispose(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks.on_dispose = Some(Arc::new(hook) as DropdownHook);
        self
    }

    /// Wire the widget into a context and register it with the event
    /// router. The returned handle drives [`Select::view`] and lifecycle.
    pub fn mount(self, ctx: &UiContext) -> Arc<Mutex<Select>> {
        let ids = SelectIds::new(&self.key);
        let size = self.size;
        let empty_message = self
            .empty_message
            .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());

        let content: MenuContentFn = {
            let options = self.options.clone();
            let value = self.value.clone();
            let ids = ids.clone();
            let empty_message = empty_message.clone();
            Arc::new(move |placement: &MenuPlacement| {
                build_menu(&options, &value.get(), &ids, size, &empty_message, placement)
            })
        };

        let mut config = DropdownConfig::new(ids.trigger.clone(), ids.menu.clone());
        config.align = self.align;
        config.set_max_height = self.set_max_height;

        let mut dropdown = Dropdown::new(
            config,
            ctx.registry(),
            ctx.portals(),
            ctx.renderer(),
            ctx.scroll_lock(),
            content,
        )
        .with_hooks(self.hooks);
        dropdown.set_viewport(ctx.viewport());

        let flat: Vec<Entry> = self.options.flatten().into_iter().cloned().collect();
        let menu_dirty = Arc::new(AtomicBool::new(false));

        let widget = Arc::new(Mutex::new(Select {
            ids,
            options: self.options,
            flat,
            value: self.value.clone(),
            placeholder: self
                .placeholder
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            empty_message,
            label: self.label,
            disabled: self.disabled,
            size,
            variant: self.variant,
            on_change: self.on_change,
            registry: ctx.registry(),
            dropdown,
            menu_dirty: Arc::clone(&menu_dirty),
            value_watcher: None,
        }));

        // An external value change only flips a flag here; the menu is
        // rebuilt on the next update() tick to keep watcher work re-entrant.
        let watcher = self.value.on_change(move || {
            menu_dirty.store(true, Ordering::SeqCst);
        });
        widget.lock().unwrap().value_watcher = Some(watcher);

        ctx.register_sink(widget.clone());
        widget
    }
}

// =============================================================================
// Select
// =============================================================================

/// A mounted select widget.
pub struct Select {
    ids: SelectIds,
    options: OptionList,
    /// Leaf entries in menu-row order, aligned with `opt:{i}` element ids.
    flat: Vec<Entry>,
    value: State<String>,
    placeholder: String,
    empty_message: String,
    label: Option<String>,
    disabled: bool,
    size: SelectSize,
    variant: SelectVariant,
    on_change: Option<SelectChangeHandler>,
    registry: Arc<ElementRegistry>,
    dropdown: Dropdown,
    menu_dirty: Arc<AtomicBool>,
    value_watcher: Option<WatcherId>,
}

impl Select {
    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn placement(&self) -> Option<MenuPlacement> {
        self.dropdown.placement()
    }

    /// Registry id of the trigger element.
    pub fn trigger_id(&self) -> &str {
        &self.ids.trigger
    }

    /// Registry id of the menu surface while open.
    pub fn menu_id(&self) -> &str {
        &self.ids.menu
    }

    /// Registry id of the option row at a flat index.
    pub fn option_id(&self, flat_index: usize) -> String {
        self.ids.opt(flat_index)
    }

    pub fn holds_scroll_lock(&self) -> bool {
        self.dropdown.holds_scroll_lock()
    }

    // =========================================================================
    // Trigger markup
    // =========================================================================

    /// Describe the inline part of the widget (label and trigger). The
    /// menu never appears here; it mounts through the portal layer.
    pub fn view(&self) -> Node {
        let theme = ThemeState::get();
        let open = self.dropdown.is_open();

        let current = self.value.get();
        let display = self.options.display_text(&current).map(str::to_string);
        let is_placeholder = display.is_none();
        let shown = display.unwrap_or_else(|| self.placeholder.clone());

        let text_color = if is_placeholder {
            theme.color(ColorToken::TextTertiary)
        } else {
            theme.color(ColorToken::TextPrimary)
        };
        let trigger_bg = if self.disabled {
            theme.color(ColorToken::InputBgDisabled)
        } else if matches!(self.variant, SelectVariant::Panel) {
            theme.color(ColorToken::Surface)
        } else {
            theme.color(ColorToken::InputBg)
        };

        let trigger = node(Role::Trigger)
            .id(&self.ids.trigger)
            .class("select-trigger")
            .brush(trigger_bg)
            .rounded(theme.radius(RadiusToken::Md))
            .child(
                node(Role::TriggerLabel)
                    .class("select-value")
                    .text(shown)
                    .text_color(text_color),
            )
            .child(node(Role::Caret).classes(class_list([
                Some("caret"),
                open.then_some("is-open"),
            ])));

        let mut root = node(Role::Container).id(&self.ids.root).classes(class_list([
            Some("select"),
            self.size.class(),
            matches!(self.variant, SelectVariant::Panel).then_some("select-panel"),
            open.then_some("is-open"),
            self.disabled.then_some("is-disabled"),
        ]));

        if let Some(label) = &self.label {
            root = root.child(
                node(Role::FieldLabel)
                    .id(&self.ids.label)
                    .class("select-label")
                    .text(label)
                    .text_color(theme.color(ColorToken::TextSecondary)),
            );
        }
        root.child(trigger)
    }

    // =========================================================================
    // Menu lifecycle
    // =========================================================================

    fn open_menu(&mut self) {
        let width = self
            .registry
            .bounds(&self.ids.trigger)
            .map(|r| r.width())
            .unwrap_or(DEFAULT_MENU_WIDTH);
        self.dropdown
            .set_menu_size(Size::new(width, self.menu_natural_height()));
        self.dropdown.set_active_option(self.active_row_id());
        self.dropdown.open();
    }

    fn toggle_menu(&mut self) {
        if self.dropdown.is_open() {
            self.dropdown.close();
        } else {
            self.open_menu();
        }
    }

    /// Natural menu height: every leaf row and group title at row height,
    /// plus the surface padding. An empty list still shows one row for
    /// the empty message.
    fn menu_natural_height(&self) -> f32 {
        let rows = menu_row_count(&self.options.entries).max(1);
        rows as f32 * self.size.row_height() + 2.0 * MENU_PADDING
    }

    fn active_row_id(&self) -> Option<String> {
        let current = self.value.get();
        self.flat
            .iter()
            .position(|entry| entry.matches(&current))
            .map(|i| self.ids.opt(i))
    }

    fn commit(&mut self, value: String) {
        tracing::debug!("Select '{}' commit '{}'", self.ids.root, value);
        self.value.set(value.clone());
        if let Some(on_change) = &self.on_change {
            on_change(&value);
        }
    }

    fn flat_index_of(&self, row_id: &str) -> Option<usize> {
        row_id
            .strip_prefix(self.ids.opt_prefix.as_str())?
            .parse()
            .ok()
    }

    /// Tear down the widget: close the menu, detach the value watcher.
    pub fn dispose(&mut self) {
        if let Some(watcher) = self.value_watcher.take() {
            self.value.remove_watcher(watcher);
        }
        self.dropdown.dispose();
    }
}

impl EventSink for Select {
    fn pointer_moved(&mut self, x: f32, y: f32, now: u64) {
        self.dropdown.pointer_moved(x, y, now);
    }

    fn pointer_down(&mut self, x: f32, y: f32, _now: u64) -> bool {
        let point = Point::new(x, y);

        if self.dropdown.hit_trigger(point) {
            // A disabled trigger swallows the press but stays closed.
            if !self.disabled {
                self.toggle_menu();
            }
            return true;
        }

        if !self.dropdown.is_open() {
            return false;
        }

        if let Some((row_id, row_bounds)) =
            self.registry.hit_test_prefix(&self.ids.opt_prefix, point)
        {
            if let Some(entry) = self
                .flat_index_of(&row_id)
                .and_then(|i| self.flat.get(i))
                .cloned()
            {
                if !entry.selectable() {
                    // Disabled rows absorb the click without committing.
                    return true;
                }
                if self.dropdown.option_click_is_visible(row_bounds) {
                    self.commit(entry.resolve_value().to_string());
                    self.dropdown.select_committed();
                    return true;
                }
                // Hit-testable but visually clipped: an outside
                // interaction, not a selection.
                self.dropdown.outside_interaction();
                return false;
            }
        }

        if self.dropdown.hit_menu(point) {
            // Menu padding, group titles, the empty-message row: the menu
            // stays open and the press goes no further.
            return true;
        }

        self.dropdown.outside_interaction();
        false
    }

    fn scrolled(&mut self, target: Option<&str>, now: u64) -> ScrollAction {
        self.dropdown.scrolled(target, now)
    }

    fn resized(&mut self, viewport: Size, _now: u64) {
        self.dropdown.resized(viewport.width, viewport.height);
    }

    fn update(&mut self, now: u64) -> bool {
        let released = self.dropdown.update(now);
        let refreshed = if self.menu_dirty.swap(false, Ordering::SeqCst) {
            self.dropdown.refresh();
            self.dropdown.is_open()
        } else {
            false
        };
        released || refreshed
    }
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.ids.root)
            .field("open", &self.dropdown.is_open())
            .field("disabled", &self.disabled)
            .field("options", &self.options.len())
            .finish()
    }
}

// =============================================================================
// Menu markup
// =============================================================================

/// Rows a menu renders: leaf entries plus one title row per group.
fn menu_row_count(entries: &[Entry]) -> usize {
    entries
        .iter()
        .map(|entry| match entry {
            Entry::Group(group) => 1 + menu_row_count(&group.options),
            _ => 1,
        })
        .sum()
}

/// Build the floating menu surface for the current placement and value.
fn build_menu(
    options: &OptionList,
    selected: &str,
    ids: &SelectIds,
    size: SelectSize,
    empty_message: &str,
    placement: &MenuPlacement,
) -> Node {
    let theme = ThemeState::get();
    let direction = if placement.is_downward {
        "is-downward"
    } else {
        "is-upward"
    };

    let mut menu = node(Role::Menu)
        .id(&ids.menu)
        .classes(class_list([
            Some("select-menu"),
            Some("is-open"),
            Some(direction),
            size.class(),
        ]))
        .brush(theme.color(ColorToken::SurfaceOverlay))
        .rounded(theme.radius(RadiusToken::Md))
        .offset(placement.x, placement.y);
    if let Some(cap) = placement.max_height {
        menu = menu.max_height(cap);
    }

    if options.is_empty() {
        return menu.child(
            node(Role::EmptyMessage)
                .id(&ids.empty)
                .class("empty-msg")
                .text(empty_message)
                .text_color(theme.color(ColorToken::TextTertiary)),
        );
    }

    let mut rows = Vec::new();
    let mut flat_index = 0;
    let mut title_index = 0;
    push_rows(
        &options.entries,
        selected,
        ids,
        theme,
        &mut flat_index,
        &mut title_index,
        &mut rows,
    );
    menu.children_from(rows)
}

fn push_rows(
    entries: &[Entry],
    selected: &str,
    ids: &SelectIds,
    theme: &ThemeState,
    flat_index: &mut usize,
    title_index: &mut usize,
    rows: &mut Vec<Node>,
) {
    for entry in entries {
        match entry {
            Entry::Group(group) => {
                rows.push(
                    node(Role::GroupTitle)
                        .id(ids.title(*title_index))
                        .class("title")
                        .text(&group.title)
                        .text_color(theme.color(ColorToken::TextSecondary)),
                );
                *title_index += 1;
                push_rows(
                    &group.options,
                    selected,
                    ids,
                    theme,
                    flat_index,
                    title_index,
                    rows,
                );
            }
            leaf => {
                let is_active = leaf.matches(selected);
                let is_disabled = !leaf.selectable();
                let text_color = if is_disabled {
                    theme.color(ColorToken::TextTertiary)
                } else if is_active {
                    theme.color(ColorToken::Accent)
                } else {
                    theme.color(ColorToken::TextPrimary)
                };

                let mut row = node(Role::OptionRow)
                    .id(ids.opt(*flat_index))
                    .classes(class_list([
                        Some("option"),
                        is_active.then_some("is-active"),
                        is_disabled.then_some("is-disabled"),
                    ]))
                    .text(leaf.resolve_label())
                    .text_color(text_color)
                    .data("value", leaf.resolve_value());
                if is_active {
                    row = row.brush(theme.color(ColorToken::AccentSubtle));
                }
                rows.push(row);
                *flat_index += 1;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptionGroup, OptionItem};
    use crate::portal::NullRenderer;

    fn test_ids() -> SelectIds {
        SelectIds::new(&InstanceKey::explicit("s"))
    }

    #[test]
    fn test_view_shows_placeholder_until_value_matches() {
        let ctx = UiContext::new(NullRenderer);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("fruit")
            .placeholder("Pick one")
            .option(OptionItem::new("Apple", "apple"))
            .mount(&ctx);

        let view = widget.lock().unwrap().view();
        let label = view.find("fruit:trigger").unwrap().children[0].clone();
        assert_eq!(label.text.as_deref(), Some("Pick one"));

        value.set("apple".to_string());
        let view = widget.lock().unwrap().view();
        let label = view.find("fruit:trigger").unwrap().children[0].clone();
        assert_eq!(label.text.as_deref(), Some("Apple"));
    }

    #[test]
    fn test_view_classes_reflect_state() {
        let ctx = UiContext::new(NullRenderer);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("k")
            .size(SelectSize::Large)
            .variant(SelectVariant::Panel)
            .disabled(true)
            .mount(&ctx);

        let view = widget.lock().unwrap().view();
        assert!(view.has_class("select"));
        assert!(view.has_class("is-large"));
        assert!(view.has_class("select-panel"));
        assert!(view.has_class("is-disabled"));
        assert!(!view.has_class("is-open"));
    }

    #[test]
    fn test_view_includes_field_label() {
        let ctx = UiContext::new(NullRenderer);
        let value = ctx.use_state(String::new());
        let widget = select(&value).key("k").label("Favorite fruit").mount(&ctx);

        let view = widget.lock().unwrap().view();
        let label = view.find("k:label").unwrap();
        assert_eq!(label.text.as_deref(), Some("Favorite fruit"));
        assert_eq!(label.role, Role::FieldLabel);
    }

    #[test]
    fn test_build_menu_rows_and_ids() {
        let options = OptionList::new()
            .entry("Apple")
            .entry(
                OptionGroup::new("Stationery")
                    .option(OptionItem::new("Pencil", "pencil"))
                    .option(OptionItem::new("Pen", "pen").disabled(true)),
            )
            .entry("Banana");
        let ids = test_ids();

        let menu = build_menu(
            &options,
            "pencil",
            &ids,
            SelectSize::Medium,
            DEFAULT_EMPTY_MESSAGE,
            &MenuPlacement::default(),
        );

        assert!(menu.has_class("is-downward"));
        // Leaf rows take flat indices in display order; titles are separate.
        assert_eq!(menu.find("s:opt:0").unwrap().text.as_deref(), Some("Apple"));
        assert_eq!(menu.find("s:opt:1").unwrap().text.as_deref(), Some("Pencil"));
        assert_eq!(menu.find("s:opt:3").unwrap().text.as_deref(), Some("Banana"));
        assert_eq!(
            menu.find("s:title:0").unwrap().text.as_deref(),
            Some("Stationery")
        );

        assert!(menu.find("s:opt:1").unwrap().has_class("is-active"));
        assert!(menu.find("s:opt:2").unwrap().has_class("is-disabled"));
        assert_eq!(menu.find("s:opt:2").unwrap().data_value("value"), Some("pen"));
    }

    #[test]
    fn test_build_menu_empty_list_shows_message() {
        let ids = test_ids();
        let menu = build_menu(
            &OptionList::new(),
            "",
            &ids,
            SelectSize::Medium,
            "Nothing here",
            &MenuPlacement::default(),
        );

        let empty = menu.find("s:empty").unwrap();
        assert_eq!(empty.role, Role::EmptyMessage);
        assert_eq!(empty.text.as_deref(), Some("Nothing here"));
        assert_eq!(menu.children.len(), 1);
    }

    #[test]
    fn test_build_menu_carries_placement() {
        let ids = test_ids();
        let placement = MenuPlacement {
            x: 40.0,
            y: 96.0,
            is_downward: false,
            max_height: Some(120.0),
        };
        let menu = build_menu(
            &OptionList::new().entry("A"),
            "",
            &ids,
            SelectSize::Medium,
            DEFAULT_EMPTY_MESSAGE,
            &placement,
        );

        assert!(menu.has_class("is-upward"));
        assert_eq!(menu.offset.map(|p| (p.x, p.y)), Some((40.0, 96.0)));
        assert_eq!(menu.max_height, Some(120.0));
    }

    #[test]
    fn test_menu_row_count_includes_titles() {
        let options = OptionList::new()
            .entry("Apple")
            .entry(OptionGroup::new("G").option("B").option("C"));
        assert_eq!(menu_row_count(&options.entries), 4);
    }

    #[test]
    fn test_default_texts() {
        let ctx = UiContext::new(NullRenderer);
        let value = ctx.use_state(String::new());
        let widget = select(&value).key("k").mount(&ctx);

        let guard = widget.lock().unwrap();
        assert_eq!(guard.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(guard.empty_message, DEFAULT_EMPTY_MESSAGE);
    }

    // =========================================================================
    // Routed flows
    // =========================================================================

    use crate::portal::PortalManagerExt;
    use marquee_core::events::Event;
    use marquee_core::geometry::Rect;

    /// Mount a three-option select and report trigger geometry, as a host
    /// would after laying out the view.
    fn flow_fixture() -> (UiContext, Arc<Mutex<Select>>, State<String>) {
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("s")
            .option(OptionItem::new("Pencil", "pencil"))
            .option(OptionItem::new("Pen", "pen"))
            .option(OptionItem::new("Eraser", "eraser").disabled(true))
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));
        (ctx, widget, value)
    }

    /// Host stand-in for the open menu: three rows at Medium row height
    /// under the computed placement.
    fn report_open_rows(ctx: &UiContext, widget: &Arc<Mutex<Select>>) {
        let placement = widget.lock().unwrap().placement().unwrap();
        let registry = ctx.registry();
        registry.set_bounds(
            "s:menu",
            Rect::new(placement.x, placement.y, 120.0, 104.0),
        );
        for i in 0..3 {
            registry.set_bounds(
                &format!("s:opt:{i}"),
                Rect::new(
                    placement.x,
                    placement.y + MENU_PADDING + 32.0 * i as f32,
                    120.0,
                    32.0,
                ),
            );
        }
    }

    #[test]
    fn test_click_flow_commits_visible_option() {
        let picked: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let sink = Arc::clone(&picked);
        let widget = select(&value)
            .key("s")
            .option(OptionItem::new("Pencil", "pencil"))
            .option(OptionItem::new("Pen", "pen"))
            .on_change(move |v| sink.lock().unwrap().push(v.to_string()))
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));

        // Trigger press opens the menu below the trigger.
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 60.0)));
        assert!(widget.lock().unwrap().is_open());
        let placement = widget.lock().unwrap().placement().unwrap();
        assert!(placement.is_downward);
        assert_eq!((placement.x, placement.y), (100.0, 86.0));
        assert_eq!(ctx.portals().portal_count(), 1);

        let registry = ctx.registry();
        registry.set_bounds("s:menu", Rect::new(100.0, 86.0, 120.0, 72.0));
        registry.set_bounds("s:opt:0", Rect::new(100.0, 90.0, 120.0, 32.0));
        registry.set_bounds("s:opt:1", Rect::new(100.0, 122.0, 120.0, 32.0));

        // Press on the second row commits its value and closes.
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 130.0)));
        assert_eq!(value.get(), "pen");
        assert_eq!(*picked.lock().unwrap(), vec!["pen"]);
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(ctx.portals().portal_count(), 0);
    }

    #[test]
    fn test_outside_click_closes_without_commit() {
        let (ctx, widget, value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);

        assert!(!ctx.dispatch(&Event::pointer_down(500.0, 400.0)));
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_clipped_row_click_is_outside_interaction() {
        let (ctx, widget, value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);

        // The inner list scrolled: the first row pokes above the menu's
        // visible top while staying hit-testable.
        ctx.registry()
            .set_bounds("s:opt:0", Rect::new(100.0, 54.0, 120.0, 30.0));

        assert!(!ctx.dispatch(&Event::pointer_down(160.0, 83.0)));
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_disabled_select_swallows_press_and_stays_closed() {
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("s")
            .option("Apple")
            .disabled(true)
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));

        assert!(ctx.dispatch(&Event::pointer_down(160.0, 60.0)));
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(ctx.portals().portal_count(), 0);
    }

    #[test]
    fn test_disabled_option_click_is_absorbed() {
        let (ctx, widget, value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);

        // Third row is the disabled "Eraser".
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 160.0)));
        assert!(widget.lock().unwrap().is_open());
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_group_title_click_keeps_menu_open() {
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("s")
            .option(OptionGroup::new("Tools").option(OptionItem::new("Pencil", "pencil")))
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));

        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        let registry = ctx.registry();
        registry.set_bounds("s:menu", Rect::new(100.0, 86.0, 120.0, 72.0));
        registry.set_bounds("s:title:0", Rect::new(100.0, 90.0, 120.0, 32.0));
        registry.set_bounds("s:opt:0", Rect::new(100.0, 122.0, 120.0, 32.0));

        // The title row consumes the press but selects nothing.
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 100.0)));
        assert!(widget.lock().unwrap().is_open());
        assert_eq!(value.get(), "");

        // The grouped leaf still commits.
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 130.0)));
        assert_eq!(value.get(), "pencil");
        assert!(!widget.lock().unwrap().is_open());
    }

    #[test]
    fn test_scroll_routing_while_open() {
        let (ctx, widget, _value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);

        // The menu scrolling its own rows is allowed and keeps it open.
        assert!(!ctx.dispatch(&Event::scroll(0.0, -10.0).with_target("s:opt:1")));
        assert!(widget.lock().unwrap().is_open());

        // Page scroll under the hovered menu is suppressed.
        ctx.dispatch(&Event::pointer_move(160.0, 130.0));
        assert!(ctx.dispatch(&Event::scroll(0.0, -10.0)));
        assert!(widget.lock().unwrap().holds_scroll_lock());
        assert!(ctx.scroll_lock().locked());

        // Over the trigger: allowed, menu stays open.
        ctx.dispatch(&Event::pointer_move(160.0, 60.0));
        assert!(!ctx.dispatch(&Event::scroll(0.0, -10.0)));
        assert!(widget.lock().unwrap().is_open());

        // Away from both: the menu closes and the page scrolls on.
        ctx.dispatch(&Event::pointer_move(500.0, 400.0));
        assert!(!ctx.dispatch(&Event::scroll(0.0, -10.0)));
        assert!(!widget.lock().unwrap().is_open());
        assert!(!ctx.scroll_lock().locked());
    }

    #[test]
    fn test_scroll_hold_released_after_delay() {
        let (ctx, widget, _value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);

        ctx.dispatch(&Event::pointer_move(160.0, 130.0).at_time(1_000));
        ctx.dispatch(&Event::scroll(0.0, -10.0).at_time(1_000));
        assert!(ctx.scroll_lock().locked());

        // Pointer leaves the menu over the trigger; the hold lingers.
        ctx.dispatch(&Event::pointer_move(160.0, 60.0).at_time(2_000));
        assert!(!ctx.update(2_200));
        assert!(ctx.scroll_lock().locked());

        // Deadline passes; the hold releases and the menu stays open.
        assert!(ctx.update(2_300));
        assert!(!ctx.scroll_lock().locked());
        assert!(widget.lock().unwrap().is_open());
    }

    #[test]
    fn test_resize_closes_and_updates_viewport() {
        let (ctx, widget, _value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        assert!(widget.lock().unwrap().is_open());

        ctx.dispatch(&Event::resize(1024, 768));
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(ctx.viewport(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_second_select_takes_over() {
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let left_value = ctx.use_state(String::new());
        let right_value = ctx.use_state(String::new());
        let left = select(&left_value).key("a").option("One").mount(&ctx);
        let right = select(&right_value).key("b").option("Two").mount(&ctx);
        ctx.mount_view(&left.lock().unwrap().view());
        ctx.mount_view(&right.lock().unwrap().view());
        let registry = ctx.registry();
        registry.set_bounds("a:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));
        registry.set_bounds("b:trigger", Rect::new(400.0, 50.0, 120.0, 32.0));

        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        assert!(left.lock().unwrap().is_open());

        // Pressing the other trigger closes the first menu and opens the
        // second in one dispatch.
        assert!(ctx.dispatch(&Event::pointer_down(460.0, 60.0)));
        assert!(!left.lock().unwrap().is_open());
        assert!(right.lock().unwrap().is_open());
    }

    #[test]
    fn test_widget_release_leaves_host_hold_in_place() {
        let (ctx, widget, _value) = flow_fixture();
        let host_hold = ctx.scroll_lock().acquire();

        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        report_open_rows(&ctx, &widget);
        ctx.dispatch(&Event::pointer_move(160.0, 130.0));
        ctx.dispatch(&Event::scroll(0.0, -10.0));
        assert_eq!(ctx.scroll_lock().count(), 2);

        // Outside press closes the menu; the host's own hold remains.
        ctx.dispatch(&Event::pointer_down(500.0, 400.0));
        assert_eq!(ctx.scroll_lock().count(), 1);
        assert!(ctx.scroll_lock().locked());

        drop(host_hold);
        assert!(!ctx.scroll_lock().locked());
    }

    #[test]
    fn test_upward_menu_clips_rows_past_its_bottom() {
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let widget = select(&value)
            .key("s")
            .option(OptionItem::new("Pencil", "pencil"))
            .option(OptionItem::new("Pen", "pen"))
            .option(OptionItem::new("Eraser", "eraser").disabled(true))
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 520.0, 120.0, 32.0));

        ctx.dispatch(&Event::pointer_down(160.0, 530.0));
        let placement = widget.lock().unwrap().placement().unwrap();
        assert!(!placement.is_downward);
        assert_eq!(placement.y, 412.0); // 520 - 4 gap - 104 natural height

        let registry = ctx.registry();
        registry.set_bounds("s:menu", Rect::new(100.0, 412.0, 120.0, 104.0));
        // Inner list scrolled: the second row hangs past the visible bottom.
        registry.set_bounds("s:opt:1", Rect::new(100.0, 500.0, 120.0, 32.0));

        assert!(!ctx.dispatch(&Event::pointer_down(160.0, 518.0)));
        assert!(!widget.lock().unwrap().is_open());
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_external_value_change_refreshes_open_menu() {
        let (ctx, widget, value) = flow_fixture();
        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        let portals = ctx.portals();
        let _ = portals.take_dirty();

        value.set("pen".to_string());
        assert!(ctx.update(0));
        assert!(portals.take_dirty());

        let handle = portals.handles()[0];
        let content = portals.content(handle).unwrap();
        assert!(content.find("s:opt:1").unwrap().has_class("is-active"));
        assert!(!content.find("s:opt:0").unwrap().has_class("is-active"));
    }

    #[test]
    fn test_dispose_closes_and_goes_inert() {
        let disposed = Arc::new(AtomicBool::new(false));
        let ctx = UiContext::new(NullRenderer);
        ctx.set_viewport(800.0, 600.0);
        let value = ctx.use_state(String::new());
        let flag = Arc::clone(&disposed);
        let widget = select(&value)
            .key("s")
            .option("Apple")
            .on_dispose(move || flag.store(true, Ordering::SeqCst))
            .mount(&ctx);
        ctx.mount_view(&widget.lock().unwrap().view());
        ctx.registry()
            .set_bounds("s:trigger", Rect::new(100.0, 50.0, 120.0, 32.0));

        ctx.dispatch(&Event::pointer_down(160.0, 60.0));
        assert!(widget.lock().unwrap().is_open());

        widget.lock().unwrap().dispose();
        assert!(disposed.load(Ordering::SeqCst));
        assert_eq!(ctx.portals().portal_count(), 0);

        // A disposed widget still absorbs its trigger press but stays shut.
        assert!(ctx.dispatch(&Event::pointer_down(160.0, 60.0)));
        assert!(!widget.lock().unwrap().is_open());
    }
}
