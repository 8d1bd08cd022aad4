//! Widget markup tree
//!
//! Widgets in this crate do not paint anything themselves. They describe
//! their visual structure as a tree of [`Node`]s and hand that tree to the
//! embedding application through the [`Renderer`](crate::portal::Renderer)
//! seam. A node carries a [`Role`] (what the element is), an optional stable
//! id (so the host can report layout bounds back through the
//! [`ElementRegistry`](crate::registry::ElementRegistry)), presentation
//! classes, and paint hints resolved from the active theme.
//!
//! The builder API is fluent and consuming, in the same style as the rest of
//! the crate:
//!
//! ```
//! use marquee_ui::markup::{node, Role};
//!
//! let trigger = node(Role::Trigger)
//!     .id("fruit-select")
//!     .class("select")
//!     .child(node(Role::TriggerLabel).text("Choose one…"))
//!     .child(node(Role::Caret));
//!
//! assert_eq!(trigger.children.len(), 2);
//! ```

use marquee_core::geometry::Point;
use marquee_core::paint::{Brush, Color};
use smallvec::SmallVec;

// ============================================================================
// Roles
// ============================================================================

/// What a markup node represents.
///
/// Hosts switch on the role to decide how to lay an element out; the classes
/// on the node refine presentation within a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Generic grouping container.
    Container,
    /// Caption rendered above a form control.
    FieldLabel,
    /// The closed face of a select control.
    Trigger,
    /// The value (or placeholder) text inside a trigger.
    TriggerLabel,
    /// The caret glyph inside a trigger.
    Caret,
    /// A floating menu surface.
    Menu,
    /// A selectable row inside a menu.
    OptionRow,
    /// A non-selectable group caption inside a menu.
    GroupTitle,
    /// The placeholder row shown when a menu has no options.
    EmptyMessage,
    /// A horizontal gradient strip in the color picker.
    Band,
    /// The draggable thumb riding on a band.
    BandThumb,
    /// A color preview well.
    Swatch,
    /// Plain text content.
    Text,
}

// ============================================================================
// Node
// ============================================================================

/// One element in a widget's visual description.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What this element is.
    pub role: Role,
    /// Stable identifier, present on elements whose geometry the widget
    /// needs to query back (triggers, menus, option rows, bands).
    pub id: Option<String>,
    /// Presentation classes, e.g. `"select"` or `"is-active"`.
    pub classes: SmallVec<[String; 4]>,
    /// Text content, for label-like roles.
    pub text: Option<String>,
    /// Background fill.
    pub brush: Option<Brush>,
    /// Foreground text color.
    pub text_color: Option<Color>,
    /// Corner rounding in logical pixels.
    pub corner_radius: Option<f32>,
    /// Absolute position for detached surfaces (menus in the portal
    /// layer). Inline elements leave this unset and flow normally.
    pub offset: Option<Point>,
    /// Height cap for surfaces that scroll internally past it.
    pub max_height: Option<f32>,
    /// Free-form data attributes (`("value", "pencil")`, `("offset", "42")`).
    pub data: Vec<(String, String)>,
    /// Child elements, in paint order.
    pub children: Vec<Node>,
}

/// Starts a markup node with the given role.
pub fn node(role: Role) -> Node {
    Node {
        role,
        id: None,
        classes: SmallVec::new(),
        text: None,
        brush: None,
        text_color: None,
        corner_radius: None,
        offset: None,
        max_height: None,
        data: Vec::new(),
        children: Vec::new(),
    }
}

/// Shorthand for a plain text node.
pub fn text(content: impl Into<String>) -> Node {
    node(Role::Text).text(content)
}

impl Node {
    /// Sets the stable id the host reports bounds for.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a single presentation class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds every class from an iterator. Pairs with [`class_list`].
    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Sets the text content.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    /// Sets the background fill.
    pub fn brush(mut self, brush: impl Into<Brush>) -> Self {
        self.brush = Some(brush.into());
        self
    }

    /// Sets the foreground text color.
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Sets the corner rounding.
    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// Pins the node at an absolute position (portal surfaces).
    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Some(Point::new(x, y));
        self
    }

    /// Caps the node's height; content past the cap scrolls.
    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Attaches a data attribute.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Appends every child from an iterator.
    pub fn children_from<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(children);
        self
    }

    /// True when the node carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Looks up a data attribute by key.
    pub fn data_value(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for a descendant (or self) with the given id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Visits self and every descendant depth-first.
    pub fn for_each(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.for_each(visit);
        }
    }

    /// Counts nodes matching a predicate anywhere in the subtree.
    pub fn count_where(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        let mut count = 0;
        self.for_each(&mut |n| {
            if predicate(n) {
                count += 1;
            }
        });
        count
    }
}

/// Builds a class string vector, skipping empty and conditional-off entries.
///
/// ```
/// use marquee_ui::markup::class_list;
///
/// let open = true;
/// let classes = class_list([
///     Some("select-menu"),
///     open.then_some("is-open"),
///     None,
/// ]);
/// assert_eq!(classes, vec!["select-menu", "is-open"]);
/// ```
pub fn class_list<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    entries
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
