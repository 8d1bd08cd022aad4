//! Select option model
//!
//! A menu's content is an ordered list of entries. An entry is either a
//! bare string (label and value in one), a full item with independent
//! label/value and a disabled flag, or a titled group of further entries.
//! Items tolerate missing fields: a missing value falls back to the label,
//! a missing label falls back to the value, and an item with neither
//! degrades to an empty label rather than erroring.

use std::fmt;

/// Trigger text shown while nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Choose one…";

/// Menu row shown when the option list is empty.
pub const DEFAULT_EMPTY_MESSAGE: &str = "Nothing to display…";

// ============================================================================
// Entries
// ============================================================================

/// A full option: display label, committed value, disabled flag.
///
/// Any field may be absent; resolution falls back to the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionItem {
    pub label: Option<String>,
    pub value: Option<String>,
    pub disabled: bool,
}

impl OptionItem {
    /// Item with an explicit label and value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(value.into()),
            disabled: false,
        }
    }

    /// Item carrying only a label; the value resolves to the same text.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: None,
            disabled: false,
        }
    }

    /// Marks the item disabled. Disabled items render but never commit.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Display text: label, else value, else empty.
    pub fn resolve_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or("")
    }

    /// Commit text: value, else label, else empty.
    pub fn resolve_value(&self) -> &str {
        self.value
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or("")
    }
}

/// A titled run of entries. Titles render as non-selectable rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroup {
    pub title: String,
    pub options: Vec<Entry>,
}

impl OptionGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, entry: impl Into<Entry>) -> Self {
        self.options.push(entry.into());
        self
    }
}

/// One entry in an option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A bare string acting as both label and value.
    Plain(String),
    /// A full item.
    Item(OptionItem),
    /// A titled group.
    Group(OptionGroup),
}

impl Entry {
    /// Display text for this entry. Groups resolve empty; their title is
    /// rendered separately and is never selectable.
    pub fn resolve_label(&self) -> &str {
        match self {
            Entry::Plain(s) => s,
            Entry::Item(item) => item.resolve_label(),
            Entry::Group(_) => "",
        }
    }

    /// Commit text for this entry. Groups resolve empty.
    pub fn resolve_value(&self) -> &str {
        match self {
            Entry::Plain(s) => s,
            Entry::Item(item) => item.resolve_value(),
            Entry::Group(_) => "",
        }
    }

    /// True when this entry's resolved value equals `value`. Always false
    /// for groups and for the empty no-selection value.
    pub fn matches(&self, value: &str) -> bool {
        if matches!(self, Entry::Group(_)) || value.is_empty() {
            return false;
        }
        self.resolve_value() == value
    }

    /// True for entries a user can commit (not groups, not disabled items).
    pub fn selectable(&self) -> bool {
        match self {
            Entry::Plain(_) => true,
            Entry::Item(item) => !item.disabled,
            Entry::Group(_) => false,
        }
    }
}

impl From<&str> for Entry {
    fn from(s: &str) -> Self {
        Entry::Plain(s.to_string())
    }
}

impl From<String> for Entry {
    fn from(s: String) -> Self {
        Entry::Plain(s)
    }
}

impl From<OptionItem> for Entry {
    fn from(item: OptionItem) -> Self {
        Entry::Item(item)
    }
}

impl From<OptionGroup> for Entry {
    fn from(group: OptionGroup) -> Self {
        Entry::Group(group)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Group(group) => write!(f, "[{}]", group.title),
            other => f.write_str(other.resolve_label()),
        }
    }
}

// ============================================================================
// Option list
// ============================================================================

/// Ordered option list, the content model behind a select menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    pub entries: Vec<Entry>,
}

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn entry(mut self, entry: impl Into<Entry>) -> Self {
        self.entries.push(entry.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All selectable-or-not leaf entries in display order, groups flattened.
    /// Nested groups flatten transparently.
    pub fn flatten(&self) -> Vec<&Entry> {
        fn walk<'a>(entries: &'a [Entry], out: &mut Vec<&'a Entry>) {
            for entry in entries {
                match entry {
                    Entry::Group(group) => walk(&group.options, out),
                    leaf => out.push(leaf),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.entries, &mut out);
        out
    }

    /// Display text for a committed value: the label of the first entry
    /// whose value matches. `None` when no entry matches, in which case
    /// callers fall back to their placeholder.
    pub fn display_text(&self, value: &str) -> Option<&str> {
        self.flatten()
            .into_iter()
            .find(|entry| entry.matches(value))
            .map(|entry| entry.resolve_label())
    }
}

impl<T: Into<Entry>> FromIterator<T> for OptionList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<Entry>> for OptionList {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

// ============================================================================
// Tests
// ============================================================================
