//! Widget state records and todo DTOs.
//!
//! # Design
//! The widget store is keyed by string ids and holds heterogeneous records:
//! todo items carry a label and a completed flag, the list container carries
//! children, the filter buttons carry only classes. `WidgetState` models this
//! as one record with optional properties; `WidgetPatch` has the same shape
//! and is merged field by field. The remote mirror receives the same patch
//! the store received, so `WidgetPatch` is also an update payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Style tag marking a completed todo.
pub const COMPLETED_CLASS: &str = "completed";
/// Style tag marking a todo whose label is being edited.
pub const EDITING_CLASS: &str = "editing";
/// Style tag marking the active filter button.
pub const SELECTED_CLASS: &str = "selected";
/// Key code that commits an inline edit.
pub const ENTER_KEY: u32 = 13;

/// Ordered, set-like list of style tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn insert(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Adds `class` if absent, removes it if present. Returns whether the
    /// class is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        match self.0.iter().position(|c| c == class) {
            Some(idx) => {
                self.0.remove(idx);
                false
            }
            None => {
                self.0.push(class.to_string());
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ClassList::new();
        for class in iter {
            let class: String = class.into();
            list.insert(&class);
        }
        list
    }
}

/// Which todos the list widget shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record in the widget store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<ClassList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl WidgetState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A list container with the given children.
    pub fn container(id: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(id)
        }
    }

    /// Children of a container record. A record without children is treated
    /// as an empty container.
    pub fn children(&self) -> &[String] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Style tags of the record, empty when none were ever set.
    pub fn class_list(&self) -> ClassList {
        self.classes.clone().unwrap_or_default()
    }

    /// Merge `patch` into this record. Fields absent from the patch are kept.
    pub fn apply(&mut self, patch: WidgetPatch) {
        let WidgetPatch {
            id: _,
            label,
            completed,
            classes,
            children,
            filter,
        } = patch;
        if label.is_some() {
            self.label = label;
        }
        if completed.is_some() {
            self.completed = completed;
        }
        if classes.is_some() {
            self.classes = classes;
        }
        if children.is_some() {
            self.children = children;
        }
        if filter.is_some() {
            self.filter = filter;
        }
    }
}

/// Partial update of a `WidgetState`, addressed by `id`.
///
/// Serializes with absent fields omitted, which is also the JSON body posted
/// to `todo/{id}/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<ClassList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl WidgetPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn classes(mut self, classes: ClassList) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn children(mut self, children: Vec<String>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A single todo item as held in the widget store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
    #[serde(default)]
    pub classes: ClassList,
}

impl TodoItem {
    /// A todo whose classes follow its completed flag.
    pub fn new(id: impl Into<String>, label: impl Into<String>, completed: bool) -> Self {
        let classes = if completed {
            ClassList::from_iter([COMPLETED_CLASS])
        } else {
            ClassList::new()
        };
        Self {
            id: id.into(),
            label: label.into(),
            completed,
            classes,
        }
    }
}

impl From<TodoItem> for WidgetState {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            label: Some(item.label),
            completed: Some(item.completed),
            classes: Some(item.classes),
            ..Self::default()
        }
    }
}

/// One entry of a bulk `create_many` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: None,
            completed: false,
        }
    }
}

/// Key press delivered by the inline label editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key_code: u32,
    /// Current value of the edit field.
    #[serde(default)]
    pub value: String,
}

impl KeyEvent {
    pub fn new(key_code: u32, value: impl Into<String>) -> Self {
        Self {
            key_code,
            value: value.into(),
        }
    }

    /// Enter with a non-empty value commits the edit.
    pub fn commits(&self) -> bool {
        self.key_code == ENTER_KEY && !self.value.is_empty()
    }
}

/// Body of the remote create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTodo {
    pub id: String,
    pub label: String,
    pub completed: bool,
}

/// Body of the remote delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDelete {
    pub id: String,
}
