//! Settings for wiring the action set.
//!
//! # Design
//! The display widgets the actions patch (counter, list, filter buttons) are
//! addressed by fixed ids. They default to the ids the todo page uses and can
//! be overridden when a page lays its widgets out differently.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Filter;

pub const REMOTE_URL_VAR: &str = "TODO_REMOTE_URL";
pub const PARENT_ID_VAR: &str = "TODO_PARENT_ID";

pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_PARENT_ID: &str = "todo-list";

/// Ids of the display widgets patched by the actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetIds {
    pub count_number: String,
    pub count_label: String,
    pub list: String,
    pub all_filter: String,
    pub active_filter: String,
    pub completed_filter: String,
}

impl WidgetIds {
    pub fn filter_button(&self, filter: Filter) -> &str {
        match filter {
            Filter::All => &self.all_filter,
            Filter::Active => &self.active_filter,
            Filter::Completed => &self.completed_filter,
        }
    }
}

impl Default for WidgetIds {
    fn default() -> Self {
        Self {
            count_number: "todo-count-number".to_string(),
            count_label: "todo-count-label".to_string(),
            list: "todo-list".to_string(),
            all_filter: "all-filter".to_string(),
            active_filter: "active-filter".to_string(),
            completed_filter: "completed-filter".to_string(),
        }
    }
}

/// The configuration every action is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    /// Id of the container whose children are the live todos.
    pub parent_id: String,
    #[serde(default)]
    pub widgets: WidgetIds,
}

impl ActionConfig {
    pub fn new(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            widgets: WidgetIds::default(),
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PARENT_ID)
    }
}

/// Process settings: where the remote mirror lives and which widgets to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub remote_base_url: String,
    pub parent_id: String,
    pub widgets: WidgetIds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_base_url: DEFAULT_REMOTE_URL.to_string(),
            parent_id: DEFAULT_PARENT_ID.to_string(),
            widgets: WidgetIds::default(),
        }
    }
}

impl Settings {
    /// Read `TODO_REMOTE_URL` and `TODO_PARENT_ID`, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, std::env::VarError>,
    {
        let mut settings = Settings::default();
        if let Some(url) = read_var(&lookup, REMOTE_URL_VAR)? {
            settings.remote_base_url = url;
        }
        if let Some(parent_id) = read_var(&lookup, PARENT_ID_VAR)? {
            settings.parent_id = parent_id;
        }
        Ok(settings)
    }

    pub fn action_config(&self) -> ActionConfig {
        ActionConfig {
            parent_id: self.parent_id.clone(),
            widgets: self.widgets.clone(),
        }
    }
}

fn read_var<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&'static str) -> Result<String, std::env::VarError>,
{
    match lookup(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}
