//! Typed action requests for callers that hold untyped options.
//!
//! # Design
//! UI event handlers hand over loose JSON objects. `ActionRequest` is the
//! closed set of shapes the actions accept, tagged by an `action` field, so a
//! malformed payload is rejected before any store or remote call happens.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::types::{Filter, KeyEvent, NewTodo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ActionRequest {
    CounterUpdate { count: usize },
    Create { label: String },
    CreateMany { todos: Vec<NewTodo> },
    ToggleComplete { id: String, complete: bool },
    Destroy { id: String },
    EnterTodoEdit { id: String },
    SaveTodoEdit { id: String, event: KeyEvent },
    ExitTodoEdit { id: String },
    Filter { filter: Filter },
}

impl ActionRequest {
    pub fn from_json(raw: &str) -> Result<Self, ActionError> {
        serde_json::from_str(raw).map_err(|e| ActionError::InvalidRequest(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ActionError> {
        serde_json::from_value(value).map_err(|e| ActionError::InvalidRequest(e.to_string()))
    }

    /// The wire name of the action, as found in the `action` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::CounterUpdate { .. } => "counterUpdate",
            ActionRequest::Create { .. } => "create",
            ActionRequest::CreateMany { .. } => "createMany",
            ActionRequest::ToggleComplete { .. } => "toggleComplete",
            ActionRequest::Destroy { .. } => "destroy",
            ActionRequest::EnterTodoEdit { .. } => "enterTodoEdit",
            ActionRequest::SaveTodoEdit { .. } => "saveTodoEdit",
            ActionRequest::ExitTodoEdit { .. } => "exitTodoEdit",
            ActionRequest::Filter { .. } => "filter",
        }
    }
}

/// Whether `save_todo_edit` committed the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// Not Enter, or an empty value. Nothing was touched.
    Ignored,
}

/// Result of a dispatched `ActionRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Created(String),
    CreatedMany(Vec<String>),
    Edit(EditOutcome),
}
