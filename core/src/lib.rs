//! Action handlers for the todo-list widget.
//!
//! # Overview
//! Each action mutates the widget state store (todo items, the list
//! container, the counter and filter widgets) and mirrors todo changes to a
//! remote REST service.
//!
//! # Design
//! - `TodoActions` is built once from an `ActionConfig` plus injected
//!   collaborators: a `WidgetStore`, a `Remote` and an `IdGenerator`.
//! - The remote side follows a host-does-IO split: `TodoClient` builds plain
//!   `HttpRequest` values, a `Transport` executes them.
//! - `ActionRequest` validates untyped options before any action runs.
//! - Failures propagate unchanged. Multi-step actions are not transactional.

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod id;
pub mod remote;
pub mod request;
pub mod store;
pub mod types;

pub use actions::{register_all, TodoActions};
pub use client::TodoClient;
pub use config::{ActionConfig, Settings, WidgetIds};
pub use error::{ActionError, ApiError, ConfigError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use id::{ClockIds, IdGenerator, SequentialIds, UuidIds};
pub use remote::Remote;
pub use request::{ActionOutcome, ActionRequest, EditOutcome};
pub use store::{MemoryStore, WidgetStore};
pub use types::{ClassList, Filter, KeyEvent, NewTodo, TodoItem, WidgetPatch, WidgetState};
