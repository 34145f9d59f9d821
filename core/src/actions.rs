//! The todo action set.
//!
//! # Design
//! `TodoActions` binds every action to one `ActionConfig`, one store, one
//! remote mirror and one id generator at construction. Actions then run as
//! plain async methods.
//!
//! Each action sequences its steps in a fixed order and stops at the first
//! failure. Nothing is rolled back, so a failure part-way leaves the store and
//! the remote mirror out of step:
//!
//! - `create`: the item and the parent's children are updated locally before
//!   the remote POST.
//! - `destroy`: the parent stops referencing the item before the remote
//!   DELETE, and the item leaves the store only after it.
//! - `toggle_complete` / `save_todo_edit`: the store is patched before the
//!   remote update.
//!
//! Steps with no data dependency (a parent patch and its counter update, the
//! four filter patches, the adds of `create_many`) run concurrently and fail
//! as a unit.

use std::sync::Arc;

use futures::future::try_join_all;
use futures::TryFutureExt;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::id::IdGenerator;
use crate::remote::Remote;
use crate::request::{ActionOutcome, ActionRequest, EditOutcome};
use crate::store::WidgetStore;
use crate::types::{
    ClassList, Filter, KeyEvent, NewTodo, RemoteTodo, TodoItem, WidgetPatch, COMPLETED_CLASS,
    EDITING_CLASS, SELECTED_CLASS,
};

/// Bind one configuration to every action.
///
/// Call once at setup; the returned set is cheap to clone and share.
pub fn register_all(
    config: ActionConfig,
    store: Arc<dyn WidgetStore>,
    remote: Remote,
    ids: Arc<dyn IdGenerator>,
) -> TodoActions {
    TodoActions::new(config, store, remote, ids)
}

#[derive(Clone)]
pub struct TodoActions {
    config: ActionConfig,
    store: Arc<dyn WidgetStore>,
    remote: Remote,
    ids: Arc<dyn IdGenerator>,
}

impl TodoActions {
    pub fn new(
        config: ActionConfig,
        store: Arc<dyn WidgetStore>,
        remote: Remote,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            config,
            store,
            remote,
            ids,
        }
    }

    /// Run the action named by `request`.
    pub async fn dispatch(&self, request: ActionRequest) -> Result<ActionOutcome, ActionError> {
        debug!(action = request.name(), "dispatching");
        match request {
            ActionRequest::CounterUpdate { count } => {
                self.counter_update(count).await?;
                Ok(ActionOutcome::Done)
            }
            ActionRequest::Create { label } => self.create(&label).await.map(ActionOutcome::Created),
            ActionRequest::CreateMany { todos } => {
                self.create_many(todos).await.map(ActionOutcome::CreatedMany)
            }
            ActionRequest::ToggleComplete { id, complete } => {
                self.toggle_complete(&id, complete).await?;
                Ok(ActionOutcome::Done)
            }
            ActionRequest::Destroy { id } => {
                self.destroy(&id).await?;
                Ok(ActionOutcome::Done)
            }
            ActionRequest::EnterTodoEdit { id } => {
                self.enter_todo_edit(&id).await?;
                Ok(ActionOutcome::Done)
            }
            ActionRequest::SaveTodoEdit { id, event } => {
                self.save_todo_edit(&id, &event).await.map(ActionOutcome::Edit)
            }
            ActionRequest::ExitTodoEdit { id } => {
                self.exit_todo_edit(&id).await?;
                Ok(ActionOutcome::Done)
            }
            ActionRequest::Filter { filter } => {
                self.filter(filter).await?;
                Ok(ActionOutcome::Done)
            }
        }
    }

    /// Show `count` in the counter widgets ("1 item left", "N items left").
    #[instrument(level = "debug", skip(self))]
    pub async fn counter_update(&self, count: usize) -> Result<(), ActionError> {
        let widgets = &self.config.widgets;
        let suffix = if count == 1 { " item left" } else { " items left" };

        tokio::try_join!(
            self.store
                .patch(WidgetPatch::new(&widgets.count_number).label(count.to_string())),
            self.store.patch(WidgetPatch::new(&widgets.count_label).label(suffix)),
        )?;
        Ok(())
    }

    /// Add a todo locally, append it to the parent, then POST it to the
    /// remote mirror. Returns the new id.
    #[instrument(level = "debug", skip(self))]
    pub async fn create(&self, label: &str) -> Result<String, ActionError> {
        let id = self.ids.next_id();

        self.store
            .add(TodoItem::new(id.clone(), label, false).into())
            .await?;

        let mut children = self.children().await?;
        children.push(id.clone());
        self.replace_children(children).await?;

        self.remote
            .create(&RemoteTodo {
                id: id.clone(),
                label: label.to_string(),
                completed: false,
            })
            .await?;

        info!(%id, "todo created");
        Ok(id)
    }

    /// Add a batch of todos locally and append them to the parent in input
    /// order. Nothing is sent to the remote mirror.
    #[instrument(level = "debug", skip_all, fields(count = todos.len()))]
    pub async fn create_many(&self, todos: Vec<NewTodo>) -> Result<Vec<String>, ActionError> {
        let adds = todos.into_iter().map(|todo| {
            let id = todo
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| self.ids.next_id());
            let item = TodoItem::new(id.clone(), todo.label, todo.completed);
            self.store.add(item.into()).map_ok(move |()| id)
        });
        let ids = try_join_all(adds).await?;

        let mut children = self.children().await?;
        children.extend(ids.iter().cloned());
        self.replace_children(children).await?;

        info!(added = ids.len(), "todos loaded");
        Ok(ids)
    }

    /// Flip the `completed` class of a todo and mirror the patch remotely.
    ///
    /// The class is always toggled; `complete` is written to the `completed`
    /// field as given and does not pick the toggle direction.
    #[instrument(level = "debug", skip(self))]
    pub async fn toggle_complete(&self, id: &str, complete: bool) -> Result<(), ActionError> {
        let state = self.store.get(id).await?;
        let mut classes = state.class_list();
        let has_class = classes.toggle(COMPLETED_CLASS);
        if has_class != complete {
            warn!(id, complete, has_class, "completed flag disagrees with toggled class");
        }

        let patch = WidgetPatch::new(id).completed(complete).classes(classes);
        self.store.patch(patch.clone()).await?;
        self.remote.update(&patch).await?;
        Ok(())
    }

    /// Drop a todo from the parent, DELETE it remotely, then remove it from
    /// the store.
    #[instrument(level = "debug", skip(self))]
    pub async fn destroy(&self, id: &str) -> Result<(), ActionError> {
        let children: Vec<String> = self
            .children()
            .await?
            .into_iter()
            .filter(|child| child != id)
            .collect();
        self.replace_children(children).await?;

        self.remote.delete(id).await?;
        self.store.delete(id).await?;

        info!(id, "todo destroyed");
        Ok(())
    }

    /// Flip the `editing` class of a todo. Local only.
    #[instrument(level = "debug", skip(self))]
    pub async fn enter_todo_edit(&self, id: &str) -> Result<(), ActionError> {
        let state = self.store.get(id).await?;
        let mut classes = state.class_list();
        classes.toggle(EDITING_CLASS);
        self.store.patch(WidgetPatch::new(id).classes(classes)).await?;
        Ok(())
    }

    /// Commit an inline label edit when `event` is Enter with a non-empty
    /// value. Any other key press is ignored without touching store or remote.
    #[instrument(level = "debug", skip(self))]
    pub async fn save_todo_edit(
        &self,
        id: &str,
        event: &KeyEvent,
    ) -> Result<EditOutcome, ActionError> {
        if !event.commits() {
            trace!(id, key_code = event.key_code, "edit not committed");
            return Ok(EditOutcome::Ignored);
        }

        let state = self.store.get(id).await?;
        let mut classes = state.class_list();
        classes.toggle(EDITING_CLASS);

        let patch = WidgetPatch::new(id)
            .label(event.value.clone())
            .classes(classes);
        self.store.patch(patch.clone()).await?;
        self.remote.update(&patch).await?;
        Ok(EditOutcome::Saved)
    }

    /// Leaving the editor without committing. Intentionally unimplemented:
    /// performs no store or remote work.
    pub async fn exit_todo_edit(&self, _id: &str) -> Result<(), ActionError> {
        Ok(())
    }

    /// Set the list's filter and mark exactly one filter button selected.
    #[instrument(level = "debug", skip(self))]
    pub async fn filter(&self, filter: Filter) -> Result<(), ActionError> {
        let list = WidgetPatch::new(&self.config.widgets.list).filter(filter);

        tokio::try_join!(
            self.store.patch(list),
            self.store.patch(self.filter_button_patch(Filter::All, filter)),
            self.store.patch(self.filter_button_patch(Filter::Active, filter)),
            self.store.patch(self.filter_button_patch(Filter::Completed, filter)),
        )?;
        debug!(%filter, "filter applied");
        Ok(())
    }

    fn filter_button_patch(&self, button: Filter, selected: Filter) -> WidgetPatch {
        let classes = if button == selected {
            ClassList::from_iter([SELECTED_CLASS])
        } else {
            ClassList::new()
        };
        WidgetPatch::new(self.config.widgets.filter_button(button)).classes(classes)
    }

    async fn children(&self) -> Result<Vec<String>, ActionError> {
        let parent = self.store.get(&self.config.parent_id).await?;
        Ok(parent.children().to_vec())
    }

    /// Patch the parent's children and refresh the counter concurrently.
    async fn replace_children(&self, children: Vec<String>) -> Result<(), ActionError> {
        let count = children.len();
        let patch = WidgetPatch::new(&self.config.parent_id).children(children);

        tokio::try_join!(
            self.store.patch(patch).err_into::<ActionError>(),
            self.counter_update(count),
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for TodoActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoActions")
            .field("config", &self.config)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}
