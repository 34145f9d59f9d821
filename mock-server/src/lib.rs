use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub label: String,
    pub completed: bool,
    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub label: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub label: Option<String>,
    pub completed: Option<bool>,
    pub classes: Option<Vec<String>>,
}

pub type Db = Arc<RwLock<BTreeMap<String, Todo>>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Router over a caller-owned `Db`, so tests can inspect what was mirrored.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todo/{id}", get(get_todo).post(create_todo))
        .route("/todo/{id}/update", post(update_todo))
        .route("/todo/{id}/delete", delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Db::default()).await
}

pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    Json(todos.values().cloned().collect())
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let mut todos = db.write().await;
    if todos.contains_key(&id) {
        return Err(StatusCode::CONFLICT);
    }
    let classes = if input.completed {
        vec!["completed".to_string()]
    } else {
        Vec::new()
    };
    let todo = Todo {
        id: id.clone(),
        label: input.label,
        completed: input.completed,
        classes,
    };
    todos.insert(id.clone(), todo.clone());
    info!(%id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(label) = input.label {
        todo.label = label;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    if let Some(classes) = input.classes {
        todo.classes = classes;
    }
    info!(%id, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let removed = todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id = %removed.id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
