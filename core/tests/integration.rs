//! Full action lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with a database handle the test
//! keeps, then drives every mirrored action through `ReqwestTransport` and
//! checks both the local store and what the server recorded.

use std::sync::Arc;

use todo_actions::{
    register_all, ActionError, ApiError, EditOutcome, Filter, KeyEvent, MemoryStore, NewTodo,
    Remote, SequentialIds, Settings, TodoActions, WidgetState, WidgetStore,
};

async fn start_server() -> (String, mock_server::Db) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let db = mock_server::Db::default();
    let server_db = db.clone();
    tokio::spawn(async move { mock_server::serve(listener, server_db).await });
    (format!("http://{addr}"), db)
}

fn page(store: &MemoryStore, base_url: &str) -> TodoActions {
    let settings = Settings {
        remote_base_url: base_url.to_string(),
        ..Settings::default()
    };
    register_all(
        settings.action_config(),
        Arc::new(store.clone()),
        Remote::over_http(&settings.remote_base_url),
        Arc::new(SequentialIds::starting_at(1)),
    )
}

fn page_widgets() -> Vec<WidgetState> {
    vec![
        WidgetState::container("todo-list", Vec::new()),
        WidgetState::new("todo-count-number"),
        WidgetState::new("todo-count-label"),
        WidgetState::new("all-filter"),
        WidgetState::new("active-filter"),
        WidgetState::new("completed-filter"),
    ]
}

#[tokio::test]
async fn action_lifecycle() {
    // Step 1: start mock server and an empty page.
    let (base_url, db) = start_server().await;
    let store = MemoryStore::with_records(page_widgets());
    let actions = page(&store, &base_url);

    // Step 2: create mirrors the todo remotely.
    let id = actions.create("Integration test").await.unwrap();
    let remote = db.read().await.get(&id).cloned().unwrap();
    assert_eq!(remote.label, "Integration test");
    assert!(!remote.completed);

    // Step 3: toggle complete mirrors flag and classes.
    actions.toggle_complete(&id, true).await.unwrap();
    let remote = db.read().await.get(&id).cloned().unwrap();
    assert!(remote.completed);
    assert_eq!(remote.classes, vec!["completed".to_string()]);

    // Step 4: edit the label.
    actions.enter_todo_edit(&id).await.unwrap();
    let outcome = actions
        .save_todo_edit(&id, &KeyEvent::new(13, "Renamed"))
        .await
        .unwrap();
    assert_eq!(outcome, EditOutcome::Saved);
    let remote = db.read().await.get(&id).cloned().unwrap();
    assert_eq!(remote.label, "Renamed");
    assert_eq!(remote.classes, vec!["completed".to_string()]);

    // Step 5: filters are local only.
    actions.filter(Filter::Completed).await.unwrap();
    assert_eq!(db.read().await.len(), 1);

    // Step 6: bulk load stays local.
    let loaded = actions
        .create_many(vec![NewTodo::new("Local A"), NewTodo::new("Local B")])
        .await
        .unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(db.read().await.len(), 1);
    let parent = store.get("todo-list").await.unwrap();
    assert_eq!(parent.children().len(), 3);

    // Step 7: destroy removes it on both sides.
    actions.destroy(&id).await.unwrap();
    assert!(db.read().await.is_empty());
    assert!(!store.contains(&id).await);

    // Step 8: destroying a todo the server never saw fails remotely and
    // leaves the local item orphaned.
    let err = actions.destroy(&loaded[0]).await.unwrap_err();
    assert!(matches!(err, ActionError::Remote(ApiError::NotFound)));
    assert!(store.contains(&loaded[0]).await);
    let parent = store.get("todo-list").await.unwrap();
    assert_eq!(parent.children(), [loaded[1].clone()]);
}

#[tokio::test]
async fn ids_with_reserved_characters_reach_their_own_todo() {
    let (base_url, db) = start_server().await;
    for id in ["a", "a?b", "a/b"] {
        db.write().await.insert(
            id.to_string(),
            mock_server::Todo {
                id: id.to_string(),
                label: id.to_string(),
                completed: false,
                classes: Vec::new(),
            },
        );
    }

    let store = MemoryStore::with_records(page_widgets());
    let actions = page(&store, &base_url);
    actions
        .create_many(vec![
            NewTodo {
                label: "query".to_string(),
                id: Some("a?b".to_string()),
                completed: false,
            },
            NewTodo {
                label: "slash".to_string(),
                id: Some("a/b".to_string()),
                completed: false,
            },
        ])
        .await
        .unwrap();

    actions.toggle_complete("a?b", true).await.unwrap();
    actions.destroy("a/b").await.unwrap();

    let todos = db.read().await;
    assert!(todos["a?b"].completed);
    assert!(!todos["a"].completed);
    assert!(!todos.contains_key("a/b"));
    assert!(todos.contains_key("a"));
}

#[tokio::test]
async fn unreachable_remote_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = MemoryStore::with_records(page_widgets());
    let actions = page(&store, &format!("http://{addr}"));

    let err = actions.create("Nowhere to go").await.unwrap_err();
    assert!(matches!(err, ActionError::Remote(ApiError::Transport(_))));
    assert_eq!(store.get("todo-list").await.unwrap().children().len(), 1);
}

/// Serve one canned response whose body is shorter than its `Content-Length`.
async fn truncated_body_server(status_line: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.ends_with(b"}") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        let response = format!("HTTP/1.1 {status_line}\r\nContent-Length: 100\r\n\r\npartial");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn unreadable_error_body_is_a_transport_error() {
    let base_url = truncated_body_server("500 Internal Server Error").await;
    let remote = Remote::over_http(&base_url);

    let err = remote.delete("1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn unreadable_success_body_still_acknowledges() {
    let base_url = truncated_body_server("200 OK").await;
    let remote = Remote::over_http(&base_url);

    remote.delete("1").await.unwrap();
}
