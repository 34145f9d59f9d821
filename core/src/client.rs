//! Request builder and status checker for the remote todo mirror.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each remote call is split into a
//! `build_*` method that produces an `HttpRequest` and `check_ack`, which
//! turns an `HttpResponse` into success or an `ApiError`. Response bodies are
//! never deserialized; the mirror is fire-and-confirm.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{RemoteDelete, RemoteTodo, WidgetPatch};

/// Characters escaped when a todo id is placed in a single path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Stateless client for the todo mirror endpoints.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST todo/{id}` with the freshly created todo.
    pub fn build_create_todo(&self, todo: &RemoteTodo) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Post,
            format!("{}/todo/{}", self.base_url, segment(&todo.id)),
            todo,
        )
    }

    /// `POST todo/{id}/update` with the patch that was applied locally.
    pub fn build_update_todo(&self, patch: &WidgetPatch) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Post,
            format!("{}/todo/{}/update", self.base_url, segment(&patch.id)),
            patch,
        )
    }

    /// `DELETE todo/{id}/delete`. The id is repeated in the body.
    pub fn build_delete_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Delete,
            format!("{}/todo/{}/delete", self.base_url, segment(id)),
            &RemoteDelete { id: id.to_string() },
        )
    }

    /// Accept any 2xx response without looking at the body.
    pub fn check_ack(&self, response: &HttpResponse) -> Result<(), ApiError> {
        if (200..300).contains(&response.status) {
            return Ok(());
        }
        if response.status == 404 {
            return Err(ApiError::NotFound);
        }
        Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        })
    }
}

fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT_ENCODE_SET).to_string()
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    path: String,
    body: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}
