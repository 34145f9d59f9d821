//! The remote mirror: `TodoClient` requests executed over a `Transport`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, ReqwestTransport, Transport};
use crate::types::{RemoteTodo, WidgetPatch};

/// Mirrors local todo mutations to the remote service.
///
/// No retries and no body consumption: a call succeeds when the service
/// answers 2xx.
#[derive(Clone)]
pub struct Remote {
    client: TodoClient,
    transport: Arc<dyn Transport>,
}

impl Remote {
    pub fn new(client: TodoClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    /// A mirror reached over HTTP with a default `reqwest` client.
    pub fn over_http(base_url: &str) -> Self {
        Self::new(TodoClient::new(base_url), Arc::new(ReqwestTransport::new()))
    }

    pub async fn create(&self, todo: &RemoteTodo) -> Result<(), ApiError> {
        let request = self.client.build_create_todo(todo)?;
        self.send(request).await
    }

    pub async fn update(&self, patch: &WidgetPatch) -> Result<(), ApiError> {
        let request = self.client.build_update_todo(patch)?;
        self.send(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id)?;
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<(), ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, %path, "sending remote request");
        let response = self.transport.execute(request).await?;
        self.client.check_ack(&response)?;
        info!(method, %path, status = response.status, "remote acknowledged");
        Ok(())
    }
}

impl std::fmt::Debug for Remote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remote")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}
