//! Remote to-do service.
//!
//! [`TodoApi`] is the seam between the effect coordinator and the network.
//! [`HttpTodoApi`] talks to a JSONPlaceholder-style REST service; tests swap
//! in [`MockTodoApi`](crate::mocks::MockTodoApi).
//!
//! | Operation | Request                      | Response body        |
//! |-----------|------------------------------|----------------------|
//! | fetch     | `GET {base}/todos`           | JSON array of todos  |
//! | create    | `POST {base}/todos` + draft  | created todo         |
//! | update    | `PUT {base}/todos/{id}` + todo | stored todo        |
//! | delete    | `DELETE {base}/todos/{id}`   | ignored              |

use crate::error::ApiError;
use crate::types::{Todo, TodoDraft, TodoId};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Client for the remote to-do service
///
/// Implementations perform exactly one request per call and never retry.
pub trait TodoApi: Send + Sync {
    /// Fetch every record the service has
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status or a body
    /// that is not a JSON array of records.
    fn fetch_todos(&self) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send;

    /// Create a record and return it as stored (with its new id)
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    fn create_todo(&self, draft: &TodoDraft) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    /// Replace a record and return it as stored
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    fn update_todo(&self, todo: &Todo) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// [`TodoApi`] over HTTP with `reqwest`
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the service rooted at `base_url`
    ///
    /// `base_url` excludes the `/todos` collection path. A trailing slash
    /// is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Base URL requests are made against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn record_url(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = status.as_u16(), "To-do service returned an error status");
            Err(ApiError::Status {
                status: status.as_u16(),
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TodoApi for HttpTodoApi {
    fn fetch_todos(&self) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send {
        let url = self.collection_url();
        tracing::debug!(method = "GET", %url, "Fetching todos");
        let request = self.client.get(url);

        Self::send_json(request)
    }

    fn create_todo(&self, draft: &TodoDraft) -> impl Future<Output = Result<Todo, ApiError>> + Send {
        let url = self.collection_url();
        tracing::debug!(method = "POST", %url, "Creating todo");
        let request = self.client.post(url).json(draft);

        Self::send_json(request)
    }

    fn update_todo(&self, todo: &Todo) -> impl Future<Output = Result<Todo, ApiError>> + Send {
        let url = self.record_url(todo.id);
        tracing::debug!(method = "PUT", %url, "Updating todo");
        let request = self.client.put(url).json(todo);

        Self::send_json(request)
    }

    fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send {
        let url = self.record_url(id);
        tracing::debug!(method = "DELETE", %url, "Deleting todo");
        let request = self.client.delete(url);

        async move {
            Self::send(request).await?;
            Ok(())
        }
    }
}
