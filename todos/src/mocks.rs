//! In-memory [`TodoApi`] for tests and offline runs.

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::types::{Todo, TodoDraft, TodoId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Which remote call a [`MockCall`] or failure rule refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /todos`
    Fetch,
    /// `POST /todos`
    Create,
    /// `PUT /todos/{id}`
    Update,
    /// `DELETE /todos/{id}`
    Delete,
}

/// A call received by [`MockTodoApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    /// `fetch_todos()`
    Fetch,
    /// `create_todo(draft)`
    Create(TodoDraft),
    /// `update_todo(todo)`
    Update(Todo),
    /// `delete_todo(id)`
    Delete(TodoId),
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Todo>,
    next_id: i64,
    calls: Vec<MockCall>,
    failures: HashMap<Operation, u16>,
    delays: HashMap<Operation, Duration>,
}

/// Mock to-do service.
///
/// Behaves like JSONPlaceholder: created records get fresh ids, updates are
/// echoed back, deletes always succeed. Records are kept in memory so the
/// effect of a call is visible to the next fetch. Failures and latency can
/// be configured per operation.
#[derive(Debug, Clone)]
pub struct MockTodoApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockTodoApi {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create a service holding the given records
    ///
    /// New records are numbered after the highest existing id.
    #[must_use]
    pub fn with_todos(records: Vec<Todo>) -> Self {
        let next_id = records.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records,
                next_id,
                ..Inner::default()
            })),
        }
    }

    /// Answer every call to `operation` with the given HTTP status
    #[must_use]
    pub fn failing(self, operation: Operation, status: u16) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failures.insert(operation, status);
        }
        self
    }

    /// Delay every call to `operation` before answering
    #[must_use]
    pub fn delayed(self, operation: Operation, delay: Duration) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.delays.insert(operation, delay);
        }
        self
    }

    /// Calls received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    /// Records the service currently holds
    #[must_use]
    pub fn records(&self) -> Vec<Todo> {
        self.inner
            .lock()
            .map(|inner| inner.records.clone())
            .unwrap_or_default()
    }

    /// Record the call and look up the configured delay and failure
    fn begin(&self, call: MockCall, operation: Operation) -> Result<(Option<Duration>, Option<u16>), ApiError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApiError::RequestFailed("Mutex lock failed".to_string()))?;

        inner.calls.push(call);
        Ok((
            inner.delays.get(&operation).copied(),
            inner.failures.get(&operation).copied(),
        ))
    }

    fn call<T, F>(
        &self,
        call: MockCall,
        operation: Operation,
        apply: F,
    ) -> impl Future<Output = Result<T, ApiError>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce(&mut Inner) -> T + Send + 'static,
    {
        let started = self.begin(call, operation);
        let inner = Arc::clone(&self.inner);

        async move {
            let (delay, failure) = started?;

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(status) = failure {
                return Err(ApiError::Status { status });
            }

            let mut inner = inner
                .lock()
                .map_err(|_| ApiError::RequestFailed("Mutex lock failed".to_string()))?;
            Ok(apply(&mut inner))
        }
    }
}

impl Default for MockTodoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoApi for MockTodoApi {
    fn fetch_todos(&self) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send {
        self.call(MockCall::Fetch, Operation::Fetch, |inner| inner.records.clone())
    }

    fn create_todo(&self, draft: &TodoDraft) -> impl Future<Output = Result<Todo, ApiError>> + Send {
        let draft = draft.clone();
        self.call(MockCall::Create(draft.clone()), Operation::Create, move |inner| {
            let todo = Todo::new(TodoId::new(inner.next_id), draft.title, draft.completed);
            inner.next_id += 1;
            inner.records.push(todo.clone());
            todo
        })
    }

    fn update_todo(&self, todo: &Todo) -> impl Future<Output = Result<Todo, ApiError>> + Send {
        let todo = todo.clone();
        self.call(MockCall::Update(todo.clone()), Operation::Update, move |inner| {
            if let Some(existing) = inner.records.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo.clone();
            }
            todo
        })
    }

    fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send {
        self.call(MockCall::Delete(id), Operation::Delete, move |inner| {
            inner.records.retain(|t| t.id != id);
        })
    }
}
