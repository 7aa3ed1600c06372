//! Effect coordinator.
//!
//! One function per operation family. Each returns an `Effect::Future` that
//! performs exactly one call against the [`TodoApi`] and resolves to exactly
//! one completion action. Errors never escape: they become the family's
//! failure action carrying the error message.
//!
//! Every intent gets its own effect, so concurrent requests are all
//! serviced and their completions are applied in arrival order.

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::reducer::TodoEnvironment;
use crate::types::{Todo, TodoAction, TodoDraft, TodoId};
use saga_todo_core::async_effect;
use saga_todo_core::effect::Effect;
use std::sync::Arc;

/// Count one finished call and log failures
fn record<T>(operation: &'static str, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => {
            tracing::debug!(operation, "To-do service call succeeded");
            metrics::counter!("todos.api.requests", "operation" => operation, "outcome" => "success")
                .increment(1);
        },
        Err(error) => {
            tracing::warn!(operation, %error, "To-do service call failed");
            metrics::counter!("todos.api.requests", "operation" => operation, "outcome" => "failure")
                .increment(1);
        },
    }
}

/// Load the list, keeping only the first `fetch_limit` records
pub fn fetch_todos<A>(env: &TodoEnvironment<A>) -> Effect<TodoAction>
where
    A: TodoApi + 'static,
{
    let api = Arc::clone(&env.api);
    let limit = env.fetch_limit;

    async_effect! {
        let result = api.fetch_todos().await;
        record("fetch", &result);

        Some(match result {
            Ok(mut todos) => {
                todos.truncate(limit);
                TodoAction::FetchSuccess(todos)
            },
            Err(error) => TodoAction::FetchFailure(error.to_string()),
        })
    }
}

/// Create a record from `draft`
pub fn add_todo<A>(env: &TodoEnvironment<A>, draft: TodoDraft) -> Effect<TodoAction>
where
    A: TodoApi + 'static,
{
    let api = Arc::clone(&env.api);

    async_effect! {
        let result = api.create_todo(&draft).await;
        record("add", &result);

        Some(match result {
            Ok(todo) => TodoAction::AddSuccess(todo),
            Err(error) => TodoAction::AddFailure(error.to_string()),
        })
    }
}

/// Replace the record with `todo.id` by `todo`
pub fn update_todo<A>(env: &TodoEnvironment<A>, todo: Todo) -> Effect<TodoAction>
where
    A: TodoApi + 'static,
{
    let api = Arc::clone(&env.api);

    async_effect! {
        let result = api.update_todo(&todo).await;
        record("update", &result);

        Some(match result {
            Ok(stored) => TodoAction::UpdateSuccess(stored),
            Err(error) => TodoAction::UpdateFailure(error.to_string()),
        })
    }
}

/// Remove the record with `id`
///
/// The success action carries the requested id; the response body is not
/// read.
pub fn delete_todo<A>(env: &TodoEnvironment<A>, id: TodoId) -> Effect<TodoAction>
where
    A: TodoApi + 'static,
{
    let api = Arc::clone(&env.api);

    async_effect! {
        let result = api.delete_todo(id).await;
        record("delete", &result);

        Some(match result {
            Ok(()) => TodoAction::DeleteSuccess(id),
            Err(error) => TodoAction::DeleteFailure(error.to_string()),
        })
    }
}
