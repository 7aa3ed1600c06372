//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block must evaluate to `Option<Action>`. Captured values are moved
/// into the future, so clone anything borrowed from the environment first.
///
/// # Example
///
/// ```rust,ignore
/// use saga_todo_core::async_effect;
///
/// let api = Arc::clone(&env.api);
/// async_effect! {
///     match api.fetch_todos().await {
///         Ok(todos) => Some(TodoAction::FetchSuccess(todos)),
///         Err(error) => Some(TodoAction::FetchFailure(error.to_string())),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
