//! # saga-todo testing
//!
//! Testing utilities and helpers for the saga-todo architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Assertion helpers for returned effects
//! - [`effects`]: Running effect descriptions by hand to get their actions
//! - [`init_test_tracing`]: Log capture for failing tests
//!
//! ## Example
//!
//! ```ignore
//! use saga_todo_testing::{assertions, effects::run_effects, ReducerTest};
//!
//! #[tokio::test]
//! async fn fetch_request_sets_loading() {
//!     let mut state = TodoListState::new();
//!     let effects = TodoReducer::new().reduce(&mut state, TodoAction::FetchRequest, &env);
//!     assert!(state.loading);
//!
//!     let actions = run_effects(effects).await;
//!     assert!(matches!(actions[..], [TodoAction::FetchSuccess(_)]));
//! }
//! ```

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Manual effect execution
///
/// Reducer tests get effect descriptions back. These helpers drive them to
/// completion without a store so the produced actions can be asserted on
/// or fed back into the reducer.
pub mod effects {
    use futures::future::join_all;
    use futures::FutureExt;
    use saga_todo_core::effect::Effect;
    use std::future::Future;
    use std::pin::Pin;

    /// Run one effect and collect every action it produces
    ///
    /// `Parallel` children run concurrently. Their actions are returned in
    /// declaration order, not completion order.
    pub fn run_effect<A>(effect: Effect<A>) -> Pin<Box<dyn Future<Output = Vec<A>> + Send>>
    where
        A: Send + 'static,
    {
        match effect {
            Effect::None => Box::pin(async { Vec::new() }),
            Effect::Future(fut) => fut
                .map(|action| action.into_iter().collect::<Vec<A>>())
                .boxed(),
            Effect::Parallel(effects) => Box::pin(async move {
                join_all(effects.into_iter().map(run_effect))
                    .await
                    .into_iter()
                    .flatten()
                    .collect()
            }),
        }
    }

    /// Run every effect a reducer returned, in order
    pub async fn run_effects<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run_effect(effect).await);
        }
        actions
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Output is only shown for failing tests. The filter comes from `RUST_LOG`
/// and defaults to `debug`. Calling this more than once is harmless.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
