//! Deferred asynchronous effects.
//!
//! Pure validation uses plain `Result<T, E>`. Anything that has to touch the
//! outside world (a repository, the network) is wrapped in an [`Eff`], which
//! describes the computation without starting it. Work happens only when the
//! effect is run, either through [`Eff::run`] or by awaiting it directly.

use std::convert::Infallible;
use std::fmt;
use std::future::{Future, IntoFuture};

use futures_util::future::{BoxFuture, FutureExt};

type Thunk<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

/// A lazily-run asynchronous computation that yields `Result<T, E>`.
///
/// Failures travel as the `Err` branch through every combinator, so a chain
/// of effects never needs to panic to report a domain failure.
pub struct Eff<T, E> {
    thunk: Thunk<T, E>,
}

impl<T, E> Eff<T, E> {
    /// Runs the effect to completion.
    ///
    /// Consumes the effect: each description is executed at most once.
    pub async fn run(self) -> Result<T, E> {
        (self.thunk)().await
    }
}

impl<T, E> Eff<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a thunk producing a future. The thunk is not called until the
    /// effect runs.
    pub fn new<F, Fut>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            thunk: Box::new(move || thunk().boxed()),
        }
    }

    /// An effect that always succeeds with `value`.
    pub fn succeed(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// An effect that always fails with `error`.
    pub fn fail(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Lifts an already computed result into an effect.
    pub fn from_result(result: Result<T, E>) -> Self {
        Self::new(move || async move { result })
    }

    /// Adapts a fallible future coming from outside the kernel.
    ///
    /// An `Err(cause)` from the future becomes `Err(on_error(cause))`; a
    /// successful resolution becomes `Ok(value)`. This is the only place where
    /// foreign failures are turned into the effect's error type.
    pub fn from_future<F, Fut, C, H>(thunk: F, on_error: H) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, C>> + Send + 'static,
        H: FnOnce(C) -> E + Send + 'static,
    {
        Self::new(move || thunk().map(move |result| result.map_err(on_error)))
    }

    /// Transforms the success value. `f` is never called on failure.
    pub fn map<U, F>(self, f: F) -> Eff<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Eff::new(move || async move { self.run().await.map(f) })
    }

    /// Sequences a dependent effect. Short-circuits on failure.
    pub fn flat_map<U, F>(self, f: F) -> Eff<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Eff<U, E> + Send + 'static,
    {
        Eff::new(move || async move {
            match self.run().await {
                Ok(value) => f(value).run().await,
                Err(error) => Err(error),
            }
        })
    }

    /// Transforms the error value. `f` is never called on success.
    pub fn map_err<E2, F>(self, f: F) -> Eff<T, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        Eff::new(move || async move { self.run().await.map_err(f) })
    }
}

impl<T> Eff<T, Infallible>
where
    T: Send + 'static,
{
    /// Lifts an effect that cannot fail into any error type.
    pub fn widen<E>(self) -> Eff<T, E>
    where
        E: Send + 'static,
    {
        self.map_err(|never| match never {})
    }
}

impl<T, E> IntoFuture for Eff<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = Result<T, E>;
    type IntoFuture = BoxFuture<'static, Result<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<T, E> fmt::Debug for Eff<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eff").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[tokio::test]
    async fn construction_performs_no_work() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let eff = Eff::<_, String>::new(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        })
        .map(|v| v * 2);

        assert_eq!(runs.load(Ordering::SeqCst), 0);

        let result = eff.run().await;
        assert_eq!(result, Ok(14));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn map_is_skipped_on_failure() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let result = Eff::<i32, String>::fail("boom".to_string())
            .map(move |v| {
                flag.store(true, Ordering::SeqCst);
                v + 1
            })
            .run()
            .await;

        assert_eq!(result, Err("boom".to_string()));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn flat_map_chains_success() {
        let result = Eff::<i32, String>::succeed(20)
            .flat_map(|v| Eff::succeed(v + 1))
            .flat_map(|v| Eff::succeed(v * 2))
            .run()
            .await;

        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn flat_map_short_circuits() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let result = Eff::<i32, &'static str>::succeed(1)
            .flat_map(|_| Eff::<i32, _>::fail("first"))
            .flat_map(move |v| {
                flag.store(true, Ordering::SeqCst);
                Eff::succeed(v)
            })
            .run()
            .await;

        assert_eq!(result, Err("first"));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn map_err_changes_error_type() {
        let result: Result<i32, usize> = Eff::<i32, &str>::fail("four")
            .map_err(|e| e.len())
            .run()
            .await;

        assert_eq!(result, Err(4));
    }

    #[tokio::test]
    async fn from_future_converts_failures_into_values() {
        let ok = Eff::from_future(|| async { "42".parse::<i32>() }, |e| e.to_string())
            .run()
            .await;
        assert_eq!(ok, Ok(42));

        let err = Eff::from_future(|| async { "x".parse::<i32>() }, |e| e.to_string())
            .run()
            .await;
        assert_eq!(err, Err("invalid digit found in string".to_string()));
    }

    #[tokio::test]
    async fn from_future_is_lazy() {
        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();

        let eff = Eff::from_future(
            move || {
                flag.store(true, Ordering::SeqCst);
                async { Ok::<_, std::io::Error>(()) }
            },
            |e| e.kind(),
        );
        assert!(!started.load(Ordering::SeqCst));

        eff.run().await.unwrap();
        assert!(started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn widen_lifts_infallible_effects() {
        let eff: Eff<&str, String> = Eff::<_, Infallible>::succeed("value").widen();
        assert_eq!(eff.run().await, Ok("value"));
    }

    #[tokio::test]
    async fn effects_can_be_awaited_directly() {
        let result = Eff::<_, ()>::succeed(3).map(|v| v + 1).await;
        assert_eq!(result, Ok(4));
    }
}
