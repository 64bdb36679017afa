//! Forward references to values the engine resolves after declaration.
//!
//! An [`Output`] is a cheap, clonable handle over a shared future. Declaring
//! code never waits on one: it passes outputs into other resources' args or
//! derives new outputs with [`Output::apply`], and the engine settles them in
//! dependency order.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::SdkError;
use crate::urn::Urn;

/// The three ways an output can settle.
#[derive(Debug, Clone)]
pub enum Resolution<T> {
    Known(T),
    /// The engine will only compute this value during apply (preview).
    Unknown,
    Failed(Arc<SdkError>),
}

/// A settled output together with the resources it was derived from.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub resolution: Resolution<T>,
    pub dependencies: BTreeSet<Urn>,
}

impl<T> Resolved<T> {
    pub fn known(value: T) -> Self {
        Self {
            resolution: Resolution::Known(value),
            dependencies: BTreeSet::new(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            resolution: Resolution::Unknown,
            dependencies: BTreeSet::new(),
        }
    }

    pub fn failed(err: Arc<SdkError>) -> Self {
        Self {
            resolution: Resolution::Failed(err),
            dependencies: BTreeSet::new(),
        }
    }

    pub fn with_dependency(mut self, urn: Urn) -> Self {
        self.dependencies.insert(urn);
        self
    }

    pub fn is_known(&self) -> bool {
        matches!(self.resolution, Resolution::Known(_))
    }

    fn and_then<U>(self, f: impl FnOnce(T) -> Resolution<U>) -> Resolved<U> {
        let resolution = match self.resolution {
            Resolution::Known(value) => f(value),
            Resolution::Unknown => Resolution::Unknown,
            Resolution::Failed(err) => Resolution::Failed(err),
        };
        Resolved {
            resolution,
            dependencies: self.dependencies,
        }
    }

    /// Known value, `None` when unknown, the error when failed.
    pub fn into_result(self) -> Result<Option<T>, SdkError> {
        match self.resolution {
            Resolution::Known(value) => Ok(Some(value)),
            Resolution::Unknown => Ok(None),
            Resolution::Failed(err) => Err(SdkError::from_shared(err)),
        }
    }
}

/// A value that may not exist yet.
pub struct Output<T> {
    inner: Shared<BoxFuture<'static, Resolved<T>>>,
}

impl<T> Clone for Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Output<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.peek() {
            Some(resolved) => f.debug_tuple("Output").field(&resolved.resolution).finish(),
            None => f.write_str("Output(<pending>)"),
        }
    }
}

impl<T> Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Resolved<T>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    pub fn from_resolved(resolved: Resolved<T>) -> Self {
        Self::from_future(futures::future::ready(resolved))
    }

    pub fn known(value: T) -> Self {
        Self::from_resolved(Resolved::known(value))
    }

    pub fn unknown() -> Self {
        Self::from_resolved(Resolved::unknown())
    }

    pub fn failed(err: SdkError) -> Self {
        Self::from_resolved(Resolved::failed(Arc::new(err)))
    }

    /// Wait for the engine to settle this output.
    pub async fn resolve(&self) -> Resolved<T> {
        self.inner.clone().await
    }

    /// `Ok(None)` while the value is unknown.
    pub async fn value(&self) -> Result<Option<T>, SdkError> {
        self.resolve().await.into_result()
    }

    pub async fn dependencies(&self) -> BTreeSet<Urn> {
        self.resolve().await.dependencies
    }

    /// Derive a new output from the known value. Unknown and failed outputs
    /// pass through without calling `f`; dependencies are kept.
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.apply_resolution(move |value| Resolution::Known(f(value)))
    }

    /// Like [`Output::apply`] for fallible transforms.
    pub fn try_apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, SdkError> + Send + 'static,
    {
        self.apply_resolution(move |value| match f(value) {
            Ok(u) => Resolution::Known(u),
            Err(err) => Resolution::Failed(Arc::new(err)),
        })
    }

    pub(crate) fn apply_resolution<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Resolution<U> + Send + 'static,
    {
        let this = self.clone();
        Output::from_future(async move { this.resolve().await.and_then(f) })
    }

    /// Pair two outputs. Failure wins over unknown, unknown over known.
    pub fn zip<U>(&self, other: &Output<U>) -> Output<(T, U)>
    where
        U: Clone + Send + Sync + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        Output::from_future(async move {
            let (a, b) = futures::join!(left.resolve(), right.resolve());
            let mut dependencies = a.dependencies;
            dependencies.extend(b.dependencies);
            let resolution = match (a.resolution, b.resolution) {
                (Resolution::Failed(err), _) | (_, Resolution::Failed(err)) => {
                    Resolution::Failed(err)
                }
                (Resolution::Known(a), Resolution::Known(b)) => Resolution::Known((a, b)),
                _ => Resolution::Unknown,
            };
            Resolved {
                resolution,
                dependencies,
            }
        })
    }

    /// Combine many outputs into one list, preserving order.
    pub fn all<I>(outputs: I) -> Output<Vec<T>>
    where
        I: IntoIterator<Item = Output<T>>,
    {
        let outputs: Vec<_> = outputs.into_iter().collect();
        Output::from_future(async move {
            let settled = futures::future::join_all(outputs.iter().map(|o| o.resolve())).await;
            let mut dependencies = BTreeSet::new();
            let mut values = Vec::with_capacity(settled.len());
            let mut unknown = false;
            let mut failure = None;
            for resolved in settled {
                dependencies.extend(resolved.dependencies);
                match resolved.resolution {
                    Resolution::Known(value) => values.push(value),
                    Resolution::Unknown => unknown = true,
                    Resolution::Failed(err) => {
                        failure.get_or_insert(err);
                    }
                }
            }
            let resolution = match (failure, unknown) {
                (Some(err), _) => Resolution::Failed(err),
                (None, true) => Resolution::Unknown,
                (None, false) => Resolution::Known(values),
            };
            Resolved {
                resolution,
                dependencies,
            }
        })
    }
}

impl<T> From<T> for Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self::known(value)
    }
}

impl From<&str> for Output<String> {
    fn from(value: &str) -> Self {
        Self::known(value.to_string())
    }
}
