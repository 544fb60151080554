//! Task-group helpers that coalesce thread outcomes into errors.
//!
//! Two grouping disciplines over plain `std::thread` subtasks:
//!
//! - [`ParallelGroup`] — run everything to completion and collect every
//!   failure into a [`MultiError`].
//! - [`CoordinatedGroup`] — keep the first failure, cancel a shared
//!   [`CancelToken`] so sibling tasks can stop early, and drop the rest.
//!
//! Both treat the multi-error machinery as a black box: they only construct,
//! append, and collapse. Subtask panics surface as errors rather than being
//! lost.
//!
//! # Examples
//!
//! ```
//! use error_trail::new_err;
//! use error_trail::sync::ParallelGroup;
//!
//! let mut group = ParallelGroup::new();
//! group.go(|| Ok(()));
//! group.go_named("ingest", || Err(new_err!("short read").into()));
//!
//! let merr = group.wait_multi();
//! assert_eq!(merr.len(), 1);
//! assert!(merr.errors()[0].to_string().starts_with("ingest: "));
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::multi::MultiError;
use crate::wrap::{new_error, with_frame, with_message};
use crate::BoxError;

/// Outcome of one subtask.
pub type TaskResult = Result<(), BoxError>;

/// Cancellation flag shared between a [`CoordinatedGroup`] and its
/// subtasks. Tasks are in charge of ending themselves when the token trips;
/// nothing is interrupted for them.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Whether the group has been cancelled (a subtask failed, or the group
    /// finished waiting).
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

/// A group of subtasks that all run to completion, with every failure
/// collected.
///
/// The zero value is a viable group; there is no builder.
#[derive(Default)]
pub struct ParallelGroup {
    handles: Vec<JoinHandle<TaskResult>>,
}

impl ParallelGroup {
    /// Returns an empty group.
    pub fn new() -> ParallelGroup {
        ParallelGroup::default()
    }

    /// Spawns a subtask. Parameters are the closure's business: capture
    /// what the task needs.
    pub fn go<F>(&mut self, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        self.handles.push(std::thread::spawn(task));
    }

    /// Spawns a subtask whose failures are prefixed with `name` and
    /// annotated with a frame, so coalesced output says which task
    /// produced what.
    pub fn go_named<F>(&mut self, name: impl Into<String>, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        let name = name.into();
        self.handles
            .push(std::thread::spawn(move || {
                task().map_err(|err| named_error(&name, err))
            }));
    }

    /// Blocks until every subtask completes, returning all failures as a
    /// [`MultiError`].
    pub fn wait_multi(self) -> MultiError {
        let mut merr = MultiError::new();
        for handle in self.handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => merr.push(err),
                Err(panic) => merr.push(new_error(panic_message(panic))),
            }
        }
        merr
    }

    /// Blocks until every subtask completes, returning the collapsed
    /// outcome: `None`, the single failure, or the collection.
    pub fn wait(self) -> Option<BoxError> {
        self.wait_multi().error_or_nil()
    }
}

/// A group of subtasks coordinating to stop when any of them fails.
///
/// The first failure is kept and trips the shared [`CancelToken`]; later
/// failures are dropped. [`wait`](CoordinatedGroup::wait) returns that
/// first failure, if any.
pub struct CoordinatedGroup {
    token: CancelToken,
    first: Arc<Mutex<Option<BoxError>>>,
    handles: Vec<JoinHandle<()>>,
}

impl CoordinatedGroup {
    /// Returns a new group and its cancellation token. The token trips when
    /// any subtask fails and when the group finishes waiting.
    pub fn new() -> (CoordinatedGroup, CancelToken) {
        let group = CoordinatedGroup {
            token: CancelToken::default(),
            first: Arc::new(Mutex::new(None)),
            handles: Vec::new(),
        };
        let token = group.token.clone();
        (group, token)
    }

    /// Another handle on the group's token, for tasks registered after
    /// construction.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Spawns a subtask. The first one to fail cancels the group; its error
    /// is what [`wait`](CoordinatedGroup::wait) returns.
    pub fn go<F>(&mut self, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        self.go_inner(None, task);
    }

    /// Spawns a subtask whose failure is prefixed with `name` and annotated
    /// with a frame.
    pub fn go_named<F>(&mut self, name: impl Into<String>, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        self.go_inner(Some(name.into()), task);
    }

    fn go_inner<F>(&mut self, name: Option<String>, task: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        let token = self.token.clone();
        let first = Arc::clone(&self.first);
        self.handles.push(std::thread::spawn(move || {
            if let Err(err) = task() {
                let err = match &name {
                    Some(name) => named_error(name, err),
                    None => err,
                };
                record_first(&first, &token, err);
            }
        }));
    }

    /// Blocks until all subtasks have returned, then returns the first
    /// failure (if any). The token is cancelled before returning so
    /// unfailing runs also release token watchers.
    pub fn wait(self) -> Option<BoxError> {
        for handle in self.handles {
            if let Err(panic) = handle.join() {
                record_first(
                    &self.first,
                    &self.token,
                    new_error(panic_message(panic)).into(),
                );
            }
        }
        self.token.cancel();
        self.first
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

fn record_first(slot: &Mutex<Option<BoxError>>, token: &CancelToken, err: BoxError) {
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        *slot = Some(err);
        token.cancel();
    }
}

/// Adds the task identifier to the error context.
fn named_error(name: &str, err: BoxError) -> BoxError {
    let message = format!("{name}: {err}");
    Box::new(with_message(with_frame(err), message))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        format!("task panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("task panicked: {message}")
    } else {
        "task panicked".to_string()
    }
}
