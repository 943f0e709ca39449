//! Platform abstraction for running asynchronous continuations.
//!
//! The behaviors never block. Work that waits on the engine is handed to the
//! host as a boxed future and driven on the UI thread.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// A unit of UI-thread work. Not `Send`: it may hold `Rc` state.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs tasks on the host's UI thread.
pub trait TaskSpawner {
    /// Queue a task. It must not be polled re-entrantly from inside this call.
    fn spawn_local(&self, task: LocalTask);
}

impl<S: TaskSpawner + ?Sized> TaskSpawner for Rc<S> {
    fn spawn_local(&self, task: LocalTask) {
        (**self).spawn_local(task);
    }
}
