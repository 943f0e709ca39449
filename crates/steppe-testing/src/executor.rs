//! Single-threaded executor for spawned UI tasks.

use futures_task::ArcWake;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Context;
use steppe_core::{LocalTask, TaskSpawner};

const MAX_PUMP_ROUNDS: usize = 100;

struct WakeFlag {
    woken: AtomicBool,
}

impl ArcWake for WakeFlag {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.woken.store(true, Ordering::SeqCst);
    }
}

struct SpawnerState {
    incoming: RefCell<Vec<LocalTask>>,
    pending: RefCell<Vec<LocalTask>>,
    flag: Arc<WakeFlag>,
}

/// Collects spawned tasks and polls them on demand from the test.
#[derive(Clone)]
pub struct TestSpawner {
    state: Rc<SpawnerState>,
}

impl TestSpawner {
    pub fn new() -> Self {
        Self {
            state: Rc::new(SpawnerState {
                incoming: RefCell::new(Vec::new()),
                pending: RefCell::new(Vec::new()),
                flag: Arc::new(WakeFlag {
                    woken: AtomicBool::new(false),
                }),
            }),
        }
    }

    /// Tasks spawned or suspended but not yet finished.
    pub fn pending_tasks(&self) -> usize {
        self.state.incoming.borrow().len() + self.state.pending.borrow().len()
    }

    /// Poll every task until a full round neither completes a task, wakes
    /// one, nor spawns a new one.
    pub fn pump_until_idle(&self) {
        let waker = futures_task::waker(Arc::clone(&self.state.flag));
        let mut cx = Context::from_waker(&waker);
        let mut rounds = 0;
        loop {
            rounds += 1;
            if rounds > MAX_PUMP_ROUNDS {
                panic!("pump_until_idle looped too many times!");
            }

            let mut tasks = std::mem::take(&mut *self.state.pending.borrow_mut());
            tasks.append(&mut self.state.incoming.borrow_mut());
            if tasks.is_empty() {
                break;
            }

            self.state.flag.woken.store(false, Ordering::SeqCst);
            let mut progressed = false;
            let mut suspended = Vec::with_capacity(tasks.len());
            for mut task in tasks {
                if task.as_mut().poll(&mut cx).is_ready() {
                    progressed = true;
                } else {
                    suspended.push(task);
                }
            }
            self.state.pending.borrow_mut().extend(suspended);

            let woken = self.state.flag.woken.load(Ordering::SeqCst);
            let spawned = !self.state.incoming.borrow().is_empty();
            if !progressed && !woken && !spawned {
                break;
            }
        }
    }
}

impl Default for TestSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSpawner for TestSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.state.incoming.borrow_mut().push(task);
    }
}
