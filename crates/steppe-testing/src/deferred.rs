//! One-shot values completed from test code.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

struct Slot<T> {
    value: Option<T>,
    waker: Option<Waker>,
}

/// Completing half. Dropping it without resolving leaves the future pending.
pub struct Deferred<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

pub struct DeferredFuture<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

pub fn deferred<T>() -> (Deferred<T>, DeferredFuture<T>) {
    let slot = Rc::new(RefCell::new(Slot {
        value: None,
        waker: None,
    }));
    (
        Deferred {
            slot: Rc::clone(&slot),
        },
        DeferredFuture { slot },
    )
}

impl<T> Deferred<T> {
    pub fn resolve(self, value: T) {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            slot.value = Some(value);
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T> Future for DeferredFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let mut slot = self.slot.borrow_mut();
        match slot.value.take() {
            Some(value) => Poll::Ready(value),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
