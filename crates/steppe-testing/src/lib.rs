//! Testing utilities and harness for the Steppe page behaviors.
//!
//! Everything here runs without a browser: [`FakeDom`] stands in for the
//! document and its layout, [`FakeEngine`] for the decoding library, and
//! [`TestSpawner`] drives spawned continuations until nothing can progress.

pub mod deferred;
pub mod dom;
pub mod engine;
pub mod executor;
pub mod rule;

pub use deferred::{deferred, Deferred, DeferredFuture};
pub use dom::{ElementSpec, FakeDom, FakeNode, NodeId};
pub use engine::{FakeEngine, StopMode};
pub use executor::TestSpawner;
pub use rule::PageTestRule;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
