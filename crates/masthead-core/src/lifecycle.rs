#![forbid(unsafe_code)]

//! Screen lifecycle probe.
//!
//! Every resumption of an in-flight layout step first asks whether the
//! owning screen is still active. A detached screen halts the step silently:
//! no completion callback, no error. This race is expected and frequent, not
//! a fault.

use std::cell::Cell;
use std::rc::Rc;

/// Query whether the screen owning the header is still active.
pub trait ScreenLifecycle {
    /// True while the owning screen is attached and its views are live.
    fn is_active(&self) -> bool;
}

/// A shared lifecycle flag for single-threaded hosts.
///
/// Clones share state, so the host can keep one handle to flip on teardown
/// while the engine holds another.
#[derive(Debug, Clone)]
pub struct LifecycleFlag {
    active: Rc<Cell<bool>>,
}

impl LifecycleFlag {
    /// Create a flag in the active state.
    pub fn active() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    /// Mark the owning screen as attached or detached.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

impl ScreenLifecycle for LifecycleFlag {
    fn is_active(&self) -> bool {
        self.active.get()
    }
}
