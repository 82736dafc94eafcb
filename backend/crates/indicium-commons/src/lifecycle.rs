//! Readiness lifecycle shared by the client, database and table handles.
//!
//! Every handle moves through `Uninitialized → Loading → Ready` exactly once.
//! There is no way back from `Ready`; a failed load returns the handle to
//! `Uninitialized` so that the owner can report the error and drop it.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Observable lifecycle state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Loading,
    Ready,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecycleState::Uninitialized,
            1 => LifecycleState::Loading,
            _ => LifecycleState::Ready,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LifecycleState::Uninitialized => 0,
            LifecycleState::Loading => 1,
            LifecycleState::Ready => 2,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Loading => "loading",
            LifecycleState::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// Atomic lifecycle cell.
///
/// Transitions are compare-and-swap so two concurrent `load` calls cannot both
/// enter `Loading`.
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(LifecycleState::Uninitialized.as_u8()),
        }
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    /// `Uninitialized → Loading`.
    ///
    /// On failure returns the state the handle was actually in.
    pub fn begin_loading(&self) -> Result<(), LifecycleState> {
        self.transition(LifecycleState::Uninitialized, LifecycleState::Loading)
    }

    /// `Loading → Ready`.
    pub fn finish_loading(&self) -> Result<(), LifecycleState> {
        self.transition(LifecycleState::Loading, LifecycleState::Ready)
    }

    /// `Loading → Uninitialized`, used when a load fails part way.
    pub fn abort_loading(&self) {
        let _ = self.transition(LifecycleState::Loading, LifecycleState::Uninitialized);
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> Result<(), LifecycleState> {
        self.state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(LifecycleState::from_u8)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
