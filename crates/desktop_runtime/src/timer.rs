//! Cancellable, generation-stamped timers.
//!
//! The runtime never holds real timeouts. Starting a timer yields a token that the host schedules;
//! when the timeout fires the token comes back as [`crate::DesktopAction::TimerElapsed`] and is
//! honored only if it is still the latest one for its slot.

use crate::model::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancellableTimer {
    generation: u64,
    pending: bool,
}

impl CancellableTimer {
    /// Starts the timer, invalidating any token handed out earlier. Returns the new generation.
    pub fn start(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.generation
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consumes a fired timeout. Returns `true` only for the live token of a pending timer.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.pending && self.generation == generation {
            self.pending = false;
            true
        } else {
            false
        }
    }
}

/// A scheduled timeout, identified by the slot it belongs to and the slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerToken {
    /// Single-click disambiguation window on a desktop icon.
    IconClick { generation: u64 },
    /// Debounce after a window control button was pressed.
    ControlGuard { generation: u64 },
    /// End of a window's visual transition.
    Transition { window_id: WindowId, generation: u64 },
}
