//! Taskbar registry: one button per live window, with a derived visual state.

use crate::{
    model::{WindowId, WindowRecord, WindowType},
    window_manager::top_window,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarButtonState {
    /// The window is minimized.
    Minimized,
    /// The window is the current top window.
    Active,
    /// Open and visible, not focused.
    Inactive,
}

impl TaskbarButtonState {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Minimized => "minimized",
            Self::Active => "active",
            Self::Inactive => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarButton {
    pub window_id: WindowId,
    pub window_type: WindowType,
    pub label: String,
    pub state: TaskbarButtonState,
}

/// What a click on a taskbar button should do to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarClickAction {
    Restore,
    Minimize,
    BringToFront,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskbarRegistry {
    buttons: Vec<TaskbarButton>,
}

impl TaskbarRegistry {
    pub fn buttons(&self) -> &[TaskbarButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn button(&self, window_id: WindowId) -> Option<&TaskbarButton> {
        self.buttons.iter().find(|b| b.window_id == window_id)
    }

    /// Registers a button for `window`. A window never gets a second button.
    pub fn add(&mut self, window: &WindowRecord) {
        if self.button(window.id).is_some() {
            return;
        }
        self.buttons.push(TaskbarButton {
            window_id: window.id,
            window_type: window.window_type.clone(),
            label: window.title.clone(),
            state: TaskbarButtonState::Inactive,
        });
    }

    /// Removes the button of `window_id`; returns whether one existed.
    pub fn remove(&mut self, window_id: WindowId) -> bool {
        let before = self.buttons.len();
        self.buttons.retain(|b| b.window_id != window_id);
        self.buttons.len() != before
    }

    /// Recomputes every button state from the window records. Idempotent.
    pub fn refresh(&mut self, windows: &[WindowRecord]) {
        let top = top_window(windows).map(|w| w.id);
        for button in &mut self.buttons {
            let minimized = windows
                .iter()
                .find(|w| w.id == button.window_id)
                .map(|w| w.minimized)
                .unwrap_or(false);
            button.state = if minimized {
                TaskbarButtonState::Minimized
            } else if top == Some(button.window_id) {
                TaskbarButtonState::Active
            } else {
                TaskbarButtonState::Inactive
            };
        }
    }
}

/// Standard desktop convention: restore minimized, minimize the top window, raise the rest.
pub fn click_action(windows: &[WindowRecord], window_id: WindowId) -> Option<TaskbarClickAction> {
    let window = windows.iter().find(|w| w.id == window_id)?;
    let action = if window.minimized {
        TaskbarClickAction::Restore
    } else if top_window(windows).map(|w| w.id) == Some(window_id) {
        TaskbarClickAction::Minimize
    } else {
        TaskbarClickAction::BringToFront
    };
    Some(action)
}
