//! Host-side runtime helpers for executing reducer effects and querying browser layout.
//!
//! The reducer never touches the DOM. Everything it needs from the page (viewport size, the
//! launcher anchor, the icon under the pointer) is resolved here and passed in with the action,
//! and everything it asks the page to do comes back as a [`RuntimeEffect`].

mod host_ui;

use crate::{
    model::{PointerPosition, WindowRect, WindowType},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// DOM id of the container windows are positioned in.
pub const WINDOW_LAYER_DOM_ID: &str = "desktop-window-layer";
/// DOM id of the taskbar launcher button used as the minimize/restore anchor.
pub const LAUNCHER_BUTTON_DOM_ID: &str = "desktop-launcher-button";
/// DOM id of the shell root element.
pub const SHELL_ROOT_DOM_ID: &str = "desktop-shell-root";
/// Height reserved for the taskbar when the window layer cannot be measured.
pub const TASKBAR_HEIGHT_PX: i32 = 40;

#[derive(Debug, Clone, Copy, Default)]
/// Browser host bundle for desktop runtime side effects.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::StartTimer { token, delay_ms } => {
                host_ui::start_timer(runtime, token, delay_ms)
            }
            RuntimeEffect::ReloadContent { window_id, url } => {
                host_ui::reload_content(window_id, &url)
            }
        }
    }

    /// Returns the rect windows may occupy, in window-layer coordinates.
    pub fn desktop_viewport_rect(&self) -> WindowRect {
        host_ui::desktop_viewport_rect(TASKBAR_HEIGHT_PX)
    }

    /// Center of the launcher button relative to the window layer.
    ///
    /// A missing launcher is a page-structure bug: it trips a debug assertion in development
    /// builds and yields `None` otherwise, which the reducer rejects without mutating state.
    pub fn launcher_anchor(&self) -> Option<PointerPosition> {
        let anchor = host_ui::launcher_anchor();
        debug_assert!(
            anchor.is_some() || cfg!(not(target_arch = "wasm32")),
            "launcher button `#{LAUNCHER_BUTTON_DOM_ID}` is not attached"
        );
        anchor
    }

    /// Resolves the desktop icon actually under the given client coordinates.
    pub fn icon_under_pointer(&self, client_x: i32, client_y: i32) -> Option<WindowType> {
        host_ui::icon_under_pointer(client_x, client_y)
    }
}
