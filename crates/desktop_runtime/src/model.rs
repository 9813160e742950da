use std::fmt;

use crate::{
    config::DesktopConfig,
    selection::{DesktopIcon, IconSelection},
    taskbar::TaskbarRegistry,
    timer::CancellableTimer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl WindowId {
    /// DOM id of the iframe hosting this window's content.
    pub fn frame_dom_id(self) -> String {
        format!("window-frame-{}", self.0)
    }
}

/// Stable identifier shared by a desktop icon and the window it opens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowType(String);

impl WindowType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Keeps the rect inside `bounds`, preferring the top-left edge when it does not fit.
    pub fn bounded_within(self, bounds: WindowRect) -> Self {
        let max_x = (bounds.x + bounds.w - self.w).max(bounds.x);
        let max_y = (bounds.y + bounds.h - self.h).max(bounds.y);
        Self {
            x: self.x.clamp(bounds.x, max_x),
            y: self.y.clamp(bounds.y, max_y),
            ..self
        }
    }

    pub fn origin(self) -> PointerPosition {
        PointerPosition {
            x: self.x,
            y: self.y,
        }
    }

    pub fn center(self) -> PointerPosition {
        PointerPosition {
            x: self.x + self.w / 2,
            y: self.y + self.h / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Navigation-bar state for browser windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserNavState {
    pub url: String,
    /// Embedded pages are cross-origin and cannot report their session history to the shell,
    /// so both history flags stay cleared and the back/forward controls render disabled.
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Bumped by every refresh so views can tell reloads apart.
    pub reload_count: u32,
}

impl BrowserNavState {
    pub fn new(url: String) -> Self {
        Self {
            url,
            can_go_back: false,
            can_go_forward: false,
            reload_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowKind {
    Basic,
    Browser(BrowserNavState),
}

/// In-flight visual transition of a window.
///
/// Logical flags (`minimized`, `maximized`) change when the transition starts; this enum only
/// tracks what the view is animating and, for `Closing`, that the record is on its way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTransition {
    Idle,
    Opening,
    Minimizing { toward: PointerPosition },
    Restoring { from: PointerPosition },
    Maximizing,
    Unmaximizing,
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub window_type: WindowType,
    pub title: String,
    pub kind: WindowKind,
    pub content_url: String,
    pub rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub restore_anchor: Option<PointerPosition>,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub transition: WindowTransition,
    pub transition_timer: CancellableTimer,
}

impl WindowRecord {
    pub fn is_closing(&self) -> bool {
        self.transition == WindowTransition::Closing
    }

    /// Minimized windows stay mounted but hidden once their minimize transition has ended.
    pub fn is_hidden(&self) -> bool {
        self.minimized && !matches!(self.transition, WindowTransition::Minimizing { .. })
    }

    pub fn is_browser(&self) -> bool {
        matches!(self.kind, WindowKind::Browser(_))
    }

    pub fn iframe_dom_id(&self) -> String {
        self.id.frame_dom_id()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub highest_z_index: u64,
    pub windows: Vec<WindowRecord>,
    pub taskbar: TaskbarRegistry,
    pub selection: IconSelection,
    /// Armed by window control buttons to swallow the titlebar double-click they can produce.
    pub control_guard: CancellableTimer,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            highest_z_index: 0,
            windows: Vec::new(),
            taskbar: TaskbarRegistry::default(),
            selection: IconSelection::default(),
            control_guard: CancellableTimer::default(),
        }
    }
}

impl DesktopState {
    /// Builds the boot state with one desktop icon per catalog entry shown on the desktop.
    pub fn new(config: &DesktopConfig) -> Self {
        let icons = config
            .windows
            .iter()
            .filter(|entry| entry.show_on_desktop)
            .map(|entry| DesktopIcon::new(entry.window_type.as_str(), &entry.title, &entry.icon))
            .collect();
        Self {
            selection: IconSelection::new(icons),
            ..Self::default()
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_by_type(&self, window_type: &WindowType) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.window_type == window_type)
    }

    /// The non-minimized, non-closing window with the highest z-index.
    pub fn top_window_id(&self) -> Option<WindowId> {
        crate::window_manager::top_window(&self.windows).map(|w| w.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub bounds: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    /// True while a drag or resize gesture is in progress; embedded pages ignore the pointer then.
    pub fn gesture_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    /// Drops any gesture that targets `window_id`.
    pub fn release_window(&mut self, window_id: WindowId) {
        if self
            .dragging
            .as_ref()
            .is_some_and(|session| session.window_id == window_id)
        {
            self.dragging = None;
        }
        if self
            .resizing
            .as_ref()
            .is_some_and(|session| session.window_id == window_id)
        {
            self.resizing = None;
        }
    }
}
