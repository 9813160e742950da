//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    config::DesktopConfig,
    model::{
        DesktopState, DragSession, InteractionState, PointerPosition, ResizeEdge, ResizeSession,
        WindowId, WindowKind, WindowRecord, WindowRect, WindowTransition, WindowType,
    },
    selection::ClickOutcome,
    taskbar::{click_action, TaskbarClickAction},
    timer::{CancellableTimer, TimerToken},
    transition::transition_duration,
    window_manager::{dragged_rect, resize_rect},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Titlebar control buttons.
pub enum WindowControl {
    Minimize,
    Maximize,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Restore, raise, or create the window of `window_type`.
    OpenOrFocus {
        window_type: WindowType,
        /// Desktop container rect used to size new windows.
        viewport: WindowRect,
        /// Launcher position, used when the existing window is minimized.
        launcher_anchor: Option<PointerPosition>,
    },
    /// Raise a window above all others.
    BringToFront { window_id: WindowId },
    /// Minimize a window toward the launcher.
    Minimize {
        window_id: WindowId,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Restore a minimized window from the launcher.
    Restore {
        window_id: WindowId,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Maximize into `viewport`, or return to the saved geometry.
    ToggleMaximize {
        window_id: WindowId,
        viewport: WindowRect,
    },
    /// Start closing a window; it is removed when the close transition ends.
    Close { window_id: WindowId },
    /// A titlebar control button was clicked.
    ControlButton {
        window_id: WindowId,
        control: WindowControl,
        viewport: WindowRect,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Titlebar double-click (maximize toggle unless a control button just fired).
    TitlebarDoubleClick {
        window_id: WindowId,
        viewport: WindowRect,
    },
    /// Taskbar button click.
    TaskbarClick {
        window_id: WindowId,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Reload the page embedded in a browser window.
    RefreshBrowser { window_id: WindowId },
    /// Begin dragging a window by its titlebar.
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
        /// Container the window must stay inside.
        bounds: WindowRect,
    },
    /// Update an in-progress window drag.
    UpdateMove { pointer: PointerPosition },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize { pointer: PointerPosition },
    /// End the active window resize.
    EndResize,
    /// Click on a desktop icon.
    IconClick {
        window_type: WindowType,
        viewport: WindowRect,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Enter key: open the selected icon.
    ActivateSelectedIcon {
        viewport: WindowRect,
        launcher_anchor: Option<PointerPosition>,
    },
    /// Pointer pressed on the desktop; `hit` is the icon under the pointer, if any.
    DesktopPointerDown { hit: Option<WindowType> },
    /// A timeout scheduled through [`RuntimeEffect::StartTimer`] fired.
    TimerElapsed(TimerToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Schedule `token` to come back as [`DesktopAction::TimerElapsed`] after `delay_ms`.
    StartTimer { token: TimerToken, delay_ms: u32 },
    /// Reassign the source of a window's embedded page.
    ReloadContent { window_id: WindowId, url: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. State is left untouched when one is returned.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
    /// The target window is closing; no further operations apply to it.
    #[error("window {0:?} is closing")]
    WindowClosing(WindowId),
    /// The launcher element needed as the minimize destination is missing.
    #[error("launcher anchor unavailable")]
    MissingLauncherAnchor,
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// This is the authoritative state transition engine for windows, the taskbar, and desktop icon
/// selection. The taskbar is refreshed after every successful action.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a missing or closing window, or when a
/// minimize has no launcher anchor to animate toward.
pub fn reduce_desktop(
    config: &DesktopConfig,
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenOrFocus {
            window_type,
            viewport,
            launcher_anchor,
        } => {
            open_or_focus(
                config,
                state,
                window_type,
                viewport,
                launcher_anchor,
                &mut effects,
            )?;
        }
        DesktopAction::BringToFront { window_id } => {
            bring_to_front(state, window_id)?;
        }
        DesktopAction::Minimize {
            window_id,
            launcher_anchor,
        } => {
            minimize(
                config,
                state,
                interaction,
                window_id,
                launcher_anchor,
                &mut effects,
            )?;
        }
        DesktopAction::Restore {
            window_id,
            launcher_anchor,
        } => {
            restore(config, state, window_id, launcher_anchor, &mut effects)?;
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            toggle_maximize(
                config,
                state,
                interaction,
                window_id,
                viewport,
                &mut effects,
            )?;
        }
        DesktopAction::Close { window_id } => {
            close(config, state, interaction, window_id, &mut effects)?;
        }
        DesktopAction::ControlButton {
            window_id,
            control,
            viewport,
            launcher_anchor,
        } => {
            live_window(state, window_id)?;
            match control {
                WindowControl::Minimize => minimize(
                    config,
                    state,
                    interaction,
                    window_id,
                    launcher_anchor,
                    &mut effects,
                )?,
                WindowControl::Maximize => toggle_maximize(
                    config,
                    state,
                    interaction,
                    window_id,
                    viewport,
                    &mut effects,
                )?,
                WindowControl::Close => {
                    close(config, state, interaction, window_id, &mut effects)?
                }
            }
            let generation = state.control_guard.start();
            effects.push(RuntimeEffect::StartTimer {
                token: TimerToken::ControlGuard { generation },
                delay_ms: config.timings.control_debounce_ms,
            });
        }
        DesktopAction::TitlebarDoubleClick {
            window_id,
            viewport,
        } => {
            if !state.control_guard.is_pending() {
                toggle_maximize(
                    config,
                    state,
                    interaction,
                    window_id,
                    viewport,
                    &mut effects,
                )?;
            }
        }
        DesktopAction::TaskbarClick {
            window_id,
            launcher_anchor,
        } => {
            live_window(state, window_id)?;
            match click_action(&state.windows, window_id).ok_or(ReducerError::WindowNotFound)? {
                TaskbarClickAction::Restore => {
                    restore(config, state, window_id, launcher_anchor, &mut effects)?
                }
                TaskbarClickAction::Minimize => minimize(
                    config,
                    state,
                    interaction,
                    window_id,
                    launcher_anchor,
                    &mut effects,
                )?,
                TaskbarClickAction::BringToFront => bring_to_front(state, window_id)?,
            }
        }
        DesktopAction::RefreshBrowser { window_id } => {
            let window = live_window_mut(state, window_id)?;
            if let WindowKind::Browser(nav) = &mut window.kind {
                nav.reload_count = nav.reload_count.wrapping_add(1);
                effects.push(RuntimeEffect::ReloadContent {
                    window_id,
                    url: nav.url.clone(),
                });
            }
        }
        DesktopAction::BeginMove {
            window_id,
            pointer,
            bounds,
        } => {
            bring_to_front(state, window_id)?;
            let window = live_window(state, window_id)?;
            if !window.maximized {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start: window.rect,
                    bounds,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = live_window_mut(state, session.window_id)?;
                if !window.maximized && !window.minimized {
                    window.rect = dragged_rect(session.rect_start, dx, dy, session.bounds);
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            bring_to_front(state, window_id)?;
            let window = live_window(state, window_id)?;
            if !window.maximized {
                interaction.resizing = Some(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start: window.rect,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let layout = &config.layout;
                let window = live_window_mut(state, session.window_id)?;
                if !window.maximized && !window.minimized {
                    window.rect = resize_rect(
                        session.rect_start,
                        session.edge,
                        dx,
                        dy,
                        layout.min_width,
                        layout.min_height,
                    );
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::IconClick {
            window_type,
            viewport,
            launcher_anchor,
        } => {
            // Committed only once the open succeeds.
            let mut selection = state.selection.clone();
            match selection.click(&window_type) {
                ClickOutcome::Armed { generation } => {
                    effects.push(RuntimeEffect::StartTimer {
                        token: TimerToken::IconClick { generation },
                        delay_ms: config.timings.click_disambiguation_ms,
                    });
                }
                ClickOutcome::Open(window_type) => {
                    open_or_focus(
                        config,
                        state,
                        window_type,
                        viewport,
                        launcher_anchor,
                        &mut effects,
                    )?;
                }
            }
            state.selection = selection;
        }
        DesktopAction::ActivateSelectedIcon {
            viewport,
            launcher_anchor,
        } => {
            if let Some(window_type) = state.selection.activate_selected() {
                open_or_focus(
                    config,
                    state,
                    window_type,
                    viewport,
                    launcher_anchor,
                    &mut effects,
                )?;
            }
        }
        DesktopAction::DesktopPointerDown { hit } => {
            state.selection.pointer_down(hit.as_ref());
        }
        DesktopAction::TimerElapsed(token) => timer_elapsed(state, token),
    }

    state.taskbar.refresh(&state.windows);
    Ok(effects)
}

fn timer_elapsed(state: &mut DesktopState, token: TimerToken) {
    match token {
        TimerToken::IconClick { generation } => {
            state.selection.click_timer_elapsed(generation);
        }
        TimerToken::ControlGuard { generation } => {
            state.control_guard.expire(generation);
        }
        TimerToken::Transition {
            window_id,
            generation,
        } => {
            let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
                return;
            };
            let window = &mut state.windows[index];
            if !window.transition_timer.expire(generation) {
                return;
            }
            if window.is_closing() {
                state.windows.remove(index);
                state.taskbar.remove(window_id);
            } else {
                window.transition = WindowTransition::Idle;
            }
        }
    }
}

fn open_or_focus(
    config: &DesktopConfig,
    state: &mut DesktopState,
    window_type: WindowType,
    viewport: WindowRect,
    launcher_anchor: Option<PointerPosition>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<WindowId, ReducerError> {
    if let Some(existing) = state.window_by_type(&window_type) {
        let window_id = existing.id;
        if existing.is_closing() {
            return Err(ReducerError::WindowClosing(window_id));
        }
        if existing.minimized {
            restore(config, state, window_id, launcher_anchor, effects)?;
        } else {
            bring_to_front(state, window_id)?;
        }
        return Ok(window_id);
    }

    let presentation = config.presentation(&window_type);
    let kind = config.window_kind(&presentation);
    let rect = config
        .layout
        .initial_rect(presentation.catalog_kind, viewport, state.windows.len());
    let window_id = next_window_id(state);
    let mut record = WindowRecord {
        id: window_id,
        window_type,
        title: presentation.title,
        kind,
        content_url: presentation.content_url,
        rect,
        restore_rect: None,
        restore_anchor: None,
        z_index: next_z_index(state),
        minimized: false,
        maximized: false,
        transition: WindowTransition::Idle,
        transition_timer: CancellableTimer::default(),
    };
    effects.push(begin_transition(
        config,
        &mut record,
        WindowTransition::Opening,
    ));
    state.taskbar.add(&record);
    state.windows.push(record);
    Ok(window_id)
}

fn bring_to_front(state: &mut DesktopState, window_id: WindowId) -> Result<(), ReducerError> {
    live_window(state, window_id)?;
    let z_index = next_z_index(state);
    live_window_mut(state, window_id)?.z_index = z_index;
    Ok(())
}

fn minimize(
    config: &DesktopConfig,
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    launcher_anchor: Option<PointerPosition>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = live_window_mut(state, window_id)?;
    let toward = launcher_anchor.ok_or(ReducerError::MissingLauncherAnchor)?;
    if window.minimized {
        return Ok(());
    }
    interaction.release_window(window_id);
    window.restore_anchor = Some(window.rect.origin());
    window.minimized = true;
    effects.push(begin_transition(
        config,
        window,
        WindowTransition::Minimizing { toward },
    ));
    Ok(())
}

fn restore(
    config: &DesktopConfig,
    state: &mut DesktopState,
    window_id: WindowId,
    launcher_anchor: Option<PointerPosition>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = live_window_mut(state, window_id)?;
    if !window.minimized {
        return bring_to_front(state, window_id);
    }
    if let Some(anchor) = window.restore_anchor.take() {
        window.rect.x = anchor.x;
        window.rect.y = anchor.y;
    }
    window.minimized = false;
    let from = launcher_anchor.unwrap_or_else(|| window.rect.center());
    effects.push(begin_transition(
        config,
        window,
        WindowTransition::Restoring { from },
    ));
    bring_to_front(state, window_id)
}

fn toggle_maximize(
    config: &DesktopConfig,
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    viewport: WindowRect,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = live_window_mut(state, window_id)?;
    if window.minimized {
        return Ok(());
    }
    interaction.release_window(window_id);
    if window.maximized {
        if let Some(restore_rect) = window.restore_rect.take() {
            window.rect = restore_rect;
        }
        window.maximized = false;
        effects.push(begin_transition(
            config,
            window,
            WindowTransition::Unmaximizing,
        ));
    } else {
        window.restore_rect = Some(window.rect);
        window.rect = viewport.clamped_min(config.layout.min_width, config.layout.min_height);
        window.maximized = true;
        effects.push(begin_transition(
            config,
            window,
            WindowTransition::Maximizing,
        ));
    }
    Ok(())
}

fn close(
    config: &DesktopConfig,
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = live_window_mut(state, window_id)?;
    interaction.release_window(window_id);
    effects.push(begin_transition(config, window, WindowTransition::Closing));
    state.taskbar.remove(window_id);
    Ok(())
}

/// Starts `transition` on `window`, superseding any transition still in flight.
fn begin_transition(
    config: &DesktopConfig,
    window: &mut WindowRecord,
    transition: WindowTransition,
) -> RuntimeEffect {
    window.transition = transition;
    let generation = window.transition_timer.start();
    RuntimeEffect::StartTimer {
        token: TimerToken::Transition {
            window_id: window.id,
            generation,
        },
        delay_ms: transition_duration(transition, &config.timings),
    }
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn next_z_index(state: &mut DesktopState) -> u64 {
    state.highest_z_index = state.highest_z_index.saturating_add(1);
    state.highest_z_index
}

fn live_window(state: &DesktopState, window_id: WindowId) -> Result<&WindowRecord, ReducerError> {
    let window = state
        .windows
        .iter()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound)?;
    if window.is_closing() {
        return Err(ReducerError::WindowClosing(window_id));
    }
    Ok(window)
}

fn live_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    let window = state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound)?;
    if window.is_closing() {
        return Err(ReducerError::WindowClosing(window_id));
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::BrowserNavState, taskbar::TaskbarButtonState};

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1280,
        h: 720,
    };
    const LAUNCHER: PointerPosition = PointerPosition { x: 24, y: 740 };

    struct Harness {
        config: DesktopConfig,
        state: DesktopState,
        interaction: InteractionState,
    }

    impl Harness {
        fn new() -> Self {
            let config = DesktopConfig::default();
            let state = DesktopState::new(&config);
            Self {
                config,
                state,
                interaction: InteractionState::default(),
            }
        }

        fn dispatch(&mut self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, ReducerError> {
            reduce_desktop(&self.config, &mut self.state, &mut self.interaction, action)
        }

        fn open(&mut self, window_type: &str) -> WindowId {
            self.dispatch(DesktopAction::OpenOrFocus {
                window_type: WindowType::from(window_type),
                viewport: VIEWPORT,
                launcher_anchor: Some(LAUNCHER),
            })
            .expect("open window");
            self.state
                .window_by_type(&WindowType::from(window_type))
                .expect("window")
                .id
        }

        fn window(&self, window_id: WindowId) -> &WindowRecord {
            self.state.window(window_id).expect("window")
        }

        /// Fires every transition timer in `effects`.
        fn finish(&mut self, effects: Vec<RuntimeEffect>) {
            for effect in effects {
                if let RuntimeEffect::StartTimer { token, .. } = effect {
                    self.dispatch(DesktopAction::TimerElapsed(token))
                        .expect("timer elapsed");
                }
            }
        }
    }

    #[test]
    fn open_creates_basic_window_with_clamped_size_and_cascade() {
        let mut h = Harness::new();

        let first = h.open("projects");
        let second = h.open("contact");

        let first = h.window(first);
        assert_eq!(
            first.rect,
            WindowRect {
                x: 100,
                y: 80,
                w: 512,
                h: 360,
            }
        );
        assert_eq!(first.title, "Projects");
        assert_eq!(first.content_url, "https://pages.portfolio.dev/projects");
        assert_eq!(first.transition, WindowTransition::Opening);
        let second = h.window(second);
        assert_eq!((second.rect.x, second.rect.y), (130, 110));
        assert!(second.z_index > first.z_index);
        assert_eq!(h.state.top_window_id(), Some(second.id));
    }

    #[test]
    fn about_opens_as_browser_window() {
        let mut h = Harness::new();
        let about = h.open("about");

        let window = h.window(about);
        assert!(window.is_browser());
        assert_eq!((window.rect.w, window.rect.h), (768, 504));
    }

    #[test]
    fn open_emits_entrance_timer_and_settles_to_idle() {
        let mut h = Harness::new();
        let effects = h
            .dispatch(DesktopAction::OpenOrFocus {
                window_type: WindowType::from("music"),
                viewport: VIEWPORT,
                launcher_anchor: None,
            })
            .unwrap();
        let window_id = h.state.windows[0].id;
        assert_eq!(
            effects,
            vec![RuntimeEffect::StartTimer {
                token: TimerToken::Transition {
                    window_id,
                    generation: 1,
                },
                delay_ms: 300,
            }]
        );

        h.finish(effects);
        assert_eq!(h.window(window_id).transition, WindowTransition::Idle);
    }

    #[test]
    fn reopening_existing_type_focuses_instead_of_duplicating() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let contact = h.open("contact");
        let z_before = h.window(projects).z_index;

        let again = h.open("projects");

        assert_eq!(again, projects);
        assert_eq!(h.state.windows.len(), 2);
        assert!(h.window(projects).z_index > h.window(contact).z_index);
        assert!(h.window(projects).z_index > z_before);
        assert_eq!(h.state.taskbar.len(), 2);
    }

    #[test]
    fn taskbar_click_minimizes_top_restores_minimized_and_raises_others() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let contact = h.open("contact");

        h.dispatch(DesktopAction::TaskbarClick {
            window_id: projects,
            launcher_anchor: Some(LAUNCHER),
        })
        .unwrap();
        assert_eq!(h.state.top_window_id(), Some(projects));

        h.dispatch(DesktopAction::TaskbarClick {
            window_id: projects,
            launcher_anchor: Some(LAUNCHER),
        })
        .unwrap();
        assert!(h.window(projects).minimized);
        assert_eq!(h.state.top_window_id(), Some(contact));
        assert_eq!(
            h.state.taskbar.button(projects).unwrap().state,
            TaskbarButtonState::Minimized
        );
        assert_eq!(
            h.state.taskbar.button(contact).unwrap().state,
            TaskbarButtonState::Active
        );

        h.dispatch(DesktopAction::TaskbarClick {
            window_id: projects,
            launcher_anchor: Some(LAUNCHER),
        })
        .unwrap();
        assert!(!h.window(projects).minimized);
        assert_eq!(h.state.top_window_id(), Some(projects));
    }

    #[test]
    fn minimize_without_launcher_anchor_is_rejected_without_state_change() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let before = h.state.clone();

        let result = h.dispatch(DesktopAction::Minimize {
            window_id: projects,
            launcher_anchor: None,
        });

        assert_eq!(result, Err(ReducerError::MissingLauncherAnchor));
        assert_eq!(h.state, before);
    }

    #[test]
    fn minimize_then_restore_returns_to_saved_position_on_top() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let contact = h.open("contact");
        let rect = h.window(projects).rect;

        let effects = h
            .dispatch(DesktopAction::Minimize {
                window_id: projects,
                launcher_anchor: Some(LAUNCHER),
            })
            .unwrap();
        assert!(h.window(projects).minimized);
        assert!(!h.window(projects).is_hidden());
        h.finish(effects);
        assert!(h.window(projects).is_hidden());

        h.dispatch(DesktopAction::Restore {
            window_id: projects,
            launcher_anchor: Some(LAUNCHER),
        })
        .unwrap();

        let restored = h.window(projects);
        assert!(!restored.minimized);
        assert_eq!(restored.rect, rect);
        assert_eq!(restored.z_index, h.state.highest_z_index);
        assert_eq!(
            restored.transition,
            WindowTransition::Restoring { from: LAUNCHER }
        );
        assert!(restored.z_index > h.window(contact).z_index);
    }

    #[test]
    fn minimize_ends_drag_on_that_window() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        h.dispatch(DesktopAction::BeginMove {
            window_id: projects,
            pointer: PointerPosition { x: 150, y: 90 },
            bounds: VIEWPORT,
        })
        .unwrap();
        h.dispatch(DesktopAction::UpdateMove {
            pointer: PointerPosition { x: 190, y: 120 },
        })
        .unwrap();

        h.dispatch(DesktopAction::Minimize {
            window_id: projects,
            launcher_anchor: Some(LAUNCHER),
        })
        .unwrap();

        assert_eq!(h.interaction.dragging, None);
        assert_eq!(
            h.window(projects).restore_anchor,
            Some(PointerPosition { x: 140, y: 110 })
        );
    }

    #[test]
    fn toggle_maximize_twice_restores_exact_geometry() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let original = h.window(projects).rect;

        h.dispatch(DesktopAction::ToggleMaximize {
            window_id: projects,
            viewport: VIEWPORT,
        })
        .unwrap();
        assert!(h.window(projects).maximized);
        assert_eq!(h.window(projects).rect, VIEWPORT);

        h.dispatch(DesktopAction::ToggleMaximize {
            window_id: projects,
            viewport: VIEWPORT,
        })
        .unwrap();
        assert!(!h.window(projects).maximized);
        assert_eq!(h.window(projects).rect, original);
    }

    #[test]
    fn titlebar_double_click_is_swallowed_right_after_a_control_click() {
        let mut h = Harness::new();
        let projects = h.open("projects");

        let effects = h
            .dispatch(DesktopAction::ControlButton {
                window_id: projects,
                control: WindowControl::Maximize,
                viewport: VIEWPORT,
                launcher_anchor: Some(LAUNCHER),
            })
            .unwrap();
        assert!(h.window(projects).maximized);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            RuntimeEffect::StartTimer {
                token: TimerToken::ControlGuard { .. },
                delay_ms: 100,
            }
        )));

        h.dispatch(DesktopAction::TitlebarDoubleClick {
            window_id: projects,
            viewport: VIEWPORT,
        })
        .unwrap();
        assert!(h.window(projects).maximized);

        h.finish(effects);
        h.dispatch(DesktopAction::TitlebarDoubleClick {
            window_id: projects,
            viewport: VIEWPORT,
        })
        .unwrap();
        assert!(!h.window(projects).maximized);
    }

    #[test]
    fn close_removes_button_immediately_and_window_after_transition() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let contact = h.open("contact");

        let effects = h
            .dispatch(DesktopAction::Close { window_id: contact })
            .unwrap();
        assert_eq!(h.state.windows.len(), 2);
        assert_eq!(h.state.taskbar.len(), 1);
        assert!(h.state.taskbar.button(contact).is_none());
        assert_eq!(h.state.top_window_id(), Some(projects));
        assert_eq!(
            h.dispatch(DesktopAction::BringToFront { window_id: contact }),
            Err(ReducerError::WindowClosing(contact))
        );

        h.finish(effects);
        assert_eq!(h.state.windows.len(), 1);
        assert_eq!(
            h.dispatch(DesktopAction::BringToFront { window_id: contact }),
            Err(ReducerError::WindowNotFound)
        );
    }

    #[test]
    fn reopening_a_closing_type_waits_for_the_close_to_finish() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let effects = h
            .dispatch(DesktopAction::Close {
                window_id: projects,
            })
            .unwrap();

        let result = h.dispatch(DesktopAction::OpenOrFocus {
            window_type: WindowType::from("projects"),
            viewport: VIEWPORT,
            launcher_anchor: None,
        });
        assert_eq!(result, Err(ReducerError::WindowClosing(projects)));

        h.finish(effects);
        let reopened = h.open("projects");
        assert_ne!(reopened, projects);
        assert_eq!(h.state.windows.len(), 1);
    }

    #[test]
    fn close_during_minimize_transition_supersedes_it() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        let minimize_effects = h
            .dispatch(DesktopAction::Minimize {
                window_id: projects,
                launcher_anchor: Some(LAUNCHER),
            })
            .unwrap();

        let close_effects = h
            .dispatch(DesktopAction::Close {
                window_id: projects,
            })
            .unwrap();

        h.finish(minimize_effects);
        assert!(h.window(projects).is_closing());
        h.finish(close_effects);
        assert!(h.state.windows.is_empty());
        assert!(h.state.taskbar.is_empty());
    }

    #[test]
    fn dragging_moves_within_container_bounds() {
        let mut h = Harness::new();
        let projects = h.open("projects");

        h.dispatch(DesktopAction::BeginMove {
            window_id: projects,
            pointer: PointerPosition { x: 200, y: 100 },
            bounds: VIEWPORT,
        })
        .unwrap();
        assert!(h.interaction.gesture_active());
        h.dispatch(DesktopAction::UpdateMove {
            pointer: PointerPosition { x: 225, y: 140 },
        })
        .unwrap();
        assert_eq!(
            (h.window(projects).rect.x, h.window(projects).rect.y),
            (125, 120)
        );

        h.dispatch(DesktopAction::UpdateMove {
            pointer: PointerPosition { x: -900, y: 5000 },
        })
        .unwrap();
        assert_eq!(
            (h.window(projects).rect.x, h.window(projects).rect.y),
            (0, 360)
        );

        h.dispatch(DesktopAction::EndMove).unwrap();
        assert!(!h.interaction.gesture_active());
    }

    #[test]
    fn resize_from_top_left_clamps_to_floor() {
        let mut h = Harness::new();
        let projects = h.open("projects");

        h.dispatch(DesktopAction::BeginResize {
            window_id: projects,
            edge: ResizeEdge::NorthWest,
            pointer: PointerPosition { x: 100, y: 80 },
        })
        .unwrap();
        h.dispatch(DesktopAction::UpdateResize {
            pointer: PointerPosition { x: 400, y: 400 },
        })
        .unwrap();

        assert_eq!(
            h.window(projects).rect,
            WindowRect {
                x: 262,
                y: 190,
                w: 350,
                h: 250,
            }
        );
    }

    #[test]
    fn press_on_window_raises_it_before_gesture() {
        let mut h = Harness::new();
        let projects = h.open("projects");
        h.open("contact");

        h.dispatch(DesktopAction::BeginResize {
            window_id: projects,
            edge: ResizeEdge::SouthEast,
            pointer: PointerPosition { x: 0, y: 0 },
        })
        .unwrap();

        assert_eq!(h.state.top_window_id(), Some(projects));
    }

    #[test]
    fn double_click_on_icon_opens_exactly_one_window() {
        let mut h = Harness::new();
        let click = DesktopAction::IconClick {
            window_type: WindowType::from("about"),
            viewport: VIEWPORT,
            launcher_anchor: Some(LAUNCHER),
        };

        let first = h.dispatch(click.clone()).unwrap();
        assert!(h.state.windows.is_empty());
        h.dispatch(click).unwrap();
        assert_eq!(h.state.windows.len(), 1);

        h.finish(first);
        assert_eq!(h.state.windows.len(), 1);
        assert!(!h.state.selection.click_pending());
    }

    #[test]
    fn single_icon_click_never_opens_a_window() {
        let mut h = Harness::new();
        let effects = h
            .dispatch(DesktopAction::IconClick {
                window_type: WindowType::from("about"),
                viewport: VIEWPORT,
                launcher_anchor: None,
            })
            .unwrap();

        h.finish(effects);
        assert!(h.state.windows.is_empty());
        assert_eq!(
            h.state.selection.selected(),
            Some(&WindowType::from("about"))
        );
    }

    #[test]
    fn enter_opens_selected_icon_and_pointer_down_elsewhere_clears_selection() {
        let mut h = Harness::new();
        h.dispatch(DesktopAction::ActivateSelectedIcon {
            viewport: VIEWPORT,
            launcher_anchor: None,
        })
        .unwrap();
        assert!(h.state.windows.is_empty());

        h.dispatch(DesktopAction::IconClick {
            window_type: WindowType::from("contact"),
            viewport: VIEWPORT,
            launcher_anchor: None,
        })
        .unwrap();
        h.dispatch(DesktopAction::ActivateSelectedIcon {
            viewport: VIEWPORT,
            launcher_anchor: None,
        })
        .unwrap();
        assert_eq!(h.state.windows.len(), 1);

        h.dispatch(DesktopAction::DesktopPointerDown { hit: None })
            .unwrap();
        assert_eq!(h.state.selection.selected(), None);
    }

    #[test]
    fn refresh_reloads_browser_windows_only() {
        let mut h = Harness::new();
        let about = h.open("about");
        let projects = h.open("projects");

        let effects = h
            .dispatch(DesktopAction::RefreshBrowser { window_id: about })
            .unwrap();
        assert_eq!(
            effects,
            vec![RuntimeEffect::ReloadContent {
                window_id: about,
                url: "https://pages.portfolio.dev/about".to_string(),
            }]
        );
        let WindowKind::Browser(nav) = &h.window(about).kind else {
            panic!("about is a browser window");
        };
        assert_eq!(nav.reload_count, 1);

        let effects = h
            .dispatch(DesktopAction::RefreshBrowser {
                window_id: projects,
            })
            .unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn browser_history_controls_stay_disabled_across_refreshes() {
        let mut h = Harness::new();
        let about = h.open("about");
        h.dispatch(DesktopAction::RefreshBrowser { window_id: about })
            .unwrap();
        h.dispatch(DesktopAction::RefreshBrowser { window_id: about })
            .unwrap();

        let WindowKind::Browser(nav) = &h.window(about).kind else {
            panic!("about is a browser window");
        };
        assert_eq!(
            nav,
            &BrowserNavState {
                url: "https://pages.portfolio.dev/about".to_string(),
                can_go_back: false,
                can_go_forward: false,
                reload_count: 2,
            }
        );
    }
}
