use super::*;
use crate::{
    config::TimingConfig,
    model::{BrowserNavState, WindowId, WindowKind, WindowRecord},
    reducer::WindowControl,
    transition::{plan_transition, transition_style},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_style(win: &WindowRecord, timings: &TimingConfig) -> String {
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
    );
    if let Some(plan) = plan_transition(win, timings) {
        style.push_str(&transition_style(&plan, win.transition_timer.generation()));
    }
    if win.is_hidden() {
        style.push_str("display:none;");
    }
    style
}

/// Class of the layer laid over the embedded page.
///
/// Presses inside an iframe never reach the window element, so background windows and active
/// gestures keep the page covered. A press on the layer bubbles to the window and raises it.
fn content_shield_class(active: bool, gesture_active: bool) -> &'static str {
    if !active || gesture_active {
        "window-content-shield engaged"
    } else {
        "window-content-shield"
    }
}

fn window_class(win: &WindowRecord, active: bool) -> String {
    let mut class = String::from("desktop-window");
    for (flag, name) in [
        (active, " active"),
        (win.minimized, " minimized"),
        (win.maximized, " maximized"),
        (win.is_browser(), " browser"),
        (win.is_closing(), " closing"),
    ] {
        if flag {
            class.push_str(name);
        }
    }
    class
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let window = Signal::derive(move || {
        state
            .get()
            .windows
            .into_iter()
            .find(|w| w.id == window_id)
    });
    let is_active = Signal::derive(move || state.get().top_window_id() == Some(window_id));

    // Content is mounted once per window so state changes never reload the embedded page.
    let Some(initial) = state.get_untracked().window(window_id).cloned() else {
        return ().into_view();
    };

    let focus = move |_| {
        if !is_active.get_untracked() {
            runtime.dispatch_action(DesktopAction::BringToFront { window_id });
        }
    };
    let control = move |control: WindowControl| {
        let host = runtime.host.get_value();
        runtime.dispatch_action(DesktopAction::ControlButton {
            window_id,
            control,
            viewport: host.desktop_viewport_rect(),
            launcher_anchor: host.launcher_anchor(),
        });
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
            bounds: runtime.host.get_value().desktop_viewport_rect(),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::TitlebarDoubleClick {
            window_id,
            viewport: runtime.host.get_value().desktop_viewport_rect(),
        });
    };

    let control_button = move |kind: WindowControl, label: Signal<&'static str>, glyph| {
        view! {
            <button
                class="titlebar-control"
                aria-label=label
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                }
                on:mousedown=move |ev| stop_mouse_event(&ev)
                on:dblclick=move |ev| stop_mouse_event(&ev)
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    control(kind);
                }
            >
                {glyph}
            </button>
        }
    };
    let maximize_label = Signal::derive(move || {
        if window.get().map(|w| w.maximized).unwrap_or(false) {
            "Restore window"
        } else {
            "Maximize window"
        }
    });

    let nav_bar = initial.is_browser().then(|| view! { <BrowserNavBar window_id=window_id /> });

    view! {
        <section
            class=move || {
                window
                    .get()
                    .map(|w| window_class(&w, is_active.get()))
                    .unwrap_or_default()
            }
            style=move || {
                window
                    .get()
                    .map(|w| runtime.config.with_value(|c| window_style(&w, &c.timings)))
                    .unwrap_or_default()
            }
            on:pointerdown=focus
            role="dialog"
            aria-label=initial.title.clone()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <span class="titlebar-title">{initial.title.clone()}</span>
                <div class="titlebar-controls">
                    {control_button(
                        WindowControl::Minimize,
                        Signal::derive(|| "Minimize window"),
                        "_",
                    )}
                    {control_button(WindowControl::Maximize, maximize_label, "□")}
                    {control_button(WindowControl::Close, Signal::derive(|| "Close window"), "×")}
                </div>
            </header>
            {nav_bar}
            <div class="window-body">
                <iframe
                    id=initial.iframe_dom_id()
                    class="window-frame"
                    src=initial.content_url.clone()
                    title=initial.title.clone()
                ></iframe>
                <div
                    class=move || {
                        let gesture_active = runtime.interaction.get().gesture_active();
                        content_shield_class(is_active.get(), gesture_active)
                    }
                    aria-hidden="true"
                ></div>
            </div>
            <Show
                when=move || window.get().map(|w| !w.maximized).unwrap_or(false)
                fallback=|| ()
            >
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn BrowserNavBar(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let nav = Signal::derive(move || {
        runtime
            .state
            .get()
            .window(window_id)
            .and_then(|w| match &w.kind {
                WindowKind::Browser(nav) => Some(nav.clone()),
                WindowKind::Basic => None,
            })
            .unwrap_or_else(|| BrowserNavState::new(String::new()))
    });

    view! {
        <div class="browser-nav" on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()>
            // History is not observable across origins; see `BrowserNavState`.
            <button
                class="browser-nav-button"
                aria-label="Back"
                disabled=move || !nav.get().can_go_back
            >
                "‹"
            </button>
            <button
                class="browser-nav-button"
                aria-label="Forward"
                disabled=move || !nav.get().can_go_forward
            >
                "›"
            </button>
            <button
                class="browser-nav-button"
                aria-label="Refresh"
                on:click=move |_| runtime.dispatch_action(DesktopAction::RefreshBrowser { window_id })
            >
                "⟳"
            </button>
            <input
                class="browser-address"
                type="text"
                readonly=true
                aria-label="Address"
                prop:value=move || nav.get().url
            />
        </div>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{WindowRect, WindowTransition, WindowType},
        timer::CancellableTimer,
    };

    fn record() -> WindowRecord {
        WindowRecord {
            id: WindowId(3),
            window_type: WindowType::from("about"),
            title: "About".to_string(),
            kind: WindowKind::Browser(BrowserNavState::new(
                "https://pages.portfolio.dev/about".to_string(),
            )),
            content_url: "https://pages.portfolio.dev/about".to_string(),
            rect: WindowRect {
                x: 100,
                y: 80,
                w: 500,
                h: 400,
            },
            restore_rect: None,
            restore_anchor: None,
            z_index: 2,
            minimized: false,
            maximized: false,
            transition: WindowTransition::Idle,
            transition_timer: CancellableTimer::default(),
        }
    }

    #[test]
    fn background_windows_cover_their_content() {
        assert_eq!(
            content_shield_class(false, false),
            "window-content-shield engaged"
        );
        assert_eq!(content_shield_class(true, false), "window-content-shield");
    }

    #[test]
    fn gestures_cover_content_of_the_active_window() {
        assert_eq!(
            content_shield_class(true, true),
            "window-content-shield engaged"
        );
    }

    #[test]
    fn window_class_reflects_flags() {
        let mut win = record();
        assert_eq!(window_class(&win, true), "desktop-window active browser");

        win.maximized = true;
        assert_eq!(window_class(&win, false), "desktop-window maximized browser");
    }

    #[test]
    fn hidden_windows_are_not_displayed() {
        let mut win = record();
        let style = window_style(&win, &TimingConfig::default());
        assert_eq!(
            style,
            "left:100px;top:80px;width:500px;height:400px;z-index:2;"
        );

        win.minimized = true;
        assert!(window_style(&win, &TimingConfig::default()).ends_with("display:none;"));
    }
}
