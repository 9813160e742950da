//! Desktop shell UI composition and interaction surfaces.

mod icons;
mod taskbar;
mod window;

use leptos::*;

use self::{icons::DesktopIconGrid, taskbar::Taskbar, window::DesktopWindow};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
use crate::{
    host::{SHELL_ROOT_DOM_ID, WINDOW_LAYER_DOM_ID},
    model::{PointerPosition, ResizeEdge},
    reducer::DesktopAction,
    render_loop::{
        start_animation_loop, CssVariableScene, RenderLoop, SilentAnalysis, WebAudioAnalysis,
    },
};

#[component]
/// Renders the desktop: icons, the window layer and the taskbar.
pub fn DesktopShell(
    /// Analyser feeding the `--audio-*` shell variables. Without one the variables stay at rest.
    #[prop(optional)]
    analyser: Option<web_sys::AnalyserNode>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let enter_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Enter" {
            return;
        }
        if state.get_untracked().selection.selected().is_none() {
            return;
        }
        ev.prevent_default();
        let host = runtime.host.get_value();
        runtime.dispatch_action(DesktopAction::ActivateSelectedIcon {
            viewport: host.desktop_viewport_rect(),
            launcher_anchor: host.launcher_anchor(),
        });
    });
    on_cleanup(move || enter_listener.remove());

    install_desktop_pointer_hit_test(runtime);

    let scene = CssVariableScene::new(SHELL_ROOT_DOM_ID);
    let render_loop = match analyser {
        Some(node) => start_animation_loop(RenderLoop::new(WebAudioAnalysis::new(node), scene)),
        None => start_animation_loop(RenderLoop::new(SilentAnalysis, scene)),
    };
    on_cleanup(move || drop(render_loop));

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id=SHELL_ROOT_DOM_ID
            class="desktop-shell"
            tabindex="-1"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div
                id=WINDOW_LAYER_DOM_ID
                class=move || {
                    if runtime.interaction.get().gesture_active() {
                        "desktop-window-layer gesture-active"
                    } else {
                        "desktop-window-layer"
                    }
                }
            >
                <DesktopIconGrid />
                <For each=move || state.get().windows key=|win| win.id.0 let:win>
                    <DesktopWindow window_id=win.id />
                </For>
            </div>
            <Taskbar />
        </div>
    }
}

/// Deselects desktop icons on any press outside them.
///
/// The listener runs in the capture phase so window handlers that stop propagation still
/// report the press; the icon is resolved from the pointer coordinates at event time.
fn install_desktop_pointer_hit_test(runtime: DesktopRuntimeContext) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
            move |ev: web_sys::PointerEvent| {
                let hit = runtime
                    .host
                    .get_value()
                    .icon_under_pointer(ev.client_x(), ev.client_y());
                runtime.dispatch_action(DesktopAction::DesktopPointerDown { hit });
            },
        );
        if let Err(err) = window.add_event_listener_with_callback_and_bool(
            "pointerdown",
            callback.as_ref().unchecked_ref(),
            true,
        ) {
            logging::warn!("desktop pointer listener not installed: {err:?}");
            return;
        }
        on_cleanup(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback_and_bool(
                    "pointerdown",
                    callback.as_ref().unchecked_ref(),
                    true,
                );
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = runtime;
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}
