use super::*;
use crate::{model::WindowType, selection::DesktopIcon};

#[component]
pub(super) fn DesktopIconGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div class="desktop-icons" role="listbox" aria-label="Desktop">
            <For
                each=move || state.get().selection.icons().to_vec()
                key=|icon| icon.window_type.to_string()
                let:icon
            >
                <DesktopIconButton icon=icon />
            </For>
        </div>
    }
}

#[component]
fn DesktopIconButton(icon: DesktopIcon) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_type: WindowType = icon.window_type.clone();
    let selected = {
        let window_type = window_type.clone();
        Signal::derive(move || runtime.state.get().selection.selected() == Some(&window_type))
    };

    // Double-clicks are recognised by the reducer from two clicks inside the click timer.
    let on_click = {
        let window_type = window_type.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let host = runtime.host.get_value();
            runtime.dispatch_action(DesktopAction::IconClick {
                window_type: window_type.clone(),
                viewport: host.desktop_viewport_rect(),
                launcher_anchor: host.launcher_anchor(),
            });
        }
    };

    view! {
        <button
            id=icon.dom_id()
            class=move || if selected.get() { "desktop-icon selected" } else { "desktop-icon" }
            role="option"
            aria-selected=move || selected.get().to_string()
            data-window-type=window_type.to_string()
            on:click=on_click
        >
            <img class="desktop-icon-image" src=icon.image.clone() alt="" draggable="false" />
            <span class="desktop-icon-label">{icon.label.clone()}</span>
        </button>
    }
}
