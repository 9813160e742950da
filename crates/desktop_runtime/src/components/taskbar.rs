use super::*;
use crate::{host::LAUNCHER_BUTTON_DOM_ID, model::WindowId, taskbar::TaskbarButtonState};

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button id=LAUNCHER_BUTTON_DOM_ID class="taskbar-launcher" aria-label="Start">
                <span class="taskbar-launcher-glyph" aria-hidden="true"></span>
            </button>
            <div class="taskbar-windows">
                <For
                    each=move || state.get().taskbar.buttons().to_vec()
                    key=|button| button.window_id.0
                    let:button
                >
                    <TaskbarWindowButton window_id=button.window_id label=button.label />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(window_id: WindowId, label: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let button_state = Signal::derive(move || {
        runtime
            .state
            .get()
            .taskbar
            .button(window_id)
            .map(|button| button.state)
            .unwrap_or(TaskbarButtonState::Inactive)
    });

    view! {
        <button
            id=format!("taskbar-window-button-{}", window_id.0)
            class=move || {
                let state_class = button_state.get().css_class();
                if state_class.is_empty() {
                    "taskbar-button".to_string()
                } else {
                    format!("taskbar-button {state_class}")
                }
            }
            aria-pressed=move || (button_state.get() == TaskbarButtonState::Active).to_string()
            on:click=move |_| {
                runtime.dispatch_action(DesktopAction::TaskbarClick {
                    window_id,
                    launcher_anchor: runtime.host.get_value().launcher_anchor(),
                });
            }
        >
            {label}
        </button>
    }
}
