use std::time::Duration;

use leptos::{logging, set_timeout};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    model::{PointerPosition, WindowId, WindowRect, WindowType},
    reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext,
    timer::TimerToken,
};

#[cfg(target_arch = "wasm32")]
use super::{LAUNCHER_BUTTON_DOM_ID, WINDOW_LAYER_DOM_ID};

pub(super) fn start_timer(runtime: DesktopRuntimeContext, token: TimerToken, delay_ms: u32) {
    set_timeout(
        move || runtime.dispatch_action(DesktopAction::TimerElapsed(token)),
        Duration::from_millis(u64::from(delay_ms)),
    );
}

pub(super) fn reload_content(window_id: WindowId, url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(frame) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&window_id.frame_dom_id()))
            .and_then(|el| el.dyn_into::<web_sys::HtmlIFrameElement>().ok())
        else {
            logging::warn!("reload skipped: no frame for window {}", window_id.0);
            return;
        };
        frame.set_src(url);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        logging::log!("reload window {} -> {url}", window_id.0);
    }
}

#[cfg(target_arch = "wasm32")]
fn element_rect(dom_id: &str) -> Option<web_sys::DomRect> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(dom_id))
        .map(|el| el.get_bounding_client_rect())
}

pub(super) fn desktop_viewport_rect(taskbar_height_px: i32) -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(layer) = element_rect(WINDOW_LAYER_DOM_ID) {
            if layer.width() > 0.0 && layer.height() > 0.0 {
                return WindowRect {
                    x: 0,
                    y: 0,
                    w: layer.width() as i32,
                    h: layer.height() as i32,
                };
            }
        }

        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);

            return WindowRect {
                x: 0,
                y: 0,
                w: width.max(320),
                h: (height - taskbar_height_px).max(220),
            };
        }
    }

    WindowRect {
        x: 0,
        y: 0,
        w: 1024,
        h: 768 - taskbar_height_px,
    }
}

pub(super) fn launcher_anchor() -> Option<PointerPosition> {
    #[cfg(target_arch = "wasm32")]
    {
        let launcher = element_rect(LAUNCHER_BUTTON_DOM_ID)?;
        let (origin_x, origin_y) = element_rect(WINDOW_LAYER_DOM_ID)
            .map(|layer| (layer.left(), layer.top()))
            .unwrap_or((0.0, 0.0));
        Some(PointerPosition {
            x: (launcher.left() + launcher.width() / 2.0 - origin_x).round() as i32,
            y: (launcher.top() + launcher.height() / 2.0 - origin_y).round() as i32,
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub(super) fn icon_under_pointer(client_x: i32, client_y: i32) -> Option<WindowType> {
    #[cfg(target_arch = "wasm32")]
    {
        let document = web_sys::window().and_then(|w| w.document())?;
        let hit = document.element_from_point(client_x as f32, client_y as f32)?;
        let icon = hit.closest(".desktop-icon[data-window-type]").ok()??;
        icon.get_attribute("data-window-type").map(WindowType::from)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (client_x, client_y);
        None
    }
}
