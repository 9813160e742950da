//! Smooth in-page scrolling for fragment links, plus small visibility helpers.

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Element id named by a fragment link such as `#contact`. A bare `#` names nothing.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

#[cfg(target_arch = "wasm32")]
fn html_element_by_id(element_id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Makes every `a[href^="#"]` link scroll its target into view smoothly instead of jumping.
///
/// Clicks are handled by one delegated listener, so links rendered later are covered too.
/// Links whose target does not exist are left inert.
pub fn install_smooth_scrolling() {
    let listener = window_event_listener(ev::click, move |ev| {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(link) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .and_then(|el| el.closest("a[href^=\"#\"]").ok().flatten())
            else {
                return;
            };
            ev.prevent_default();
            if let Some(href) = link.get_attribute("href") {
                if let Some(target) = fragment_target(&href) {
                    show_section(target);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ev;
    });
    on_cleanup(move || listener.remove());
}

/// Smoothly scrolls the element with `section_id` into view. Returns whether it exists.
pub fn show_section(section_id: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(section) = html_element_by_id(section_id) else {
            return false;
        };
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = section_id;
        false
    }
}

fn set_display(element_id: &str, display: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = html_element_by_id(element_id) else {
            return false;
        };
        element.style().set_property("display", display).is_ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (element_id, display);
        false
    }
}

pub fn hide_element(element_id: &str) -> bool {
    set_display(element_id, "none")
}

pub fn show_element(element_id: &str) -> bool {
    set_display(element_id, "block")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fragment_links_name_their_target() {
        assert_eq!(fragment_target("#contact"), Some("contact"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("https://example.com/#top"), None);
    }

    #[test]
    fn helpers_report_missing_elements_off_the_browser() {
        assert!(!show_section("about"));
        assert!(!hide_element("about"));
        assert!(!show_element("about"));
    }
}
