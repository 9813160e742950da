mod scroll;
mod web_app;

pub use scroll::{hide_element, install_smooth_scrolling, show_element, show_section};
pub use web_app::{DesktopEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
