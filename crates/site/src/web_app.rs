use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

use crate::scroll::install_smooth_scrolling;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    install_smooth_scrolling();

    view! {
        <Title text="Portfolio" />
        <Meta name="description" content="A desktop-style personal portfolio." />
        <Stylesheet id="desktop-shell-style" href="/style/desktop.css" />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
        </DesktopProvider>
    }
}
