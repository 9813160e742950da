//! Desktop-metaphor window manager for the portfolio site.
//!
//! State lives in [`model::DesktopState`] and changes only through [`reduce_desktop`]; the
//! Leptos components in [`components`] project it into the DOM and turn browser input into
//! [`DesktopAction`] values.

pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
pub mod render_loop;
mod runtime_context;
pub mod selection;
pub mod taskbar;
pub mod timer;
pub mod transition;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, DesktopConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect, WindowControl};
pub use timer::{CancellableTimer, TimerToken};
