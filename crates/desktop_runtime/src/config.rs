//! Desktop configuration: window catalog, timings, and layout policy.
//!
//! The shipped values come from `desktop.toml`, validated by `build.rs` and embedded as JSON.

use leptos::logging;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{WindowKind, WindowRect, WindowType};

include!(concat!(env!("OUT_DIR"), "/desktop_config_generated.rs"));

/// Window type rendered as a browser window when the catalog has no entry for it.
pub const BROWSER_WINDOW_TYPE: &str = "about";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while loading the desktop configuration.
pub enum ConfigError {
    /// The embedded JSON payload did not match the configuration schema.
    #[error("desktop config parse failed: {0}")]
    Parse(String),
    /// The payload parsed but carried an unsupported schema version.
    #[error("unsupported desktop config schema version {0}")]
    SchemaVersion(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Catalog-level window kind.
pub enum CatalogWindowKind {
    /// Plain window embedding its page.
    Basic,
    /// Window with a navigation bar above the embedded page.
    Browser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One desktop shortcut / window type.
pub struct WindowCatalogEntry {
    pub window_type: String,
    pub title: String,
    pub kind: CatalogWindowKind,
    pub icon: String,
    pub show_on_desktop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
/// Durations (milliseconds) for timers and window transitions.
pub struct TimingConfig {
    pub click_disambiguation_ms: u32,
    pub control_debounce_ms: u32,
    pub open_ms: u32,
    pub close_ms: u32,
    pub minimize_ms: u32,
    pub restore_ms: u32,
    pub maximize_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            click_disambiguation_ms: 300,
            control_debounce_ms: 100,
            open_ms: 300,
            close_ms: 200,
            minimize_ms: 300,
            restore_ms: 300,
            maximize_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
/// Initial window size as a clamped fraction of the desktop viewport.
pub struct SizePolicy {
    pub width_fraction: f64,
    pub min_width: i32,
    pub max_width: i32,
    pub height_fraction: f64,
    pub min_height: i32,
    pub max_height: i32,
}

impl SizePolicy {
    /// Returns `(width, height)` for a viewport of `viewport_w × viewport_h`.
    pub fn initial_size(&self, viewport_w: i32, viewport_h: i32) -> (i32, i32) {
        let w = (f64::from(viewport_w) * self.width_fraction).round() as i32;
        let h = (f64::from(viewport_h) * self.height_fraction).round() as i32;
        (
            w.clamp(self.min_width, self.max_width),
            h.clamp(self.min_height, self.max_height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
/// Placement and sizing rules for new windows.
pub struct LayoutConfig {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cascade_step: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub basic: SizePolicy,
    pub browser: SizePolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100,
            origin_y: 80,
            cascade_step: 30,
            min_width: 350,
            min_height: 250,
            basic: SizePolicy {
                width_fraction: 0.4,
                min_width: 350,
                max_width: 600,
                height_fraction: 0.5,
                min_height: 250,
                max_height: 400,
            },
            browser: SizePolicy {
                width_fraction: 0.6,
                min_width: 500,
                max_width: 800,
                height_fraction: 0.7,
                min_height: 400,
                max_height: 600,
            },
        }
    }
}

impl LayoutConfig {
    /// Computes the initial rect for the `open_count + 1`-th window of the given kind.
    pub fn initial_rect(
        &self,
        kind: CatalogWindowKind,
        viewport: WindowRect,
        open_count: usize,
    ) -> WindowRect {
        let policy = match kind {
            CatalogWindowKind::Basic => &self.basic,
            CatalogWindowKind::Browser => &self.browser,
        };
        let (w, h) = policy.initial_size(viewport.w, viewport.h);
        let offset = self.cascade_step * open_count as i32;
        WindowRect {
            x: self.origin_x + offset,
            y: self.origin_y + offset,
            w,
            h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Full desktop configuration.
pub struct DesktopConfig {
    pub schema_version: u32,
    pub content_base_url: String,
    pub timings: TimingConfig,
    pub layout: LayoutConfig,
    pub windows: Vec<WindowCatalogEntry>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        let entry = |window_type: &str, title: &str, kind| WindowCatalogEntry {
            window_type: window_type.to_string(),
            title: title.to_string(),
            kind,
            icon: format!("icons/{window_type}.png"),
            show_on_desktop: true,
        };
        Self {
            schema_version: 1,
            content_base_url: "https://pages.portfolio.dev".to_string(),
            timings: TimingConfig::default(),
            layout: LayoutConfig::default(),
            windows: vec![
                entry("about", "About Me", CatalogWindowKind::Browser),
                entry("projects", "Projects", CatalogWindowKind::Basic),
                entry("experience", "Experience", CatalogWindowKind::Basic),
                entry("music", "Music Player", CatalogWindowKind::Basic),
                entry("contact", "Contact", CatalogWindowKind::Basic),
            ],
        }
    }
}

/// Resolved presentation for one window type.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPresentation {
    pub title: String,
    pub catalog_kind: CatalogWindowKind,
    pub content_url: String,
}

impl DesktopConfig {
    /// Parses a configuration JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the payload is malformed or uses another schema version.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if config.schema_version != 1 {
            return Err(ConfigError::SchemaVersion(config.schema_version));
        }
        Ok(config)
    }

    /// Loads the build-time embedded configuration, falling back to defaults on error.
    pub fn load() -> Self {
        match Self::from_json(DESKTOP_CONFIG_JSON) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("{err}; using built-in desktop defaults");
                Self::default()
            }
        }
    }

    /// Looks up the catalog entry for a window type.
    pub fn catalog_entry(&self, window_type: &WindowType) -> Option<&WindowCatalogEntry> {
        self.windows
            .iter()
            .find(|entry| entry.window_type == window_type.as_str())
    }

    /// Returns the remote page embedded by windows of this type.
    pub fn content_url(&self, window_type: &WindowType) -> String {
        format!(
            "{}/{}",
            self.content_base_url.trim_end_matches('/'),
            window_type.as_str()
        )
    }

    /// Resolves title, kind, and content URL; unknown types fall back to an uppercased title.
    pub fn presentation(&self, window_type: &WindowType) -> WindowPresentation {
        let (title, catalog_kind) = match self.catalog_entry(window_type) {
            Some(entry) => (entry.title.clone(), entry.kind),
            None if window_type.as_str() == BROWSER_WINDOW_TYPE => (
                window_type.as_str().to_uppercase(),
                CatalogWindowKind::Browser,
            ),
            None => (
                window_type.as_str().to_uppercase(),
                CatalogWindowKind::Basic,
            ),
        };
        WindowPresentation {
            title,
            catalog_kind,
            content_url: self.content_url(window_type),
        }
    }

    /// Builds the runtime [`WindowKind`] for a resolved presentation.
    pub fn window_kind(&self, presentation: &WindowPresentation) -> WindowKind {
        match presentation.catalog_kind {
            CatalogWindowKind::Basic => WindowKind::Basic,
            CatalogWindowKind::Browser => {
                WindowKind::Browser(crate::model::BrowserNavState::new(
                    presentation.content_url.clone(),
                ))
            }
        }
    }
}
