use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timings {
    click_disambiguation_ms: u32,
    control_debounce_ms: u32,
    open_ms: u32,
    close_ms: u32,
    minimize_ms: u32,
    restore_ms: u32,
    maximize_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SizePolicy {
    width_fraction: f64,
    min_width: i32,
    max_width: i32,
    height_fraction: f64,
    min_height: i32,
    max_height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Layout {
    origin_x: i32,
    origin_y: i32,
    cascade_step: i32,
    min_width: i32,
    min_height: i32,
    basic: SizePolicy,
    browser: SizePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowEntry {
    window_type: String,
    title: String,
    kind: String,
    icon: String,
    show_on_desktop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopManifest {
    schema_version: u32,
    content_base_url: String,
    timings: Timings,
    layout: Layout,
    windows: Vec<WindowEntry>,
}

fn check_size_policy(name: &str, policy: &SizePolicy) {
    if !(0.0..=1.0).contains(&policy.width_fraction)
        || !(0.0..=1.0).contains(&policy.height_fraction)
    {
        panic!("layout.{name}: fractions must be within 0..=1");
    }
    if policy.min_width > policy.max_width || policy.min_height > policy.max_height {
        panic!("layout.{name}: min size exceeds max size");
    }
}

fn validate(manifest: &DesktopManifest) {
    if manifest.schema_version != 1 {
        panic!(
            "desktop manifest schema mismatch: expected 1 found {}",
            manifest.schema_version
        );
    }

    let t = &manifest.timings;
    for (name, value) in [
        ("control_debounce_ms", t.control_debounce_ms),
        ("open_ms", t.open_ms),
        ("close_ms", t.close_ms),
        ("minimize_ms", t.minimize_ms),
        ("restore_ms", t.restore_ms),
        ("maximize_ms", t.maximize_ms),
    ] {
        if !(50..=1000).contains(&value) {
            panic!("timings.{name} must be within 50..=1000 ms, found {value}");
        }
    }
    if t.click_disambiguation_ms == 0 {
        panic!("timings.click_disambiguation_ms must be positive");
    }

    if manifest.layout.min_width <= 0 || manifest.layout.min_height <= 0 {
        panic!("layout minimum window size must be positive");
    }
    check_size_policy("basic", &manifest.layout.basic);
    check_size_policy("browser", &manifest.layout.browser);

    let mut seen = HashSet::new();
    for entry in &manifest.windows {
        if entry.window_type.trim().is_empty() {
            panic!("window entry with empty window_type");
        }
        if !seen.insert(entry.window_type.as_str()) {
            panic!("duplicate window_type `{}`", entry.window_type);
        }
        if entry.kind != "basic" && entry.kind != "browser" {
            panic!(
                "window `{}` has unknown kind `{}` (expected basic or browser)",
                entry.window_type, entry.kind
            );
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DesktopManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&manifest);

    let json = serde_json::to_string_pretty(&manifest).expect("serialize desktop manifest");
    let generated = format!(
        "/// Build-time generated desktop configuration JSON.\n\
pub const DESKTOP_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
