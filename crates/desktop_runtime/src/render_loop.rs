//! Per-frame audio-reactive render loop.
//!
//! The loop pulls samples from an [`AudioAnalysisSource`], reduces them to an [`AudioFrame`] and
//! hands the frame to a [`VisualScene`]. It is driven by `requestAnimationFrame` and owns no
//! desktop state, so window operations cannot stall or restart it.

#[cfg(target_arch = "wasm32")]
use leptos::logging;

/// Weight of the previous frame in the exponential smoothing of levels and bands.
pub const SMOOTHING: f32 = 0.8;

/// Source of analyser samples (a Web Audio `AnalyserNode` in the browser).
pub trait AudioAnalysisSource {
    /// Number of frequency bins produced per sample.
    fn bin_count(&self) -> usize;
    /// Fills `out` with byte frequency magnitudes.
    fn frequency_data(&mut self, out: &mut [u8]);
    /// Fills `out` with byte time-domain samples centered on 128.
    fn time_domain_data(&mut self, out: &mut [u8]);
}

/// Consumer of per-frame audio scalars.
pub trait VisualScene {
    fn render_frame(&mut self, frame: &AudioFrame);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioFrame {
    /// Seconds since the first tick.
    pub time_s: f64,
    pub level: f32,
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    /// Largest deviation from silence in the current waveform, `0..=1`.
    pub waveform_peak: f32,
}

fn band_average(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| u32::from(b)).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

fn waveform_peak(samples: &[u8]) -> f32 {
    samples
        .iter()
        .map(|&s| (i32::from(s) - 128).unsigned_abs() as f32 / 128.0)
        .fold(0.0, f32::max)
        .min(1.0)
}

fn smooth(previous: f32, current: f32) -> f32 {
    previous * SMOOTHING + current * (1.0 - SMOOTHING)
}

pub struct RenderLoop<A, S> {
    analysis: A,
    scene: S,
    frequency: Vec<u8>,
    waveform: Vec<u8>,
    started_at_ms: Option<f64>,
    last: AudioFrame,
}

impl<A: AudioAnalysisSource, S: VisualScene> RenderLoop<A, S> {
    pub fn new(analysis: A, scene: S) -> Self {
        Self {
            analysis,
            scene,
            frequency: Vec::new(),
            waveform: Vec::new(),
            started_at_ms: None,
            last: AudioFrame::default(),
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Reads the current samples and writes the resulting frame into the scene.
    pub fn tick(&mut self, timestamp_ms: f64) -> AudioFrame {
        let bins = self.analysis.bin_count();
        self.frequency.resize(bins, 0);
        self.waveform.resize(bins * 2, 128);
        self.analysis.frequency_data(&mut self.frequency);
        self.analysis.time_domain_data(&mut self.waveform);

        let started_at = *self.started_at_ms.get_or_insert(timestamp_ms);
        let quarter = bins / 4;
        let half = bins / 2;
        let frame = AudioFrame {
            time_s: (timestamp_ms - started_at).max(0.0) / 1000.0,
            level: smooth(self.last.level, band_average(&self.frequency)),
            bass: smooth(self.last.bass, band_average(&self.frequency[..quarter])),
            mid: smooth(self.last.mid, band_average(&self.frequency[quarter..half])),
            treble: smooth(self.last.treble, band_average(&self.frequency[half..])),
            waveform_peak: waveform_peak(&self.waveform),
        };
        self.scene.render_frame(&frame);
        self.last = frame;
        frame
    }
}

/// Analysis source used when no audio graph is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnalysis;

impl AudioAnalysisSource for SilentAnalysis {
    fn bin_count(&self) -> usize {
        0
    }

    fn frequency_data(&mut self, out: &mut [u8]) {
        out.fill(0);
    }

    fn time_domain_data(&mut self, out: &mut [u8]) {
        out.fill(128);
    }
}

/// Reads samples from a Web Audio analyser node.
///
/// Only sampled from the browser frame clock; the native loop never ticks.
pub struct WebAudioAnalysis {
    node: web_sys::AnalyserNode,
}

impl WebAudioAnalysis {
    pub fn new(node: web_sys::AnalyserNode) -> Self {
        Self { node }
    }
}

impl AudioAnalysisSource for WebAudioAnalysis {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn frequency_data(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }

    fn time_domain_data(&mut self, out: &mut [u8]) {
        self.node.get_byte_time_domain_data(out);
    }
}

/// Publishes frame scalars as CSS custom properties on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariableScene {
    element_id: String,
}

impl CssVariableScene {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn declarations(frame: &AudioFrame) -> [(&'static str, String); 4] {
        [
            ("--audio-level", format!("{:.3}", frame.level)),
            ("--audio-bass", format!("{:.3}", frame.bass)),
            ("--audio-mid", format!("{:.3}", frame.mid)),
            ("--audio-treble", format!("{:.3}", frame.treble)),
        ]
    }
}

impl VisualScene for CssVariableScene {
    fn render_frame(&mut self, frame: &AudioFrame) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let Some(element) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(&self.element_id))
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                return;
            };
            let style = element.style();
            for (name, value) in Self::declarations(frame) {
                let _ = style.set_property(name, &value);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = frame;
    }
}

#[cfg(target_arch = "wasm32")]
struct LoopState {
    callback: std::cell::RefCell<Option<wasm_bindgen::closure::Closure<dyn FnMut(f64)>>>,
    frame_id: std::cell::Cell<Option<i32>>,
    stopped: std::cell::Cell<bool>,
}

#[cfg(target_arch = "wasm32")]
impl LoopState {
    fn schedule(&self, window: &web_sys::Window) {
        use wasm_bindgen::JsCast;

        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id.set(Some(id)),
            Err(err) => logging::warn!("render loop frame request failed: {err:?}"),
        }
    }
}

/// Keeps an animation loop alive. Dropping the handle stops the loop.
pub struct AnimationLoopHandle {
    #[cfg(target_arch = "wasm32")]
    state: Option<std::rc::Rc<LoopState>>,
}

impl AnimationLoopHandle {
    fn inert() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            state: None,
        }
    }

    pub fn is_running(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.state.as_ref().is_some_and(|s| !s.stopped.get())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    pub fn stop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(state) = self.state.take() {
                state.stopped.set(true);
                if let (Some(id), Some(window)) = (state.frame_id.take(), web_sys::window()) {
                    let _ = window.cancel_animation_frame(id);
                }
                state.callback.borrow_mut().take();
            }
        }
    }
}

impl Drop for AnimationLoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drives `render_loop` from `requestAnimationFrame` until the returned handle is dropped.
///
/// Outside the browser there is no frame clock and the returned handle is inert.
pub fn start_animation_loop<A, S>(render_loop: RenderLoop<A, S>) -> AnimationLoopHandle
where
    A: AudioAnalysisSource + 'static,
    S: VisualScene + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        use std::{
            cell::{Cell, RefCell},
            rc::Rc,
        };
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            logging::warn!("render loop not started: no window");
            return AnimationLoopHandle::inert();
        };

        let state = Rc::new(LoopState {
            callback: RefCell::new(None),
            frame_id: Cell::new(None),
            stopped: Cell::new(false),
        });
        let weak = Rc::downgrade(&state);
        let frame_window = window.clone();
        let mut render_loop = render_loop;
        *state.callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if state.stopped.get() {
                return;
            }
            render_loop.tick(timestamp);
            state.schedule(&frame_window);
        }) as Box<dyn FnMut(f64)>));
        state.schedule(&window);
        logging::log!("render loop started");

        AnimationLoopHandle { state: Some(state) }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        drop(render_loop);
        AnimationLoopHandle::inert()
    }
}
