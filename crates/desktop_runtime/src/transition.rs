//! Visual transition planning for window open/close/minimize/restore/maximize.
//!
//! Plans are pure data derived from a [`WindowRecord`]; the window view turns them into CSS
//! custom properties consumed by the shell stylesheet's keyframes.

use crate::{
    config::TimingConfig,
    model::{PointerPosition, WindowRecord, WindowTransition},
};

/// Scale applied at the launcher end of minimize/restore transitions.
pub const LAUNCHER_SCALE: f64 = 0.1;
/// Scale at the start of the entrance and the end of the close transition.
pub const OPEN_CLOSE_SCALE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformFrame {
    pub translate_x: i32,
    pub translate_y: i32,
    pub scale: f64,
    pub opacity: f64,
}

impl TransformFrame {
    pub const IDENTITY: TransformFrame = TransformFrame {
        translate_x: 0,
        translate_y: 0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionPlan {
    /// Keyframed transform/opacity animation.
    Keyframes {
        from: TransformFrame,
        to: TransformFrame,
        duration_ms: u32,
    },
    /// Animated change of left/top/width/height.
    Geometry { duration_ms: u32 },
}

/// Duration of the transition kind under the given timings.
pub fn transition_duration(transition: WindowTransition, timings: &TimingConfig) -> u32 {
    match transition {
        WindowTransition::Idle => 0,
        WindowTransition::Opening => timings.open_ms,
        WindowTransition::Minimizing { .. } => timings.minimize_ms,
        WindowTransition::Restoring { .. } => timings.restore_ms,
        WindowTransition::Maximizing | WindowTransition::Unmaximizing => timings.maximize_ms,
        WindowTransition::Closing => timings.close_ms,
    }
}

fn toward_anchor(window: &WindowRecord, anchor: PointerPosition) -> TransformFrame {
    let center = window.rect.center();
    TransformFrame {
        translate_x: anchor.x - center.x,
        translate_y: anchor.y - center.y,
        scale: LAUNCHER_SCALE,
        opacity: 0.0,
    }
}

/// Plans the animation the view should currently run for `window`, if any.
pub fn plan_transition(window: &WindowRecord, timings: &TimingConfig) -> Option<TransitionPlan> {
    let duration_ms = transition_duration(window.transition, timings);
    let faded = TransformFrame {
        scale: OPEN_CLOSE_SCALE,
        opacity: 0.0,
        ..TransformFrame::IDENTITY
    };
    let plan = match window.transition {
        WindowTransition::Idle => return None,
        WindowTransition::Opening => TransitionPlan::Keyframes {
            from: faded,
            to: TransformFrame::IDENTITY,
            duration_ms,
        },
        WindowTransition::Closing => TransitionPlan::Keyframes {
            from: TransformFrame::IDENTITY,
            to: faded,
            duration_ms,
        },
        WindowTransition::Minimizing { toward } => TransitionPlan::Keyframes {
            from: TransformFrame::IDENTITY,
            to: toward_anchor(window, toward),
            duration_ms,
        },
        WindowTransition::Restoring { from } => TransitionPlan::Keyframes {
            from: toward_anchor(window, from),
            to: TransformFrame::IDENTITY,
            duration_ms,
        },
        WindowTransition::Maximizing | WindowTransition::Unmaximizing => {
            TransitionPlan::Geometry { duration_ms }
        }
    };
    Some(plan)
}

/// Inline style fragment driving the shell keyframes for `plan`.
///
/// The keyframe name alternates with the transition generation so that a superseding
/// transition restarts the CSS animation instead of continuing the previous one.
pub fn transition_style(plan: &TransitionPlan, generation: u64) -> String {
    match plan {
        TransitionPlan::Keyframes {
            from,
            to,
            duration_ms,
        } => format!(
            "--from-transform:{};--from-opacity:{};--to-transform:{};--to-opacity:{};\
animation:window-transition-{} {}ms ease-out forwards;",
            from.css_transform(),
            from.opacity,
            to.css_transform(),
            to.opacity,
            generation % 2,
            duration_ms
        ),
        TransitionPlan::Geometry { duration_ms } => format!(
            "transition:left {0}ms ease,top {0}ms ease,width {0}ms ease,height {0}ms ease;",
            duration_ms
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{WindowId, WindowKind, WindowRect, WindowType},
        timer::CancellableTimer,
    };

    fn window(transition: WindowTransition) -> WindowRecord {
        WindowRecord {
            id: WindowId(1),
            window_type: WindowType::from("projects"),
            title: "Projects".to_string(),
            kind: WindowKind::Basic,
            content_url: "https://pages.portfolio.dev/projects".to_string(),
            rect: WindowRect {
                x: 100,
                y: 80,
                w: 400,
                h: 300,
            },
            restore_rect: None,
            restore_anchor: None,
            z_index: 1,
            minimized: false,
            maximized: false,
            transition,
            transition_timer: CancellableTimer::default(),
        }
    }

    #[test]
    fn idle_windows_have_no_plan() {
        assert_eq!(
            plan_transition(&window(WindowTransition::Idle), &TimingConfig::default()),
            None
        );
    }

    #[test]
    fn entrance_scales_up_and_fades_in() {
        let plan = plan_transition(&window(WindowTransition::Opening), &TimingConfig::default());
        assert_eq!(
            plan,
            Some(TransitionPlan::Keyframes {
                from: TransformFrame {
                    translate_x: 0,
                    translate_y: 0,
                    scale: 0.8,
                    opacity: 0.0,
                },
                to: TransformFrame::IDENTITY,
                duration_ms: 300,
            })
        );
    }

    #[test]
    fn minimize_travels_from_window_center_to_launcher() {
        let toward = PointerPosition { x: 20, y: 700 };
        let plan = plan_transition(
            &window(WindowTransition::Minimizing { toward }),
            &TimingConfig::default(),
        );
        let Some(TransitionPlan::Keyframes { to, .. }) = plan else {
            panic!("minimize uses keyframes");
        };
        assert_eq!((to.translate_x, to.translate_y), (20 - 300, 700 - 230));
        assert_eq!(to.scale, LAUNCHER_SCALE);
        assert_eq!(to.opacity, 0.0);
    }

    #[test]
    fn maximize_animates_geometry() {
        let plan = plan_transition(&window(WindowTransition::Maximizing), &TimingConfig::default());
        assert_eq!(plan, Some(TransitionPlan::Geometry { duration_ms: 250 }));
    }

    #[test]
    fn keyframe_name_alternates_with_generation() {
        let plan = TransitionPlan::Keyframes {
            from: TransformFrame::IDENTITY,
            to: TransformFrame::IDENTITY,
            duration_ms: 200,
        };
        assert!(transition_style(&plan, 3).contains("window-transition-1 200ms"));
        assert!(transition_style(&plan, 4).contains("window-transition-0 200ms"));
    }
}
