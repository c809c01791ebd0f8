//! Tween descriptions handed to the animation engine.
//!
//! These are plain serde structs; `page::engines` serializes them to the engine's
//! vars object and attaches DOM targets and callbacks.

use serde::Serialize;

pub const POWER2_OUT: &str = "power2.out";
pub const POWER2_IN: &str = "power2.in";
pub const POWER3_OUT: &str = "power3.out";
pub const BACK_OUT: &str = "back.out(1.7)";
pub const SINE_IN_OUT: &str = "sine.inOut";

/// Play on enter, reverse when scrolled back above the start line.
pub const REPLAY_ON_REENTRY: &str = "play none none reverse";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweenVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<&'static str>,
    /// `-1` repeats forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yoyo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_trigger: Option<TriggerSpec>,
}

impl TweenVars {
    pub fn over(duration: f64, ease: &'static str) -> Self {
        Self {
            duration,
            ease: Some(ease),
            ..Self::default()
        }
    }
}

/// Scroll-linked trigger. The trigger element is attached at call time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSpec {
    /// e.g. `"top 80%"`: fire when the element top reaches 80% of the viewport.
    pub start: String,
    pub toggle_actions: &'static str,
}

impl TriggerSpec {
    pub fn at_viewport_percent(percent: u32) -> Self {
        Self {
            start: format!("top {percent}%"),
            toggle_actions: REPLAY_ON_REENTRY,
        }
    }
}

/// Position parameter for timeline steps, e.g. `"-=0.4"` to overlap.
pub fn overlap(seconds: f64) -> String {
    format!("-={seconds}")
}

// --- Entrance animations -----------------------------------------------------

/// Parse a skill bar's `data-width` into a percentage in `0..=100`.
pub fn skill_target(data_width: Option<&str>) -> Option<f64> {
    let value: f64 = data_width?.trim().trim_end_matches('%').parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

pub fn skill_bar(target_percent: f64) -> TweenVars {
    TweenVars {
        width: Some(format!("{target_percent}%")),
        scroll_trigger: Some(TriggerSpec::at_viewport_percent(80)),
        ..TweenVars::over(1.5, POWER2_OUT)
    }
}

/// Timeline items slide in from the left on even positions, right on odd.
pub fn timeline_offset(index: usize) -> f64 {
    if index % 2 == 0 { -100.0 } else { 100.0 }
}

pub fn timeline_item(index: usize) -> TweenVars {
    TweenVars {
        x: Some(timeline_offset(index)),
        opacity: Some(0.0),
        scroll_trigger: Some(TriggerSpec::at_viewport_percent(80)),
        ..TweenVars::over(0.8, POWER2_OUT)
    }
}

pub fn stagger_delay(index: usize, step: f64) -> f64 {
    index as f64 * step
}

pub fn project_card(index: usize) -> TweenVars {
    TweenVars {
        y: Some(100.0),
        opacity: Some(0.0),
        delay: Some(stagger_delay(index, 0.1)),
        scroll_trigger: Some(TriggerSpec::at_viewport_percent(85)),
        ..TweenVars::over(0.8, POWER2_OUT)
    }
}

pub fn interest_card(index: usize) -> TweenVars {
    TweenVars {
        scale: Some(0.5),
        rotation: Some(45.0),
        opacity: Some(0.0),
        delay: Some(stagger_delay(index, 0.1)),
        scroll_trigger: Some(TriggerSpec::at_viewport_percent(80)),
        ..TweenVars::over(0.6, BACK_OUT)
    }
}

/// One step of the hero entrance timeline.
#[derive(Clone, Debug)]
pub struct HeroStep {
    pub selector: &'static str,
    pub vars: TweenVars,
    /// `None` appends at the end of the timeline.
    pub position: Option<String>,
}

pub fn hero_timeline() -> Vec<HeroStep> {
    let from = |y: Option<f64>, x: Option<f64>, duration, ease| TweenVars {
        x,
        y,
        opacity: Some(0.0),
        ..TweenVars::over(duration, ease)
    };
    vec![
        HeroStep {
            selector: "#navbar",
            vars: from(Some(-100.0), None, 0.8, POWER3_OUT),
            position: None,
        },
        HeroStep {
            selector: ".hero-greeting",
            vars: from(Some(50.0), None, 0.6, POWER2_OUT),
            position: Some(overlap(0.4)),
        },
        HeroStep {
            selector: ".hero-name",
            vars: from(Some(50.0), None, 0.8, POWER3_OUT),
            position: Some(overlap(0.4)),
        },
        HeroStep {
            selector: ".hero-description",
            vars: from(Some(30.0), None, 0.6, POWER2_OUT),
            position: Some(overlap(0.2)),
        },
        HeroStep {
            selector: ".hero-buttons .btn",
            vars: TweenVars {
                stagger: Some(0.1),
                ..from(Some(30.0), None, 0.5, BACK_OUT)
            },
            position: Some(overlap(0.2)),
        },
        HeroStep {
            selector: ".hero-visual",
            vars: from(None, Some(100.0), 1.0, POWER3_OUT),
            position: Some(overlap(0.8)),
        },
        HeroStep {
            selector: ".float-element",
            vars: TweenVars {
                scale: Some(0.0),
                rotation: Some(180.0),
                stagger: Some(0.1),
                ..from(None, None, 0.6, BACK_OUT)
            },
            position: Some(overlap(0.4)),
        },
    ]
}

/// Endless bob and spin for the i-th floating element.
pub fn float_loops(index: usize) -> [TweenVars; 2] {
    let delay = index as f64 * 0.5;
    let duration = 3.0 + index as f64 * 0.5;
    [
        TweenVars {
            y: Some(-20.0),
            delay: Some(delay),
            repeat: Some(-1),
            yoyo: Some(true),
            ..TweenVars::over(duration, SINE_IN_OUT)
        },
        TweenVars {
            rotation: Some(360.0),
            delay: Some(delay),
            repeat: Some(-1),
            ..TweenVars::over(duration * 2.0, "none")
        },
    ]
}

// --- Project filter -----------------------------------------------------------

pub fn card_exit() -> TweenVars {
    TweenVars {
        scale: Some(0.0),
        opacity: Some(0.0),
        ..TweenVars::over(0.3, POWER2_IN)
    }
}

pub fn card_enter(delay: f64) -> TweenVars {
    TweenVars {
        scale: Some(1.0),
        opacity: Some(1.0),
        delay: Some(delay),
        ..TweenVars::over(0.5, BACK_OUT)
    }
}

// --- Form labels --------------------------------------------------------------

pub const LABEL_ACTIVE_COLOR: &str = "#00ff88";
pub const LABEL_IDLE_COLOR: &str = "#888888";

pub fn label_raise() -> TweenVars {
    TweenVars {
        y: Some(-25.0),
        scale: Some(0.8),
        color: Some(LABEL_ACTIVE_COLOR.to_string()),
        ..TweenVars::over(0.3, POWER2_OUT)
    }
}

pub fn label_rest() -> TweenVars {
    TweenVars {
        y: Some(0.0),
        scale: Some(1.0),
        color: Some(LABEL_IDLE_COLOR.to_string()),
        ..TweenVars::over(0.3, POWER2_OUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_bar_serializes_engine_shape() {
        let vars = serde_json::to_value(skill_bar(80.0)).unwrap();
        assert_eq!(
            vars,
            json!({
                "width": "80%",
                "duration": 1.5,
                "ease": "power2.out",
                "scrollTrigger": { "start": "top 80%", "toggleActions": "play none none reverse" }
            })
        );
    }

    #[test]
    fn skill_target_parses_and_clamps() {
        assert_eq!(skill_target(Some("80")), Some(80.0));
        assert_eq!(skill_target(Some(" 95% ")), Some(95.0));
        assert_eq!(skill_target(Some("140")), Some(100.0));
        assert_eq!(skill_target(Some("wide")), None);
        assert_eq!(skill_target(None), None);
    }

    #[test]
    fn timeline_alternates_sides() {
        assert_eq!(timeline_offset(0), -100.0);
        assert_eq!(timeline_offset(1), 100.0);
        assert_eq!(timeline_item(2).x, Some(-100.0));
    }

    #[test]
    fn project_cards_trigger_later_and_stagger() {
        let vars = project_card(3);
        assert_eq!(vars.scroll_trigger.unwrap().start, "top 85%");
        assert!((vars.delay.unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn hero_timeline_starts_with_navbar_at_end() {
        let steps = hero_timeline();
        assert_eq!(steps[0].selector, "#navbar");
        assert!(steps[0].position.is_none());
        assert_eq!(steps[1].position.as_deref(), Some("-=0.4"));
    }

    #[test]
    fn float_loops_grow_with_index() {
        let [bob, spin] = float_loops(2);
        assert_eq!(bob.delay, Some(1.0));
        assert_eq!(bob.duration, 4.0);
        assert_eq!(spin.duration, 8.0);
        assert_eq!(spin.repeat, Some(-1));
    }
}
