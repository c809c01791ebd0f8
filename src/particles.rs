//! Configuration object for the background particle engine.
//!
//! Field names follow the engine's JSON schema, so the struct serializes
//! straight into the `particlesJS(id, config)` call.

use serde::Serialize;

pub const CONTAINER_ID: &str = "particles-js";
const ACCENT: &str = "#00ff88";

#[derive(Clone, Debug, Serialize)]
pub struct ParticleConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Particles {
    pub number: Number,
    pub color: Value<&'static str>,
    pub shape: Shape,
    pub opacity: Varying,
    pub size: Varying,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub motion: Motion,
}

#[derive(Clone, Debug, Serialize)]
pub struct Value<T> {
    pub value: T,
}

#[derive(Clone, Debug, Serialize)]
pub struct Number {
    pub value: u32,
    pub density: Density,
}

#[derive(Clone, Debug, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Varying {
    pub value: f64,
    pub random: bool,
    pub anim: Toggle,
}

#[derive(Clone, Debug, Serialize)]
pub struct Toggle {
    pub enable: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: u32,
    pub color: &'static str,
    pub opacity: f64,
    pub width: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Motion {
    pub enable: bool,
    pub speed: f64,
    pub direction: &'static str,
    pub random: bool,
    pub straight: bool,
    pub out_mode: &'static str,
    pub bounce: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Interactivity {
    pub detect_on: &'static str,
    pub events: Events,
    pub modes: Modes,
}

#[derive(Clone, Debug, Serialize)]
pub struct Events {
    pub onhover: Mode,
    pub onclick: Mode,
    pub resize: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Mode {
    pub enable: bool,
    pub mode: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Modes {
    pub grab: Grab,
    pub push: Push,
}

#[derive(Clone, Debug, Serialize)]
pub struct Grab {
    pub distance: u32,
    pub line_linked: LinkOpacity,
}

#[derive(Clone, Debug, Serialize)]
pub struct LinkOpacity {
    pub opacity: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Push {
    pub particles_nb: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particles: Particles {
                number: Number {
                    value: 80,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: Value { value: ACCENT },
                shape: Shape { kind: "circle" },
                opacity: Varying {
                    value: 0.5,
                    random: false,
                    anim: Toggle { enable: false },
                },
                size: Varying {
                    value: 3.0,
                    random: true,
                    anim: Toggle { enable: false },
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 150,
                    color: ACCENT,
                    opacity: 0.4,
                    width: 1,
                },
                motion: Motion {
                    enable: true,
                    speed: 2.0,
                    direction: "none",
                    random: false,
                    straight: false,
                    out_mode: "out",
                    bounce: false,
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas",
                events: Events {
                    onhover: Mode {
                        enable: true,
                        mode: "grab",
                    },
                    onclick: Mode {
                        enable: true,
                        mode: "push",
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 140,
                        line_linked: LinkOpacity { opacity: 1.0 },
                    },
                    push: Push { particles_nb: 4 },
                },
            },
            retina_detect: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_engine_keys() {
        let v = serde_json::to_value(ParticleConfig::default()).unwrap();
        assert_eq!(v["particles"]["number"]["value"], 80);
        assert_eq!(v["particles"]["move"]["out_mode"], "out");
        assert_eq!(v["particles"]["shape"]["type"], "circle");
        assert_eq!(v["particles"]["line_linked"]["distance"], 150);
        let grab_link = &v["interactivity"]["modes"]["grab"]["line_linked"];
        assert_eq!(grab_link["opacity"], 1.0);
        assert!(grab_link.get("value").is_none());
        assert_eq!(v["retina_detect"], true);
    }
}
