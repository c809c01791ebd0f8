//! Bindings to the page's third-party engines: the tween engine (`gsap` with
//! its `ScrollTrigger` plugin) and the particle engine (`particlesJS`).
//!
//! Both are loaded by plain `<script>` tags, so they may be absent. Callers
//! check with [`Gsap::detect`] / [`init_particles`] and fall back or skip.

use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::anim::{HeroStep, TweenVars};
use crate::error::{Result, SiteError};
use crate::particles::{CONTAINER_ID, ParticleConfig};
use crate::schedule::Task;

use super::dom::has_property;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = gsap, js_name = to)]
    fn gsap_to(targets: &JsValue, vars: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = from)]
    fn gsap_from(targets: &JsValue, vars: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = timeline)]
    fn gsap_timeline() -> std::result::Result<Timeline, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = registerPlugin)]
    fn gsap_register_plugin(plugin: &JsValue) -> std::result::Result<(), JsValue>;

    type Timeline;

    #[wasm_bindgen(catch, method, js_name = from)]
    fn from(
        this: &Timeline,
        targets: &JsValue,
        vars: &JsValue,
        position: &JsValue,
    ) -> std::result::Result<Timeline, JsValue>;

    #[wasm_bindgen(catch, js_name = particlesJS)]
    fn particles_js(container_id: &str, config: &JsValue) -> std::result::Result<(), JsValue>;
}

/// Serialize to plain JS objects (maps become objects, not `Map`s).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| SiteError::Js(e.to_string()))
}

fn build_vars(
    vars: &TweenVars,
    trigger: Option<&Element>,
    on_complete: Option<Task>,
) -> Result<JsValue> {
    let obj = to_js(vars)?;
    if let Some(el) = trigger {
        let st = Reflect::get(&obj, &JsValue::from_str("scrollTrigger"))?;
        if st.is_object() {
            Reflect::set(&st, &JsValue::from_str("trigger"), el)?;
        }
    }
    if let Some(task) = on_complete {
        let cb = Closure::once_into_js(move || task());
        Reflect::set(&obj, &JsValue::from_str("onComplete"), &cb)?;
    }
    Ok(obj)
}

/// Handle proving the tween engine is loaded.
#[derive(Clone, Copy, Debug)]
pub struct Gsap {
    scroll_trigger: bool,
}

impl Gsap {
    pub fn detect() -> Option<Self> {
        let global = js_sys::global();
        if !has_property(&global, "gsap") {
            tracing::warn!("animation engine not loaded; entrance animations disabled");
            return None;
        }
        let mut engine = Gsap {
            scroll_trigger: false,
        };
        if let Ok(plugin) = Reflect::get(&global, &JsValue::from_str("ScrollTrigger")) {
            if !plugin.is_undefined() {
                match gsap_register_plugin(&plugin) {
                    Ok(()) => engine.scroll_trigger = true,
                    Err(err) => tracing::warn!("ScrollTrigger registration failed: {err:?}"),
                }
            }
        }
        Some(engine)
    }

    pub fn has_scroll_trigger(&self) -> bool {
        self.scroll_trigger
    }

    pub fn to(&self, targets: &JsValue, vars: &TweenVars) -> Result<()> {
        gsap_to(targets, &build_vars(vars, None, None)?)?;
        Ok(())
    }

    pub fn to_then(&self, targets: &JsValue, vars: &TweenVars, on_complete: Task) -> Result<()> {
        gsap_to(targets, &build_vars(vars, None, Some(on_complete))?)?;
        Ok(())
    }

    /// Tween `el` towards `vars`, bound to its own scroll trigger.
    pub fn to_on_scroll(&self, el: &Element, vars: &TweenVars) -> Result<()> {
        gsap_to(el, &build_vars(vars, Some(el), None)?)?;
        Ok(())
    }

    /// Tween `el` in from `vars`, bound to its own scroll trigger.
    pub fn from_on_scroll(&self, el: &Element, vars: &TweenVars) -> Result<()> {
        gsap_from(el, &build_vars(vars, Some(el), None)?)?;
        Ok(())
    }

    pub fn play_timeline(&self, steps: &[HeroStep]) -> Result<()> {
        let tl = gsap_timeline()?;
        for step in steps {
            let position = match &step.position {
                Some(p) => JsValue::from_str(p),
                None => JsValue::UNDEFINED,
            };
            let vars = build_vars(&step.vars, None, None)?;
            tl.from(&JsValue::from_str(step.selector), &vars, &position)?;
        }
        Ok(())
    }
}

/// Start the particle background. `Ok(false)` when the engine is not loaded.
pub fn init_particles(config: &ParticleConfig) -> Result<bool> {
    if !has_property(&js_sys::global(), "particlesJS") {
        return Ok(false);
    }
    particles_js(CONTAINER_ID, &to_js(config)?)?;
    Ok(true)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::anim::skill_bar;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn get(obj: &JsValue, key: &str) -> JsValue {
        Reflect::get(obj, &JsValue::from_str(key)).unwrap()
    }

    #[wasm_bindgen_test]
    fn vars_are_plain_objects_with_trigger_attached() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let el = doc.create_element("div").unwrap();
        let vars = build_vars(&skill_bar(80.0), Some(&el), None).unwrap();

        assert!(!vars.is_instance_of::<js_sys::Map>());
        assert_eq!(get(&vars, "width").as_string().as_deref(), Some("80%"));
        assert_eq!(get(&vars, "duration").as_f64(), Some(1.5));
        assert!(get(&vars, "x").is_undefined());
        let trigger = get(&vars, "scrollTrigger");
        assert_eq!(get(&trigger, "start").as_string().as_deref(), Some("top 80%"));
        assert_eq!(get(&trigger, "trigger"), JsValue::from(el));
    }

    #[wasm_bindgen_test]
    fn particle_config_nests_as_objects() {
        let config = to_js(&ParticleConfig::default()).unwrap();
        let grab = get(&get(&get(&config, "interactivity"), "modes"), "grab");
        assert_eq!(get(&get(&grab, "line_linked"), "opacity").as_f64(), Some(1.0));
        assert_eq!(get(&get(&get(&config, "particles"), "number"), "value").as_f64(), Some(80.0));
    }
}
