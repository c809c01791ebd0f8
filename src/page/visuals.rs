//! Decorative wiring: custom cursor, particle background, tilt, parallax,
//! glitch flicker and the Konami-code matrix rain.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::effects::{
    FRENZY_ANIMATION, GLITCH_ANIMATION, HOVER_TARGETS, float_parallax, hero_parallax, should_glitch,
};
use crate::error::{Result, SiteError};
use crate::konami::{EASTER_EGG_MESSAGE, SequenceDetector};
use crate::matrix::MatrixRain;
use crate::notify::NotificationKind;
use crate::particles::{CONTAINER_ID, ParticleConfig};
use crate::random::RandomSource;
use crate::schedule::{Throttle, every};
use crate::tilt::{ENTER_TRANSITION, LEAVE_TRANSITION, Tilt};

use super::dom::{self, listen, set_class, set_style};
use super::engines;
use super::{PageContext, report};

pub fn install_cursor(ctx: &Rc<PageContext>) -> Result<()> {
    if ctx.config.is_mobile(ctx.viewport_width()) {
        tracing::debug!("narrow viewport; custom cursor disabled");
        return Ok(());
    }
    let (Some(cursor), Some(follower)) =
        (ctx.doc.get_element_by_id("cursor"), ctx.doc.get_element_by_id("cursor-follower"))
    else {
        tracing::warn!("cursor elements missing; custom cursor disabled");
        return Ok(());
    };

    let (scheduler, trail_ms) = (ctx.scheduler.clone(), ctx.config.cursor_trail_ms);
    let (lead, trail) = (cursor.clone(), follower.clone());
    listen(&ctx.doc, "mousemove", move |e: MouseEvent| {
        let x = format!("{}px", e.client_x());
        let y = format!("{}px", e.client_y());
        set_style(&lead, "left", &x);
        set_style(&lead, "top", &y);
        let trail = trail.clone();
        scheduler.schedule(
            trail_ms,
            Box::new(move || {
                set_style(&trail, "left", &x);
                set_style(&trail, "top", &y);
            }),
        );
    })?;

    let dots = Rc::new([cursor, follower]);
    for el in dom::query_all(&ctx.doc, HOVER_TARGETS) {
        let enter = dots.clone();
        listen(&el, "mouseenter", move |_: MouseEvent| {
            enter.iter().for_each(|d| set_class(d, "hover", true));
        })?;
        let leave = dots.clone();
        listen(&el, "mouseleave", move |_: MouseEvent| {
            leave.iter().for_each(|d| set_class(d, "hover", false));
        })?;
    }
    Ok(())
}

pub fn install_particles(ctx: &Rc<PageContext>) -> Result<()> {
    match engines::init_particles(&ParticleConfig::default()) {
        Ok(true) => tracing::debug!("particle background started"),
        Ok(false) => tracing::warn!("particle engine not loaded; background disabled"),
        Err(err) => tracing::error!("particle engine: {err}"),
    }
    let Some(container) = ctx.doc.get_element_by_id(CONTAINER_ID) else {
        return Ok(());
    };
    let config = ctx.config.clone();
    let show = move |width: f64| {
        let display = if config.is_mobile(width) {
            "none"
        } else {
            "block"
        };
        set_style(&container, "display", display);
    };
    show(ctx.viewport_width());

    let throttle = Throttle::new(ctx.scheduler.clone(), ctx.config.resize_throttle_ms);
    let win = ctx.win.clone();
    listen(&ctx.win, "resize", move |_: Event| {
        throttle.call(|| show(dom::viewport_width(&win)));
    })
}

pub fn install_tilt(ctx: &Rc<PageContext>) -> Result<()> {
    for el in dom::query_all(&ctx.doc, "[data-tilt]") {
        let entered = el.clone();
        listen(&el, "mouseenter", move |_: MouseEvent| {
            set_style(&entered, "transition", ENTER_TRANSITION);
        })?;

        let (moved, move_ctx) = (el.clone(), ctx.clone());
        listen(&el, "mousemove", move |e: MouseEvent| {
            let (x, y) = (e.client_x() as f64, e.client_y() as f64);
            let tilt = Tilt::from_pointer(x, y, dom::rect(&moved));
            move_ctx.compose_transform(&moved, |stack| stack.set_tilt(tilt));
        })?;

        let (left, leave_ctx) = (el.clone(), ctx.clone());
        listen(&el, "mouseleave", move |_: MouseEvent| {
            set_style(&left, "transition", LEAVE_TRANSITION);
            leave_ctx.compose_transform(&left, |stack| stack.set_tilt(Tilt::NEUTRAL));
        })?;
    }
    Ok(())
}

pub fn install_parallax(ctx: &Rc<PageContext>) -> Result<()> {
    let hero = dom::query(&ctx.doc, ".hero-visual");
    let floats = dom::query_all(&ctx.doc, ".float-element");
    if hero.is_none() && floats.is_empty() {
        return Ok(());
    }
    let scroll_ctx = ctx.clone();
    listen(&ctx.win, "scroll", move |_: Event| {
        let y = dom::scroll_y(&scroll_ctx.win);
        if let Some(hero) = &hero {
            scroll_ctx.compose_transform(hero, |stack| stack.set_parallax(hero_parallax(y)));
        }
        for (i, el) in floats.iter().enumerate() {
            scroll_ctx.compose_transform(el, |stack| stack.set_parallax(float_parallax(y, i)));
        }
    })
}

/// Randomly restart each `.glitch` element's CSS animation. Runs for the
/// page's lifetime.
pub fn start_glitch(ctx: &Rc<PageContext>) {
    let (chance, flicker_ms) = (ctx.config.glitch.chance, ctx.config.glitch.flicker_ms);
    for el in dom::query_all(&ctx.doc, ".glitch") {
        let (scheduler, rng) = (ctx.scheduler.clone(), ctx.rng.clone());
        every(&ctx.scheduler, ctx.config.glitch.interval_ms, move || {
            if should_glitch(rng.borrow_mut().next_f64(), chance) {
                set_style(&el, "animation", "none");
                let el = el.clone();
                let restart = Box::new(move || set_style(&el, "animation", GLITCH_ANIMATION));
                scheduler.schedule(flicker_ms, restart);
            }
            ControlFlow::Continue(())
        });
    }
}

// --- Easter egg --------------------------------------------------------------------

pub fn install_easter_egg(ctx: &Rc<PageContext>) -> Result<()> {
    let detector = RefCell::new(SequenceDetector::konami());
    let egg_ctx = ctx.clone();
    listen(&ctx.doc, "keydown", move |e: KeyboardEvent| {
        if detector.borrow_mut().push(&e.code()) {
            activate_easter_egg(&egg_ctx);
        }
    })
}

fn activate_easter_egg(ctx: &Rc<PageContext>) {
    tracing::info!("konami code entered");
    report("matrix rain", start_matrix_rain(ctx));
    ctx.notifier
        .show(EASTER_EGG_MESSAGE, NotificationKind::Success);
    for el in dom::query_all(&ctx.doc, ".hero-name, .section-title") {
        set_style(&el, "animation", FRENZY_ANIMATION);
    }
}

fn start_matrix_rain(ctx: &Rc<PageContext>) -> Result<()> {
    let canvas: HtmlCanvasElement = ctx
        .doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| SiteError::UnexpectedElement("canvas"))?;
    let width = ctx.viewport_width();
    let height = dom::viewport_height(&ctx.win);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    canvas.set_attribute("style", "position:fixed; top:0; left:0; z-index:-1; opacity:0.1;")?;
    ctx.doc
        .body()
        .ok_or(SiteError::MissingGlobal("document.body"))?
        .append_child(&canvas)?;
    let draw: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(SiteError::UnexpectedElement("canvas 2d context"))?
        .dyn_into()
        .map_err(|_| SiteError::UnexpectedElement("canvas 2d context"))?;

    let rain = Rc::new(RefCell::new(MatrixRain::new(ctx.config.matrix.clone(), width, height)));
    let font = format!("{}px monospace", ctx.config.matrix.font_px);
    let (frame_rain, frame_canvas, rng) = (rain.clone(), canvas.clone(), ctx.rng.clone());
    every(&ctx.scheduler, ctx.config.matrix.frame_ms, move || {
        let (w, h) = (frame_canvas.width() as f64, frame_canvas.height() as f64);
        draw.set_fill_style_str("rgba(10, 10, 10, 0.05)");
        draw.fill_rect(0.0, 0.0, w, h);
        draw.set_fill_style_str("#00ff88");
        draw.set_font(&font);
        let glyphs = frame_rain.borrow_mut().step(&mut *rng.borrow_mut());
        for glyph in glyphs {
            draw.fill_text(&glyph.ch.to_string(), glyph.x, glyph.y).ok();
        }
        ControlFlow::Continue(())
    });

    let win = ctx.win.clone();
    listen(&ctx.win, "resize", move |_: Event| {
        let (w, h) = (dom::viewport_width(&win), dom::viewport_height(&win));
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        rain.borrow_mut().resize(w, h);
    })
}
