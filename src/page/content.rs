//! Content features: loader, entrance animations, scroll reveal, typing
//! headline, project filter and the contact form.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, FocusEvent, HtmlButtonElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::anim::{self, LABEL_ACTIVE_COLOR, LABEL_IDLE_COLOR};
use crate::error::{Result, SiteError};
use crate::filter::{CardPlan, Filter, ProjectFilter};
use crate::form::{ContactForm, LabelPose, label_on_blur, label_on_focus};
use crate::loader::StartupSequencer;
use crate::reveal::{
    OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD, REVEALED_CLASS, RevealTracker, ScrollToggle,
    ToggleAction, fallback_should_reveal,
};
use crate::schedule::Debounce;
use crate::typing::{self, Typewriter};

use super::dom::{self, listen, set_class, set_style};
use super::engines::Gsap;
use super::surfaces::{DomProgress, DomSubmit};
use super::{PageContext, report, visuals};

// --- Loader & hero entrance ------------------------------------------------------

pub fn start_loader(ctx: &Rc<PageContext>) {
    let surface = Rc::new(DomProgress::new(&ctx.doc));
    let sequencer = StartupSequencer::new(
        ctx.scheduler.clone(),
        ctx.config.loader.clone(),
        ctx.rng.clone(),
        surface,
    );
    let after = ctx.clone();
    let flag = sequencer.start(move || start_main_animations(&after));
    ctx.loaded.replace(flag);
}

fn start_main_animations(ctx: &Rc<PageContext>) {
    if let Some(gsap) = ctx.engine {
        report("hero timeline", gsap.play_timeline(&anim::hero_timeline()));
        let floats = dom::query_all(&ctx.doc, ".float-element");
        for (i, el) in floats.iter().enumerate() {
            for vars in anim::float_loops(i) {
                report("floating loop", gsap.to(el, &vars));
            }
        }
    }
    visuals::start_glitch(ctx);
}

// --- Scroll-linked entrance animations -------------------------------------------

pub fn install_entrances(ctx: &Rc<PageContext>) -> Result<()> {
    let skill_bars = dom::query_all(&ctx.doc, ".skill-progress");
    let Some(gsap) = ctx.engine.filter(Gsap::has_scroll_trigger) else {
        return install_skill_fallback(ctx, skill_bars);
    };
    for bar in &skill_bars {
        match anim::skill_target(bar.get_attribute("data-width").as_deref()) {
            Some(target) => report("skill bar", gsap.to_on_scroll(bar, &anim::skill_bar(target))),
            None => tracing::warn!("skill bar without a numeric data-width"),
        }
    }
    let items = dom::query_all(&ctx.doc, ".timeline-item");
    for (i, item) in items.iter().enumerate() {
        report("timeline item", gsap.from_on_scroll(item, &anim::timeline_item(i)));
    }
    let projects = dom::query_all(&ctx.doc, ".project-card");
    for (i, card) in projects.iter().enumerate() {
        report("project card", gsap.from_on_scroll(card, &anim::project_card(i)));
    }
    let interests = dom::query_all(&ctx.doc, ".interest-card");
    for (i, card) in interests.iter().enumerate() {
        report("interest card", gsap.from_on_scroll(card, &anim::interest_card(i)));
    }
    Ok(())
}

/// Without the engine, skill bars grow and shrink through a CSS transition
/// driven by the same play/reverse rule.
fn install_skill_fallback(ctx: &Rc<PageContext>, bars: Vec<Element>) -> Result<()> {
    let tracked: Vec<(Element, f64, ScrollToggle)> = bars
        .into_iter()
        .filter_map(|bar| {
            let target = anim::skill_target(bar.get_attribute("data-width").as_deref())?;
            set_style(&bar, "width", "0%");
            set_style(&bar, "transition", "width 1.5s ease-out");
            Some((bar, target, ScrollToggle::new(0.8)))
        })
        .collect();
    if tracked.is_empty() {
        return Ok(());
    }
    let tracked = RefCell::new(tracked);
    let win = ctx.win.clone();
    let update = move || {
        let vh = dom::viewport_height(&win);
        for (bar, target, toggle) in tracked.borrow_mut().iter_mut() {
            match toggle.update(dom::rect(bar).top, vh) {
                Some(ToggleAction::Play) => set_style(bar, "width", &format!("{target}%")),
                Some(ToggleAction::Reverse) => set_style(bar, "width", "0%"),
                None => {}
            }
        }
    };
    update();
    listen(&ctx.win, "scroll", move |_: Event| update())
}

// --- Scroll reveal -----------------------------------------------------------------

const REVEAL_TARGETS: &str = ".scroll-reveal, .scroll-reveal-left, .scroll-reveal-right";
const REVEAL_INDEX: &str = "data-reveal-index";

struct Reveal {
    tracker: RefCell<RevealTracker>,
    targets: Vec<Element>,
}

impl Reveal {
    fn reveal(&self, el: &Element) {
        let Some(index) = el.get_attribute(REVEAL_INDEX).and_then(|v| v.parse().ok()) else {
            return;
        };
        if self.tracker.borrow_mut().reveal(index) {
            set_class(el, REVEALED_CLASS, true);
        }
    }

    /// Safety net for when the observer is missing or late. Only plain
    /// `.scroll-reveal` elements take part.
    fn fallback_pass(&self, viewport_height: f64, margin: f64) {
        let pending: Vec<usize> = self.tracker.borrow().pending().collect();
        for index in pending {
            let el = &self.targets[index];
            let plain = dom::has_class(el, "scroll-reveal");
            if plain && fallback_should_reveal(dom::rect(el).top, viewport_height, margin) {
                self.reveal(el);
            }
        }
    }
}

pub fn install_reveal(ctx: &Rc<PageContext>) -> Result<()> {
    let targets = dom::query_all(&ctx.doc, REVEAL_TARGETS);
    if targets.is_empty() {
        return Ok(());
    }
    for (i, el) in targets.iter().enumerate() {
        el.set_attribute(REVEAL_INDEX, &i.to_string())?;
    }
    let tracker = RefCell::new(RevealTracker::new(targets.len()));
    let reveal = Rc::new(Reveal { tracker, targets });

    if dom::has_property(&ctx.win, "IntersectionObserver") {
        let on_entries = reveal.clone();
        let on_intersect = move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    on_entries.reveal(&target);
                    observer.unobserve(&target);
                }
            }
        };
        let callback =
            Closure::wrap(Box::new(on_intersect) as Box<dyn FnMut(Array, IntersectionObserver)>);
        let options = dom::options(&[
            ("threshold", OBSERVER_THRESHOLD.into()),
            ("rootMargin", OBSERVER_ROOT_MARGIN.into()),
        ]);
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            options.unchecked_ref::<IntersectionObserverInit>(),
        )?;
        callback.forget();
        for el in &reveal.targets {
            observer.observe(el);
        }
    } else {
        tracing::warn!("IntersectionObserver unavailable; relying on scroll fallback");
    }

    let debounce = Debounce::new(ctx.scheduler.clone(), ctx.config.scroll_debounce_ms);
    let (win, margin) = (ctx.win.clone(), ctx.config.reveal_margin_px);
    listen(&ctx.win, "scroll", move |_: Event| {
        let (reveal, win) = (reveal.clone(), win.clone());
        debounce.call(move || reveal.fallback_pass(dom::viewport_height(&win), margin));
    })
}

// --- Typing headline ---------------------------------------------------------------

pub fn install_typing(ctx: &Rc<PageContext>) {
    let Some(el) = dom::query(&ctx.doc, ".typing-text") else {
        tracing::warn!(".typing-text missing; typing effect disabled");
        return;
    };
    let Some(typewriter) = Typewriter::new(ctx.config.typing.clone()) else {
        return;
    };
    let render = Rc::new(move |text: &str| el.set_text_content(Some(text)));
    typing::run(typewriter, ctx.scheduler.clone(), render);
}

// --- Project filter ----------------------------------------------------------------

pub fn install_filters(ctx: &Rc<PageContext>) -> Result<()> {
    let buttons = dom::query_all(&ctx.doc, ".filter-btn");
    if buttons.is_empty() {
        return Ok(());
    }
    let cards = Rc::new(dom::query_all(&ctx.doc, ".project-card"));
    let filters = buttons
        .iter()
        .map(|b| Filter::parse(b.get_attribute("data-filter").as_deref()))
        .collect();
    let categories = cards
        .iter()
        .map(|c| c.get_attribute("data-category"))
        .collect();
    let filter = Rc::new(RefCell::new(ProjectFilter::new(filters, categories)));
    let buttons = Rc::new(buttons);

    for (i, button) in buttons.iter().enumerate() {
        let (ctx, filter) = (ctx.clone(), filter.clone());
        let (all_buttons, cards) = (buttons.clone(), cards.clone());
        listen(button, "click", move |_: Event| {
            let Some(plan) = filter.borrow_mut().select(i) else {
                return;
            };
            for (j, b) in all_buttons.iter().enumerate() {
                set_class(b, "active", j == i);
            }
            apply_plan(&ctx, &cards, plan);
        })?;
    }
    Ok(())
}

/// Every card shrinks out first; once that finishes it is shown (and grows
/// back in) or hidden.
fn apply_plan(ctx: &PageContext, cards: &[Element], plan: Vec<CardPlan>) {
    for step in plan {
        let Some(card) = cards.get(step.index).cloned() else {
            continue;
        };
        match ctx.engine {
            Some(gsap) => {
                let target = card.clone();
                let settle = Box::new(move || settle_card(Some(gsap), &target, &step));
                let result = gsap.to_then(&card, &anim::card_exit(), settle);
                report("project filter", result);
            }
            None => settle_card(None, &card, &step),
        }
    }
}

fn settle_card(engine: Option<Gsap>, card: &Element, step: &CardPlan) {
    if !step.visible {
        set_style(card, "display", "none");
        return;
    }
    set_style(card, "display", "block");
    if let Some(gsap) = engine {
        report("project filter", gsap.to(card, &anim::card_enter(step.delay)));
    }
}

// --- Contact form ----------------------------------------------------------------

pub fn install_contact_form(ctx: &Rc<PageContext>) -> Result<()> {
    let Some(form) = ctx.doc.get_element_by_id("contact-form") else {
        return Ok(());
    };
    let form: HtmlFormElement = form
        .dyn_into()
        .map_err(|_| SiteError::UnexpectedElement("#contact-form"))?;
    let button = form
        .query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());
    if button.is_none() {
        tracing::warn!("contact form has no submit button");
    }
    let controller = ContactForm::new(
        ctx.scheduler.clone(),
        ctx.config.form.clone(),
        Rc::new(DomSubmit::new(form.clone(), button)),
        ctx.notifier.clone(),
    );
    listen(&form, "submit", move |e: Event| {
        e.prevent_default();
        if !controller.submit() {
            tracing::debug!("contact form: submission already in flight");
        }
    })?;

    for group in dom::query_all(&ctx.doc, ".form-group") {
        let field = group.query_selector("input, textarea").ok().flatten();
        let label = group.query_selector("label").ok().flatten();
        let (Some(field), Some(label)) = (field, label) else {
            continue;
        };
        let (engine, raised) = (ctx.engine, label.clone());
        listen(&field, "focus", move |_: FocusEvent| {
            pose_label(engine, &raised, label_on_focus())
        })?;
        let blurred = field.clone();
        listen(&field, "blur", move |_: FocusEvent| {
            if let Some(pose) = label_on_blur(&dom::field_value(&blurred)) {
                pose_label(engine, &label, pose);
            }
        })?;
    }
    Ok(())
}

fn pose_label(engine: Option<Gsap>, label: &Element, pose: LabelPose) {
    let vars = match pose {
        LabelPose::Raised => anim::label_raise(),
        LabelPose::Resting => anim::label_rest(),
    };
    match engine {
        Some(gsap) => report("form label", gsap.to(label, &vars)),
        None => {
            let (y, scale) = (vars.y.unwrap_or(0.0), vars.scale.unwrap_or(1.0));
            set_style(label, "transform", &format!("translateY({y}px) scale({scale})"));
            let color = if pose == LabelPose::Raised {
                LABEL_ACTIVE_COLOR
            } else {
                LABEL_IDLE_COLOR
            };
            set_style(label, "color", color);
        }
    }
}
