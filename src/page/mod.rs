//! Browser wiring: builds each controller once at startup and attaches it to
//! the page's elements and events.
//!
//! Every feature looks up its own elements and quietly skips itself (with a
//! warning) when they are missing, so a partial page still works. Only a
//! missing `window` / `document` aborts startup.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, Window, window};

use crate::config::SiteConfig;
use crate::effects::TransformStack;
use crate::error::{Result, SiteError};
use crate::loader::LoadFlag;
use crate::notify::{NotificationKind, Notifier};
use crate::random::XorShift64;
use crate::schedule::SharedScheduler;

mod content;
mod dom;
mod engines;
mod navigation;
mod platform;
mod surfaces;
mod timers;
mod visuals;

use engines::Gsap;
use surfaces::DomToasts;
use timers::BrowserScheduler;

/// Shared handles every feature is wired with.
pub(crate) struct PageContext {
    pub win: Window,
    pub doc: Document,
    pub config: SiteConfig,
    pub scheduler: SharedScheduler,
    pub rng: Rc<RefCell<XorShift64>>,
    pub notifier: Notifier,
    pub engine: Option<Gsap>,
    pub loaded: RefCell<LoadFlag>,
    /// Per-element transform layers, indexed by the element's `data-fx`.
    transforms: RefCell<Vec<TransformStack>>,
}

impl PageContext {
    /// Update one layer of `el`'s transform and write the composed result.
    pub fn compose_transform(
        &self,
        el: &Element,
        update: impl FnOnce(&mut TransformStack) -> String,
    ) {
        let known = self.transforms.borrow().len();
        let slot = el
            .get_attribute("data-fx")
            .and_then(|v| v.parse::<usize>().ok());
        let index = match slot {
            Some(i) if i < known => i,
            _ => {
                let mut stacks = self.transforms.borrow_mut();
                stacks.push(TransformStack::default());
                let i = stacks.len() - 1;
                el.set_attribute("data-fx", &i.to_string()).ok();
                i
            }
        };
        let css = update(&mut self.transforms.borrow_mut()[index]);
        dom::set_style(el, "transform", &css);
    }

    pub fn viewport_width(&self) -> f64 {
        dom::viewport_width(&self.win)
    }
}

/// Log a failed feature or engine call; the feature stays partially applied.
fn report(what: &str, result: Result<()>) {
    if let Err(err) = result {
        tracing::error!("{what}: {err}");
    }
}

thread_local! {
    static PAGE: RefCell<Option<Rc<PageContext>>> = const { RefCell::new(None) };
}

pub fn start(config: SiteConfig) -> Result<()> {
    let win = window().ok_or(SiteError::MissingGlobal("window"))?;
    let doc = win.document().ok_or(SiteError::MissingGlobal("document"))?;
    let scheduler: SharedScheduler = Rc::new(BrowserScheduler::new(win.clone()));
    let notifier = Notifier::new(
        scheduler.clone(),
        Rc::new(DomToasts::new(doc.clone())),
        config.notification.clone(),
    );
    let ctx = Rc::new(PageContext {
        win,
        doc,
        config,
        scheduler,
        rng: Rc::new(RefCell::new(XorShift64::from_entropy())),
        notifier,
        engine: Gsap::detect(),
        loaded: RefCell::new(LoadFlag::default()),
        transforms: RefCell::new(Vec::new()),
    });
    PAGE.with(|p| p.replace(Some(ctx.clone())));

    // One broken feature must not keep the rest from wiring.
    content::start_loader(&ctx);
    report("navigation", navigation::install(&ctx));
    report("cursor", visuals::install_cursor(&ctx));
    report("particles", visuals::install_particles(&ctx));
    report("entrances", content::install_entrances(&ctx));
    report("reveal", content::install_reveal(&ctx));
    content::install_typing(&ctx);
    report("project filters", content::install_filters(&ctx));
    report("contact form", content::install_contact_form(&ctx));
    report("tilt", visuals::install_tilt(&ctx));
    report("parallax", visuals::install_parallax(&ctx));
    report("easter egg", visuals::install_easter_egg(&ctx));
    report("keyboard focus", navigation::install_keyboard_focus(&ctx));
    report("platform", platform::install(&ctx));
    tracing::debug!("page behaviour wired");
    Ok(())
}

/// Run `start` now, or on `DOMContentLoaded` while the document is still parsing.
pub fn start_when_ready(config: SiteConfig) -> Result<()> {
    let win = window().ok_or(SiteError::MissingGlobal("window"))?;
    let doc = win.document().ok_or(SiteError::MissingGlobal("document"))?;
    let state = js_sys::Reflect::get(&doc, &"readyState".into())?.as_string();
    if state.as_deref() != Some("loading") {
        return start(config);
    }
    let mut pending = Some(config);
    dom::listen(&doc, "DOMContentLoaded", move |_: web_sys::Event| {
        if let Some(config) = pending.take() {
            report("page start", start(config));
        }
    })
}

pub fn is_loaded() -> bool {
    PAGE.with(|p| {
        p.borrow()
            .as_ref()
            .is_some_and(|ctx| ctx.loaded.borrow().is_loaded())
    })
}

/// Show a toast on the running page. Returns false before `start`.
pub fn notify(message: &str, kind: NotificationKind) -> bool {
    PAGE.with(|p| match p.borrow().as_ref() {
        Some(ctx) => {
            ctx.notifier.show(message, kind);
            true
        }
        None => false,
    })
}
