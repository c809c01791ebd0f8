//! Navbar wiring: mobile menu, link scrolling, scroll-spy highlighting and
//! keyboard focus rings.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::error::Result;
use crate::nav::{
    KeyboardFocus, MobileMenu, ScrollSpy, SectionBounds, SmoothScroll, link_targets,
    navbar_scrolled,
};

use super::PageContext;
use super::dom::{self, listen, set_class};
use super::timers::animation_frames;

const FOCUS_STYLE: &str = "
    .keyboard-navigation *:focus {
        outline: 2px solid var(--primary-color) !important;
        outline-offset: 2px !important;
    }
";

struct NavView {
    body: Option<HtmlElement>,
    navbar: Option<Element>,
    toggle: Option<Element>,
    menu: Option<Element>,
    links: Vec<Element>,
}

impl NavView {
    fn show_menu(&self, open: bool) {
        for el in [&self.toggle, &self.menu].into_iter().flatten() {
            set_class(el, "active", open);
        }
        if let Some(body) = &self.body {
            set_class(body, "no-scroll", open);
        }
    }

    fn highlight(&self, section_id: &str) {
        for link in &self.links {
            let on = link
                .get_attribute("href")
                .is_some_and(|h| link_targets(&h, section_id));
            set_class(link, "active", on);
        }
    }

    fn activate(&self, clicked: &Element) {
        for link in &self.links {
            set_class(link, "active", link.is_same_node(Some(clicked)));
        }
    }
}

struct NavState {
    spy: ScrollSpy,
    menu: MobileMenu,
}

pub fn install(ctx: &Rc<PageContext>) -> Result<()> {
    let doc = &ctx.doc;
    let view = Rc::new(NavView {
        body: doc.body(),
        navbar: doc.get_element_by_id("navbar"),
        toggle: doc.get_element_by_id("nav-toggle"),
        menu: doc.get_element_by_id("nav-menu"),
        links: dom::query_all(doc, ".nav-link"),
    });
    let state = Rc::new(RefCell::new(NavState {
        spy: ScrollSpy::new(ctx.config.scroll_spy_offset_px, Some("home")),
        menu: MobileMenu::default(),
    }));

    match &view.toggle {
        Some(toggle) => {
            let (state, view) = (state.clone(), view.clone());
            listen(toggle, "click", move |_: Event| {
                let open = state.borrow_mut().menu.toggle();
                view.show_menu(open);
            })?;
        }
        None => tracing::warn!("#nav-toggle missing; mobile menu disabled"),
    }

    let fallback = needs_smooth_scroll_fallback(doc);
    if fallback {
        tracing::debug!("native smooth scrolling unavailable; animating scroll on frames");
    }
    for link in &view.links {
        let (ctx, state, view, clicked) = (ctx.clone(), state.clone(), view.clone(), link.clone());
        listen(link, "click", move |e: MouseEvent| {
            e.prevent_default();
            let Some(target) = href_target(&ctx.doc, &clicked) else {
                return;
            };
            scroll_to(&ctx, &target, fallback);
            view.activate(&clicked);
            if state.borrow_mut().menu.close() {
                view.show_menu(false);
            }
        })?;
    }
    if fallback {
        for anchor in dom::query_all(doc, "a[href^=\"#\"]:not(.nav-link)") {
            let (ctx, clicked) = (ctx.clone(), anchor.clone());
            listen(&anchor, "click", move |e: MouseEvent| {
                e.prevent_default();
                if let Some(target) = href_target(&ctx.doc, &clicked) {
                    scroll_to(&ctx, &target, true);
                }
            })?;
        }
    }

    if let Some(navbar) = view.navbar.clone() {
        let (state, view) = (state.clone(), view.clone());
        listen(doc, "click", move |e: MouseEvent| {
            let inside = e
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|n| navbar.contains(Some(&n)));
            if !inside && state.borrow_mut().menu.close() {
                view.show_menu(false);
            }
        })?;
    }

    let scroll_ctx = ctx.clone();
    let threshold = ctx.config.navbar_scrolled_px;
    listen(&ctx.win, "scroll", move |_: Event| {
        let y = dom::scroll_y(&scroll_ctx.win);
        if let Some(navbar) = &view.navbar {
            set_class(navbar, "scrolled", navbar_scrolled(y, threshold));
        }
        let sections = section_bounds(&scroll_ctx.doc);
        if let Some(id) = state.borrow_mut().spy.observe(&sections, y) {
            view.highlight(id);
        }
    })?;
    Ok(())
}

/// Sections with an id, in document order.
fn section_bounds(doc: &Document) -> Vec<SectionBounds> {
    dom::query_all(doc, "section")
        .into_iter()
        .filter_map(|el| {
            let html = el.dyn_into::<HtmlElement>().ok()?;
            let id = html.id();
            let (top, height) = (html.offset_top() as f64, html.offset_height() as f64);
            (!id.is_empty()).then(|| SectionBounds::new(id, top, height))
        })
        .collect()
}

fn needs_smooth_scroll_fallback(doc: &Document) -> bool {
    doc.document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .is_some_and(|html| !dom::has_property(&html.style(), "scrollBehavior"))
}

/// The in-page element a link's `#id` href points at.
fn href_target(doc: &Document, link: &Element) -> Option<Element> {
    dom::query(doc, &link.get_attribute("href")?)
}

fn scroll_to(ctx: &Rc<PageContext>, target: &Element, fallback: bool) {
    if !fallback {
        let opts = dom::options(&[("behavior", "smooth".into()), ("block", "start".into())]);
        target.scroll_into_view_with_scroll_into_view_options(opts.unchecked_ref());
        return;
    }
    let Some(html) = target.dyn_ref::<HtmlElement>() else {
        return;
    };
    let (from, to) = (dom::scroll_y(&ctx.win), html.offset_top() as f64);
    let mut anim = SmoothScroll::new(from, to, ctx.config.smooth_scroll_ms);
    let win = ctx.win.clone();
    animation_frames(&ctx.win, move |ts| {
        let (y, more) = anim.frame(ts);
        win.scroll_to_with_x_and_y(0.0, y);
        more
    });
}

pub fn install_keyboard_focus(ctx: &Rc<PageContext>) -> Result<()> {
    let Some(body) = ctx.doc.body() else {
        return Ok(());
    };
    if let Some(head) = ctx.doc.head() {
        let style = ctx.doc.create_element("style")?;
        style.set_text_content(Some(FOCUS_STYLE));
        head.append_child(&style)?;
    }
    let focus = Rc::new(RefCell::new(KeyboardFocus::default()));

    let (on_key, key_body) = (focus.clone(), body.clone());
    listen(&ctx.doc, "keydown", move |e: KeyboardEvent| {
        if let Some(active) = on_key.borrow_mut().on_key(&e.key()) {
            set_class(&key_body, "keyboard-navigation", active);
        }
    })?;
    listen(&ctx.doc, "mousedown", move |_: MouseEvent| {
        if let Some(active) = focus.borrow_mut().on_pointer_down() {
            set_class(&body, "keyboard-navigation", active);
        }
    })?;
    Ok(())
}
