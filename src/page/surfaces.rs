//! DOM implementations of the controllers' visual-state traits.

use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement};

use crate::form::{SubmitStage, SubmitSurface};
use crate::loader::{LoadProgress, ProgressSurface};
use crate::notify::{NotificationHost, NotificationId, NotificationKind};

use super::dom::{self, set_class, set_style};

// --- Loader ------------------------------------------------------------------

pub struct DomProgress {
    loader: Option<Element>,
    bar: Option<Element>,
    readout: Option<Element>,
}

impl DomProgress {
    pub fn new(doc: &Document) -> Self {
        Self {
            loader: doc.get_element_by_id("loader"),
            bar: dom::query(doc, ".loader-progress"),
            readout: dom::query(doc, ".loader-percent"),
        }
    }
}

impl ProgressSurface for DomProgress {
    fn set_progress(&self, progress: &LoadProgress) {
        if let Some(bar) = &self.bar {
            set_style(bar, "width", &format!("{}%", progress.value()));
        }
        if let Some(readout) = &self.readout {
            readout.set_text_content(Some(&progress.label()));
        }
    }

    fn dismiss(&self) {
        if let Some(loader) = &self.loader {
            set_class(loader, "fade-out", true);
        }
    }
}

// --- Notifications -------------------------------------------------------------

const TOAST_STYLE: &str = concat!(
    "position:fixed; top:20px; right:20px; color:#0a0a0a; padding:15px 20px; ",
    "border-radius:10px; box-shadow:0 10px 30px rgba(0,0,0,0.3); display:flex; ",
    "align-items:center; gap:10px; font-weight:600; z-index:10000; ",
    "transform:translateX(400px); transition:transform 0.3s ease;",
);

pub struct DomToasts {
    doc: Document,
    live: RefCell<HashMap<NotificationId, Element>>,
}

impl DomToasts {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            live: RefCell::new(HashMap::new()),
        }
    }

    fn build(&self, message: &str, kind: NotificationKind) -> Option<Element> {
        let toast = self.doc.create_element("div").ok()?;
        toast.set_class_name(&format!("notification notification-{}", kind.as_str()));
        toast
            .set_attribute("style", &format!("{TOAST_STYLE} background:{};", kind.background()))
            .ok();
        let icon = self.doc.create_element("i").ok()?;
        icon.set_class_name(kind.icon());
        let text = self.doc.create_element("span").ok()?;
        text.set_text_content(Some(message));
        toast.append_child(&icon).ok()?;
        toast.append_child(&text).ok()?;
        Some(toast)
    }

    fn with(&self, id: NotificationId, f: impl FnOnce(&Element)) {
        if let Some(el) = self.live.borrow().get(&id) {
            f(el);
        }
    }
}

impl NotificationHost for DomToasts {
    fn mount(&self, id: NotificationId, message: &str, kind: NotificationKind) {
        let Some(body) = self.doc.body() else {
            tracing::warn!("no <body>; dropping notification");
            return;
        };
        let Some(toast) = self.build(message, kind) else {
            return;
        };
        if body.append_child(&toast).is_ok() {
            self.live.borrow_mut().insert(id, toast);
        }
    }

    fn slide_in(&self, id: NotificationId) {
        self.with(id, |el| set_style(el, "transform", "translateX(0)"));
    }

    fn slide_out(&self, id: NotificationId) {
        self.with(id, |el| set_style(el, "transform", "translateX(400px)"));
    }

    fn unmount(&self, id: NotificationId) {
        if let Some(el) = self.live.borrow_mut().remove(&id) {
            el.remove();
        }
    }
}

// --- Contact form ----------------------------------------------------------------

pub struct DomSubmit {
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    idle_label: String,
}

impl DomSubmit {
    pub fn new(form: HtmlFormElement, button: Option<HtmlButtonElement>) -> Self {
        let idle_label = button.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        Self {
            form,
            button,
            idle_label,
        }
    }
}

impl SubmitSurface for DomSubmit {
    fn show_stage(&self, stage: SubmitStage) {
        let Some(button) = &self.button else {
            return;
        };
        button.set_inner_html(stage.label_html().unwrap_or(self.idle_label.as_str()));
        button.set_disabled(stage.disables_submit());
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}
