// Integration tests (native) for the `folio-fx` crate.
// Each test drives a controller through the public API on a virtual clock, so
// nothing here touches wasm or browser APIs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_fx::config::{FormTiming, NotificationTiming, SiteConfig, TypingTiming};
use folio_fx::filter::{Filter, ProjectFilter};
use folio_fx::form::{ContactForm, SUCCESS_MESSAGE, SubmitStage, SubmitSurface};
use folio_fx::konami::{KONAMI, SequenceDetector};
use folio_fx::loader::{LoadProgress, ProgressSurface, StartupSequencer};
use folio_fx::nav::{ScrollSpy, SectionBounds};
use folio_fx::notify::{NotificationHost, NotificationId, NotificationKind, Notifier};
use folio_fx::random::{RandomSource, XorShift64};
use folio_fx::reveal::{ScrollToggle, ToggleAction};
use folio_fx::schedule::{ManualScheduler, Scheduler, SharedScheduler};
use folio_fx::typing::{self, Typewriter};

// --- Recording surfaces --------------------------------------------------------

#[derive(Default)]
struct RecordingProgress {
    values: RefCell<Vec<f64>>,
    labels: RefCell<Vec<String>>,
    dismissed: Cell<u32>,
}

impl ProgressSurface for RecordingProgress {
    fn set_progress(&self, progress: &LoadProgress) {
        self.values.borrow_mut().push(progress.value());
        self.labels.borrow_mut().push(progress.label());
    }

    fn dismiss(&self) {
        self.dismissed.set(self.dismissed.get() + 1);
    }
}

/// Logs `(time, event, id)` for every host call.
struct RecordingHost {
    clock: Rc<ManualScheduler>,
    events: RefCell<Vec<(f64, &'static str, u64)>>,
    messages: RefCell<Vec<String>>,
}

impl RecordingHost {
    fn new(clock: Rc<ManualScheduler>) -> Rc<Self> {
        Rc::new(Self {
            clock,
            events: RefCell::new(Vec::new()),
            messages: RefCell::new(Vec::new()),
        })
    }

    fn record(&self, event: &'static str, id: NotificationId) {
        self.events.borrow_mut().push((self.clock.now_ms(), event, id.0));
    }
}

impl NotificationHost for RecordingHost {
    fn mount(&self, id: NotificationId, message: &str, _kind: NotificationKind) {
        self.messages.borrow_mut().push(message.to_string());
        self.record("mount", id);
    }

    fn slide_in(&self, id: NotificationId) {
        self.record("in", id);
    }

    fn slide_out(&self, id: NotificationId) {
        self.record("out", id);
    }

    fn unmount(&self, id: NotificationId) {
        self.record("unmount", id);
    }
}

#[derive(Default)]
struct RecordingSubmit {
    stages: RefCell<Vec<SubmitStage>>,
    resets: Cell<u32>,
}

impl SubmitSurface for RecordingSubmit {
    fn show_stage(&self, stage: SubmitStage) {
        self.stages.borrow_mut().push(stage);
    }

    fn reset_fields(&self) {
        self.resets.set(self.resets.get() + 1);
    }
}

// --- Loader ----------------------------------------------------------------------

#[test]
fn loader_progress_is_monotone_and_finishes_once() {
    let clock = ManualScheduler::new();
    let rng: Rc<RefCell<dyn RandomSource>> = Rc::new(RefCell::new(XorShift64::seeded(42)));
    let surface = Rc::new(RecordingProgress::default());
    let fired = Rc::new(Cell::new(0u32));

    let timing = SiteConfig::default().loader;
    let settle_ms = timing.settle_ms as f64;
    let counter = fired.clone();
    let flag = StartupSequencer::new(clock.clone(), timing, rng, surface.clone())
        .start(move || counter.set(counter.get() + 1));

    let mut guard = 0;
    while surface.values.borrow().last().copied() != Some(100.0) {
        clock.advance(100.0);
        guard += 1;
        assert!(guard < 10_000, "loader never reached 100%");
    }
    assert!(!flag.is_loaded(), "flag must wait for the settle delay");

    clock.advance(settle_ms);
    clock.advance(10_000.0);

    let values = surface.values.borrow();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {values:?}");
    assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
    assert_eq!(surface.labels.borrow().last().map(String::as_str), Some("100%"));
    assert_eq!(surface.dismissed.get(), 1);
    assert_eq!(fired.get(), 1);
    assert!(flag.is_loaded());
    assert_eq!(clock.pending(), 0, "ticking must stop once complete");
}

// --- Scroll-spy ------------------------------------------------------------------

#[test]
fn scroll_spy_prefers_first_section_in_document_order() {
    let sections = vec![
        SectionBounds::new("home", 0.0, 900.0),
        SectionBounds::new("about", 600.0, 900.0),
        SectionBounds::new("contact", 1500.0, 700.0),
    ];
    let mut spy = ScrollSpy::new(150.0, Some("home"));

    // 500 lies in both home [-150, 750) and about [450, 1350).
    assert_eq!(spy.observe(&sections, 500.0), None);
    assert_eq!(spy.current(), Some("home"));

    assert_eq!(spy.observe(&sections, 800.0), Some("about"));
    assert_eq!(spy.observe(&sections, 1400.0), Some("contact"));
    // Past the last section: the previous one stays highlighted.
    assert_eq!(spy.observe(&sections, 5000.0), None);
    assert_eq!(spy.current(), Some("contact"));
}

#[test]
fn scroll_spy_sweep_matches_first_containing_section() {
    let offset = 150.0;
    let sections = vec![
        SectionBounds::new("home", 0.0, 900.0),
        SectionBounds::new("about", 600.0, 900.0),
        SectionBounds::new("skills", 1500.0, 400.0),
        SectionBounds::new("contact", 1900.0, 700.0),
    ];
    let mut spy = ScrollSpy::new(offset, None);
    let mut highlighted: Option<&str> = None;

    for y in (-400..3000).step_by(10).map(f64::from) {
        let expected = sections
            .iter()
            .find(|s| y >= s.top - offset && y < s.top - offset + s.height)
            .map(|s| s.id.as_str());
        assert_eq!(spy.locate(&sections, y).map(|s| s.id.as_str()), expected, "at {y}");

        let changed = expected.filter(|id| highlighted != Some(*id));
        assert_eq!(spy.observe(&sections, y), changed, "at {y}");
        highlighted = expected.or(highlighted);
        assert_eq!(spy.current(), highlighted, "at {y}");
    }
    assert_eq!(spy.current(), Some("contact"));
}

// --- Typing ------------------------------------------------------------------------

#[test]
fn typing_cycles_through_phrases_with_expected_delays() {
    let timing = TypingTiming {
        phrases: vec!["ab".into(), "c".into()],
        ..TypingTiming::default()
    };
    let mut tw = Typewriter::new(timing).unwrap();
    let frames: Vec<(String, u32)> = (0..6)
        .map(|_| {
            let f = tw.step();
            (f.text, f.next_delay_ms)
        })
        .collect();
    let expected = [("a", 100), ("ab", 2000), ("a", 50), ("", 200), ("c", 2000), ("", 200)];
    for (got, want) in frames.iter().zip(expected) {
        assert_eq!((got.0.as_str(), got.1), want);
    }
    assert_eq!(tw.text_index(), 0);
    assert!(!tw.is_deleting());
}

#[test]
fn typing_runner_renders_on_schedule() {
    let clock = ManualScheduler::new();
    let timing = TypingTiming {
        phrases: vec!["hi".into()],
        ..TypingTiming::default()
    };
    let shown = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = shown.clone();
    let scheduler: SharedScheduler = clock.clone();
    let render = Rc::new(move |t: &str| sink.borrow_mut().push(t.to_string()));
    typing::run(Typewriter::new(timing).unwrap(), scheduler, render);

    assert_eq!(*shown.borrow(), ["h"]);
    clock.advance(100.0);
    assert_eq!(*shown.borrow(), ["h", "hi"]);
    clock.advance(1999.0);
    assert_eq!(shown.borrow().len(), 2, "holds the full phrase");
    clock.advance(1.0);
    assert_eq!(shown.borrow().last().map(String::as_str), Some("h"));
}

// --- Project filter --------------------------------------------------------------

#[test]
fn filter_round_trip_restores_every_card() {
    let buttons = vec![Filter::All, Filter::parse(Some("web")), Filter::parse(Some("bot"))];
    let cards = ["web", "bot", "", "web"]
        .map(|c| (!c.is_empty()).then(|| c.to_string()))
        .to_vec();
    let mut filter = ProjectFilter::new(buttons, cards);

    let all = filter.select(0).unwrap();
    assert!(all.iter().all(|p| p.visible));

    filter.select(1).unwrap();
    assert_eq!(filter.visible(), vec![0, 3]);
    assert_eq!(filter.active_button(), Some(1));

    let again = filter.select(0).unwrap();
    assert_eq!(again, all);
    assert_eq!(filter.select(9), None);
    assert_eq!(filter.active_button(), Some(0));
}

// --- Konami ------------------------------------------------------------------------

#[test]
fn konami_fires_once_per_complete_sequence() {
    let mut detector = SequenceDetector::konami();
    let hits = |d: &mut SequenceDetector, keys: &[&str]| keys.iter().filter(|k| d.push(k)).count();

    assert_eq!(hits(&mut detector, &KONAMI), 1);
    assert_eq!(hits(&mut detector, &KONAMI), 1);

    let mut noisy = KONAMI.to_vec();
    noisy.insert(5, "KeyX");
    assert_eq!(hits(&mut SequenceDetector::konami(), &noisy), 0);

    let mut prefixed = vec!["Enter", "ArrowUp"];
    prefixed.extend_from_slice(&KONAMI);
    assert_eq!(hits(&mut SequenceDetector::konami(), &prefixed), 1);
}

#[test]
fn konami_any_wrong_key_blocks_activation() {
    let hits = |keys: &[&str]| {
        let mut d = SequenceDetector::konami();
        keys.iter().filter(|k| d.push(k)).count()
    };
    for i in 0..KONAMI.len() {
        let mut replaced = KONAMI.to_vec();
        replaced[i] = "KeyX";
        assert_eq!(hits(&replaced), 0, "wrong key at {i}");

        if i > 0 {
            let mut inserted = KONAMI.to_vec();
            inserted.insert(i, "KeyX");
            assert_eq!(hits(&inserted), 0, "extra key at {i}");
        }
    }
}

// --- Notifications ---------------------------------------------------------------

#[test]
fn overlapping_notifications_leave_independently() {
    let clock = ManualScheduler::new();
    let host = RecordingHost::new(clock.clone());
    let notifier = Notifier::new(clock.clone(), host.clone(), NotificationTiming::default());

    let a = notifier.show("first", NotificationKind::Info);
    clock.advance(1000.0);
    let b = notifier.show("second", NotificationKind::Success);
    clock.advance(10_000.0);

    assert_ne!(a, b);
    let expected: Vec<(f64, &str, u64)> = vec![
        (0.0, "mount", 0),
        (100.0, "in", 0),
        (1000.0, "mount", 1),
        (1100.0, "in", 1),
        (3000.0, "out", 0),
        (3300.0, "unmount", 0),
        (4000.0, "out", 1),
        (4300.0, "unmount", 1),
    ];
    assert_eq!(*host.events.borrow(), expected);
    assert_eq!(clock.pending(), 0);
}

// --- Contact form ------------------------------------------------------------------

#[test]
fn contact_form_walks_through_stages_then_resets() {
    let clock = ManualScheduler::new();
    let host = RecordingHost::new(clock.clone());
    let notifier = Notifier::new(clock.clone(), host.clone(), NotificationTiming::default());
    let surface = Rc::new(RecordingSubmit::default());
    let form = ContactForm::new(clock.clone(), FormTiming::default(), surface.clone(), notifier);

    assert!(form.submit());
    assert_eq!(form.stage(), SubmitStage::Pending);
    assert!(!form.submit(), "second submit while pending is ignored");

    clock.advance(1500.0);
    assert_eq!(form.stage(), SubmitStage::Sent);
    assert!(!form.submit());

    clock.advance(1999.0);
    assert_eq!(form.stage(), SubmitStage::Sent);
    assert_eq!(surface.resets.get(), 0);

    clock.advance(1.0);
    assert_eq!(form.stage(), SubmitStage::Idle);
    assert_eq!(surface.resets.get(), 1);
    assert_eq!(*host.messages.borrow(), [SUCCESS_MESSAGE]);
    assert_eq!(
        *surface.stages.borrow(),
        [SubmitStage::Pending, SubmitStage::Sent, SubmitStage::Idle]
    );

    assert!(form.submit(), "idle again, so a new submission starts");
}

// --- Skill bars --------------------------------------------------------------------

#[test]
fn skill_bar_plays_and_reverses_around_the_start_line() {
    fn apply(width: &mut f64, target: f64, action: Option<ToggleAction>) {
        match action {
            Some(ToggleAction::Play) => *width = target,
            Some(ToggleAction::Reverse) => *width = 0.0,
            None => {}
        }
    }
    let viewport = 1000.0;
    let target = folio_fx::anim::skill_target(Some("80")).unwrap();
    let mut toggle = ScrollToggle::new(0.8);
    let mut width = 0.0;

    for (top, want) in [(1200.0, 0.0), (790.0, 80.0), (500.0, 80.0), (900.0, 0.0), (100.0, 80.0)] {
        apply(&mut width, target, toggle.update(top, viewport));
        assert_eq!(width, want, "element top at {top}");
    }
}
