//! Typewriter effect over a cyclic list of phrases.

use std::rc::Rc;

use crate::config::TypingTiming;
use crate::schedule::SharedScheduler;

/// One rendered step: the text to display and how long until the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timing: TypingTiming,
    text_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    /// `None` when there is nothing to type. Empty phrases are skipped.
    pub fn new(timing: TypingTiming) -> Option<Self> {
        let phrases: Vec<Vec<char>> = timing
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            timing,
            text_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn step(&mut self) -> TypingFrame {
        let phrase = &self.phrases[self.text_index];
        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(phrase.len());
        }
        let text: String = phrase[..self.char_index].iter().collect();

        let mut delay = if self.deleting {
            self.timing.delete_ms
        } else {
            self.timing.type_ms
        };
        if !self.deleting && self.char_index == phrase.len() {
            delay = self.timing.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.text_index = (self.text_index + 1) % self.phrases.len();
            delay = self.timing.next_ms;
        }
        TypingFrame {
            text,
            next_delay_ms: delay,
        }
    }
}

/// Drive `typewriter` forever, handing each frame's text to `render`.
pub fn run(mut typewriter: Typewriter, scheduler: SharedScheduler, render: Rc<dyn Fn(&str)>) {
    let frame = typewriter.step();
    render(&frame.text);
    let next = scheduler.clone();
    scheduler.schedule(frame.next_delay_ms, Box::new(move || run(typewriter, next, render)));
}
