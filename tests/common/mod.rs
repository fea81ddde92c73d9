//! Scripted signals and recording adapters for driving the controller.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use kitchen_timer::{Board, Buzzer, DigitDisplay, Indicator, Signal, SignalSource};

pub use kitchen_timer::gesture::{
    BUTTON_CONFIRM as CONFIRM, BUTTON_DOWN as DOWN, BUTTON_HIGH_UNIT as HIGH,
    BUTTON_LOW_UNIT as LOW, BUTTON_UP as UP,
};

/// Signals pending during one loop pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frame {
    pub refresh: bool,
    pub second: bool,
    /// A button sample, carrying the mask the decoder reports from then on.
    pub buttons: Option<u8>,
}

impl Frame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn refresh() -> Self {
        Self {
            refresh: true,
            ..Self::default()
        }
    }

    pub fn second() -> Self {
        Self {
            second: true,
            ..Self::default()
        }
    }

    pub fn press(mask: u8) -> Self {
        Self {
            buttons: Some(mask),
            ..Self::default()
        }
    }

    pub fn all(mask: u8) -> Self {
        Self {
            refresh: true,
            second: true,
            buttons: Some(mask),
        }
    }
}

/// Replays frames, one value per signal per pass.
pub struct ScriptedSignals {
    refresh: VecDeque<bool>,
    second: VecDeque<bool>,
    buttons: VecDeque<Option<u8>>,
    mask: Rc<Cell<u8>>,
    starved: u32,
}

impl ScriptedSignals {
    pub fn push(&mut self, frame: Frame) {
        self.refresh.push_back(frame.refresh);
        self.second.push_back(frame.second);
        self.buttons.push_back(frame.buttons);
    }

    pub fn extend(&mut self, frames: impl IntoIterator<Item = Frame>) {
        for frame in frames {
            self.push(frame);
        }
    }

    pub fn pending(&self) -> usize {
        self.refresh.len()
    }

    fn starve(&mut self) -> bool {
        self.starved += 1;
        assert!(self.starved < 10_000, "signal script exhausted");
        false
    }
}

impl SignalSource for ScriptedSignals {
    fn take(&mut self, signal: Signal) -> bool {
        match signal {
            Signal::Refresh => match self.refresh.pop_front() {
                Some(v) => v,
                None => self.starve(),
            },
            Signal::Second => match self.second.pop_front() {
                Some(v) => v,
                None => self.starve(),
            },
            Signal::Buttons => match self.buttons.pop_front() {
                Some(Some(mask)) => {
                    self.mask.set(mask);
                    true
                }
                Some(None) => false,
                None => self.starve(),
            },
        }
    }
}

/// What the adapters were asked to do.
#[derive(Debug, Default)]
pub struct Trace {
    pub renders: Vec<(u8, u8)>,
    pub blanks: usize,
    pub left: bool,
    pub right: bool,
    pub buzzer: bool,
    pub buzzer_log: Vec<bool>,
}

impl Trace {
    pub fn slots(&self) -> Vec<u8> {
        self.renders.iter().map(|&(slot, _)| slot).collect()
    }
}

pub struct RecordingDisplay(Rc<RefCell<Trace>>);

impl DigitDisplay for RecordingDisplay {
    fn render(&mut self, slot: u8, value: u8) {
        assert!(slot < 4, "slot {slot} out of range");
        assert!(value < 10, "value {value} out of range");
        self.0.borrow_mut().renders.push((slot, value));
    }

    fn blank_all(&mut self) {
        self.0.borrow_mut().blanks += 1;
    }

    fn set_indicator(&mut self, side: Indicator, on: bool) {
        let mut trace = self.0.borrow_mut();
        match side {
            Indicator::Left => trace.left = on,
            Indicator::Right => trace.right = on,
        }
    }
}

pub struct RecordingBuzzer(Rc<RefCell<Trace>>);

impl Buzzer for RecordingBuzzer {
    fn set_alarm(&mut self, on: bool) {
        let mut trace = self.0.borrow_mut();
        trace.buzzer = on;
        trace.buzzer_log.push(on);
    }
}

pub type Bench = Board<ScriptedSignals, RecordingDisplay, Box<dyn FnMut() -> u8>, RecordingBuzzer>;

/// A board whose decoder reports the mask of the last scripted sample.
pub fn bench(frames: impl IntoIterator<Item = Frame>) -> (Bench, Rc<RefCell<Trace>>) {
    let trace = Rc::new(RefCell::new(Trace::default()));
    let mask = Rc::new(Cell::new(0));
    let mut signals = ScriptedSignals {
        refresh: VecDeque::new(),
        second: VecDeque::new(),
        buttons: VecDeque::new(),
        mask: mask.clone(),
        starved: 0,
    };
    signals.extend(frames);

    let board = Board {
        signals,
        display: RecordingDisplay(trace.clone()),
        buttons: Box::new(move || mask.get()) as Box<dyn FnMut() -> u8>,
        buzzer: RecordingBuzzer(trace.clone()),
    };
    (board, trace)
}

pub fn presses(mask: u8, count: usize) -> impl Iterator<Item = Frame> {
    std::iter::repeat(Frame::press(mask)).take(count)
}
