//! The timer state machine.
//!
//! The controller is polled in a busy loop. Each call to [`Controller::step`]
//! is one pass of the loop for the active [`Mode`]: it consumes whichever of
//! the three signals are pending, in a fixed order, and reports whether to
//! keep going, change mode, or hand control back to the caller.
//!
//! ```text
//!   SettingTime ──confirm──► (return)
//!
//!   CountingDown ──zero──► Alarm ──confirm──► (return, Acknowledged)
//!        │
//!        └──confirm──► (return, Aborted)
//! ```

use crate::buttons::ButtonDecoder;
use crate::buzzer::Buzzer;
use crate::config::TimerConfig;
use crate::digits::{TimerDigits, Unit};
use crate::display::{DigitDisplay, Indicator, Multiplexer};
use crate::gesture::{Gesture, GestureLatch};
use crate::signal::{Signal, SignalSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Mode {
    SettingTime,
    CountingDown,
    Alarm,
}

/// Result of one loop pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Step {
    Continue,
    /// The pass ended by switching into this mode.
    Enter(Mode),
    /// The user confirmed; the current run is over.
    Exit,
}

/// How a countdown run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Outcome {
    /// Left before reaching zero.
    Aborted,
    /// Reached zero and the alarm was acknowledged.
    Acknowledged,
}

/// Everything the controller talks to.
pub struct Board<S, D, B, A> {
    pub signals: S,
    pub display: D,
    pub buttons: B,
    pub buzzer: A,
}

/// Fires once every `period` second ticks.
#[derive(Clone, Copy, Debug)]
struct DecrementTrigger {
    period: u8,
    remaining: u8,
}

impl DecrementTrigger {
    fn new(period: u8) -> Self {
        let period = period.max(1);
        Self {
            period,
            remaining: period,
        }
    }

    fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}

pub struct Controller {
    config: TimerConfig,
    mode: Mode,
    /// Duration chosen in the editor.
    duration: TimerDigits,
    /// Working copy while counting down.
    remaining: TimerDigits,
    blink: bool,
    mux: Multiplexer,
    selection: Option<Unit>,
    latch: GestureLatch,
    trigger: DecrementTrigger,
}

impl Controller {
    pub fn new(config: TimerConfig) -> Self {
        Self::with_duration(config, TimerDigits::ZERO)
    }

    /// Starts with `duration` preset, as if it had been dialled in.
    pub fn with_duration(config: TimerConfig, duration: TimerDigits) -> Self {
        Self {
            config,
            mode: Mode::SettingTime,
            duration,
            remaining: duration,
            blink: true,
            mux: Multiplexer::new(),
            selection: None,
            latch: GestureLatch::new(),
            trigger: DecrementTrigger::new(config.seconds_per_unit),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn duration(&self) -> TimerDigits {
        self.duration
    }

    /// Digits the countdown is showing.
    pub fn remaining(&self) -> TimerDigits {
        self.remaining
    }

    pub fn blink_on(&self) -> bool {
        self.blink
    }

    pub fn selection(&self) -> Option<Unit> {
        self.selection
    }

    pub fn mux_position(&self) -> u8 {
        self.mux.position()
    }

    /// Runs the editor until the user confirms, returning the duration.
    pub fn run_set_time<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> TimerDigits
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
        A: Buzzer,
    {
        self.begin_set_time();
        while self.step(board) != Step::Exit {}
        info!("duration set to {}", self.duration);
        self.duration
    }

    /// Counts the chosen duration down and sounds the alarm at zero.
    /// Returns once the user confirms, either early or during the alarm.
    pub fn run_countdown<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> Outcome
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
        A: Buzzer,
    {
        self.begin_countdown();
        while self.step(board) != Step::Exit {}
        let outcome = match self.mode {
            Mode::Alarm => Outcome::Acknowledged,
            _ => Outcome::Aborted,
        };
        info!("countdown finished: {}", outcome);
        outcome
    }

    /// Enters the editor with no unit selected and no pending gesture.
    pub fn begin_set_time(&mut self) {
        self.mode = Mode::SettingTime;
        self.selection = None;
        self.latch.clear();
        info!("setting time");
    }

    /// Enters the countdown with a fresh copy of the chosen duration.
    pub fn begin_countdown(&mut self) {
        self.mode = Mode::CountingDown;
        self.remaining = self.duration;
        self.trigger = DecrementTrigger::new(self.config.seconds_per_unit);
        self.latch.clear();
        info!("counting down from {}", self.remaining);
    }

    /// One pass of the loop for the current mode.
    pub fn step<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> Step
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
        A: Buzzer,
    {
        let step = match self.mode {
            Mode::SettingTime => self.step_set_time(board),
            Mode::CountingDown => self.step_countdown(board),
            Mode::Alarm => self.step_alarm(board),
        };
        if let Step::Enter(mode) = step {
            info!("{} -> {}", self.mode, mode);
            self.mode = mode;
        }
        step
    }

    fn step_set_time<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> Step
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
    {
        if board.signals.take(Signal::Refresh) {
            if self.blink {
                self.mux.refresh(&self.duration, &mut board.display);
            } else {
                board.display.blank_all();
            }
        }

        if board.signals.take(Signal::Second) {
            self.blink = !self.blink;
        }

        if board.signals.take(Signal::Buttons) {
            self.latch.latch(board.buttons.poll_buttons());
        }

        let gesture = self.latch.take();
        match gesture {
            Gesture::None => {}
            Gesture::Confirm => return Step::Exit,
            Gesture::Select(unit) => self.selection = Some(unit),
            Gesture::Increment => {
                if let Some(unit) = self.selection {
                    self.duration.increment(unit);
                }
            }
            Gesture::Decrement => {
                if let Some(unit) = self.selection {
                    self.duration.decrement(unit);
                }
            }
        }
        if gesture != Gesture::None {
            debug!("{} -> {}", gesture, self.duration);
        }
        Step::Continue
    }

    fn step_countdown<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> Step
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
    {
        if board.signals.take(Signal::Refresh) {
            self.mux.refresh(&self.remaining, &mut board.display);
        }

        if board.signals.take(Signal::Buttons) {
            self.latch.latch(board.buttons.poll_buttons());
        }
        if self.latch.take().is_confirm() {
            return Step::Exit;
        }

        if board.signals.take(Signal::Second) && self.trigger.tick() {
            self.remaining.count_down();
            debug!("remaining {}", self.remaining);
        }

        if self.remaining.is_zero() {
            return Step::Enter(Mode::Alarm);
        }
        Step::Continue
    }

    fn step_alarm<S, D, B, A>(&mut self, board: &mut Board<S, D, B, A>) -> Step
    where
        S: SignalSource,
        D: DigitDisplay,
        B: ButtonDecoder,
        A: Buzzer,
    {
        if board.signals.take(Signal::Second) {
            self.blink = !self.blink;
            sound(board, self.blink);
        }

        if board.signals.take(Signal::Refresh) {
            self.mux.refresh(&self.remaining, &mut board.display);
        }

        if board.signals.take(Signal::Buttons) {
            self.latch.latch(board.buttons.poll_buttons());
        }
        if self.latch.take().is_confirm() {
            sound(board, false);
            return Step::Exit;
        }
        Step::Continue
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(TimerConfig::DEFAULT)
    }
}

fn sound<S, D, B, A>(board: &mut Board<S, D, B, A>, on: bool)
where
    D: DigitDisplay,
    A: Buzzer,
{
    board.buzzer.set_alarm(on);
    board.display.set_indicator(Indicator::Left, on);
    board.display.set_indicator(Indicator::Right, on);
}
