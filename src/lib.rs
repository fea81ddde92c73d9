//! Control logic for a four digit kitchen timer.
//!
//! The [`Controller`] owns the timer state and is driven by three one-shot
//! flags (refresh tick, second tick, button sample). The hardware it talks to
//! sits behind the traits in [`display`], [`buttons`] and [`buzzer`], so the
//! same state machine runs on the RP2040 and in host tests.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod buttons;
pub mod buzzer;
pub mod config;
pub mod controller;
pub mod digits;
pub mod display;
pub mod gesture;
pub mod signal;

pub use buttons::{ButtonBank, ButtonDecoder};
pub use buzzer::{Buzzer, PinBuzzer};
pub use config::TimerConfig;
pub use controller::{Board, Controller, Mode, Outcome, Step};
pub use digits::{TimerDigits, Unit};
pub use display::{DigitDisplay, Indicator, Multiplexer, SegmentDisplay};
pub use gesture::{Gesture, GestureLatch};
pub use signal::{EventFlag, Signal, SignalSource, Signals};
