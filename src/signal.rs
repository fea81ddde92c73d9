//! One-shot flags raised by the timer interrupts and consumed by the
//! controller loop.

/// The three periodic events the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Signal {
    /// Display refresh tick, every 2 ms.
    Refresh,
    /// Blink / countdown tick, every second.
    Second,
    /// A new button sample is ready to be polled.
    Buttons,
}

/// A flag that records "happened at least once since last taken".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventFlag(bool);

impl EventFlag {
    pub const fn new() -> Self {
        Self(false)
    }

    pub fn raise(&mut self) {
        self.0 = true;
    }

    /// Reads and clears the flag. Repeated raises before a take coalesce.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.0, false)
    }

    pub fn is_raised(&self) -> bool {
        self.0
    }
}

/// Where the controller takes its events from.
pub trait SignalSource {
    /// Consumes `signal`, returning whether it was pending.
    fn take(&mut self, signal: Signal) -> bool;
}

/// Flag storage shared between the interrupt handlers and the idle loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Signals {
    refresh: EventFlag,
    second: EventFlag,
    buttons: EventFlag,
}

impl Signals {
    pub const fn new() -> Self {
        Self {
            refresh: EventFlag::new(),
            second: EventFlag::new(),
            buttons: EventFlag::new(),
        }
    }

    pub fn raise(&mut self, signal: Signal) {
        self.flag(signal).raise();
    }

    fn flag(&mut self, signal: Signal) -> &mut EventFlag {
        match signal {
            Signal::Refresh => &mut self.refresh,
            Signal::Second => &mut self.second,
            Signal::Buttons => &mut self.buttons,
        }
    }
}

impl SignalSource for Signals {
    fn take(&mut self, signal: Signal) -> bool {
        self.flag(signal).take()
    }
}

/// Lets a closure act as a source, e.g. one that locks a shared resource.
impl<F> SignalSource for F
where
    F: FnMut(Signal) -> bool,
{
    fn take(&mut self, signal: Signal) -> bool {
        self(signal)
    }
}
