//! Button bitmask decoding and the edge-triggered gesture latch.

use crate::digits::Unit;

pub const BUTTON_LOW_UNIT: u8 = 0x01;
pub const BUTTON_HIGH_UNIT: u8 = 0x02;
pub const BUTTON_DOWN: u8 = 0x04;
pub const BUTTON_UP: u8 = 0x08;
pub const BUTTON_CONFIRM: u8 = BUTTON_LOW_UNIT | BUTTON_HIGH_UNIT;

/// What the user asked for with the current button combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Gesture {
    #[default]
    None,
    Select(Unit),
    /// Both unit buttons together: start the countdown, or leave.
    Confirm,
    Increment,
    Decrement,
}

impl Gesture {
    /// Decodes a raw button bitmask. Any combination without a meaning is
    /// [`Gesture::None`].
    pub fn decode(mask: u8) -> Self {
        match mask {
            BUTTON_LOW_UNIT => Gesture::Select(Unit::Low),
            BUTTON_HIGH_UNIT => Gesture::Select(Unit::High),
            BUTTON_CONFIRM => Gesture::Confirm,
            BUTTON_UP => Gesture::Increment,
            BUTTON_DOWN => Gesture::Decrement,
            _ => Gesture::None,
        }
    }

    pub fn is_confirm(self) -> bool {
        self == Gesture::Confirm
    }
}

/// Holds the gesture from the latest button sample until it is acted upon.
///
/// Taking the gesture resets it, so a button held across many loop passes
/// only fires again once a new sample is latched.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureLatch {
    pending: Gesture,
}

impl GestureLatch {
    pub const fn new() -> Self {
        Self {
            pending: Gesture::None,
        }
    }

    /// Stores the decoded gesture of a fresh sample, replacing any older one.
    pub fn latch(&mut self, mask: u8) -> Gesture {
        self.pending = Gesture::decode(mask);
        self.pending
    }

    pub fn take(&mut self) -> Gesture {
        core::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending = Gesture::None;
    }
}
