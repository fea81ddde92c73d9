use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::digits::TimerDigits;

/// Segment patterns for 0-9, bit 7 = `a` down to bit 0 = `dp`.
pub const SEGMENTS: [u8; 10] = [
    0xFC, // 0
    0x60, // 1
    0xDA, // 2
    0xF2, // 3
    0x66, // 4
    0xB6, // 5
    0xBE, // 6
    0xE0, // 7
    0xFE, // 8
    0xF6, // 9
];

pub const DIGIT_COUNT: u8 = 4;

/// The two LEDs beside the digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Indicator {
    Left,
    Right,
}

/// A four position numeric display driven one position at a time.
pub trait DigitDisplay {
    /// Shows `value` (0-9) on position `slot`; slot 0 is the rightmost.
    fn render(&mut self, slot: u8, value: u8);

    /// Turns every position off.
    fn blank_all(&mut self);

    fn set_indicator(&mut self, side: Indicator, on: bool);
}

impl<T: DigitDisplay + ?Sized> DigitDisplay for &mut T {
    fn render(&mut self, slot: u8, value: u8) {
        (**self).render(slot, value)
    }

    fn blank_all(&mut self) {
        (**self).blank_all()
    }

    fn set_indicator(&mut self, side: Indicator, on: bool) {
        (**self).set_indicator(side, on)
    }
}

/// Round-robin position for persistence-of-vision multiplexing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Multiplexer {
    position: u8,
}

impl Multiplexer {
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Slot that the next [`Multiplexer::refresh`] will draw.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Draws the digit for the current slot and moves on to the next one.
    pub fn refresh<D: DigitDisplay>(&mut self, digits: &TimerDigits, display: &mut D) {
        let slot = self.position;
        display.render(slot, digits.slot(slot));
        self.position = (slot + 1) % DIGIT_COUNT;
        trace!("mux slot {}", slot);
    }
}

/// Direct-drive seven segment display: four digit-select pins (low = on),
/// eight segment pins `a..g, dp` (high = lit) and the two indicator LEDs.
pub struct SegmentDisplay<P> {
    digits: [P; 4],
    segments: [P; 8],
    left: P,
    right: P,
}

impl<P> SegmentDisplay<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Takes the pins and switches everything off. `digits` is ordered by
    /// slot, `segments` from `a` to `dp`.
    pub fn new(digits: [P; 4], segments: [P; 8], left: P, right: P) -> Self {
        let mut display = Self {
            digits,
            segments,
            left,
            right,
        };
        display.blank_all();
        display.write_segments(0);
        display.set_indicator(Indicator::Left, false);
        display.set_indicator(Indicator::Right, false);
        display
    }

    fn select(&mut self, slot: u8) {
        for (i, pin) in self.digits.iter_mut().enumerate() {
            if i == slot as usize {
                pin.set_low().ok();
            } else {
                pin.set_high().ok();
            }
        }
    }

    fn write_segments(&mut self, pattern: u8) {
        for (i, pin) in self.segments.iter_mut().enumerate() {
            if pattern & (0x80 >> i) != 0 {
                pin.set_high().ok();
            } else {
                pin.set_low().ok();
            }
        }
    }
}

impl<P> DigitDisplay for SegmentDisplay<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn render(&mut self, slot: u8, value: u8) {
        // Unknown slots deselect everything, out of range values show blank.
        self.select(slot);
        self.write_segments(SEGMENTS.get(value as usize).copied().unwrap_or(0));
    }

    fn blank_all(&mut self) {
        for pin in self.digits.iter_mut() {
            pin.set_high().ok();
        }
    }

    fn set_indicator(&mut self, side: Indicator, on: bool) {
        let pin = match side {
            Indicator::Left => &mut self.left,
            Indicator::Right => &mut self.right,
        };
        if on {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
    }
}
