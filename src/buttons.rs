//! Button sampling and debouncing.
//!
//! Every button keeps a shift register of its last samples. A button is
//! down once the last `depth` samples all read low and up once they all read
//! high; anything in between keeps the previous state.

use core::convert::Infallible;

use embedded_hal::digital::v2::InputPin;

use crate::gesture::{BUTTON_DOWN, BUTTON_HIGH_UNIT, BUTTON_LOW_UNIT, BUTTON_UP};

/// Source of the decoded button bitmask.
pub trait ButtonDecoder {
    fn poll_buttons(&mut self) -> u8;
}

/// Lets a closure act as a decoder, e.g. one that locks a shared resource.
impl<F> ButtonDecoder for F
where
    F: FnMut() -> u8,
{
    fn poll_buttons(&mut self) -> u8 {
        self()
    }
}

/// Bits reported for each pin, in the order the pins are handed over.
pub const BUTTON_BITS: [u8; 4] = [BUTTON_LOW_UNIT, BUTTON_HIGH_UNIT, BUTTON_DOWN, BUTTON_UP];

// capture pin, sample history and debounced state
struct Button<P> {
    pin: P,
    history: u8,
    down: bool,
}

impl<P> Button<P>
where
    P: InputPin<Error = Infallible>,
{
    fn sample(&mut self, window: u8) {
        self.history <<= 1;
        if self.pin.is_high().unwrap_or(true) {
            self.history |= 1;
        }
        match self.history & window {
            0 => self.down = true,
            w if w == window => self.down = false,
            _ => {}
        }
    }
}

/// Four active-low buttons: low-unit select, high-unit select, down, up.
pub struct ButtonBank<P> {
    buttons: [Button<P>; 4],
    window: u8,
    mask: u8,
}

impl<P> ButtonBank<P>
where
    P: InputPin<Error = Infallible>,
{
    /// `depth` is the number of matching samples needed to change state,
    /// clamped to 1..=8.
    pub fn new(pins: [P; 4], depth: u8) -> Self {
        let depth = depth.clamp(1, 8);
        let window = (0xFFu16 >> (8 - depth)) as u8;
        let [a, b, c, d] = pins;
        let button = |pin| Button {
            pin,
            history: 0xFF,
            down: false,
        };
        Self {
            buttons: [button(a), button(b), button(c), button(d)],
            window,
            mask: 0,
        }
    }

    /// Takes one sample of every pin. Returns `true` when a button went down
    /// that was up before. Releases never report, even with other buttons
    /// still held.
    pub fn sample(&mut self) -> bool {
        let mut mask = 0;
        for (button, bit) in self.buttons.iter_mut().zip(BUTTON_BITS) {
            button.sample(self.window);
            if button.down {
                mask |= bit;
            }
        }
        let pressed = mask & !self.mask != 0;
        if mask != self.mask {
            debug!("buttons {=u8:#x}", mask);
        }
        self.mask = mask;
        pressed
    }

    /// Current debounced mask.
    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl<P> ButtonDecoder for ButtonBank<P>
where
    P: InputPin<Error = Infallible>,
{
    fn poll_buttons(&mut self) -> u8 {
        self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct MockPin(Rc<Cell<bool>>);

    impl MockPin {
        fn released() -> Self {
            Self(Rc::new(Cell::new(true)))
        }

        fn press(&self) {
            self.0.set(false);
        }

        fn release(&self) {
            self.0.set(true);
        }
    }

    impl InputPin for MockPin {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }

        fn is_low(&self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    fn make_bank(depth: u8) -> ([MockPin; 4], ButtonBank<MockPin>) {
        let pins: [MockPin; 4] = core::array::from_fn(|_| MockPin::released());
        let bank = ButtonBank::new(pins.clone(), depth);
        (pins, bank)
    }

    #[test]
    fn press_needs_stable_samples() {
        let (pins, mut bank) = make_bank(4);
        pins[3].press();
        assert!(!bank.sample());
        assert!(!bank.sample());
        assert!(!bank.sample());
        assert_eq!(bank.mask(), 0);
        assert!(bank.sample());
        assert_eq!(bank.mask(), BUTTON_UP);
        assert_eq!(bank.poll_buttons(), BUTTON_UP);
    }

    #[test]
    fn holding_reports_one_press() {
        let (pins, mut bank) = make_bank(2);
        pins[0].press();
        let presses = (0..50).filter(|_| bank.sample()).count();
        assert_eq!(presses, 1);
        assert_eq!(bank.mask(), BUTTON_LOW_UNIT);
    }

    #[test]
    fn bounce_is_filtered() {
        let (pins, mut bank) = make_bank(3);
        for _ in 0..10 {
            pins[2].press();
            assert!(!bank.sample());
            pins[2].release();
            assert!(!bank.sample());
        }
        assert_eq!(bank.mask(), 0);
    }

    #[test]
    fn both_unit_buttons_confirm() {
        let (pins, mut bank) = make_bank(1);
        pins[0].press();
        assert!(bank.sample());
        pins[1].press();
        assert!(bank.sample());
        assert_eq!(bank.mask(), BUTTON_LOW_UNIT | BUTTON_HIGH_UNIT);
    }

    #[test]
    fn release_clears_without_press_event() {
        let (pins, mut bank) = make_bank(1);
        pins[2].press();
        assert!(bank.sample());
        pins[2].release();
        assert!(!bank.sample());
        assert_eq!(bank.mask(), 0);
    }

    #[test]
    fn partial_release_is_not_a_press() {
        let (pins, mut bank) = make_bank(1);
        pins[0].press();
        pins[1].press();
        assert!(bank.sample());
        assert_eq!(bank.mask(), BUTTON_LOW_UNIT | BUTTON_HIGH_UNIT);

        pins[1].release();
        assert!(!bank.sample());
        assert_eq!(bank.mask(), BUTTON_LOW_UNIT);

        pins[1].press();
        assert!(bank.sample());
    }

    #[test]
    fn releasing_up_of_up_and_down_is_not_a_press() {
        let (pins, mut bank) = make_bank(2);
        pins[2].press();
        pins[3].press();
        assert_eq!((0..4).filter(|_| bank.sample()).count(), 1);

        pins[3].release();
        assert_eq!((0..4).filter(|_| bank.sample()).count(), 0);
        assert_eq!(bank.mask(), BUTTON_DOWN);
    }

    #[test]
    fn depth_is_clamped() {
        let (pins, mut bank) = make_bank(0);
        pins[1].press();
        assert!(bank.sample());
        assert_eq!(bank.mask(), BUTTON_HIGH_UNIT);

        let (pins, mut bank) = make_bank(20);
        pins[1].press();
        let first = (1..=8).find(|_| bank.sample());
        assert_eq!(first, Some(8));
    }
}
