use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

/// On/off alarm output.
pub trait Buzzer {
    fn set_alarm(&mut self, on: bool);
}

impl<T: Buzzer + ?Sized> Buzzer for &mut T {
    fn set_alarm(&mut self, on: bool) {
        (**self).set_alarm(on)
    }
}

/// Buzzer driven straight from a GPIO, high = sounding.
pub struct PinBuzzer<P> {
    pin: P,
    on: bool,
}

impl<P> PinBuzzer<P>
where
    P: OutputPin<Error = Infallible>,
{
    pub fn new(mut pin: P) -> Self {
        pin.set_low().ok();
        Self { pin, on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<P> Buzzer for PinBuzzer<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_alarm(&mut self, on: bool) {
        if on {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        if on != self.on {
            trace!("buzzer {}", on);
        }
        self.on = on;
    }
}
