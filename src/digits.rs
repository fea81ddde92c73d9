/// Four decimal digits `D3 D2 D1 D0`, read left to right.
///
/// `D3 D2` form the high unit, a plain two digit decimal counter. `D1 D0`
/// form the low unit, which counts to 59 before wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct TimerDigits {
    d: [u8; 4],
}

/// Which digit pair an edit applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Unit {
    /// `D1 D0`, 00 to 59.
    Low,
    /// `D3 D2`, 00 to 99.
    High,
}

impl TimerDigits {
    pub const ZERO: Self = Self { d: [0; 4] };

    /// Builds digits from `D3, D2, D1, D0`. `D1` is clamped to 5, the others
    /// to 9.
    pub const fn new(d3: u8, d2: u8, d1: u8, d0: u8) -> Self {
        Self {
            d: [clamp(d0, 9), clamp(d1, 5), clamp(d2, 9), clamp(d3, 9)],
        }
    }

    /// Digit shown in display slot `slot`; slot 0 is the rightmost (`D0`).
    pub fn slot(&self, slot: u8) -> u8 {
        self.d[(slot & 0x03) as usize]
    }

    /// Digits as `[D3, D2, D1, D0]`.
    pub fn to_array(&self) -> [u8; 4] {
        [self.d[3], self.d[2], self.d[1], self.d[0]]
    }

    pub fn is_zero(&self) -> bool {
        self.d == [0; 4]
    }

    /// Steps the selected unit up by one, wrapping 59 -> 00 or 99 -> 00.
    pub fn increment(&mut self, unit: Unit) {
        match unit {
            Unit::Low => {
                let [d0, d1, ..] = &mut self.d;
                if *d0 < 9 {
                    *d0 += 1;
                } else if *d1 < 5 {
                    *d1 += 1;
                    *d0 = 0;
                } else {
                    *d1 = 0;
                    *d0 = 0;
                }
            }
            Unit::High => {
                let [.., d2, d3] = &mut self.d;
                if *d2 < 9 {
                    *d2 += 1;
                } else if *d3 < 9 {
                    *d3 += 1;
                    *d2 = 0;
                } else {
                    *d3 = 0;
                    *d2 = 0;
                }
            }
        }
    }

    /// Steps the selected unit down by one, wrapping 00 -> 59 or 00 -> 99.
    pub fn decrement(&mut self, unit: Unit) {
        match unit {
            Unit::Low => {
                let [d0, d1, ..] = &mut self.d;
                if *d0 > 0 {
                    *d0 -= 1;
                } else if *d1 > 0 {
                    *d1 -= 1;
                    *d0 = 9;
                } else {
                    *d1 = 5;
                    *d0 = 9;
                }
            }
            Unit::High => {
                let [.., d2, d3] = &mut self.d;
                if *d2 > 0 {
                    *d2 -= 1;
                } else if *d3 > 0 {
                    *d3 -= 1;
                    *d2 = 9;
                } else {
                    *d3 = 9;
                    *d2 = 9;
                }
            }
        }
    }

    /// One countdown step across all four digits.
    ///
    /// Borrows from the high unit when the low unit is exhausted, reloading
    /// the low unit to 59. Stays at 0000 instead of wrapping. Returns `false`
    /// when nothing was left to count.
    pub fn count_down(&mut self) -> bool {
        let [d0, d1, d2, d3] = &mut self.d;
        if *d0 > 0 {
            *d0 -= 1;
        } else if *d1 > 0 {
            *d1 -= 1;
            *d0 = 9;
        } else if *d2 > 0 {
            *d2 -= 1;
            *d1 = 5;
            *d0 = 9;
        } else if *d3 > 0 {
            *d3 -= 1;
            *d2 = 9;
            *d1 = 5;
            *d0 = 9;
        } else {
            return false;
        }
        true
    }
}

const fn clamp(v: u8, max: u8) -> u8 {
    if v > max {
        max
    } else {
        v
    }
}
