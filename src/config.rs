/// Timing and input constants shared by the firmware and the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    /// External crystal frequency.
    pub xtal_freq_hz: u32,
    /// Period of the display refresh tick. One digit is drawn per tick.
    pub refresh_period_us: u32,
    /// Period of the blink / countdown tick.
    pub second_period_us: u32,
    /// Period at which the buttons are sampled for debouncing.
    pub button_sample_period_us: u32,
    /// Number of second ticks per countdown decrement.
    pub seconds_per_unit: u8,
    /// Consecutive identical samples before a button changes state (1..=8).
    pub debounce_samples: u8,
}

impl TimerConfig {
    pub const DEFAULT: Self = Self {
        xtal_freq_hz: 12_000_000,
        refresh_period_us: 2_000,
        second_period_us: 1_000_000,
        button_sample_period_us: 5_000,
        seconds_per_unit: 1,
        debounce_samples: 4,
    };

    /// Full refresh of all four digits.
    pub const fn frame_period_us(&self) -> u32 {
        self.refresh_period_us * 4
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame_is_flicker_free() {
        // 8 ms per frame is 125 Hz, well above what the eye resolves.
        assert_eq!(TimerConfig::DEFAULT.frame_period_us(), 8_000);
        assert_eq!(TimerConfig::default().seconds_per_unit, 1);
    }
}
