#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_halt as _};

#[cfg(target_os = "none")]
#[rtic::app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use kitchen_timer::{
        Board, ButtonBank, Controller, PinBuzzer, SegmentDisplay, Signal, SignalSource, Signals,
        TimerConfig,
    };
    use rp_pico::hal::{
        clocks::init_clocks_and_plls,
        fugit::ExtU32,
        gpio::{DynPinId, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp},
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Alarm2, Timer},
        watchdog::Watchdog,
    };

    const CONFIG: TimerConfig = TimerConfig::DEFAULT;

    type OutPin = Pin<DynPinId, FunctionSioOutput, PullDown>;
    type InPin = Pin<DynPinId, FunctionSioInput, PullUp>;

    // Shared resources (raised by the interrupts, consumed by idle)
    #[shared]
    struct Shared {
        signals: Signals,
        buttons: ButtonBank<InPin>,
    }

    #[local]
    struct Local {
        refresh_alarm: Alarm0,
        second_alarm: Alarm1,
        sample_alarm: Alarm2,
        display: SegmentDisplay<OutPin>,
        buzzer: PinBuzzer<OutPin>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            CONFIG.xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

        let mut refresh_alarm = timer.alarm_0().unwrap();
        refresh_alarm.schedule(CONFIG.refresh_period_us.micros()).unwrap();
        refresh_alarm.enable_interrupt();

        let mut second_alarm = timer.alarm_1().unwrap();
        second_alarm.schedule(CONFIG.second_period_us.micros()).unwrap();
        second_alarm.enable_interrupt();

        let mut sample_alarm = timer.alarm_2().unwrap();
        sample_alarm.schedule(CONFIG.button_sample_period_us.micros()).unwrap();
        sample_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        // Segments a..g, dp
        let segments = [
            pins.gpio2.into_push_pull_output().into_dyn_pin(),
            pins.gpio3.into_push_pull_output().into_dyn_pin(),
            pins.gpio4.into_push_pull_output().into_dyn_pin(),
            pins.gpio5.into_push_pull_output().into_dyn_pin(),
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
            pins.gpio9.into_push_pull_output().into_dyn_pin(),
        ];
        // Digit selects, slot 0 (rightmost) first
        let digits = [
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
        ];
        let display = SegmentDisplay::new(
            digits,
            segments,
            pins.gpio14.into_push_pull_output().into_dyn_pin(),
            pins.gpio15.into_push_pull_output().into_dyn_pin(),
        );
        let buzzer = PinBuzzer::new(pins.gpio16.into_push_pull_output().into_dyn_pin());

        // Low unit, high unit, down, up
        let buttons = ButtonBank::new(
            [
                pins.gpio17.into_pull_up_input().into_dyn_pin(),
                pins.gpio18.into_pull_up_input().into_dyn_pin(),
                pins.gpio19.into_pull_up_input().into_dyn_pin(),
                pins.gpio20.into_pull_up_input().into_dyn_pin(),
            ],
            CONFIG.debounce_samples,
        );

        defmt::info!(
            "kitchen timer ready, {=u32} us per display frame",
            CONFIG.frame_period_us()
        );

        (
            Shared {
                signals: Signals::new(),
                buttons,
            },
            Local {
                refresh_alarm,
                second_alarm,
                sample_alarm,
                display,
                buzzer,
            },
            init::Monotonics(),
        )
    }

    // Outer driver: edit, count down, repeat. Busy-polls the flags.
    #[idle(shared = [signals, buttons], local = [display, buzzer])]
    fn idle(ctx: idle::Context) -> ! {
        let mut signals = ctx.shared.signals;
        let mut buttons = ctx.shared.buttons;
        let mut board = Board {
            signals: |signal: Signal| signals.lock(|s| s.take(signal)),
            display: ctx.local.display,
            buttons: || buttons.lock(|b| b.mask()),
            buzzer: ctx.local.buzzer,
        };

        let mut controller = Controller::new(CONFIG);
        loop {
            controller.run_set_time(&mut board);
            controller.run_countdown(&mut board);
        }
    }

    // Hardware Task: display refresh tick
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [signals], local = [refresh_alarm])]
    fn refresh_tick(mut ctx: refresh_tick::Context) {
        let alarm = ctx.local.refresh_alarm;
        alarm.clear_interrupt();
        alarm.schedule(CONFIG.refresh_period_us.micros()).ok();

        ctx.shared.signals.lock(|s| s.raise(Signal::Refresh));
    }

    // Hardware Task: one second tick
    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [signals], local = [second_alarm])]
    fn second_tick(mut ctx: second_tick::Context) {
        let alarm = ctx.local.second_alarm;
        alarm.clear_interrupt();
        alarm.schedule(CONFIG.second_period_us.micros()).ok();

        ctx.shared.signals.lock(|s| s.raise(Signal::Second));
    }

    // Hardware Task: button sampling, flags a fresh press
    #[task(binds = TIMER_IRQ_2, priority = 1, shared = [signals, buttons], local = [sample_alarm])]
    fn sample_buttons(mut ctx: sample_buttons::Context) {
        let alarm = ctx.local.sample_alarm;
        alarm.clear_interrupt();
        alarm.schedule(CONFIG.button_sample_period_us.micros()).ok();

        let pressed = ctx.shared.buttons.lock(|b| b.sample());
        if pressed {
            ctx.shared.signals.lock(|s| s.raise(Signal::Buttons));
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    println!("kitchen-timer is firmware for the RP2040 (thumbv6m-none-eabi)");
}
