use defmt::{info, warn};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::peripherals;
use embassy_stm32::timer::low_level::Timer;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use synth_engine::{PWM_PERIOD, PwmOutput, SampleClock};

/// 72 MHz / 512, one PWM period per 9-bit duty step
pub const PWM_CARRIER_HZ: u32 = 140_625;

/// Raised by the TIM3 update interrupt once per sample period
pub static SAMPLE_BOUNDARY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[interrupt]
unsafe fn TIM3() {
    embassy_stm32::pac::TIM3.sr().modify(|w| w.set_uif(false));
    SAMPLE_BOUNDARY.signal(());
}

/// Sample barrier backed by the TIM3 update interrupt.
///
/// The signal holds a single flag, so boundaries missed while the engine was
/// busy collapse into one.
pub struct TimerSampleClock<'a> {
    // Owned so the timer keeps running for as long as the clock is used
    _timer: Timer<'a, peripherals::TIM3>,
}

impl<'a> TimerSampleClock<'a> {
    pub fn start(timer: Timer<'a, peripherals::TIM3>) -> Self {
        SAMPLE_BOUNDARY.reset();

        timer.enable_update_interrupt(true);
        timer.start();

        interrupt::TIM3.set_priority(Priority::P1);
        unsafe { interrupt::TIM3.enable() };

        info!("Sample timer running at {} Hz", synth_engine::SAMPLE_RATE);

        Self { _timer: timer }
    }
}

impl<'a> SampleClock for TimerSampleClock<'a> {
    async fn wait_for_sample(&mut self) {
        SAMPLE_BOUNDARY.wait().await;
    }
}

/// TIM1 CH1 compare register
pub struct PwmDuty<'a> {
    channel: SimplePwmChannel<'a, peripherals::TIM1>,
}

impl<'a> PwmDuty<'a> {
    pub fn new(channel: SimplePwmChannel<'a, peripherals::TIM1>) -> Self {
        let max_duty = channel.max_duty_cycle();
        if max_duty != PWM_PERIOD {
            warn!("PWM period is {} counts, expected {}", max_duty, PWM_PERIOD);
        }

        Self { channel }
    }
}

impl<'a> PwmOutput for PwmDuty<'a> {
    fn set_duty(&mut self, duty: u16) {
        self.channel.set_duty_cycle(duty);
    }
}
