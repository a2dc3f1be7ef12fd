use defmt::info;
use embassy_stm32::Config;
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::Timer;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use keys::matrix::{COLUMNS, ROWS};

pub struct KeyboardHardware<'a> {
    /// Driven low one at a time while scanning
    pub rows: [Output<'a>; ROWS],
    /// Pulled up, read low when the key on the active row is held
    pub columns: [Input<'a>; COLUMNS],
}

pub struct AudioHardware<'a> {
    pub pwm: SimplePwmChannel<'a, peripherals::TIM1>,
    pub sample_timer: Timer<'a, peripherals::TIM3>,
}

pub struct Hardware<'a> {
    pub keyboard: KeyboardHardware<'a>,
    pub audio: AudioHardware<'a>,
}

/// 72 MHz from the 8 MHz crystal
fn clock_config() -> Config {
    use embassy_stm32::rcc::*;

    let mut config = Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(8_000_000),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll = Some(Pll {
        src: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    config
}

impl<'a> Hardware<'a> {
    pub fn get() -> Hardware<'a> {
        info!("Initializing");
        let peripherals = embassy_stm32::init(clock_config());

        // PB3 and PB4 carry JTAG after reset, keep SWD only so the matrix can use them
        embassy_stm32::pac::RCC
            .apb2enr()
            .modify(|w| w.set_afioen(true));
        embassy_stm32::pac::AFIO
            .mapr()
            .modify(|w| w.set_swj_cfg(0b010));

        let keyboard = crate::get_keyboard_hardware!(peripherals);
        let audio = crate::get_audio_hardware!(peripherals);

        Hardware { keyboard, audio }
    }
}

#[macro_export]
macro_rules! get_keyboard_hardware {
    ($peripherals:ident) => {{
        use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};

        let rows = [
            Output::new($peripherals.PB12, Level::High, Speed::Low),
            Output::new($peripherals.PB13, Level::High, Speed::Low),
            Output::new($peripherals.PB14, Level::High, Speed::Low),
            Output::new($peripherals.PB15, Level::High, Speed::Low),
        ];

        let columns = [
            Input::new($peripherals.PB3, Pull::Up),
            Input::new($peripherals.PB4, Pull::Up),
            Input::new($peripherals.PB5, Pull::Up),
            Input::new($peripherals.PB6, Pull::Up),
            Input::new($peripherals.PB7, Pull::Up),
            Input::new($peripherals.PB8, Pull::Up),
        ];

        $crate::hardware::KeyboardHardware { rows, columns }
    }};
}

#[macro_export]
macro_rules! get_audio_hardware {
    ($peripherals:ident) => {{
        use embassy_stm32::gpio::OutputType;
        use embassy_stm32::time::Hertz;
        use embassy_stm32::timer::low_level::{CountingMode, Timer};
        use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};

        let pwm = SimplePwm::new(
            $peripherals.TIM1,
            Some(PwmPin::new($peripherals.PA8, OutputType::PushPull)),
            None,
            None,
            None,
            Hertz($crate::audio_task::PWM_CARRIER_HZ),
            CountingMode::EdgeAlignedUp,
        );
        let mut pwm = pwm.split().ch1;
        pwm.enable();

        let sample_timer = Timer::new($peripherals.TIM3);
        sample_timer.set_frequency(Hertz(synth_engine::SAMPLE_RATE));

        $crate::hardware::AudioHardware { pwm, sample_timer }
    }};
}
