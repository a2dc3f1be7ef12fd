use defmt::info;
use embassy_executor::SpawnToken;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use keys::KeyMap;
use static_cell::StaticCell;
use synth_engine::{SAMPLE_RATE, SAMPLES_PER_TICK, SynthEngine};

use crate::audio_task::{PwmDuty, TimerSampleClock};
use crate::hardware::AudioHardware;
use crate::key_scan_task::KEY_SIGNAL;

/// Ticks between status logs, roughly one second
const STATUS_INTERVAL: u32 = SAMPLE_RATE / SAMPLES_PER_TICK as u32;

pub struct SynthEngineTaskState<'ch, 'a> {
    synth_engine: SynthEngine<'ch, CriticalSectionRawMutex>,
    clock: TimerSampleClock<'a>,
    output: PwmDuty<'a>,
}

impl<'ch, 'a> SynthEngineTaskState<'ch, 'a> {
    pub fn new(
        synth_engine: SynthEngine<'ch, CriticalSectionRawMutex>,
        clock: TimerSampleClock<'a>,
        output: PwmDuty<'a>,
    ) -> SynthEngineTaskState<'ch, 'a> {
        SynthEngineTaskState {
            synth_engine,
            clock,
            output,
        }
    }
}

pub static SYNTH_ENGINE_TASK_STATE: StaticCell<SynthEngineTaskState> = StaticCell::new();

pub fn create_task(audio: AudioHardware<'static>) -> SpawnToken<impl Sized> {
    let synth_engine = SynthEngine::new(&KEY_SIGNAL, KeyMap::DEFAULT);
    let output = PwmDuty::new(audio.pwm);
    let clock = TimerSampleClock::start(audio.sample_timer);

    synth_engine_task(SYNTH_ENGINE_TASK_STATE.init(SynthEngineTaskState::new(
        synth_engine,
        clock,
        output,
    )))
}

#[embassy_executor::task]
pub async fn synth_engine_task(state: &'static mut SynthEngineTaskState<'static, 'static>) {
    info!("Synth engine task started");

    let mut counter: u32 = 0;

    loop {
        state
            .synth_engine
            .tick(&mut state.clock, &mut state.output)
            .await;

        if counter == 0 {
            info!(
                "Instrument {}, {} active voices",
                state.synth_engine.instrument().current().name,
                state.synth_engine.get_voice_bank().count_active_voices()
            );
        }

        counter = (counter + 1) % STATUS_INTERVAL;
    }
}
