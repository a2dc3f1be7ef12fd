#![cfg_attr(not(test), no_std)]

pub mod adsr;
pub mod instrument;
mod voice_bank;
pub mod wavetable;

/// Sample rate in Hz, one PWM duty update per period
pub const SAMPLE_RATE: u32 = 31_250;

/// PWM output resolution, duty values are `0..PWM_PERIOD`
pub const PWM_RESOLUTION_BITS: u32 = 9;
pub const PWM_PERIOD: u16 = 1 << PWM_RESOLUTION_BITS;
pub const PWM_MIDPOINT: u16 = PWM_PERIOD / 2;

/// Sample periods per control tick (1.024 ms at 31250 Hz)
pub const SAMPLES_PER_TICK: usize = 32;

pub const VOICE_COUNT: usize = 4;

/// Note the instrument-select key plays, A above key 0
pub const REFERENCE_KEY: u8 = 9;

/// Control steps in a tick, each preceded by one sample update
const CONTROL_STEPS: usize = 7 + VOICE_COUNT;

use defmt::trace;
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use keys::{KeyEvents, KeyMap, KeyMask, KeyReader, LogicalKey};

pub use adsr::{ADSR, ADSRConfig, ADSRStage};
pub use instrument::{INSTRUMENT_COUNT, INSTRUMENTS, Instrument, InstrumentSelector};
pub use voice_bank::{VoiceBank, VoiceState};

/// Timing barrier of the audio path.
///
/// Resolves at the next sample boundary. This is the only point where the
/// engine suspends; a boundary that passed while the engine was busy resolves
/// immediately and is not queued.
#[allow(async_fn_in_trait)]
pub trait SampleClock {
    async fn wait_for_sample(&mut self);
}

/// Hardware compare register receiving one duty value per sample.
pub trait PwmOutput {
    fn set_duty(&mut self, duty: u16);
}

/// Converts the summed voice output to a duty value around the midpoint.
///
/// Integer division truncates towards zero, nothing is clamped.
#[inline(always)]
pub fn duty_from_mix(mix: i16) -> u16 {
    (mix / 128).wrapping_add(PWM_MIDPOINT as i16) as u16
}

pub struct SynthEngine<'ch, M: RawMutex> {
    voice_bank: VoiceBank<VOICE_COUNT>,
    key_reader: KeyReader<'ch, M>,
    instrument: InstrumentSelector,
}

impl<'ch, M: RawMutex> SynthEngine<'ch, M> {
    pub fn new(key_signal: &'ch Signal<M, KeyMask>, key_map: KeyMap) -> Self {
        Self {
            voice_bank: VoiceBank::new(),
            key_reader: KeyReader::new(key_signal, key_map),
            instrument: InstrumentSelector::new(),
        }
    }

    pub fn get_voice_bank(&self) -> &VoiceBank<VOICE_COUNT> {
        &self.voice_bank
    }

    pub fn instrument(&self) -> &InstrumentSelector {
        &self.instrument
    }

    /// Jumps straight to a preset, wrapping out of range indices.
    pub fn select_instrument(&mut self, index: usize) {
        self.instrument.select(index);
    }

    /// Runs one control tick, producing exactly [`SAMPLES_PER_TICK`] samples.
    ///
    /// Control work is cut into short steps and a sample update is performed
    /// before each of them, so the gap between two duty writes is bounded by
    /// the slowest single step.
    pub async fn tick<C: SampleClock, O: PwmOutput>(&mut self, clock: &mut C, output: &mut O) {
        self.render_sample(clock, output).await;
        let events = self.key_reader.read_events();

        self.render_sample(clock, output).await;
        let (pressed, released) = self.resolve_instrument_select(events);

        self.render_sample(clock, output).await;
        let voice = pressed.map(|key| (self.voice_bank.find_voice(key), key));

        self.render_sample(clock, output).await;
        if let Some((index, key)) = voice {
            self.voice_bank.assign(index, key, self.instrument.current());
        }

        self.render_sample(clock, output).await;
        if let Some(key) = released {
            self.voice_bank.release_note(key);
        }

        self.render_sample(clock, output).await;
        self.voice_bank.decay_fm();

        self.render_sample(clock, output).await;
        self.voice_bank.step_envelopes();

        for index in 0..VOICE_COUNT {
            self.render_sample(clock, output).await;
            self.voice_bank.refresh_voice(index);
        }

        for _ in CONTROL_STEPS..SAMPLES_PER_TICK {
            self.render_sample(clock, output).await;
        }
    }

    /// Waits for the sample boundary and writes the next duty value.
    pub async fn render_sample<C: SampleClock, O: PwmOutput>(
        &mut self,
        clock: &mut C,
        output: &mut O,
    ) {
        clock.wait_for_sample().await;
        output.set_duty(duty_from_mix(self.voice_bank.next_sample()));
    }

    /// Maps key events to note keys, advancing the instrument on a select press.
    fn resolve_instrument_select(&mut self, events: KeyEvents) -> (Option<u8>, Option<u8>) {
        let pressed = match events.pressed {
            LogicalKey::Note(key) => Some(key),
            LogicalKey::InstrumentSelect => {
                self.instrument.advance();
                Some(REFERENCE_KEY)
            }
            LogicalKey::NoKey => None,
        };

        let released = match events.released {
            LogicalKey::Note(key) => Some(key),
            LogicalKey::InstrumentSelect => Some(REFERENCE_KEY),
            LogicalKey::NoKey => None,
        };

        if pressed.is_some() || released.is_some() {
            trace!("Pressed {}, released {}", pressed, released);
        }

        (pressed, released)
    }

    #[cfg(test)]
    pub(crate) fn get_voice_bank_mut(&mut self) -> &mut VoiceBank<VOICE_COUNT> {
        &mut self.voice_bank
    }
}
