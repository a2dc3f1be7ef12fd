use defmt::{Format, debug, trace};

use crate::{
    adsr::{ADSR, ADSRStage},
    instrument::Instrument,
    wavetable::{FmOscillator, tone_phase_increment},
};

/// Public view of one voice slot
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceState {
    pub key: u8,
    pub stage: ADSRStage,
    pub level: u16,
    pub age: u16,
    pub fm_exponential: u16,
    pub amplitude: u8,
    pub fm_amplitude: u16,
}

#[derive(Format, Debug, Default, Clone, Copy)]
pub(crate) struct Voice {
    pub(crate) key: u8,
    /// Ticks since the note started, wraps at 16 bits
    pub(crate) age: u16,
    pub(crate) base_amplitude: u8,
    pub(crate) phase_increment: u16,
    pub(crate) fm_phase_increment: u16,
    pub(crate) fm_amplitude_start: u16,
    pub(crate) fm_amplitude_delta: i16,
    pub(crate) fm_exponential: u16,
    pub(crate) fm_decay: u16,
    pub(crate) adsr: ADSR,
    pub(crate) oscillator: FmOscillator,
}

impl Voice {
    pub(crate) fn is_idle(&self) -> bool {
        self.adsr.is_idle()
    }

    pub(crate) fn play_note(&mut self, key: u8, instrument: &Instrument) {
        let phase_increment =
            tone_phase_increment(instrument.pitch_offset as usize + key as usize);

        self.oscillator.reset_phase();
        self.key = key;
        self.age = 0;
        self.base_amplitude = instrument.loudness;
        self.phase_increment = phase_increment;
        self.fm_phase_increment =
            (phase_increment as u32 * instrument.fm_ratio as u32 / 256) as u16;
        // The modulation depth decays from start towards end, so the end
        // value is the base and the difference rides on the exponential
        self.fm_amplitude_start = instrument.fm_amplitude_end;
        self.fm_amplitude_delta =
            (instrument.fm_amplitude_start as i16).wrapping_sub(instrument.fm_amplitude_end as i16);
        self.fm_exponential = u16::MAX;
        self.fm_decay = instrument.fm_decay;
        self.adsr.play(instrument.adsr_config());
    }

    /// Discrete exponential decay of the modulation depth, `exp -= exp * rate / 65536`
    pub(crate) fn decay_fm(&mut self) {
        let step = (self.fm_exponential as u32 * self.fm_decay as u32) >> 16;
        self.fm_exponential -= step as u16;
    }

    pub(crate) fn fm_amplitude(&self) -> u16 {
        let swing = (self.fm_amplitude_delta as i32 * self.fm_exponential as i32) >> 16;
        (self.fm_amplitude_start as i32).wrapping_add(swing) as u16
    }

    pub(crate) fn amplitude(&self) -> u8 {
        let envelope = self.adsr.level() >> 8;
        ((self.base_amplitude as u16).wrapping_mul(envelope) >> 8) as u8
    }

    /// Pushes the per-tick control values into the sample-rate oscillator.
    pub(crate) fn refresh(&mut self) {
        let fm_amplitude = self.fm_amplitude();
        let amplitude = self.amplitude();
        self.oscillator.set_parameters(
            self.phase_increment,
            self.fm_phase_increment,
            fm_amplitude,
            amplitude,
        );
    }

    fn state(&self) -> VoiceState {
        VoiceState {
            key: self.key,
            stage: self.adsr.stage(),
            level: self.adsr.level(),
            age: self.age,
            fm_exponential: self.fm_exponential,
            amplitude: self.oscillator.amplitude(),
            fm_amplitude: self.oscillator.fm_amplitude(),
        }
    }
}

/// Fixed pool of voices with retrigger, idle-first and steal-oldest allocation.
#[derive(Debug, Clone, Copy)]
pub struct VoiceBank<const N: usize> {
    pub(crate) voices: [Voice; N],
}

impl<const N: usize> Default for VoiceBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VoiceBank<N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "a voice bank needs at least one voice") };

        Self {
            voices: [Voice::default(); N],
        }
    }

    /// Picks the slot a press of `key` should use. Never fails.
    ///
    /// A sounding voice already holding the key wins, then the lowest idle
    /// voice, then the oldest note (lowest index on equal age).
    pub fn find_voice(&self, key: u8) -> usize {
        if let Some(index) = self
            .voices
            .iter()
            .position(|voice| !voice.is_idle() && voice.key == key)
        {
            return index;
        }

        if let Some(index) = self.voices.iter().position(Voice::is_idle) {
            return index;
        }

        let mut oldest = 0;
        for (index, voice) in self.voices.iter().enumerate() {
            if voice.age > self.voices[oldest].age {
                oldest = index;
            }
        }

        debug!(
            "Stealing voice {} (key {}, age {})",
            oldest, self.voices[oldest].key, self.voices[oldest].age
        );
        oldest
    }

    pub fn assign(&mut self, index: usize, key: u8, instrument: &Instrument) {
        trace!("Voice {} plays key {} on {}", index, key, instrument.name);
        self.voices[index].play_note(key, instrument);
    }

    pub fn play_note(&mut self, key: u8, instrument: &Instrument) -> usize {
        let index = self.find_voice(key);
        self.assign(index, key, instrument);
        index
    }

    pub fn release_note(&mut self, key: u8) {
        for voice in self.voices.iter_mut() {
            if voice.key == key && !voice.is_idle() {
                voice.adsr.stop_playing();
            }
        }
    }

    pub fn decay_fm(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.decay_fm();
        }
    }

    /// Steps every envelope and ages every voice, idle ones included.
    pub fn step_envelopes(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.adsr.step();
            voice.age = voice.age.wrapping_add(1);
        }
    }

    pub fn refresh_voice(&mut self, index: usize) {
        self.voices[index].refresh();
    }

    pub fn refresh_all(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.refresh();
        }
    }

    /// Runs every oscillator for one sample and returns the 16-bit wrapping sum.
    #[inline(always)]
    pub fn next_sample(&mut self) -> i16 {
        self.voices
            .iter_mut()
            .fold(0i16, |sum, voice| sum.wrapping_add(voice.oscillator.next_sample()))
    }

    pub fn voice_state(&self, index: usize) -> VoiceState {
        self.voices[index].state()
    }

    pub fn count_active_voices(&self) -> usize {
        self.voices.iter().filter(|voice| !voice.is_idle()).count()
    }
}
